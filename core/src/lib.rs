#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Path Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier assigned to a path tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathId(u32);

impl PathId {
    /// Creates a new path identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a path segment, scoped to its owning [`PathId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(u32);

impl SegmentId {
    /// Creates a new segment identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Axis-aligned box expressed in continuous world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    min: Vec2,
    size: Vec2,
}

impl Aabb {
    /// Constructs a box from its minimum corner and size.
    #[must_use]
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Constructs a box centred on the provided point.
    #[must_use]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    /// Minimum corner of the box.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Width and height of the box.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Centre point of the box.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Reports whether the two boxes share any interior area.
    ///
    /// Boxes that merely touch along an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.min.x + other.size.x
            && other.min.x < self.min.x + self.size.x
            && self.min.y < other.min.y + other.size.y
            && other.min.y < self.min.y + self.size.y
    }
}

/// One of the four sides of a path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Toward decreasing column indices.
    Left,
    /// Toward increasing column indices.
    Right,
    /// Toward decreasing row indices.
    Top,
    /// Toward increasing row indices.
    Bottom,
}

impl Side {
    /// All four sides in the deterministic traversal order used by the world.
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// Returns the side a child must expose to connect back to its parent.
    #[must_use]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    /// Dense index of the side, used for child-slot addressing.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
            Side::Top => 2,
            Side::Bottom => 3,
        }
    }

    /// Cell adjacent to `cell` across this side, if one exists.
    ///
    /// Only the lower bound is validated here; upper bounds belong to the
    /// occupancy grid that knows the map dimensions.
    #[must_use]
    pub fn neighbor(self, cell: CellCoord) -> Option<CellCoord> {
        match self {
            Side::Left => cell
                .column()
                .checked_sub(1)
                .map(|column| CellCoord::new(column, cell.row())),
            Side::Right => cell
                .column()
                .checked_add(1)
                .map(|column| CellCoord::new(column, cell.row())),
            Side::Top => cell
                .row()
                .checked_sub(1)
                .map(|row| CellCoord::new(cell.column(), row)),
            Side::Bottom => cell
                .row()
                .checked_add(1)
                .map(|row| CellCoord::new(cell.column(), row)),
        }
    }
}

/// Structural connectivity of a segment: which sides may ever hold a child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMask {
    left: bool,
    right: bool,
    top: bool,
    bottom: bool,
}

impl SideMask {
    /// Creates a mask from explicit per-side flags.
    #[must_use]
    pub const fn new(left: bool, right: bool, top: bool, bottom: bool) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Reports whether the mask permits connections on the provided side.
    #[must_use]
    pub const fn permits(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }
}

/// Connectivity variant of a path segment.
///
/// Each variant fixes, at construction time, which of the four sides are
/// structurally able to hold a child. Side occupancy is dynamic and tracked
/// separately by the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentVariant {
    /// All four sides connectable.
    Open,
    /// Left and right only.
    Horizontal,
    /// Top and bottom only.
    Vertical,
    /// Elbow opening left and bottom.
    LeftBottom,
    /// Elbow opening right and bottom.
    RightBottom,
    /// Elbow opening left and top.
    LeftTop,
    /// Elbow opening right and top.
    RightTop,
    /// Tee opening left, right and bottom.
    TeeBottom,
    /// Tee opening left, right and top.
    TeeTop,
    /// Tee opening left, top and bottom.
    TeeLeft,
    /// Tee opening right, top and bottom.
    TeeRight,
}

impl SegmentVariant {
    /// Every variant, in the order used for deterministic selection.
    pub const ALL: [SegmentVariant; 11] = [
        SegmentVariant::Open,
        SegmentVariant::Horizontal,
        SegmentVariant::Vertical,
        SegmentVariant::LeftBottom,
        SegmentVariant::RightBottom,
        SegmentVariant::LeftTop,
        SegmentVariant::RightTop,
        SegmentVariant::TeeBottom,
        SegmentVariant::TeeTop,
        SegmentVariant::TeeLeft,
        SegmentVariant::TeeRight,
    ];

    /// Fixed structural connectivity of the variant.
    #[must_use]
    pub const fn connectivity(self) -> SideMask {
        match self {
            SegmentVariant::Open => SideMask::new(true, true, true, true),
            SegmentVariant::Horizontal => SideMask::new(true, true, false, false),
            SegmentVariant::Vertical => SideMask::new(false, false, true, true),
            SegmentVariant::LeftBottom => SideMask::new(true, false, false, true),
            SegmentVariant::RightBottom => SideMask::new(false, true, false, true),
            SegmentVariant::LeftTop => SideMask::new(true, false, true, false),
            SegmentVariant::RightTop => SideMask::new(false, true, true, false),
            SegmentVariant::TeeBottom => SideMask::new(true, true, false, true),
            SegmentVariant::TeeTop => SideMask::new(true, true, true, false),
            SegmentVariant::TeeLeft => SideMask::new(true, false, true, true),
            SegmentVariant::TeeRight => SideMask::new(false, true, true, true),
        }
    }

    /// Reports whether the variant structurally permits the provided side.
    #[must_use]
    pub const fn permits(self, side: Side) -> bool {
        self.connectivity().permits(side)
    }
}

/// The four damage channels recognised by the combat model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    /// Physical damage, depleted first on direct hits.
    Physical,
    /// Fire damage, fed by burn buildup.
    Fire,
    /// Poison damage, fed by poison buildup.
    Poison,
    /// Magic damage, the last shield before hit points.
    Magic,
}

impl DamageKind {
    /// All damage channels in shield-precedence order.
    pub const ALL: [DamageKind; 4] = [
        DamageKind::Physical,
        DamageKind::Fire,
        DamageKind::Poison,
        DamageKind::Magic,
    ];
}

/// Targeting strategy a tower uses to pick between its snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetingStrategy {
    /// Fire at the first cell reached by the aggregation walk that held
    /// enemies, which is the cell nearest the base in path order.
    Closest,
    /// Fire at the cell holding the highest-HP enemy in range.
    HighestHp,
    /// Fire at the cell holding the highest residual shield of one kind.
    HighestShield(DamageKind),
}

/// Damage payload carried by a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectilePayload {
    /// Direct-hit damage resolved through the shield chain on detonation.
    pub impact: f32,
    /// Bleed buildup added on detonation.
    pub bleed: f32,
    /// Poison buildup added on detonation.
    pub poison: f32,
    /// Burn buildup added on detonation.
    pub burn: f32,
}

impl ProjectilePayload {
    /// Creates a payload from explicit per-channel amounts.
    #[must_use]
    pub const fn new(impact: f32, bleed: f32, poison: f32, burn: f32) -> Self {
        Self {
            impact,
            bleed,
            poison,
            burn,
        }
    }
}

/// Immutable-per-tick firing solution: a position plus a comparison value.
///
/// Snapshots deliberately hold no live enemy reference; they describe where
/// the interesting cell was when the aggregation walk ran.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetSnapshot {
    /// World position of the cell the snapshot points at.
    pub position: Vec2,
    /// Statistic used purely for comparison during aggregation.
    pub value: f32,
}

/// The five lazily created target snapshots a tower rebuilds every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetTable {
    /// First aggregation cell containing enemies, in path order.
    pub closest: Option<TargetSnapshot>,
    /// Cell holding the highest-HP enemy seen in range.
    pub highest_hp: Option<TargetSnapshot>,
    /// Cell holding the highest residual physical shield.
    pub highest_shield_physical: Option<TargetSnapshot>,
    /// Cell holding the highest residual fire shield.
    pub highest_shield_fire: Option<TargetSnapshot>,
    /// Cell holding the highest residual poison shield.
    pub highest_shield_poison: Option<TargetSnapshot>,
    /// Cell holding the highest residual magic shield.
    pub highest_shield_magic: Option<TargetSnapshot>,
}

impl TargetTable {
    /// Clears every snapshot ahead of a fresh aggregation pass.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot tracking the highest residual shield of the given kind.
    #[must_use]
    pub const fn highest_shield(&self, kind: DamageKind) -> Option<TargetSnapshot> {
        match kind {
            DamageKind::Physical => self.highest_shield_physical,
            DamageKind::Fire => self.highest_shield_fire,
            DamageKind::Poison => self.highest_shield_poison,
            DamageKind::Magic => self.highest_shield_magic,
        }
    }

    /// Mutable slot for the highest residual shield of the given kind.
    pub fn highest_shield_mut(&mut self, kind: DamageKind) -> &mut Option<TargetSnapshot> {
        match kind {
            DamageKind::Physical => &mut self.highest_shield_physical,
            DamageKind::Fire => &mut self.highest_shield_fire,
            DamageKind::Poison => &mut self.highest_shield_poison,
            DamageKind::Magic => &mut self.highest_shield_magic,
        }
    }

    /// Resolves a strategy to the snapshot the tower should fire at.
    #[must_use]
    pub const fn select(&self, strategy: TargetingStrategy) -> Option<TargetSnapshot> {
        match strategy {
            TargetingStrategy::Closest => self.closest,
            TargetingStrategy::HighestHp => self.highest_hp,
            TargetingStrategy::HighestShield(kind) => self.highest_shield(kind),
        }
    }
}

/// Types of towers that can be constructed on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Bolt thrower: heavy impact plus bleed, hunts the highest HP.
    Ballista,
    /// Fire brazier: burn buildup against whatever is nearest the base.
    Brazier,
    /// Curse caster: poison buildup against the highest poison shield.
    Hexcaster,
}

impl TowerKind {
    /// Every constructible tower kind.
    pub const ALL: [TowerKind; 3] = [TowerKind::Ballista, TowerKind::Brazier, TowerKind::Hexcaster];

    /// Static parameters of the tower kind.
    #[must_use]
    pub const fn spec(self) -> TowerSpec {
        match self {
            TowerKind::Ballista => TowerSpec {
                fire_interval: Duration::from_millis(1000),
                range_factor: 5.0,
                strategy: TargetingStrategy::HighestHp,
                payload: ProjectilePayload::new(100.0, 150.0, 0.0, 0.0),
            },
            TowerKind::Brazier => TowerSpec {
                fire_interval: Duration::from_millis(2000),
                range_factor: 3.5,
                strategy: TargetingStrategy::Closest,
                payload: ProjectilePayload::new(40.0, 0.0, 0.0, 160.0),
            },
            TowerKind::Hexcaster => TowerSpec {
                fire_interval: Duration::from_millis(3000),
                range_factor: 6.0,
                strategy: TargetingStrategy::HighestShield(DamageKind::Poison),
                payload: ProjectilePayload::new(25.0, 0.0, 140.0, 0.0),
            },
        }
    }
}

/// Static parameters shared by all towers of one kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSpec {
    /// Minimum wall-clock interval between shots.
    pub fire_interval: Duration,
    /// Range radius expressed in multiples of the cell length.
    pub range_factor: f32,
    /// Snapshot the tower fires at.
    pub strategy: TargetingStrategy,
    /// Payload of the projectiles the tower launches.
    pub payload: ProjectilePayload,
}

/// Types of enemies a spawner can admit into the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast, fragile runner.
    Scuttler,
    /// Slow walker behind a physical shield.
    Carapace,
    /// Average walker behind a magic ward.
    Warded,
}

impl EnemyKind {
    /// Every spawnable enemy kind.
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Scuttler, EnemyKind::Carapace, EnemyKind::Warded];

    /// Static parameters of the enemy kind.
    #[must_use]
    pub const fn spec(self) -> EnemySpec {
        match self {
            EnemyKind::Scuttler => EnemySpec {
                hp: 10.0,
                hp_step: 10.0,
                speed: 45.0,
                attack: 1.0,
                defense_physical: 0.05,
                defense_fire: 0.05,
                defense_poison: 0.05,
                defense_magic: 0.05,
                shield_physical: 0.0,
                shield_fire: 0.0,
                shield_poison: 0.0,
                shield_magic: 0.0,
            },
            EnemyKind::Carapace => EnemySpec {
                hp: 30.0,
                hp_step: 12.0,
                speed: 24.0,
                attack: 2.0,
                defense_physical: 0.25,
                defense_fire: 0.05,
                defense_poison: 0.05,
                defense_magic: 0.05,
                shield_physical: 60.0,
                shield_fire: 0.0,
                shield_poison: 0.0,
                shield_magic: 0.0,
            },
            EnemyKind::Warded => EnemySpec {
                hp: 20.0,
                hp_step: 10.0,
                speed: 30.0,
                attack: 1.0,
                defense_physical: 0.05,
                defense_fire: 0.05,
                defense_poison: 0.05,
                defense_magic: 0.3,
                shield_physical: 0.0,
                shield_fire: 0.0,
                shield_poison: 0.0,
                shield_magic: 80.0,
            },
        }
    }
}

/// Static parameters shared by all enemies of one kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpec {
    /// Base hit points at spawn ordinal zero.
    pub hp: f32,
    /// Additional hit points granted per spawn ordinal.
    pub hp_step: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Lives drained per second while camped at the base.
    pub attack: f32,
    /// Fractional physical defense in `0..=1`.
    pub defense_physical: f32,
    /// Fractional fire defense in `0..=1`.
    pub defense_fire: f32,
    /// Fractional poison defense in `0..=1`.
    pub defense_poison: f32,
    /// Fractional magic defense in `0..=1`.
    pub defense_magic: f32,
    /// Physical shield pool at spawn.
    pub shield_physical: f32,
    /// Fire shield pool at spawn.
    pub shield_fire: f32,
    /// Poison shield pool at spawn.
    pub shield_poison: f32,
    /// Magic shield pool at spawn.
    pub shield_magic: f32,
}

/// Reasons a path growth request may be rejected by the world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthError {
    /// No existing segment overlaps the requested point's probe box.
    #[error("no path segment near the requested point")]
    NoSegmentNearby,
    /// The touched side is structurally blocked or already holds a child.
    #[error("the touched side cannot accept a child")]
    SideBlocked,
    /// The candidate variant does not open toward its attachment point.
    #[error("the candidate variant does not open toward its parent")]
    IncompatibleVariant,
    /// The destination cell already holds a segment or tower.
    #[error("the destination cell is already occupied")]
    Occupied,
    /// The destination cell lies outside the configured map extent.
    #[error("the destination cell lies outside the map")]
    OutOfBounds,
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The destination cell holds a path segment.
    #[error("a path segment occupies the destination cell")]
    Occupied,
    /// The destination cell already holds the maximum number of towers.
    #[error("the destination cell is saturated with towers")]
    TowerLimit,
    /// The requested point lies outside the configured map extent.
    #[error("the requested point lies outside the map")]
    OutOfBounds,
}

/// Reasons an enemy spawn request may be rejected by the world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnError {
    /// The referenced path does not exist.
    #[error("the referenced path does not exist")]
    UnknownPath,
    /// The referenced segment is not currently an open leaf.
    #[error("the referenced segment is not an open leaf")]
    NotALeaf,
}

/// Reasons a projectile fire request may be rejected by the world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireError {
    /// The referenced tower does not exist.
    #[error("the referenced tower does not exist")]
    UnknownTower,
    /// The tower's fire interval has not yet elapsed.
    #[error("the tower is still reloading")]
    NotReady,
    /// The tower's strategy resolved to no snapshot this tick.
    #[error("the tower holds no target snapshot")]
    NoTarget,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Attempts to grow the path at a world-space point.
    GrowPath {
        /// Point the player touched, in world coordinates.
        at: Vec2,
    },
    /// Reverts the most recent growth on the most recently grown path.
    UndoGrowth,
    /// Attempts to place a tower of the given kind at a world-space point.
    PlaceTower {
        /// Kind of tower to construct.
        kind: TowerKind,
        /// Point the player touched, in world coordinates.
        at: Vec2,
    },
    /// Admits a new enemy at an open leaf of a path.
    SpawnEnemy {
        /// Kind of enemy to create.
        kind: EnemyKind,
        /// Path that owns the spawn leaf.
        path: PathId,
        /// Leaf segment the enemy starts from.
        leaf: SegmentId,
    },
    /// Fires the tower's strategy-selected snapshot if the cooldown allows.
    FireProjectile {
        /// Tower requested to fire.
        tower: TowerId,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a new segment was attached to a path.
    PathExtended {
        /// Path that grew.
        path: PathId,
        /// Identifier allocated to the new segment.
        segment: SegmentId,
        /// Side of the receiving segment the child was attached on.
        side: Side,
        /// Grid cell now occupied by the new segment.
        cell: CellCoord,
    },
    /// Reports that a growth request was rejected.
    GrowthRejected {
        /// Specific reason the growth failed.
        reason: GrowthError,
    },
    /// Confirms that the most recent growth was reverted.
    GrowthUndone {
        /// Path that shrank.
        path: PathId,
        /// Segment that was detached into the garbage state.
        segment: SegmentId,
        /// Grid cell that was vacated.
        cell: CellCoord,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Kind of tower that was placed.
        kind: TowerKind,
        /// Grid cell holding the tower's footprint.
        cell: CellCoord,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Kind of tower requested for placement.
        kind: TowerKind,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that an enemy entered the maze.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Kind of enemy that spawned.
        kind: EnemyKind,
        /// Cell of the leaf the enemy starts from.
        cell: CellCoord,
    },
    /// Reports that an enemy spawn request was rejected.
    SpawnRejected {
        /// Specific reason the spawn failed.
        reason: SpawnError,
    },
    /// Announces that an enemy ran out of hit points and was removed.
    EnemyDied {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
    },
    /// Reports that an enemy camped at the base drained lives this tick.
    BaseDamaged {
        /// Enemy doing the draining.
        enemy: EnemyId,
        /// Lives remaining after the drain.
        lives_remaining: f32,
    },
    /// Confirms that a tower launched a projectile.
    ProjectileLaunched {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Tower that fired it.
        tower: TowerId,
    },
    /// Reports that a projectile fire request was rejected.
    FireRejected {
        /// Tower that was asked to fire.
        tower: TowerId,
        /// Specific reason the request failed.
        reason: FireError,
    },
    /// Announces that a projectile reached its snapshot and detonated.
    ProjectileDetonated {
        /// Identifier of the spent projectile.
        projectile: ProjectileId,
    },
}

/// Immutable representation of a single path segment used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentSnapshot {
    /// Path that owns the segment.
    pub path: PathId,
    /// Identifier of the segment within its path.
    pub id: SegmentId,
    /// Grid cell the segment occupies.
    pub cell: CellCoord,
    /// Structural connectivity variant of the segment.
    pub variant: SegmentVariant,
    /// Parent segment, absent for the root.
    pub parent: Option<SegmentId>,
    /// Whether the segment currently qualifies as an open leaf.
    pub leaf: bool,
}

/// Read-only snapshot describing all attached segments in the world.
#[derive(Clone, Debug, Default)]
pub struct PathView {
    snapshots: Vec<SegmentSnapshot>,
}

impl PathView {
    /// Creates a new path view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<SegmentSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| (snapshot.path, snapshot.id));
        Self { snapshots }
    }

    /// Iterator over the captured segment snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &SegmentSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<SegmentSnapshot> {
        self.snapshots
    }
}

/// Open leaf reference handed to spawning systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeafSnapshot {
    /// Path that owns the leaf.
    pub path: PathId,
    /// Identifier of the leaf segment.
    pub segment: SegmentId,
    /// Grid cell the leaf occupies.
    pub cell: CellCoord,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Kind of the enemy.
    pub kind: EnemyKind,
    /// Centre position in world coordinates.
    pub position: Vec2,
    /// Remaining hit points.
    pub hp: f32,
    /// Remaining physical shield.
    pub shield_physical: f32,
    /// Remaining fire shield.
    pub shield_fire: f32,
    /// Remaining poison shield.
    pub shield_poison: f32,
    /// Remaining magic shield.
    pub shield_magic: f32,
    /// Path the enemy is walking.
    pub target_path: PathId,
    /// Segment the enemy is currently walking toward.
    pub target_segment: SegmentId,
}

/// Read-only snapshot describing all enemies within the maze.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Grid cell holding the tower's footprint.
    pub cell: CellCoord,
    /// Centre of the tower's range circle in world coordinates.
    pub center: Vec2,
    /// Strategy the tower fires with.
    pub strategy: TargetingStrategy,
    /// Time remaining until the tower may fire again.
    pub ready_in: Duration,
    /// Target snapshots rebuilt by the latest aggregation pass.
    pub targets: TargetTable,
}

/// Read-only snapshot describing all towers placed within the maze.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Centre position in world coordinates.
    pub position: Vec2,
    /// Snapshot position the projectile is homing toward.
    pub destination: Vec2,
    /// Damage payload delivered on detonation.
    pub payload: ProjectilePayload,
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Per-tower firing readiness consumed by the tower combat system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerFireSnapshot {
    /// Tower the snapshot describes.
    pub tower: TowerId,
    /// Time remaining until the fire interval elapses.
    pub ready_in: Duration,
    /// Whether the tower's strategy resolved to a snapshot this tick.
    pub has_target: bool,
}

/// Read-only view over per-tower firing readiness.
#[derive(Clone, Debug, Default)]
pub struct TowerFireView {
    snapshots: Vec<TowerFireSnapshot>,
}

impl TowerFireView {
    /// Creates a new fire view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerFireSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.tower);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerFireSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerFireSnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Aabb, CellCoord, DamageKind, FireError, GrowthError, PlacementError, SegmentVariant, Side,
        SpawnError, TargetSnapshot, TargetTable, TargetingStrategy, TowerId, TowerKind,
    };
    use glam::Vec2;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn side_opposite_is_an_involution() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
        }
    }

    #[test]
    fn neighbor_stops_at_the_lower_bound() {
        assert_eq!(Side::Left.neighbor(CellCoord::new(0, 3)), None);
        assert_eq!(Side::Top.neighbor(CellCoord::new(3, 0)), None);
        assert_eq!(
            Side::Right.neighbor(CellCoord::new(0, 3)),
            Some(CellCoord::new(1, 3))
        );
        assert_eq!(
            Side::Bottom.neighbor(CellCoord::new(3, 0)),
            Some(CellCoord::new(3, 1))
        );
    }

    #[test]
    fn horizontal_variant_permits_exactly_left_and_right() {
        let variant = SegmentVariant::Horizontal;
        assert!(variant.permits(Side::Left));
        assert!(variant.permits(Side::Right));
        assert!(!variant.permits(Side::Top));
        assert!(!variant.permits(Side::Bottom));
    }

    #[test]
    fn tee_variants_permit_exactly_three_sides() {
        for variant in [
            SegmentVariant::TeeBottom,
            SegmentVariant::TeeTop,
            SegmentVariant::TeeLeft,
            SegmentVariant::TeeRight,
        ] {
            let open = Side::ALL
                .into_iter()
                .filter(|side| variant.permits(*side))
                .count();
            assert_eq!(open, 3);
        }
    }

    #[test]
    fn every_side_has_a_compatible_candidate_variant() {
        for side in Side::ALL {
            let opposite = side.opposite();
            assert!(
                SegmentVariant::ALL
                    .into_iter()
                    .any(|variant| variant.permits(opposite)),
                "growth toward {side:?} must have at least one candidate",
            );
        }
    }

    #[test]
    fn target_table_select_maps_strategies_to_slots() {
        let snapshot = TargetSnapshot {
            position: Vec2::new(4.0, 2.0),
            value: 17.0,
        };
        let mut table = TargetTable::default();
        table.highest_hp = Some(snapshot);
        *table.highest_shield_mut(DamageKind::Magic) = Some(snapshot);

        assert_eq!(table.select(TargetingStrategy::HighestHp), Some(snapshot));
        assert_eq!(
            table.select(TargetingStrategy::HighestShield(DamageKind::Magic)),
            Some(snapshot)
        );
        assert_eq!(table.select(TargetingStrategy::Closest), None);
        assert_eq!(
            table.select(TargetingStrategy::HighestShield(DamageKind::Fire)),
            None
        );
    }

    #[test]
    fn aabb_overlap_excludes_touching_edges() {
        let cell = Vec2::new(10.0, 10.0);
        let left = Aabb::new(Vec2::new(0.0, 0.0), cell);
        let adjacent = Aabb::new(Vec2::new(10.0, 0.0), cell);
        let intruding = Aabb::new(Vec2::new(5.0, 5.0), cell);

        assert!(!left.overlaps(&adjacent));
        assert!(left.overlaps(&intruding));
        assert!(intruding.overlaps(&left));
    }

    #[test]
    fn tower_specs_are_well_formed() {
        for kind in TowerKind::ALL {
            let spec = kind.spec();
            assert!(spec.range_factor > 0.0);
            assert!(!spec.fire_interval.is_zero());
        }
    }

    #[test]
    fn tower_id_round_trips_through_bincode() {
        assert_round_trip(&TowerId::new(42));
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(5, 7));
    }

    #[test]
    fn segment_variant_round_trips_through_bincode() {
        assert_round_trip(&SegmentVariant::TeeLeft);
    }

    #[test]
    fn rejection_reasons_round_trip_through_bincode() {
        assert_round_trip(&GrowthError::Occupied);
        assert_round_trip(&PlacementError::TowerLimit);
        assert_round_trip(&SpawnError::NotALeaf);
        assert_round_trip(&FireError::NotReady);
    }

    #[test]
    fn strategy_round_trips_through_bincode() {
        assert_round_trip(&TargetingStrategy::HighestShield(DamageKind::Poison));
    }
}
