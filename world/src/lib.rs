#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Path Defence.
//!
//! The [`World`] owns every mutable simulation resource: the occupancy grid,
//! the growable path trees, towers, enemies and projectiles. Adapters and
//! systems mutate it exclusively through [`apply`] and read it exclusively
//! through [`query`]. One [`Command::Tick`] advances one simulation step;
//! there is no concurrency and no locking.

mod combat;
mod grid;
mod path;
mod spatial;
mod towers;

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec2;
use path_defence_core::{
    Aabb, CellCoord, Command, EnemyId, EnemyKind, Event, FireError, GrowthError, PathId,
    PlacementError, ProjectileId, ProjectilePayload, SegmentId, SegmentVariant, Side, SpawnError,
    TargetSnapshot, TowerId, TowerKind,
};

use combat::{DamageState, DotRates};
use grid::OccupancyGrid;
use path::Path;
use spatial::SpatialIndex;
use towers::{CellMaxima, TowerState};

const DEFAULT_EXTENT: f32 = 4000.0;
const DEFAULT_SPATIAL_MAP_DIM: u32 = 50;
const DEFAULT_STARTING_LIVES: f32 = 3.0;
const DEFAULT_RNG_SEED: u64 = 0x51ce_5e77_ab1e_0001;

const PROJECTILE_SPEED: f32 = 500.0;
const ARRIVAL_DISTANCE: f32 = 10.0;
const MAX_TOWERS_PER_CELL: u8 = 4;

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;

/// Construction parameters for a [`World`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    /// Side length of the square world in world units.
    pub extent: f32,
    /// Number of grid cells along each axis, shared by the occupancy grid
    /// and the spatial index.
    pub spatial_map_dim: u32,
    /// Lives the base starts with.
    pub starting_lives: f32,
    /// Poison buildup drain rate in points per second.
    pub poison_per_sec: f32,
    /// Burn buildup drain rate in points per second.
    pub burn_per_sec: f32,
    /// Bleed buildup drain rate in points per second.
    pub bleed_per_sec: f32,
    /// Seed for the deterministic variant-selection generator.
    pub rng_seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            extent: DEFAULT_EXTENT,
            spatial_map_dim: DEFAULT_SPATIAL_MAP_DIM,
            starting_lives: DEFAULT_STARTING_LIVES,
            poison_per_sec: 100.0,
            burn_per_sec: 50.0,
            bleed_per_sec: 50.0,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

struct EnemyState {
    id: EnemyId,
    kind: EnemyKind,
    position: Vec2,
    size: f32,
    speed: f32,
    attack: f32,
    damage: DamageState,
    path: PathId,
    target: SegmentId,
}

struct ProjectileState {
    id: ProjectileId,
    position: Vec2,
    size: f32,
    payload: ProjectilePayload,
    destination: TargetSnapshot,
}

/// Represents the authoritative Path Defence world state.
pub struct World {
    config: WorldConfig,
    grid: OccupancyGrid,
    paths: Vec<Path>,
    last_grown: Vec<PathId>,
    towers: Vec<TowerState>,
    enemies: Vec<EnemyState>,
    projectiles: Vec<ProjectileState>,
    spatial: SpatialIndex,
    checked: Vec<bool>,
    walk_queue: VecDeque<(usize, SegmentId)>,
    next_tower_id: u32,
    next_enemy_id: u32,
    next_projectile_id: u32,
    spawn_ordinal: u32,
    lives: f32,
    rng_state: u64,
}

impl World {
    /// Creates a world with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a world from an explicit configuration.
    ///
    /// Degenerate dimensions are clamped so the starting spine always fits.
    #[must_use]
    pub fn with_config(mut config: WorldConfig) -> Self {
        config.spatial_map_dim = config.spatial_map_dim.max(2);
        config.extent = config.extent.max(config.spatial_map_dim as f32);

        let dim = config.spatial_map_dim;
        let cell_length = config.extent / dim as f32;
        let mut grid = OccupancyGrid::new(dim, dim);

        let origin_column = (dim / 2).min(dim - 2);
        let origin = CellCoord::new(origin_column, dim / 2);
        let paths = vec![Path::new(PathId::new(0), origin, &mut grid)];

        let cell_count = (dim as usize) * (dim as usize);
        Self {
            grid,
            paths,
            last_grown: Vec::new(),
            towers: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            spatial: SpatialIndex::new(dim, dim, cell_length),
            checked: vec![false; cell_count],
            walk_queue: VecDeque::new(),
            next_tower_id: 0,
            next_enemy_id: 0,
            next_projectile_id: 0,
            spawn_ordinal: 0,
            lives: config.starting_lives,
            rng_state: config.rng_seed,
            config,
        }
    }

    fn cell_length(&self) -> f32 {
        self.config.extent / self.config.spatial_map_dim as f32
    }

    fn cell_of(&self, point: Vec2) -> Option<CellCoord> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let cell_length = self.cell_length();
        let cell = CellCoord::new(
            (point.x / cell_length).floor() as u32,
            (point.y / cell_length).floor() as u32,
        );
        self.grid.in_bounds(cell).then_some(cell)
    }

    fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        let cell_length = self.cell_length();
        Vec2::new(
            cell.column() as f32 * cell_length,
            cell.row() as f32 * cell_length,
        )
    }

    fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_length() / 2.0)
    }

    fn next_random(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.rng_state
    }

    fn grow_path(&mut self, at: Vec2, out_events: &mut Vec<Event>) {
        let cell_length = self.cell_length();
        let probe = Aabb::new(
            at - Vec2::splat(cell_length / 4.0),
            Vec2::splat(cell_length / 2.0),
        );

        let mut found = None;
        for (index, path) in self.paths.iter().enumerate() {
            if let Some(segment) = path.find_overlapping(&probe, cell_length) {
                found = Some((index, segment));
                break;
            }
        }
        let Some((path_index, receiver)) = found else {
            out_events.push(Event::GrowthRejected {
                reason: GrowthError::NoSegmentNearby,
            });
            return;
        };

        let Some(side) = self.paths[path_index].side_toward(receiver, at, cell_length) else {
            out_events.push(Event::GrowthRejected {
                reason: GrowthError::SideBlocked,
            });
            return;
        };

        // Any variant that opens back toward the receiver is a candidate; the
        // pick is deterministic in the seeded generator.
        let opposite = side.opposite();
        let candidates: Vec<SegmentVariant> = SegmentVariant::ALL
            .into_iter()
            .filter(|variant| variant.permits(opposite))
            .collect();
        let pick = (self.next_random() % candidates.len() as u64) as usize;
        let variant = candidates[pick];

        match self.paths[path_index].try_insert_child(
            receiver,
            at,
            variant,
            &mut self.grid,
            cell_length,
        ) {
            Ok((segment, used_side, cell)) => {
                let path_id = self.paths[path_index].id();
                self.last_grown.push(path_id);
                out_events.push(Event::PathExtended {
                    path: path_id,
                    segment,
                    side: used_side,
                    cell,
                });
            }
            Err(reason) => out_events.push(Event::GrowthRejected { reason }),
        }
    }

    fn undo_growth(&mut self, out_events: &mut Vec<Event>) {
        let Some(path_id) = self.last_grown.pop() else {
            return;
        };
        let undone = self
            .paths
            .iter_mut()
            .find(|path| path.id() == path_id)
            .and_then(|path| path.undo(&mut self.grid));
        if let Some((segment, cell)) = undone {
            out_events.push(Event::GrowthUndone {
                path: path_id,
                segment,
                cell,
            });
        }
    }

    fn place_tower(&mut self, kind: TowerKind, at: Vec2, out_events: &mut Vec<Event>) {
        let Some(cell) = self.cell_of(at) else {
            out_events.push(Event::TowerPlacementRejected {
                kind,
                reason: PlacementError::OutOfBounds,
            });
            return;
        };
        if self.grid.segment_present(cell) {
            out_events.push(Event::TowerPlacementRejected {
                kind,
                reason: PlacementError::Occupied,
            });
            return;
        }
        if self.grid.tower_count(cell) >= MAX_TOWERS_PER_CELL {
            out_events.push(Event::TowerPlacementRejected {
                kind,
                reason: PlacementError::TowerLimit,
            });
            return;
        }

        self.grid.add_tower(cell);
        let id = TowerId::new(self.next_tower_id);
        self.next_tower_id += 1;
        self.towers
            .push(TowerState::new(id, kind, at, cell, self.cell_length()));
        out_events.push(Event::TowerPlaced {
            tower: id,
            kind,
            cell,
        });
    }

    fn spawn_enemy(
        &mut self,
        kind: EnemyKind,
        path_id: PathId,
        leaf: SegmentId,
        out_events: &mut Vec<Event>,
    ) {
        let Some(path) = self.paths.iter().find(|path| path.id() == path_id) else {
            out_events.push(Event::SpawnRejected {
                reason: SpawnError::UnknownPath,
            });
            return;
        };
        if !path.is_attached(leaf) || !path.is_leaf(leaf, &self.grid) {
            out_events.push(Event::SpawnRejected {
                reason: SpawnError::NotALeaf,
            });
            return;
        }
        let Some(cell) = path.segment_cell(leaf) else {
            out_events.push(Event::SpawnRejected {
                reason: SpawnError::NotALeaf,
            });
            return;
        };

        let spec = kind.spec();
        let bonus_hp = spec.hp_step * self.spawn_ordinal as f32;
        self.spawn_ordinal += 1;
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id += 1;

        self.enemies.push(EnemyState {
            id,
            kind,
            position: self.cell_center(cell),
            size: self.cell_length() / 2.0,
            speed: spec.speed,
            attack: spec.attack,
            damage: DamageState::from_spec(&spec, bonus_hp),
            path: path_id,
            target: leaf,
        });
        out_events.push(Event::EnemySpawned {
            enemy: id,
            kind,
            cell,
        });
    }

    fn fire_projectile(&mut self, tower_id: TowerId, out_events: &mut Vec<Event>) {
        let cell_length = self.cell_length();
        let Some(tower) = self.towers.iter_mut().find(|tower| tower.id() == tower_id) else {
            out_events.push(Event::FireRejected {
                tower: tower_id,
                reason: FireError::UnknownTower,
            });
            return;
        };
        if !tower.ready_in().is_zero() {
            out_events.push(Event::FireRejected {
                tower: tower_id,
                reason: FireError::NotReady,
            });
            return;
        }
        let Some(destination) = tower.targets().select(tower.strategy()) else {
            out_events.push(Event::FireRejected {
                tower: tower_id,
                reason: FireError::NoTarget,
            });
            return;
        };

        tower.reset_cooldown();
        let origin = tower.center();
        let payload = tower.kind().spec().payload;

        let id = ProjectileId::new(self.next_projectile_id);
        self.next_projectile_id += 1;
        self.projectiles.push(ProjectileState {
            id,
            position: origin,
            size: cell_length / 4.0,
            payload,
            destination,
        });
        out_events.push(Event::ProjectileLaunched {
            projectile: id,
            tower: tower_id,
        });
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });
        let dt_secs = dt.as_secs_f32();
        let cell_length = self.cell_length();
        let extent = self.config.extent;

        // Advance projectiles toward their snapshots and split off the ones
        // inside detonation range; strays that left the map are dropped.
        for projectile in &mut self.projectiles {
            let to_target = projectile.destination.position - projectile.position;
            if to_target.length_squared() > f32::EPSILON {
                projectile.position +=
                    to_target.normalize_or_zero() * PROJECTILE_SPEED * dt_secs;
            }
        }
        let detonation_radius = cell_length / 4.0;
        let mut detonating = Vec::new();
        let mut in_flight = Vec::new();
        for projectile in std::mem::take(&mut self.projectiles) {
            let distance = projectile.position.distance(projectile.destination.position);
            if distance < detonation_radius {
                detonating.push(projectile);
            } else if projectile.position.x >= -cell_length
                && projectile.position.x <= extent + cell_length
                && projectile.position.y >= -cell_length
                && projectile.position.y <= extent + cell_length
            {
                in_flight.push(projectile);
            }
        }
        self.projectiles = in_flight;

        // Bucket detonating projectiles and enemies, then resolve pairwise by
        // bucket: co-residency counts as a hit, with a per-projectile seen
        // set guarding against double application across shared buckets.
        self.spatial.clear();
        for (index, projectile) in detonating.iter().enumerate() {
            self.spatial
                .insert_projectile(index, projectile.position, projectile.size);
        }
        for (index, enemy) in self.enemies.iter().enumerate() {
            self.spatial.insert_enemy(index, enemy.position, enemy.size);
        }
        let mut struck: Vec<Vec<usize>> = vec![Vec::new(); detonating.len()];
        for bucket in self.spatial.buckets() {
            for &projectile_index in &bucket.projectiles {
                for &enemy_index in &bucket.enemies {
                    let seen = &mut struck[projectile_index];
                    if seen.contains(&enemy_index) {
                        continue;
                    }
                    seen.push(enemy_index);
                    if let Some(enemy) = self.enemies.get_mut(enemy_index) {
                        enemy.damage.strike(&detonating[projectile_index].payload);
                    }
                }
            }
        }
        for projectile in &detonating {
            out_events.push(Event::ProjectileDetonated {
                projectile: projectile.id,
            });
        }

        // Tower ranges join the same index; their snapshots start fresh.
        for (index, tower) in self.towers.iter_mut().enumerate() {
            self.spatial.insert_range(index, tower.center(), tower.radius());
            tower.clear_targets();
        }

        // Breadth-first walk of every path from its root, one grid cell per
        // step. Each cell's enemy maxima are folded into every tower range
        // bucketed there; a checked bitmap stops repeat descents when churn
        // aliases several segments onto one cell.
        self.checked.fill(false);
        self.walk_queue.clear();
        for path_index in 0..self.paths.len() {
            let root = self.paths[path_index].root();
            self.walk_queue.push_back((path_index, root));
        }
        let columns = self.config.spatial_map_dim;
        while let Some((path_index, segment)) = self.walk_queue.pop_front() {
            let Some(cell) = self.paths[path_index].segment_cell(segment) else {
                continue;
            };

            if let Some(bucket) = self.spatial.bucket(cell) {
                let mut maxima = CellMaxima::default();
                let mut occupied = false;
                for &enemy_index in &bucket.enemies {
                    let Some(enemy) = self.enemies.get(enemy_index) else {
                        continue;
                    };
                    if !enemy.damage.alive() {
                        continue;
                    }
                    occupied = true;
                    maxima.observe(&enemy.damage);
                }
                if occupied {
                    let origin = self.cell_origin(cell);
                    for &tower_index in &bucket.ranges {
                        if let Some(tower) = self.towers.get_mut(tower_index) {
                            tower.fold_cell(origin, &maxima);
                        }
                    }
                }
            }

            let checked_index = (cell.row() * columns + cell.column()) as usize;
            if !self.checked[checked_index] {
                self.checked[checked_index] = true;
                for side in Side::ALL {
                    if let Some(child) = self.paths[path_index].child_of(segment, side) {
                        self.walk_queue.push_back((path_index, child));
                    }
                }
            }
        }

        // Damage over time, movement along the tree toward the root, and
        // life drain for enemies camped at a parentless segment.
        let rates = DotRates {
            poison_per_sec: self.config.poison_per_sec,
            burn_per_sec: self.config.burn_per_sec,
            bleed_per_sec: self.config.bleed_per_sec,
        };
        let half_cell = Vec2::splat(cell_length / 2.0);
        for enemy in &mut self.enemies {
            enemy.damage.advance(dt_secs, &rates);
            let Some(path) = self
                .paths
                .iter()
                .find(|path| path.id() == enemy.path)
            else {
                continue;
            };
            let Some(target_cell) = path.segment_cell(enemy.target) else {
                continue;
            };
            let target_center = Vec2::new(
                target_cell.column() as f32 * cell_length,
                target_cell.row() as f32 * cell_length,
            ) + half_cell;

            let to_target = target_center - enemy.position;
            if to_target.length() < ARRIVAL_DISTANCE {
                match path.parent_of(enemy.target) {
                    Some(parent) => enemy.target = parent,
                    None => {
                        self.lives = (self.lives - enemy.attack * dt_secs).max(0.0);
                        out_events.push(Event::BaseDamaged {
                            enemy: enemy.id,
                            lives_remaining: self.lives,
                        });
                    }
                }
            } else if to_target.length_squared() > f32::EPSILON {
                enemy.position += to_target.normalize_or_zero() * enemy.speed * dt_secs;
            }
        }

        // Prune the dead after the walk so bucket indices stay valid.
        let mut index = 0;
        while index < self.enemies.len() {
            if self.enemies[index].damage.alive() {
                index += 1;
            } else {
                let enemy = self.enemies.remove(index);
                out_events.push(Event::EnemyDied { enemy: enemy.id });
            }
        }

        for tower in &mut self.towers {
            tower.accumulate(dt);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::GrowPath { at } => world.grow_path(at, out_events),
        Command::UndoGrowth => world.undo_growth(out_events),
        Command::PlaceTower { kind, at } => world.place_tower(kind, at, out_events),
        Command::SpawnEnemy { kind, path, leaf } => {
            world.spawn_enemy(kind, path, leaf, out_events)
        }
        Command::FireProjectile { tower } => world.fire_projectile(tower, out_events),
        Command::Tick { dt } => world.tick(dt, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glam::Vec2;
    use path_defence_core::{
        CellCoord, EnemySnapshot, EnemyView, LeafSnapshot, PathId, PathView, ProjectileSnapshot,
        ProjectileView, SegmentId, SegmentSnapshot, TowerFireSnapshot, TowerFireView,
        TowerSnapshot, TowerView,
    };

    use super::World;

    /// Lives remaining before the defence is lost.
    #[must_use]
    pub fn lives(world: &World) -> f32 {
        world.lives
    }

    /// Reports whether the base has run out of lives.
    #[must_use]
    pub fn defeated(world: &World) -> bool {
        world.lives <= 0.0
    }

    /// Side length of one grid cell in world units.
    #[must_use]
    pub fn cell_length(world: &World) -> f32 {
        world.cell_length()
    }

    /// Grid dimensions as (columns, rows).
    #[must_use]
    pub fn grid_dimensions(world: &World) -> (u32, u32) {
        world.grid.dimensions()
    }

    /// Grid cell containing the provided world point, if any.
    #[must_use]
    pub fn cell_of(world: &World, point: Vec2) -> Option<CellCoord> {
        world.cell_of(point)
    }

    /// Fast occupancy verdict for UI previews: does anything occupy the cell
    /// under the point? Points outside the map always collide.
    #[must_use]
    pub fn collides(world: &World, point: Vec2) -> bool {
        match world.cell_of(point) {
            Some(cell) => world.grid.collides(cell),
            None => true,
        }
    }

    /// Reports whether a path segment occupies the cell.
    #[must_use]
    pub fn segment_at(world: &World, cell: CellCoord) -> bool {
        world.grid.segment_present(cell)
    }

    /// Number of towers stacked on the cell.
    #[must_use]
    pub fn towers_at(world: &World, cell: CellCoord) -> u8 {
        world.grid.tower_count(cell)
    }

    /// Captures a read-only view of every attached segment.
    #[must_use]
    pub fn path_view(world: &World) -> PathView {
        let mut snapshots = Vec::new();
        for path in &world.paths {
            path.for_each_attached(|id, segment| {
                snapshots.push(SegmentSnapshot {
                    path: path.id(),
                    id,
                    cell: segment.cell(),
                    variant: segment.variant(),
                    parent: segment.parent(),
                    leaf: path.is_leaf(id, &world.grid),
                });
            });
        }
        PathView::from_snapshots(snapshots)
    }

    /// Rebuilds the set of open leaves by full traversal of every path.
    #[must_use]
    pub fn open_leaves(world: &World) -> Vec<LeafSnapshot> {
        let mut leaves = Vec::new();
        for path in &world.paths {
            for segment in path.open_leaves_scan(&world.grid) {
                if let Some(cell) = path.segment_cell(segment) {
                    leaves.push(LeafSnapshot {
                        path: path.id(),
                        segment,
                        cell,
                    });
                }
            }
        }
        leaves
    }

    /// Cached leaf list of one path, in insertion order.
    #[must_use]
    pub fn leaf_cache(world: &World, path: PathId) -> Vec<SegmentId> {
        world
            .paths
            .iter()
            .find(|candidate| candidate.id() == path)
            .map(|path| path.leaves().to_vec())
            .unwrap_or_default()
    }

    /// Number of insertions that can still be undone on one path.
    #[must_use]
    pub fn undo_depth(world: &World, path: PathId) -> usize {
        world
            .paths
            .iter()
            .find(|candidate| candidate.id() == path)
            .map_or(0, |path| path.undo_depth())
    }

    /// Attached segment nearest to the point, by centre distance.
    #[must_use]
    pub fn nearest_segment(world: &World, point: Vec2) -> Option<(PathId, SegmentId)> {
        let cell_length = world.cell_length();
        world.paths.iter().find_map(|path| {
            path.nearest_segment(point, cell_length)
                .map(|segment| (path.id(), segment))
        })
    }

    /// Nearest segment that still qualifies as an open leaf.
    ///
    /// The collision filter tests the search point itself, not the eventual
    /// placement box of a candidate piece.
    #[must_use]
    pub fn nearest_open_leaf(world: &World, point: Vec2) -> Option<LeafSnapshot> {
        let cell_length = world.cell_length();
        let probe_collides = collides(world, point);
        world.paths.iter().find_map(|path| {
            path.nearest_open_leaf(point, &world.grid, cell_length, probe_collides)
                .and_then(|segment| {
                    path.segment_cell(segment).map(|cell| LeafSnapshot {
                        path: path.id(),
                        segment,
                        cell,
                    })
                })
        })
    }

    /// Captures a read-only view of the enemies inhabiting the maze.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                kind: enemy.kind,
                position: enemy.position,
                hp: enemy.damage.hp,
                shield_physical: enemy.damage.shield_physical,
                shield_fire: enemy.damage.shield_fire,
                shield_poison: enemy.damage.shield_poison,
                shield_magic: enemy.damage.shield_magic,
                target_path: enemy.path,
                target_segment: enemy.target,
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the placed towers.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        let snapshots = world
            .towers
            .iter()
            .map(|tower| TowerSnapshot {
                id: tower.id(),
                kind: tower.kind(),
                cell: tower.cell(),
                center: tower.center(),
                strategy: tower.strategy(),
                ready_in: tower.ready_in(),
                targets: *tower.targets(),
            })
            .collect();
        TowerView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        let snapshots = world
            .projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                position: projectile.position,
                destination: projectile.destination.position,
                payload: projectile.payload,
            })
            .collect();
        ProjectileView::from_snapshots(snapshots)
    }

    /// Per-tower firing readiness for the tower combat system.
    #[must_use]
    pub fn tower_fire_view(world: &World) -> TowerFireView {
        let snapshots = world
            .towers
            .iter()
            .map(|tower| TowerFireSnapshot {
                tower: tower.id(),
                ready_in: tower.ready_in(),
                has_target: tower.targets().select(tower.strategy()).is_some(),
            })
            .collect();
        TowerFireView::from_snapshots(snapshots)
    }
}
