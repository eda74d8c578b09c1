//! Tower state, cooldown tracking and per-tick target snapshots.

use std::time::Duration;

use glam::Vec2;
use path_defence_core::{
    CellCoord, DamageKind, TargetSnapshot, TargetTable, TargetingStrategy, TowerId, TowerKind,
};

use crate::combat::DamageState;

/// Authoritative record of a placed tower.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    id: TowerId,
    kind: TowerKind,
    cell: CellCoord,
    center: Vec2,
    radius: f32,
    cooldown: Duration,
    targets: TargetTable,
}

impl TowerState {
    pub(crate) fn new(
        id: TowerId,
        kind: TowerKind,
        center: Vec2,
        cell: CellCoord,
        cell_length: f32,
    ) -> Self {
        Self {
            id,
            kind,
            cell,
            center,
            radius: cell_length * kind.spec().range_factor,
            cooldown: Duration::ZERO,
            targets: TargetTable::default(),
        }
    }

    pub(crate) fn id(&self) -> TowerId {
        self.id
    }

    pub(crate) fn kind(&self) -> TowerKind {
        self.kind
    }

    pub(crate) fn cell(&self) -> CellCoord {
        self.cell
    }

    pub(crate) fn center(&self) -> Vec2 {
        self.center
    }

    pub(crate) fn radius(&self) -> f32 {
        self.radius
    }

    pub(crate) fn strategy(&self) -> TargetingStrategy {
        self.kind.spec().strategy
    }

    pub(crate) fn targets(&self) -> &TargetTable {
        &self.targets
    }

    pub(crate) fn clear_targets(&mut self) {
        self.targets.clear();
    }

    /// Time remaining until the fire interval elapses.
    pub(crate) fn ready_in(&self) -> Duration {
        self.kind.spec().fire_interval.saturating_sub(self.cooldown)
    }

    pub(crate) fn accumulate(&mut self, dt: Duration) {
        let interval = self.kind.spec().fire_interval;
        self.cooldown = self.cooldown.saturating_add(dt).min(interval);
    }

    pub(crate) fn reset_cooldown(&mut self) {
        self.cooldown = Duration::ZERO;
    }

    /// Folds one aggregation cell's enemy maxima into the snapshot table.
    ///
    /// The closest slot latches onto the first enemy-bearing cell the walk
    /// delivers; the maxima slots keep their first position and only raise
    /// their comparison value afterwards.
    pub(crate) fn fold_cell(&mut self, cell_origin: Vec2, maxima: &CellMaxima) {
        if self.targets.closest.is_none() {
            self.targets.closest = Some(TargetSnapshot {
                position: cell_origin,
                value: 0.0,
            });
        }
        raise(&mut self.targets.highest_hp, cell_origin, maxima.hp);
        for kind in DamageKind::ALL {
            raise(
                self.targets.highest_shield_mut(kind),
                cell_origin,
                maxima.shield(kind),
            );
        }
    }
}

fn raise(slot: &mut Option<TargetSnapshot>, position: Vec2, value: f32) {
    match slot {
        Some(snapshot) => {
            if snapshot.value < value {
                snapshot.value = value;
            }
        }
        None => {
            *slot = Some(TargetSnapshot { position, value });
        }
    }
}

/// Highest enemy statistics observed within a single aggregation cell.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CellMaxima {
    hp: f32,
    shield_physical: f32,
    shield_fire: f32,
    shield_poison: f32,
    shield_magic: f32,
}

impl CellMaxima {
    pub(crate) fn observe(&mut self, state: &DamageState) {
        self.hp = self.hp.max(state.hp);
        self.shield_physical = self.shield_physical.max(state.shield_physical);
        self.shield_fire = self.shield_fire.max(state.shield_fire);
        self.shield_poison = self.shield_poison.max(state.shield_poison);
        self.shield_magic = self.shield_magic.max(state.shield_magic);
    }

    pub(crate) fn shield(&self, kind: DamageKind) -> f32 {
        match kind {
            DamageKind::Physical => self.shield_physical,
            DamageKind::Fire => self.shield_fire,
            DamageKind::Poison => self.shield_poison,
            DamageKind::Magic => self.shield_magic,
        }
    }
}
