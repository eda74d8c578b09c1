#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits projectile firing commands from readiness data.

use path_defence_core::{Command, TowerFireView};

/// Tower combat system that queues firing commands for ready towers.
#[derive(Debug, Default)]
pub struct TowerCombat {
    scratch: Vec<Command>,
}

impl TowerCombat {
    /// Creates a new tower combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireProjectile` entries for towers that are both off
    /// cooldown and holding a target snapshot.
    pub fn handle(&mut self, fire_view: TowerFireView, out: &mut Vec<Command>) {
        self.scratch.clear();

        for snapshot in fire_view.iter() {
            if snapshot.ready_in.is_zero() && snapshot.has_target {
                self.scratch.push(Command::FireProjectile {
                    tower: snapshot.tower,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use path_defence_core::{TowerFireSnapshot, TowerId};
    use std::time::Duration;

    fn snapshot(tower: u32, ready_in: Duration, has_target: bool) -> TowerFireSnapshot {
        TowerFireSnapshot {
            tower: TowerId::new(tower),
            ready_in,
            has_target,
        }
    }

    #[test]
    fn ready_towers_with_targets_fire() {
        let mut system = TowerCombat::new();
        let view = TowerFireView::from_snapshots(vec![
            snapshot(2, Duration::ZERO, true),
            snapshot(5, Duration::ZERO, true),
        ]);
        let mut out = Vec::new();

        system.handle(view, &mut out);

        assert_eq!(
            out,
            vec![
                Command::FireProjectile {
                    tower: TowerId::new(2),
                },
                Command::FireProjectile {
                    tower: TowerId::new(5),
                },
            ],
        );
    }

    #[test]
    fn reloading_or_targetless_towers_are_skipped() {
        let mut system = TowerCombat::new();
        let view = TowerFireView::from_snapshots(vec![
            snapshot(3, Duration::from_millis(250), true),
            snapshot(8, Duration::ZERO, false),
            snapshot(9, Duration::ZERO, true),
        ]);
        let mut out = Vec::new();

        system.handle(view, &mut out);

        assert_eq!(
            out,
            vec![Command::FireProjectile {
                tower: TowerId::new(9),
            }],
        );
    }

    #[test]
    fn empty_views_emit_nothing() {
        let mut system = TowerCombat::new();
        let mut out = Vec::new();
        system.handle(TowerFireView::default(), &mut out);
        assert!(out.is_empty());
    }
}
