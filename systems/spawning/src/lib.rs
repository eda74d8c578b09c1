#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system that admits enemies at open leaves.

use std::time::Duration;

use path_defence_core::{Command, EnemyKind, Event, LeafSnapshot};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    #[must_use]
    pub const fn new(spawn_interval: Duration, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            rng_seed,
        }
    }
}

/// Pure system that deterministically emits spawn commands.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: Duration,
    accumulator: Duration,
    rng_state: u64,
    kind_index: usize,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            accumulator: Duration::ZERO,
            rng_state: config.rng_seed,
            kind_index: 0,
        }
    }

    /// Consumes events and the current open-leaf view to emit spawn commands.
    ///
    /// One spawn attempt is produced per elapsed interval; each attempt picks
    /// a leaf with the seeded generator and cycles through the enemy kinds.
    pub fn handle(&mut self, events: &[Event], leaves: &[LeafSnapshot], out: &mut Vec<Command>) {
        if self.spawn_interval.is_zero() || leaves.is_empty() {
            return;
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }
        if accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        let attempts = self.resolve_spawn_attempts();

        for _ in 0..attempts {
            let leaf = self.select_leaf(leaves);
            let kind = self.next_kind();
            out.push(Command::SpawnEnemy {
                kind,
                path: leaf.path,
                leaf: leaf.segment,
            });
        }
    }

    fn resolve_spawn_attempts(&mut self) -> usize {
        if self.spawn_interval.is_zero() {
            return 0;
        }

        let mut attempts = 0;
        while self.accumulator >= self.spawn_interval {
            self.accumulator -= self.spawn_interval;
            attempts += 1;
        }
        attempts
    }

    fn select_leaf(&mut self, leaves: &[LeafSnapshot]) -> LeafSnapshot {
        debug_assert!(!leaves.is_empty(), "select_leaf requires leaves");
        let value = self.advance_rng();
        let index = (value % leaves.len() as u64) as usize;
        leaves[index]
    }

    fn advance_rng(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.rng_state
    }

    fn next_kind(&mut self) -> EnemyKind {
        let kind = EnemyKind::ALL[self.kind_index % EnemyKind::ALL.len()];
        self.kind_index = (self.kind_index + 1) % EnemyKind::ALL.len();
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_spawn_attempts_without_interval() {
        let mut spawning = Spawning::new(Config::new(Duration::ZERO, 1));
        spawning.accumulator = Duration::from_secs(10);
        assert_eq!(spawning.resolve_spawn_attempts(), 0);
    }

    #[test]
    fn kinds_cycle_in_declaration_order() {
        let mut spawning = Spawning::new(Config::new(Duration::from_secs(1), 1));
        let first: Vec<EnemyKind> = (0..4).map(|_| spawning.next_kind()).collect();
        assert_eq!(
            first,
            vec![
                EnemyKind::Scuttler,
                EnemyKind::Carapace,
                EnemyKind::Warded,
                EnemyKind::Scuttler,
            ],
        );
    }
}
