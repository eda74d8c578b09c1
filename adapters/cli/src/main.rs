#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Path Defence session.
//!
//! The runner seeds a world, grows a maze from random open leaves, scatters
//! towers beside the path, then drives the tick loop with the spawning and
//! tower combat systems until the tick budget runs out or the base falls.

use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use path_defence_core::{CellCoord, Command, Event, TowerKind};
use path_defence_system_growth::{Growth, GrowthInput, GrowthPreview};
use path_defence_system_spawning::{Config as SpawnConfig, Spawning};
use path_defence_system_tower_combat::TowerCombat;
use path_defence_world::{self as world, query, World, WorldConfig};

/// Longest frame delta the simulation integrates; slower frames count as a
/// stall and are skipped rather than applied.
const FRAME_DELTA_LIMIT: Duration = Duration::from_millis(1000);

#[derive(Debug, Parser)]
#[command(name = "path-defence", about = "Headless Path Defence simulation runner")]
struct Args {
    /// Number of simulation ticks to run.
    #[arg(long, default_value_t = 1800)]
    ticks: u32,
    /// Simulated frame delta in milliseconds.
    #[arg(long, default_value_t = 16)]
    dt_ms: u64,
    /// Seed shared by the world, maze growth and spawning.
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Number of maze growth attempts before the waves start.
    #[arg(long, default_value_t = 40)]
    growth_steps: u32,
    /// Number of towers to scatter beside the path.
    #[arg(long, default_value_t = 12)]
    towers: u32,
    /// Interval between enemy spawns in milliseconds.
    #[arg(long, default_value_t = 2000)]
    spawn_interval_ms: u64,
}

/// Entry point for the Path Defence command-line runner.
fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.ticks > 0, "at least one tick is required");

    let mut world = World::with_config(WorldConfig {
        rng_seed: args.seed,
        ..WorldConfig::default()
    });
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let growth = Growth::new();
    let mut events = Vec::new();

    grow_maze(&mut world, &growth, &mut rng, args.growth_steps, &mut events);
    place_towers(&mut world, &mut rng, args.towers, &mut events);

    let segments = query::path_view(&world).into_vec().len();
    let towers_placed = query::tower_view(&world).into_vec().len();
    println!("maze ready: {segments} segments, {towers_placed} towers");

    let mut spawning = Spawning::new(SpawnConfig::new(
        Duration::from_millis(args.spawn_interval_ms),
        args.seed,
    ));
    let mut combat = TowerCombat::new();
    let dt = Duration::from_millis(args.dt_ms);

    let mut spawned = 0u32;
    let mut defeated_enemies = 0u32;
    let mut shots = 0u32;
    let mut detonations = 0u32;
    let mut ticks_run = 0u32;
    let mut commands = Vec::new();

    for _ in 0..args.ticks {
        if dt >= FRAME_DELTA_LIMIT {
            continue;
        }

        commands.clear();
        let leaves = query::open_leaves(&world);
        spawning.handle(&events, &leaves, &mut commands);
        combat.handle(query::tower_fire_view(&world), &mut commands);
        commands.push(Command::Tick { dt });

        events.clear();
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }

        for event in &events {
            match event {
                Event::EnemySpawned { .. } => spawned += 1,
                Event::EnemyDied { .. } => defeated_enemies += 1,
                Event::ProjectileLaunched { .. } => shots += 1,
                Event::ProjectileDetonated { .. } => detonations += 1,
                _ => {}
            }
        }
        ticks_run += 1;

        if query::defeated(&world) {
            break;
        }
    }

    println!(
        "ran {ticks_run} ticks: {spawned} enemies spawned, {defeated_enemies} defeated, \
         {shots} shots, {detonations} detonations"
    );
    println!("lives remaining: {:.1}", query::lives(&world));
    if query::defeated(&world) {
        println!("the base fell");
    }
    Ok(())
}

/// Grows the maze by confirming growth previews at random open-leaf sides.
fn grow_maze(
    world: &mut World,
    growth: &Growth,
    rng: &mut ChaCha8Rng,
    steps: u32,
    events: &mut Vec<Event>,
) {
    let cell_length = query::cell_length(world);
    let offsets = [
        Vec2::new(-1.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, -1.0),
        Vec2::new(0.0, 1.0),
    ];
    let mut commands = Vec::new();

    for _ in 0..steps {
        let leaves = query::open_leaves(world);
        if leaves.is_empty() {
            break;
        }
        let leaf = leaves[rng.gen_range(0..leaves.len())];
        let center = cell_center(leaf.cell, cell_length);
        let at = center + offsets[rng.gen_range(0..offsets.len())] * (cell_length * 0.6);

        let preview = GrowthPreview::new(at, !query::collides(world, at));
        commands.clear();
        growth.handle(Some(preview), GrowthInput::new(true, false), &mut commands);

        events.clear();
        for command in commands.drain(..) {
            world::apply(world, command, events);
        }
    }
}

/// Scatters towers on free cells adjacent to the grown path.
fn place_towers(world: &mut World, rng: &mut ChaCha8Rng, towers: u32, events: &mut Vec<Event>) {
    let cell_length = query::cell_length(world);
    let segments = query::path_view(world).into_vec();
    if segments.is_empty() {
        return;
    }

    let mut placed = 0u32;
    let mut attempts = 0u32;
    while placed < towers && attempts < towers.saturating_mul(8) {
        attempts += 1;
        let segment = &segments[rng.gen_range(0..segments.len())];
        let offset = Vec2::new(rng.gen_range(-2.0..=2.0), rng.gen_range(-2.0..=2.0)) * cell_length;
        let at = cell_center(segment.cell, cell_length) + offset;
        if query::collides(world, at) {
            continue;
        }

        let kind = TowerKind::ALL[placed as usize % TowerKind::ALL.len()];
        events.clear();
        world::apply(world, Command::PlaceTower { kind, at }, events);
        if events
            .iter()
            .any(|event| matches!(event, Event::TowerPlaced { .. }))
        {
            placed += 1;
        }
    }
}

fn cell_center(cell: CellCoord, cell_length: f32) -> Vec2 {
    Vec2::new(
        cell.column() as f32 * cell_length + cell_length / 2.0,
        cell.row() as f32 * cell_length + cell_length / 2.0,
    )
}
