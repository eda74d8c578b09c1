use std::time::Duration;

use glam::Vec2;
use path_defence_core::{
    CellCoord, Command, EnemyKind, Event, FireError, LeafSnapshot, TowerId, TowerKind,
};
use path_defence_world::{self as world, query, World, WorldConfig};

// A 10x10 grid of 20-unit cells. The starting spine occupies (5,5) and (6,5).
fn test_world() -> World {
    World::with_config(WorldConfig {
        extent: 200.0,
        spatial_map_dim: 10,
        ..WorldConfig::default()
    })
}

fn send(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn leaf_at(world: &World, cell: CellCoord) -> LeafSnapshot {
    query::open_leaves(world)
        .into_iter()
        .find(|leaf| leaf.cell == cell)
        .unwrap_or_else(|| panic!("expected an open leaf at {cell:?}"))
}

#[test]
fn a_fired_projectile_detonates_and_kills_its_victim() {
    let mut world = test_world();
    let leaf = leaf_at(&world, CellCoord::new(6, 5));
    let _ = send(
        &mut world,
        Command::SpawnEnemy {
            kind: EnemyKind::Scuttler,
            path: leaf.path,
            leaf: leaf.segment,
        },
    );
    let _ = send(
        &mut world,
        Command::PlaceTower {
            kind: TowerKind::Ballista,
            at: Vec2::new(100.0, 140.0),
        },
    );

    // One long tick arms the cooldown and runs the aggregation walk.
    let _ = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(1),
        },
    );
    let fire_view = query::tower_fire_view(&world);
    let snapshot = fire_view.iter().next().expect("one tower");
    assert!(snapshot.ready_in.is_zero());
    assert!(snapshot.has_target, "the walk must have produced a snapshot");

    let events = send(
        &mut world,
        Command::FireProjectile {
            tower: snapshot.tower,
        },
    );
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ProjectileLaunched { .. })));
    assert_eq!(query::projectile_view(&world).into_vec().len(), 1);

    let mut detonated = false;
    let mut died = false;
    for _ in 0..200 {
        let events = send(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
        );
        detonated |= events
            .iter()
            .any(|event| matches!(event, Event::ProjectileDetonated { .. }));
        died |= events
            .iter()
            .any(|event| matches!(event, Event::EnemyDied { .. }));
        if died {
            break;
        }
    }

    assert!(detonated, "the projectile should reach its snapshot");
    assert!(died, "a 100-point impact must finish a fragile runner");
    assert!(query::enemy_view(&world).into_vec().is_empty());
    assert!(query::projectile_view(&world).into_vec().is_empty());
}

#[test]
fn firing_before_the_interval_elapses_is_rejected() {
    let mut world = test_world();
    let _ = send(
        &mut world,
        Command::PlaceTower {
            kind: TowerKind::Ballista,
            at: Vec2::new(100.0, 140.0),
        },
    );

    let events = send(
        &mut world,
        Command::FireProjectile {
            tower: TowerId::new(0),
        },
    );
    assert_eq!(
        events,
        vec![Event::FireRejected {
            tower: TowerId::new(0),
            reason: FireError::NotReady,
        }],
    );
}

#[test]
fn firing_without_a_snapshot_is_rejected() {
    let mut world = test_world();
    let _ = send(
        &mut world,
        Command::PlaceTower {
            kind: TowerKind::Ballista,
            at: Vec2::new(100.0, 140.0),
        },
    );
    let _ = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(1),
        },
    );

    let events = send(
        &mut world,
        Command::FireProjectile {
            tower: TowerId::new(0),
        },
    );
    assert_eq!(
        events,
        vec![Event::FireRejected {
            tower: TowerId::new(0),
            reason: FireError::NoTarget,
        }],
    );
}

#[test]
fn unknown_towers_cannot_fire() {
    let mut world = test_world();
    let events = send(
        &mut world,
        Command::FireProjectile {
            tower: TowerId::new(99),
        },
    );
    assert_eq!(
        events,
        vec![Event::FireRejected {
            tower: TowerId::new(99),
            reason: FireError::UnknownTower,
        }],
    );
}

#[test]
fn enemies_at_the_root_drain_lives_until_defeat() {
    let mut world = test_world();
    assert!((query::lives(&world) - 3.0).abs() < f32::EPSILON);

    let leaf = leaf_at(&world, CellCoord::new(5, 5));
    let _ = send(
        &mut world,
        Command::SpawnEnemy {
            kind: EnemyKind::Scuttler,
            path: leaf.path,
            leaf: leaf.segment,
        },
    );

    let events = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(1),
        },
    );
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::BaseDamaged { .. })));
    assert!((query::lives(&world) - 2.0).abs() < 1e-4);
    assert!(!query::defeated(&world));

    for _ in 0..2 {
        let _ = send(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(1),
            },
        );
    }
    assert!(query::lives(&world) <= 0.0);
    assert!(query::defeated(&world));

    // The drain clamps at zero rather than going negative.
    let _ = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(1),
        },
    );
    assert_eq!(query::lives(&world), 0.0);
}

#[test]
fn spawns_are_rejected_on_non_leaf_segments() {
    let mut world = test_world();
    let leaf = leaf_at(&world, CellCoord::new(6, 5));

    // Wall the spine in: grow on every open side, leaving it occupied.
    for at in [
        Vec2::new(142.0, 110.0),
        Vec2::new(130.0, 98.0),
        Vec2::new(130.0, 122.0),
    ] {
        let events = send(&mut world, Command::GrowPath { at });
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::PathExtended { .. })));
    }

    let events = send(
        &mut world,
        Command::SpawnEnemy {
            kind: EnemyKind::Warded,
            path: leaf.path,
            leaf: leaf.segment,
        },
    );
    assert!(
        events
            .iter()
            .any(|event| matches!(event, Event::SpawnRejected { .. })),
        "a fully walled segment is no longer a spawn point",
    );
}

#[test]
fn enemies_walk_parentward_along_the_tree() {
    let mut world = test_world();
    let leaf = leaf_at(&world, CellCoord::new(6, 5));
    let _ = send(
        &mut world,
        Command::SpawnEnemy {
            kind: EnemyKind::Scuttler,
            path: leaf.path,
            leaf: leaf.segment,
        },
    );

    // The first tick retargets the enemy from its spawn leaf to the root;
    // subsequent ticks move it toward the root's centre.
    let _ = send(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(16),
        },
    );
    let start = query::enemy_view(&world).into_vec()[0].position;
    for _ in 0..10 {
        let _ = send(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
        );
    }
    let current = query::enemy_view(&world).into_vec()[0].position;
    assert!(
        current.x < start.x,
        "the enemy should march toward the root cell to its left",
    );
    assert_eq!(current.y, start.y);
}
