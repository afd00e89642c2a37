use super::{Apocalypse, OutOfBounds, RunSummary};
use crate::config::{SimConfig, SimConfigError};
use crate::field::SourceKind;
use crate::grid::Position;

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

fn sim(
    grid_height: usize,
    grid_width: usize,
    obstacles: &[Position],
    zombies: &[Position],
    humans: &[Position],
    seed: u64,
) -> Apocalypse {
    Apocalypse::new(SimConfig {
        grid_height,
        grid_width,
        obstacles: obstacles.to_vec(),
        zombies: zombies.to_vec(),
        humans: humans.to_vec(),
        seed,
    })
}

#[test]
fn corner_zombie_field_is_manhattan_distance() {
    let sim = sim(5, 4, &[], &[pos(0, 0)], &[], 0);
    let field = sim.compute_distance_field(SourceKind::Zombie);
    for row in 0..5 {
        for col in 0..4 {
            assert_eq!(field[pos(row, col)], row + col, "cell ({row}, {col})");
        }
    }
}

#[test]
fn multi_source_field_takes_the_nearest_seed() {
    let sim = sim(5, 5, &[], &[pos(0, 0), pos(4, 4)], &[], 0);
    let field = sim.compute_distance_field(SourceKind::Zombie);
    for row in 0..5 {
        for col in 0..5 {
            let from_top_left = row + col;
            let from_bottom_right = (4 - row) + (4 - col);
            assert_eq!(
                field[pos(row, col)],
                from_top_left.min(from_bottom_right),
                "cell ({row}, {col})"
            );
        }
    }
}

#[test]
fn co_located_seeds_deduplicate() {
    let single = sim(4, 4, &[], &[pos(1, 2)], &[], 0);
    let doubled = sim(4, 4, &[], &[pos(1, 2), pos(1, 2)], &[], 0);
    assert_eq!(
        single.compute_distance_field(SourceKind::Zombie),
        doubled.compute_distance_field(SourceKind::Zombie)
    );
}

#[test]
fn obstacle_cells_always_hold_the_sentinel() {
    let obstacles = [pos(0, 3), pos(1, 1), pos(2, 4), pos(3, 0)];
    let sim = sim(4, 5, &obstacles, &[pos(0, 0)], &[pos(3, 4)], 0);
    for kind in [SourceKind::Zombie, SourceKind::Human] {
        let field = sim.compute_distance_field(kind);
        assert_eq!(field.unreachable(), 20);
        for &cell in &obstacles {
            assert_eq!(field[cell], 20, "{kind} field at ({}, {})", cell.row, cell.col);
        }
    }
}

#[test]
fn field_detours_around_a_wall() {
    // A two-cell wall forces the path to (0, 2) down and around.
    let mut sim = sim(3, 3, &[pos(0, 1), pos(1, 1)], &[pos(0, 0)], &[], 0);
    let field = sim.compute_distance_field(SourceKind::Zombie);
    assert_eq!(
        field.to_rows(),
        vec![vec![0, 9, 6], vec![1, 9, 5], vec![2, 3, 4]]
    );

    // Recomputation on unchanged state reproduces the field exactly.
    assert_eq!(field, sim.compute_distance_field(SourceKind::Zombie));

    // The wall only blocks; it is never relocated by movement.
    let human_field = sim.compute_distance_field(SourceKind::Human);
    sim.move_zombies(&human_field);
    assert!(!sim.grid().is_empty(pos(0, 1)));
    assert!(!sim.grid().is_empty(pos(1, 1)));
}

#[test]
fn enclosed_human_is_unreachable_and_stays_put() {
    let ring = [
        pos(1, 1),
        pos(1, 2),
        pos(1, 3),
        pos(2, 1),
        pos(2, 3),
        pos(3, 1),
        pos(3, 2),
        pos(3, 3),
    ];
    let mut sim = sim(5, 5, &ring, &[pos(0, 0)], &[pos(2, 2)], 0);
    let field = sim.compute_distance_field(SourceKind::Zombie);
    assert_eq!(field[pos(2, 2)], field.unreachable());
    sim.move_humans(&field);
    assert_eq!(sim.humans(), &[pos(2, 2)]);
}

#[test]
fn cornered_human_stays_and_tied_zombie_splits() {
    // 3x3, zombie in one corner, human in the opposite one.
    let mut sim = sim(3, 3, &[], &[pos(0, 0)], &[pos(2, 2)], 0);

    let zombie_field = sim.compute_distance_field(SourceKind::Zombie);
    assert_eq!(
        zombie_field.to_rows(),
        vec![vec![0, 1, 2], vec![1, 2, 3], vec![2, 3, 4]]
    );
    // The human already sits at the field maximum; no neighbor beats 4.
    sim.move_humans(&zombie_field);
    assert_eq!(sim.humans(), &[pos(2, 2)]);

    let human_field = sim.compute_distance_field(SourceKind::Human);
    assert_eq!(
        human_field.to_rows(),
        vec![vec![4, 3, 2], vec![3, 2, 1], vec![2, 1, 0]]
    );
    // The zombie improves from 4 to 3 via either orthogonal neighbor.
    sim.move_zombies(&human_field);
    assert_eq!(sim.num_zombies(), 1);
    let moved = sim.zombies()[0];
    assert!(moved == pos(1, 0) || moved == pos(0, 1), "moved to {moved:?}");
}

#[test]
fn zombie_tie_break_is_uniformish_across_seeds() {
    let mut picked = [0usize; 2];
    for seed in 0..400 {
        let mut sim = sim(3, 3, &[], &[pos(0, 0)], &[pos(2, 2)], seed);
        let zombie_field = sim.compute_distance_field(SourceKind::Zombie);
        sim.move_humans(&zombie_field);
        let human_field = sim.compute_distance_field(SourceKind::Human);
        sim.move_zombies(&human_field);
        match sim.zombies()[0] {
            Position { row: 1, col: 0 } => picked[0] += 1,
            Position { row: 0, col: 1 } => picked[1] += 1,
            other => panic!("unexpected destination {other:?}"),
        }
    }
    assert_eq!(picked[0] + picked[1], 400);
    assert!(picked.iter().all(|&n| n > 120), "tie-break skewed: {picked:?}");
}

#[test]
fn plateau_human_shuffles_through_the_gap() {
    // (0, 1) and (1, 0) both sit one step from the zombie; the corner
    // (1, 1) is walled. The human on the plateau moves to the tied cell.
    let mut sim = sim(2, 2, &[pos(1, 1)], &[pos(0, 0)], &[pos(0, 1)], 9);
    let field = sim.compute_distance_field(SourceKind::Zombie);
    sim.move_humans(&field);
    assert_eq!(sim.humans(), &[pos(1, 0)]);
}

#[test]
fn movement_replaces_the_registry_in_entity_order() {
    let mut sim = sim(1, 4, &[], &[pos(0, 0)], &[pos(0, 1), pos(0, 2)], 0);
    let field = sim.compute_distance_field(SourceKind::Zombie);
    sim.move_humans(&field);
    assert_eq!(sim.humans(), &[pos(0, 2), pos(0, 3)]);
}

#[test]
fn empty_source_set_freezes_the_other_side() {
    // With no zombies anywhere, every cell of the zombie field is the
    // sentinel, so humans have nothing to flee from and stay.
    let mut sim = sim(4, 4, &[], &[], &[pos(1, 1), pos(2, 3)], 0);
    let zombie_field = sim.compute_distance_field(SourceKind::Zombie);
    assert_eq!(zombie_field[pos(0, 0)], zombie_field.unreachable());
    sim.move_humans(&zombie_field);
    assert_eq!(sim.humans(), &[pos(1, 1), pos(2, 3)]);

    let mut sim = sim_no_humans();
    let human_field = sim.compute_distance_field(SourceKind::Human);
    sim.move_zombies(&human_field);
    assert_eq!(sim.zombies(), &[pos(0, 0), pos(3, 3)]);
}

fn sim_no_humans() -> Apocalypse {
    sim(4, 4, &[], &[pos(0, 0), pos(3, 3)], &[], 0)
}

#[test]
fn fixed_seed_reproduces_the_whole_run() {
    let config = SimConfig {
        grid_height: 8,
        grid_width: 8,
        obstacles: vec![pos(3, 3), pos(3, 4), pos(4, 3)],
        zombies: vec![pos(0, 0), pos(7, 7)],
        humans: vec![pos(4, 5), pos(2, 6), pos(6, 1)],
        seed: 123,
    };
    let mut a = Apocalypse::new(config.clone());
    let mut b = Apocalypse::new(config);
    for _ in 0..5 {
        for sim in [&mut a, &mut b] {
            let zombie_field = sim.compute_distance_field(SourceKind::Zombie);
            sim.move_humans(&zombie_field);
            let human_field = sim.compute_distance_field(SourceKind::Human);
            sim.move_zombies(&human_field);
        }
        assert_eq!(a.humans(), b.humans());
        assert_eq!(a.zombies(), b.zombies());
    }
}

#[test]
fn out_of_bounds_additions_are_rejected() {
    let mut sim = sim(5, 5, &[], &[], &[], 0);
    assert_eq!(
        sim.add_zombie(pos(5, 0)),
        Err(OutOfBounds {
            cell: pos(5, 0),
            height: 5,
            width: 5,
        })
    );
    assert_eq!(
        sim.add_human(pos(0, 5)),
        Err(OutOfBounds {
            cell: pos(0, 5),
            height: 5,
            width: 5,
        })
    );
    assert_eq!(sim.num_zombies(), 0);
    assert_eq!(sim.num_humans(), 0);

    assert_eq!(sim.add_zombie(pos(4, 4)), Ok(()));
    assert_eq!(sim.num_zombies(), 1);
}

#[test]
fn entities_may_share_cells() {
    let mut sim = sim(3, 3, &[], &[], &[], 0);
    sim.add_human(pos(1, 1)).unwrap();
    sim.add_human(pos(1, 1)).unwrap();
    sim.add_zombie(pos(1, 1)).unwrap();
    assert_eq!(sim.num_humans(), 2);
    assert_eq!(sim.num_zombies(), 1);
    assert_eq!(sim.humans(), &[pos(1, 1), pos(1, 1)]);
}

#[test]
fn clear_resets_grid_and_registries() {
    let mut sim = sim(4, 4, &[pos(2, 2)], &[pos(0, 0)], &[pos(3, 3)], 0);
    assert!(!sim.grid().is_empty(pos(2, 2)));

    sim.clear();
    assert_eq!(sim.num_zombies(), 0);
    assert_eq!(sim.num_humans(), 0);
    assert!(sim.grid().is_empty(pos(2, 2)));

    // The cleared simulation is immediately reusable.
    sim.add_zombie(pos(1, 1)).unwrap();
    let field = sim.compute_distance_field(SourceKind::Zombie);
    assert_eq!(field[pos(1, 1)], 0);
    assert_eq!(field[pos(3, 3)], 4);
}

#[test]
fn try_new_propagates_config_errors() {
    let config = SimConfig {
        grid_height: 0,
        grid_width: 3,
        ..SimConfig::default()
    };
    assert_eq!(
        Apocalypse::try_new(config).err(),
        Some(SimConfigError::InvalidDimensions {
            height: 0,
            width: 3
        })
    );
}

#[test]
fn tick_metrics_summarize_the_zombie_field() {
    let ring = [
        pos(1, 1),
        pos(1, 2),
        pos(1, 3),
        pos(2, 1),
        pos(2, 3),
        pos(3, 1),
        pos(3, 2),
        pos(3, 3),
    ];
    // The human inside the ring is unreachable and drops out of the
    // distance aggregates; the two in the open sit at distances 4 and 0.
    let sim = sim(
        5,
        5,
        &ring,
        &[pos(0, 0)],
        &[pos(2, 2), pos(0, 4), pos(0, 0)],
        0,
    );
    let metrics = sim.collect_tick_metrics(3);
    assert_eq!(metrics.tick, 3);
    assert_eq!(metrics.zombie_count, 1);
    assert_eq!(metrics.human_count, 3);
    assert_eq!(metrics.nearest_zombie_distance, Some(0));
    assert!((metrics.mean_zombie_distance - 2.0).abs() < 1e-9);
}

#[test]
fn run_summary_defaults_schema_version_on_load() {
    let summary: RunSummary = serde_json::from_str(
        r#"{"ticks": 12, "sample_every": 2, "final_human_count": 3}"#,
    )
    .unwrap();
    assert_eq!(summary.schema_version, 1);
    assert_eq!(summary.ticks, 12);
    assert!(summary.samples.is_empty());

    let json = serde_json::to_string(&summary).unwrap();
    let back: RunSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back.sample_every, 2);
    assert_eq!(back.final_human_count, 3);
}
