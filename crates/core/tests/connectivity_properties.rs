use arena_core::{
    ConnectivityValidator, Coord, MapConfig, ObstacleKind, OccupancyGrid, PlacementMode, generate,
};
use proptest::prelude::*;

fn open_cells_reachable_from_center(grid: &OccupancyGrid, center: Coord) -> bool {
    ConnectivityValidator::new().is_fully_accessible(grid, center, grid.obstacle_count())
}

#[test]
fn ten_by_ten_scenario_stays_connected_with_center_open() {
    let map = generate(&MapConfig::new(10, 10, 0.2, 42)).expect("valid config");
    let center = Coord::new(5, 5);

    assert_eq!(map.center(), center);
    assert!(!map.grid().is_occupied(center));
    assert!(map.report().attempts <= 20);
    assert!(map.obstacle_count() <= 20);
    assert!(open_cells_reachable_from_center(map.grid(), center));
}

#[test]
fn saturated_three_by_three_terminates() {
    for seed in 0..64 {
        let config = MapConfig::new(3, 3, 1.0, seed).with_placement(PlacementMode::FillToTarget);
        let map = generate(&config).expect("valid config");
        assert!(!map.grid().is_occupied(Coord::new(1, 1)));
        assert!(map.report().is_under_density());
        assert!(open_cells_reachable_from_center(map.grid(), map.center()));
    }
}

#[test]
fn dense_ringed_maps_hand_out_only_reachable_tiles() {
    let mut validator = ConnectivityValidator::new();
    for seed in 0..500 {
        let config = MapConfig::new(10, 10, 0.35, seed).with_boundary_obstacles(true);
        let map = generate(&config).expect("valid config");
        let reachable = validator.reachable_count(map.grid(), map.center());
        assert_eq!(reachable, map.grid().open_count(), "seed={seed}");
        assert_eq!(map.open_tiles().len(), reachable, "seed={seed}");
    }
}

#[test]
fn single_row_maps_keep_a_corridor_to_the_center() {
    let map = generate(&MapConfig::new(9, 1, 1.0, 3)).expect("valid config");
    assert!(open_cells_reachable_from_center(map.grid(), map.center()));
    assert_eq!(map.obstacle_count(), map.report().placed);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn generated_maps_keep_open_cells_connected(
        seed in any::<u64>(),
        width in 1_i32..=24,
        height in 1_i32..=24,
        density in 0.0_f32..=1.0,
        fill in any::<bool>(),
    ) {
        let placement =
            if fill { PlacementMode::FillToTarget } else { PlacementMode::AttemptBudget };
        let config = MapConfig::new(width, height, density, seed).with_placement(placement);
        let map = generate(&config).expect("valid config");
        let report = map.report();

        prop_assert!(!map.grid().is_occupied(config.center()));
        prop_assert!(open_cells_reachable_from_center(map.grid(), config.center()));
        prop_assert!(map.obstacle_count() <= config.target_obstacle_count());
        prop_assert_eq!(map.obstacle_count(), report.placed);
        prop_assert_eq!(report.placed + report.rejected, report.attempts);
        if !fill {
            prop_assert!(report.attempts <= report.target);
        }
        prop_assert_eq!(map.open_tiles().len(), map.grid().open_count());
    }

    #[test]
    fn ringed_maps_keep_every_open_tile_connected(
        seed in any::<u64>(),
        width in 3_i32..=20,
        height in 3_i32..=20,
        density in 0.0_f32..=0.6,
    ) {
        let config = MapConfig::new(width, height, density, seed).with_boundary_obstacles(true);
        let map = generate(&config).expect("valid config");
        let ring: Vec<Coord> = map
            .obstacles()
            .iter()
            .filter(|obstacle| obstacle.kind == ObstacleKind::Boundary)
            .map(|obstacle| obstacle.coord)
            .collect();

        for coord in map.grid().boundary_coords() {
            prop_assert!(map.grid().is_occupied(coord));
        }
        prop_assert!(ring.iter().all(|&coord| map.grid().is_boundary(coord)));
        prop_assert!(map.open_tiles().iter().all(|coord| !map.grid().is_boundary(coord)));

        prop_assert!(!map.grid().is_occupied(config.center()));
        prop_assert!(open_cells_reachable_from_center(map.grid(), config.center()));
        prop_assert_eq!(map.open_tiles().len(), map.grid().open_count());
    }
}
