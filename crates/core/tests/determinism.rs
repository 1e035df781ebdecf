use arena_core::{Coord, MapConfig, MapGenerator, MapSet, PlacementMode, generate};
use xxhash_rust::xxh3::xxh3_64;

fn fingerprint(config: &MapConfig) -> u64 {
    let map = generate(config).expect("valid config");
    xxh3_64(&map.canonical_bytes())
}

#[test]
fn map_fingerprint_matrix_is_stable() {
    let cases = [
        (MapConfig::new(10, 10, 0.2, 42), 1_788_928_948_895_335_639_u64),
        (MapConfig::new(31, 17, 0.45, 123_456).with_heights(0.5, 3.0), 3_662_540_519_370_987_010),
        (MapConfig::new(12, 12, 0.3, 7).with_boundary_obstacles(true), 10_477_507_595_423_627_710),
        (
            MapConfig::new(20, 20, 0.7, 99).with_placement(PlacementMode::FillToTarget),
            13_400_519_203_397_257_905,
        ),
        (
            MapConfig::new(16, 11, 0.5, 2_024)
                .with_heights(1.0, 4.0)
                .with_boundary_obstacles(true)
                .with_placement(PlacementMode::FillToTarget),
            16_673_502_020_557_629_737,
        ),
    ];

    for (config, expected_hash) in cases {
        assert_eq!(
            fingerprint(&config),
            expected_hash,
            "update expected hash only when generation rules intentionally change: {config:?}"
        );
    }
}

#[test]
fn first_open_tile_draws_are_stable() {
    let maps = MapSet::new(vec![MapConfig::new(10, 10, 0.2, 42)]).expect("valid set");
    let mut generator = MapGenerator::new(maps);
    generator.generate_map(0).expect("map generates");
    let drawn: Vec<Coord> =
        (0..12).map(|_| generator.random_open_tile().expect("open tile").coord()).collect();
    let expected = [
        (2, 1),
        (9, 2),
        (0, 7),
        (5, 0),
        (0, 5),
        (5, 6),
        (4, 2),
        (5, 7),
        (0, 1),
        (1, 4),
        (9, 0),
        (7, 2),
    ]
    .map(Coord::from);
    assert_eq!(drawn, expected);
}

#[test]
fn same_config_produces_byte_identical_maps() {
    let configs = [
        MapConfig::new(10, 10, 0.2, 42),
        MapConfig::new(31, 17, 0.45, 123_456).with_heights(0.5, 3.0),
        MapConfig::new(12, 12, 0.3, 7).with_boundary_obstacles(true),
        MapConfig::new(20, 20, 0.7, 99).with_placement(PlacementMode::FillToTarget),
    ];
    for config in configs {
        let left = generate(&config).expect("valid config");
        let right = generate(&config).expect("valid config");
        assert_eq!(left.canonical_bytes(), right.canonical_bytes(), "config {config:?}");
    }
}

#[test]
fn changing_the_seed_changes_the_map() {
    let base = MapConfig::new(16, 16, 0.3, 1_000);
    let mut reseeded = base.clone();
    reseeded.seed = 1_001;
    assert_ne!(fingerprint(&base), fingerprint(&reseeded));
}

#[test]
fn open_tile_draw_order_repeats_across_runs() {
    fn draws(seed: u64) -> Vec<(i32, i32)> {
        let maps = MapSet::new(vec![MapConfig::new(14, 9, 0.25, seed)]).expect("valid set");
        let mut generator = MapGenerator::new(maps);
        generator.generate_map(0).expect("map generates");
        (0..200)
            .map(|_| {
                let coord = generator.random_open_tile().expect("open tile").coord();
                (coord.x, coord.y)
            })
            .collect()
    }

    assert_eq!(draws(2_024), draws(2_024));
    assert_ne!(draws(2_024), draws(2_025));
}

#[test]
fn regenerating_the_same_index_reproduces_the_map() {
    let mut generator = MapGenerator::new(MapSet::default());
    let first = generator.generate_map(1).expect("map 1 generates").canonical_bytes();
    generator.generate_map(0).expect("map 0 generates");
    let again = generator.generate_map(1).expect("map 1 generates").canonical_bytes();
    assert_eq!(first, again);
}

#[test]
fn heights_do_not_influence_the_occupancy_layout() {
    let flat = generate(&MapConfig::new(18, 18, 0.35, 5)).expect("valid config");
    let tall = generate(&MapConfig::new(18, 18, 0.35, 5).with_heights(2.0, 9.0))
        .expect("valid config");
    assert_eq!(flat.grid(), tall.grid());
    assert!(tall.obstacles().iter().all(|obstacle| (2.0..=9.0).contains(&obstacle.height)));
}
