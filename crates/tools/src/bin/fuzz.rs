use anyhow::{Result, bail};
use arena_core::{
    ConnectivityValidator, MapConfig, MapGenerator, MapSet, ObstacleKind, PlacementMode,
};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    iterations: u32,
    #[arg(long, default_value_t = 32)]
    max_size: u32,
}

fn random_config(rng: &mut ChaCha8Rng, max_size: u32) -> MapConfig {
    let width = 1 + (rng.next_u32() % max_size) as i32;
    let height = 1 + (rng.next_u32() % max_size) as i32;
    let density = (rng.next_u32() % 1_001) as f32 / 1_000.0;
    let placement = if rng.next_u32() % 2 == 0 {
        PlacementMode::AttemptBudget
    } else {
        PlacementMode::FillToTarget
    };
    MapConfig::new(width, height, density, rng.next_u64())
        .with_heights(0.5, 3.0)
        .with_boundary_obstacles(rng.next_u32() % 4 == 0)
        .with_placement(placement)
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::init();
    if args.max_size == 0 {
        bail!("--max-size must be at least 1");
    }

    println!("Starting map fuzz on seed {} for {} iterations...", args.seed, args.iterations);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut validator = ConnectivityValidator::new();

    for iteration in 0..args.iterations {
        let config = random_config(&mut rng, args.max_size);
        let mut generator = MapGenerator::new(MapSet::new(vec![config.clone()])?);
        let map = generator.generate_map(0)?;
        let grid = map.grid();
        let center = config.center();

        // Assert invariants
        let interior =
            map.obstacles().iter().filter(|o| o.kind == ObstacleKind::Interior).count();
        assert!(interior <= config.target_obstacle_count(), "Invariant failed: over density");
        assert_eq!(map.open_tiles().len(), grid.open_count(), "Invariant failed: open set");

        // Rings on grids thinner than three cells may cover the center.
        if !config.boundary_obstacles || (config.size.width >= 3 && config.size.height >= 3) {
            assert!(!grid.is_occupied(center), "Invariant failed: center occupied");
            assert!(
                validator.is_fully_accessible(grid, center, grid.obstacle_count()),
                "Invariant failed: unreachable open tile (iteration {iteration}, {config:?})"
            );
        }

        let open_count = map.open_tiles().len();
        for _ in 0..(open_count * 2) {
            let handle = generator.random_open_tile()?;
            assert!(
                !generator.current()?.grid().is_occupied(handle.coord()),
                "Invariant failed: spawn on obstacle"
            );
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
