//! Obstacle placement: propose, provisionally mark, validate, roll back.
//!
//! Candidates come from the shuffled all-tiles cycle. Each coordinate is offered
//! at most once per pass. A candidate that would land on the map center, or
//! that would cut any open cell off from the center, is rolled back and never
//! retried, so the final count can fall short of the density target.
//!
//! With the boundary ring enabled, free ring cells count as walls during
//! validation. The ring is laid down afterwards, so no interior pocket may
//! depend on a path along the perimeter.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::allocator::CoordCycle;
use crate::config::{Colour, MapConfig, PlacementMode};
use crate::connectivity::ConnectivityValidator;
use crate::coord::Coord;
use crate::grid::OccupancyGrid;
use crate::seed::{HEIGHT_STREAM, SeededRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Density-placed; subject to the connectivity check.
    Interior,
    /// Outer containment ring; placed without a connectivity check.
    Boundary,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub coord: Coord,
    pub height: f32,
    pub kind: ObstacleKind,
    /// Row-shaded colour for interior obstacles; the ring carries none.
    pub colour: Option<Colour>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// `floor(width * height * density)`.
    pub target: usize,
    /// Free candidates offered to the validator.
    pub attempts: usize,
    pub placed: usize,
    pub rejected: usize,
    pub boundary_placed: usize,
}

impl PlacementReport {
    /// Fewer interior obstacles than the density asks for. Expected under
    /// high density; never compensated for.
    pub fn is_under_density(&self) -> bool {
        self.placed < self.target
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacementOutcome {
    pub report: PlacementReport,
    pub obstacles: Vec<Obstacle>,
    /// Cells left open, in column-major grid order.
    pub open_coords: Vec<Coord>,
}

fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t
}

fn should_stop(mode: PlacementMode, report: &PlacementReport) -> bool {
    match mode {
        PlacementMode::AttemptBudget => report.attempts >= report.target,
        PlacementMode::FillToTarget => report.placed >= report.target,
    }
}

/// Density-based placement followed by the optional boundary ring.
pub fn place_obstacles(
    grid: &mut OccupancyGrid,
    config: &MapConfig,
    candidates: &mut CoordCycle,
    validator: &mut ConnectivityValidator,
) -> PlacementOutcome {
    let center = config.center();
    let mut report =
        PlacementReport { target: config.target_obstacle_count(), ..PlacementReport::default() };
    let mut obstacles = Vec::with_capacity(report.target);
    let mut heights = SeededRng::for_stream(config.seed, HEIGHT_STREAM);
    let seal_ring = config.boundary_obstacles;
    let mut free_ring_cells = if seal_ring {
        grid.boundary_coords().filter(|&coord| !grid.is_occupied(coord)).count()
    } else {
        0
    };

    let mut offered = 0;
    while offered < candidates.len() && !should_stop(config.placement, &report) {
        let Some(candidate) = candidates.draw() else {
            break;
        };
        offered += 1;
        if grid.is_occupied(candidate) {
            continue;
        }

        grid.occupy(candidate);
        report.attempts += 1;
        let on_ring = seal_ring && grid.is_boundary(candidate);
        let sealed_cells = free_ring_cells - usize::from(on_ring);

        if candidate == center
            || !stays_connected(grid, center, seal_ring, sealed_cells, validator)
        {
            grid.vacate(candidate);
            report.rejected += 1;
            trace!("rejected obstacle candidate {candidate}");
            continue;
        }

        let height =
            lerp(config.min_obstacle_height, config.max_obstacle_height, heights.next_unit_f32());
        obstacles.push(Obstacle {
            coord: candidate,
            height,
            kind: ObstacleKind::Interior,
            colour: Some(config.obstacle_colour(candidate.y)),
        });
        report.placed += 1;
        if on_ring {
            free_ring_cells -= 1;
        }
    }

    if config.boundary_obstacles {
        let ring = place_boundary_ring(grid, config.max_obstacle_height);
        report.boundary_placed = ring.len();
        obstacles.extend(ring);
    }

    let open_coords: Vec<Coord> = grid.coords().filter(|&coord| !grid.is_occupied(coord)).collect();

    debug!(
        "placed {}/{} obstacles ({} attempts, {} rejected, {} boundary), {} open tiles",
        report.placed,
        report.target,
        report.attempts,
        report.rejected,
        report.boundary_placed,
        open_coords.len()
    );

    PlacementOutcome { report, obstacles, open_coords }
}

/// Every open cell outside the `sealed_cells` free ring cells is reachable from `center`.
fn stays_connected(
    grid: &OccupancyGrid,
    center: Coord,
    seal_ring: bool,
    sealed_cells: usize,
    validator: &mut ConnectivityValidator,
) -> bool {
    if !seal_ring {
        return validator.is_fully_accessible(grid, center, grid.obstacle_count());
    }
    let reachable = validator.reachable_count_where(grid, center, |coord| grid.is_boundary(coord));
    reachable == grid.open_count() - sealed_cells
}

/// Occupies every free outer-ring cell without checking connectivity.
pub fn place_boundary_ring(grid: &mut OccupancyGrid, height: f32) -> Vec<Obstacle> {
    let mut ring = Vec::new();
    for coord in grid.boundary_coords() {
        if grid.occupy(coord) {
            ring.push(Obstacle { coord, height, kind: ObstacleKind::Boundary, colour: None });
        }
    }
    ring
}
