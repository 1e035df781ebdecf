//! Flood-fill reachability over the occupancy grid.
//!
//! The validator owns its visited buffer and BFS queue so repeated checks during
//! one placement pass reuse the allocations. Both are cleared at the start of
//! every call; nothing carries over between checks.

use std::collections::VecDeque;

use crate::coord::Coord;
use crate::grid::OccupancyGrid;

#[derive(Debug, Default)]
pub struct ConnectivityValidator {
    visited: Vec<bool>,
    queue: VecDeque<Coord>,
}

impl ConnectivityValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open cells 4-connected to `origin`, counting `origin` itself.
    pub fn reachable_count(&mut self, grid: &OccupancyGrid, origin: Coord) -> usize {
        self.reachable_count_where(grid, origin, |_| false)
    }

    /// [`reachable_count`](Self::reachable_count) with every cell matching
    /// `sealed` treated as occupied.
    pub fn reachable_count_where(
        &mut self,
        grid: &OccupancyGrid,
        origin: Coord,
        sealed: impl Fn(Coord) -> bool,
    ) -> usize {
        self.visited.clear();
        self.visited.resize(grid.cell_count(), false);
        self.queue.clear();

        let Some(origin_index) = grid.index_of(origin) else {
            return 0;
        };
        if grid.is_occupied(origin) || sealed(origin) {
            return 0;
        }

        self.visited[origin_index] = true;
        self.queue.push_back(origin);
        let mut reachable = 1;

        while let Some(tile) = self.queue.pop_front() {
            for next in tile.neighbours() {
                let Some(index) = grid.index_of(next) else {
                    continue;
                };
                if self.visited[index] || grid.is_occupied(next) || sealed(next) {
                    continue;
                }
                self.visited[index] = true;
                self.queue.push_back(next);
                reachable += 1;
            }
        }

        reachable
    }

    /// True iff every open cell is reachable from `origin`, where the grid is
    /// expected to hold `obstacle_count` obstacles.
    pub fn is_fully_accessible(
        &mut self,
        grid: &OccupancyGrid,
        origin: Coord,
        obstacle_count: usize,
    ) -> bool {
        let Some(expected) = grid.cell_count().checked_sub(obstacle_count) else {
            return false;
        };
        self.reachable_count(grid, origin) == expected
    }
}

/// One-shot convenience wrapper around [`ConnectivityValidator`].
pub fn is_fully_accessible(grid: &OccupancyGrid, origin: Coord, obstacle_count: usize) -> bool {
    ConnectivityValidator::new().is_fully_accessible(grid, origin, obstacle_count)
}
