//! Non-exhausting cyclic coordinate queues.
//!
//! Drawing from a [`CoordCycle`] pops the front and immediately pushes it to the
//! back, so an initialised cycle serves unlimited draws in a fixed round-robin
//! order. Permanent removal rebuilds the queue.

use std::collections::VecDeque;

use log::warn;

use crate::coord::Coord;
use crate::error::AllocatorError;
use crate::seed::shuffle;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoordCycle {
    queue: VecDeque<Coord>,
}

impl CoordCycle {
    pub fn new(coords: Vec<Coord>) -> Self {
        Self { queue: VecDeque::from(coords) }
    }

    /// Shuffles `coords` with `seed` and cycles through them in that order.
    pub fn shuffled(mut coords: Vec<Coord>, seed: u64) -> Self {
        shuffle(&mut coords, seed);
        Self::new(coords)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Dequeue-then-requeue.
    pub fn draw(&mut self) -> Option<Coord> {
        let coord = self.queue.pop_front()?;
        self.queue.push_back(coord);
        Some(coord)
    }

    /// Remaining order starting from the current front.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.queue.iter().copied()
    }

    /// Rebuilds the queue without `coord`, keeping the order of the rest.
    /// O(n); the draw position afterwards is the rebuilt queue's front.
    pub fn rebuild_without(&mut self, coord: Coord) -> bool {
        let before = self.queue.len();
        let rebuilt: VecDeque<Coord> = self.queue.iter().copied().filter(|&c| c != coord).collect();
        let removed = rebuilt.len() != before;
        self.queue = rebuilt;
        removed
    }
}

/// Serves "random" open tiles for spawn selection without ever running dry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenTileAllocator {
    cycle: CoordCycle,
}

impl OpenTileAllocator {
    /// Shuffles the open coordinates with the map seed.
    pub fn new(open_coords: Vec<Coord>, seed: u64) -> Self {
        Self { cycle: CoordCycle::shuffled(open_coords, seed) }
    }

    pub fn len(&self) -> usize {
        self.cycle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycle.is_empty()
    }

    pub fn next_open_tile(&mut self) -> Result<Coord, AllocatorError> {
        self.cycle.draw().ok_or_else(|| {
            warn!("no open tiles available");
            AllocatorError::Exhausted
        })
    }

    /// Permanently excludes `coord` from future draws.
    pub fn remove_tile(&mut self, coord: Coord) -> bool {
        self.cycle.rebuild_without(coord)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cycle.iter().any(|c| c == coord)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cycle.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn coords(count: i32) -> Vec<Coord> {
        (0..count).map(|x| Coord::new(x, 0)).collect()
    }

    #[test]
    fn draws_cycle_through_every_tile_before_repeating() {
        let mut allocator = OpenTileAllocator::new(coords(9), 42);
        let first_cycle: Vec<Coord> =
            (0..9).map(|_| allocator.next_open_tile().expect("non-empty allocator")).collect();
        let distinct: BTreeSet<Coord> = first_cycle.iter().copied().collect();
        assert_eq!(distinct.len(), 9);

        let second_cycle: Vec<Coord> =
            (0..9).map(|_| allocator.next_open_tile().expect("non-empty allocator")).collect();
        assert_eq!(first_cycle, second_cycle, "round-robin order repeats exactly");
    }

    #[test]
    fn empty_allocator_reports_exhaustion() {
        let mut allocator = OpenTileAllocator::new(Vec::new(), 1);
        assert_eq!(allocator.next_open_tile(), Err(AllocatorError::Exhausted));
        assert_eq!(allocator.next_open_tile(), Err(AllocatorError::Exhausted));
    }

    #[test]
    fn single_tile_is_returned_forever() {
        let mut allocator = OpenTileAllocator::new(vec![Coord::new(3, 4)], 8);
        for _ in 0..100 {
            assert_eq!(allocator.next_open_tile(), Ok(Coord::new(3, 4)));
        }
    }

    #[test]
    fn removed_tile_is_never_drawn_again() {
        let mut allocator = OpenTileAllocator::new(coords(6), 3);
        let victim = Coord::new(2, 0);
        assert!(allocator.remove_tile(victim));
        assert!(!allocator.remove_tile(victim), "second removal finds nothing");
        assert_eq!(allocator.len(), 5);
        assert!(!allocator.contains(victim));
        for _ in 0..50 {
            assert_ne!(allocator.next_open_tile(), Ok(victim));
        }
    }

    #[test]
    fn removing_every_tile_exhausts_the_allocator() {
        let mut allocator = OpenTileAllocator::new(coords(3), 0);
        for coord in coords(3) {
            allocator.remove_tile(coord);
        }
        assert!(allocator.is_empty());
        assert_eq!(allocator.next_open_tile(), Err(AllocatorError::Exhausted));
    }

    #[test]
    fn rebuild_keeps_relative_order_of_remaining_tiles() {
        let mut cycle = CoordCycle::new(coords(5));
        cycle.draw();
        cycle.draw();
        cycle.rebuild_without(Coord::new(3, 0));
        let order: Vec<Coord> = cycle.iter().collect();
        assert_eq!(
            order,
            vec![Coord::new(2, 0), Coord::new(4, 0), Coord::new(0, 0), Coord::new(1, 0)]
        );
    }

    #[test]
    fn same_seed_gives_same_draw_order() {
        let mut left = OpenTileAllocator::new(coords(20), 99);
        let mut right = OpenTileAllocator::new(coords(20), 99);
        for _ in 0..40 {
            assert_eq!(left.next_open_tile(), right.next_open_tile());
        }
    }
}
