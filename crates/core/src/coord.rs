//! Integer tile coordinates shared by the grid, the allocator, and the generator.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Up, right, down, left.
    pub fn neighbours(self) -> [Coord; 4] {
        [
            Coord { x: self.x, y: self.y + 1 },
            Coord { x: self.x + 1, y: self.y },
            Coord { x: self.x, y: self.y - 1 },
            Coord { x: self.x - 1, y: self.y },
        ]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
