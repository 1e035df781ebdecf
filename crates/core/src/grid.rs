//! Boolean occupancy grid with single-cell occupy/vacate for speculative placement.

use crate::coord::Coord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    occupied: usize,
}

impl OccupancyGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![false; width * height], occupied: 0 }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn obstacle_count(&self) -> usize {
        self.occupied
    }

    pub fn open_count(&self) -> usize {
        self.cells.len() - self.occupied
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Row-major index of `coord`, or `None` outside the grid.
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some((coord.y as usize) * self.width + (coord.x as usize))
    }

    pub fn coord_at(&self, index: usize) -> Coord {
        Coord { x: (index % self.width) as i32, y: (index / self.width) as i32 }
    }

    /// Cells outside the grid read as occupied.
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.index_of(coord).is_none_or(|index| self.cells[index])
    }

    /// Marks `coord` occupied. Returns `false` if it already was or lies outside.
    pub fn occupy(&mut self, coord: Coord) -> bool {
        let Some(index) = self.index_of(coord) else {
            return false;
        };
        if self.cells[index] {
            return false;
        }
        self.cells[index] = true;
        self.occupied += 1;
        true
    }

    /// Undo for [`occupy`](Self::occupy).
    pub fn vacate(&mut self, coord: Coord) -> bool {
        let Some(index) = self.index_of(coord) else {
            return false;
        };
        if !self.cells[index] {
            return false;
        }
        self.cells[index] = false;
        self.occupied -= 1;
        true
    }

    /// Every coordinate, column by column (`x` outer, `y` inner).
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..width).flat_map(move |x| (0..height).map(move |y| Coord { x, y }))
    }

    /// The outer ring in column-major order.
    pub fn boundary_coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..width).flat_map(move |x| {
            (0..height)
                .filter(move |&y| x == 0 || x == width - 1 || y == 0 || y == height - 1)
                .map(move |y| Coord { x, y })
        })
    }

    pub fn is_boundary(&self, coord: Coord) -> bool {
        self.in_bounds(coord)
            && (coord.x == 0
                || coord.y == 0
                || coord.x as usize == self.width - 1
                || coord.y as usize == self.height - 1)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.cells.len());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.cells.iter().map(|&occupied| u8::from(occupied)));
        bytes
    }

    /// `#` obstacle, `.` open, `C` for `center`; the top row (`y = height - 1`) first.
    pub fn render_ascii(&self, center: Coord) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let coord = Coord { x: x as i32, y: y as i32 };
                out.push(if coord == center {
                    'C'
                } else if self.cells[y * self.width + x] {
                    '#'
                } else {
                    '.'
                });
            }
            out.push('\n');
        }
        out
    }
}
