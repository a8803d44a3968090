//! Perfect-maze generation by randomized iterative backtracking.
//!
//! Every cell carries a visited flag and a 4-bit wall mask using the same
//! side order as the map (`Top = 0`, `Right = 1`, `Bottom = 2`, `Left = 3`).
//! Maze rows grow downward: the `Top` neighbour of `(col, row)` is
//! `(col, row - 1)`.
//!
//! After [`Maze::generate`] the open edges form a spanning tree of the grid,
//! plus two boundary openings: the left wall of `(0, 0)` (entrance) and the
//! right wall of `(width - 1, height - 1)` (exit).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::map::{validate_dimensions, Side};

/// Wall mask with all four walls present.
pub const ALL_WALLS: u8 = 0b1111;

/// One maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MazeCell {
    visited: bool,
    walls: u8,
}

impl Default for MazeCell {
    fn default() -> Self {
        Self {
            visited: false,
            walls: ALL_WALLS,
        }
    }
}

impl MazeCell {
    /// Whether generation has reached this cell.
    #[must_use]
    pub const fn is_visited(self) -> bool {
        self.visited
    }

    /// Raw 4-bit wall mask.
    #[must_use]
    pub const fn walls(self) -> u8 {
        self.walls
    }

    /// Whether the wall on `side` is present.
    #[must_use]
    pub const fn has_wall(self, side: Side) -> bool {
        self.walls & side.bit() != 0
    }

    fn set_wall(&mut self, side: Side) {
        self.walls |= side.bit();
    }

    fn clear_wall(&mut self, side: Side) {
        self.walls &= !side.bit();
    }
}

/// A rectangular maze, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    width: u32,
    height: u32,
    cells: Vec<MazeCell>,
}

impl Maze {
    /// Create a maze with every wall present and no cell visited.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or too large.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        validate_dimensions(width, height)?;

        let cell_count = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            cells: vec![MazeCell::default(); cell_count],
        })
    }

    /// Maze width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Maze height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn coords_to_index(&self, col: u32, row: u32) -> usize {
        (row as usize) * (self.width as usize) + (col as usize)
    }

    /// Check if signed coordinates are within the maze.
    #[must_use]
    pub fn in_bounds(&self, col: i64, row: i64) -> bool {
        col >= 0 && row >= 0 && col < i64::from(self.width) && row < i64::from(self.height)
    }

    /// Cell at coordinates, or `None` if out of bounds.
    #[must_use]
    pub fn cell(&self, col: u32, row: u32) -> Option<MazeCell> {
        if self.in_bounds(i64::from(col), i64::from(row)) {
            Some(self.cells[self.coords_to_index(col, row)])
        } else {
            None
        }
    }

    /// Whether the wall on `side` of `(col, row)` is present.
    /// Returns `false` for out-of-bounds cells.
    #[must_use]
    pub fn has_wall(&self, col: u32, row: u32, side: Side) -> bool {
        self.cell(col, row).is_some_and(|c| c.has_wall(side))
    }

    /// Whether generation has visited `(col, row)`.
    #[must_use]
    pub fn is_visited(&self, col: u32, row: u32) -> bool {
        self.cell(col, row).is_some_and(|c| c.is_visited())
    }

    /// The cell across `side` of `(col, row)`, if it exists.
    #[must_use]
    pub fn neighbor(&self, col: u32, row: u32, side: Side) -> Option<(u32, u32)> {
        let (dc, dr) = match side {
            Side::Top => (0, -1),
            Side::Right => (1, 0),
            Side::Bottom => (0, 1),
            Side::Left => (-1, 0),
        };
        let n_col = i64::from(col) + dc;
        let n_row = i64::from(row) + dr;
        if self.in_bounds(n_col, n_row) {
            Some((n_col as u32, n_row as u32))
        } else {
            None
        }
    }

    /// Put back the wall on `side` of `(col, row)` and its mirror on the
    /// neighbour, if there is one.
    /// Returns `false` if `(col, row)` is out of bounds.
    pub fn add_wall(&mut self, col: u32, row: u32, side: Side) -> bool {
        self.update_wall(col, row, side, MazeCell::set_wall)
    }

    /// Open the wall on `side` of `(col, row)` and its mirror on the
    /// neighbour, if there is one.
    /// Returns `false` if `(col, row)` is out of bounds.
    pub fn remove_wall(&mut self, col: u32, row: u32, side: Side) -> bool {
        self.update_wall(col, row, side, MazeCell::clear_wall)
    }

    fn update_wall(&mut self, col: u32, row: u32, side: Side, op: fn(&mut MazeCell, Side)) -> bool {
        if !self.in_bounds(i64::from(col), i64::from(row)) {
            return false;
        }
        let index = self.coords_to_index(col, row);
        op(&mut self.cells[index], side);

        if let Some((n_col, n_row)) = self.neighbor(col, row, side) {
            let n_index = self.coords_to_index(n_col, n_row);
            op(&mut self.cells[n_index], side.opposite());
        }
        true
    }

    fn set_visited(&mut self, col: u32, row: u32) {
        let index = self.coords_to_index(col, row);
        self.cells[index].visited = true;
    }

    /// Unvisited neighbours of a cell in left, top, right, bottom order.
    fn unvisited_neighbors(&self, col: u32, row: u32) -> ([(u32, u32, Side); 4], usize) {
        let mut found = [(0, 0, Side::Top); 4];
        let mut count = 0;
        for side in [Side::Left, Side::Top, Side::Right, Side::Bottom] {
            if let Some((n_col, n_row)) = self.neighbor(col, row, side) {
                if !self.is_visited(n_col, n_row) {
                    found[count] = (n_col, n_row, side);
                    count += 1;
                }
            }
        }
        (found, count)
    }

    /// Carve a perfect maze, drawing every choice from `rng`.
    ///
    /// Resets all cells first, so calling it again regenerates the maze.
    /// The output is fully determined by the values `rng` produces.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) {
        self.cells.fill(MazeCell::default());

        let capacity = (self.width as usize) * (self.height as usize);
        let mut stack: Vec<(u32, u32)> = Vec::with_capacity(capacity);

        let start = (self.width / 2, self.height / 2);
        self.set_visited(start.0, start.1);
        stack.push(start);

        while let Some(&(col, row)) = stack.last() {
            let (candidates, count) = self.unvisited_neighbors(col, row);
            if count == 0 {
                stack.pop();
                continue;
            }

            let (n_col, n_row, side) = candidates[rng.random_range(0..count)];
            self.remove_wall(col, row, side);
            self.set_visited(n_col, n_row);
            stack.push((n_col, n_row));
        }

        self.remove_wall(0, 0, Side::Left);
        self.remove_wall(self.width - 1, self.height - 1, Side::Right);

        tracing::debug!(
            width = self.width,
            height = self.height,
            open_edges = self.open_edge_count(),
            "Maze generated"
        );
    }

    /// Generate with a [`StdRng`] seeded from `seed`.
    pub fn generate_seeded(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(&mut rng);
    }

    /// Number of open edges. Interior edges count once; boundary openings
    /// count once each.
    #[must_use]
    pub fn open_edge_count(&self) -> usize {
        let mut count = 0;
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = self.cells[self.coords_to_index(col, row)];
                for side in Side::ALL {
                    if cell.has_wall(side) {
                        continue;
                    }
                    match self.neighbor(col, row, side) {
                        // interior edges are counted from their top/left owner only
                        Some(_) if matches!(side, Side::Right | Side::Bottom) => count += 1,
                        Some(_) => {}
                        None => count += 1,
                    }
                }
            }
        }
        count
    }

    /// Row-major view of all cells.
    #[must_use]
    pub fn cells(&self) -> &[MazeCell] {
        &self.cells
    }
}
