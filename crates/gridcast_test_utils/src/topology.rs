//! Maze topology checks.
//!
//! A perfect maze's interior openings form a spanning tree of the cell grid:
//! `width * height - 1` edges and one connected component. These helpers
//! recover that graph from a [`Maze`] so tests can check it directly.

use std::collections::VecDeque;

use gridcast_core::map::Side;
use gridcast_core::maze::Maze;

/// An interior opening between two adjacent cells, smaller cell first.
pub type Edge = ((u32, u32), (u32, u32));

/// Interior edges where both facing walls are open.
#[must_use]
pub fn open_interior_edges(maze: &Maze) -> Vec<Edge> {
    let mut edges = Vec::new();
    for row in 0..maze.height() {
        for col in 0..maze.width() {
            for side in [Side::Right, Side::Bottom] {
                if let Some(other) = maze.neighbor(col, row, side) {
                    if !maze.has_wall(col, row, side) && !maze.has_wall(other.0, other.1, side.opposite()) {
                        edges.push(((col, row), other));
                    }
                }
            }
        }
    }
    edges
}

/// Boundary sides that are open, as `(col, row, side)`.
#[must_use]
pub fn boundary_openings(maze: &Maze) -> Vec<(u32, u32, Side)> {
    let mut openings = Vec::new();
    for row in 0..maze.height() {
        for col in 0..maze.width() {
            for side in Side::ALL {
                if maze.neighbor(col, row, side).is_none() && !maze.has_wall(col, row, side) {
                    openings.push((col, row, side));
                }
            }
        }
    }
    openings
}

/// Every interior wall agrees with its mirror on the neighbouring cell.
#[must_use]
pub fn walls_are_symmetric(maze: &Maze) -> bool {
    (0..maze.height()).all(|row| {
        (0..maze.width()).all(|col| {
            Side::ALL.iter().all(|&side| match maze.neighbor(col, row, side) {
                Some((n_col, n_row)) => {
                    maze.has_wall(col, row, side) == maze.has_wall(n_col, n_row, side.opposite())
                }
                None => true,
            })
        })
    })
}

/// Number of cells reachable from `(0, 0)` through open interior edges.
#[must_use]
pub fn reachable_cells(maze: &Maze) -> usize {
    let width = maze.width() as usize;
    let mut seen = vec![false; width * maze.height() as usize];
    let mut queue = VecDeque::from([(0u32, 0u32)]);
    seen[0] = true;
    let mut count = 0;

    while let Some((col, row)) = queue.pop_front() {
        count += 1;
        for side in Side::ALL {
            if maze.has_wall(col, row, side) {
                continue;
            }
            if let Some((n_col, n_row)) = maze.neighbor(col, row, side) {
                let index = n_row as usize * width + n_col as usize;
                if !seen[index] {
                    seen[index] = true;
                    queue.push_back((n_col, n_row));
                }
            }
        }
    }
    count
}

/// Interior openings form a spanning tree: connected, with exactly
/// `cells - 1` edges, hence exactly one simple path between any two cells.
#[must_use]
pub fn is_spanning_tree(maze: &Maze) -> bool {
    let cells = maze.width() as usize * maze.height() as usize;
    open_interior_edges(maze).len() == cells - 1 && reachable_cells(maze) == cells
}
