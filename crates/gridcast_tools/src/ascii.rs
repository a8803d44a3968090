//! Terminal rendering: top-down mazes and first-person frames.
//!
//! Frames are drawn the classic way: one ray per screen column, a vertical
//! wall strip whose height is inversely proportional to the fisheye-corrected
//! distance, centred on the horizon.

use std::fmt;

use gridcast_core::level::{Level, Palette};
use gridcast_core::map::{Material, Side};
use gridcast_core::maze::Maze;
use gridcast_core::raycast::RayHit;
use rayon::prelude::*;

use crate::error::{Result, ToolError};

/// Draw a maze with `+`, `--` and `|`, row 0 at the top.
#[must_use]
pub fn render_maze(maze: &Maze) -> String {
    let mut out = String::new();
    for row in 0..maze.height() {
        push_horizontal_edges(&mut out, maze, row, Side::Top);

        for col in 0..maze.width() {
            out.push(if maze.has_wall(col, row, Side::Left) { '|' } else { ' ' });
            out.push_str("  ");
        }
        let last = maze.width() - 1;
        out.push(if maze.has_wall(last, row, Side::Right) { '|' } else { ' ' });
        out.push('\n');
    }
    push_horizontal_edges(&mut out, maze, maze.height() - 1, Side::Bottom);
    out
}

fn push_horizontal_edges(out: &mut String, maze: &Maze, row: u32, side: Side) {
    for col in 0..maze.width() {
        out.push('+');
        out.push_str(if maze.has_wall(col, row, side) { "--" } else { "  " });
    }
    out.push_str("+\n");
}

/// Relative ray angle for each screen column.
///
/// Column `c` looks `-atan((c - columns/2) / min(columns, rows))` away from
/// the facing direction, so the left half of the screen sees
/// counter-clockwise of the view direction.
#[must_use]
pub fn column_angles(columns: u16, rows: u16) -> Vec<f64> {
    let scaler = f64::from(columns.min(rows));
    let centre = i32::from(columns) / 2;
    (0..i32::from(columns))
        .map(|col| -(f64::from(col - centre) / scaler).atan())
        .collect()
}

/// Rows `[start, end)` covered by a wall strip at `distance`.
#[must_use]
pub fn wall_span(distance: f64, columns: u16, rows: u16) -> (usize, usize) {
    let rows_i = i64::from(rows);
    let scaler = f64::from(columns.min(rows));
    let length = (scaler / distance).round();
    let length = if length.is_nan() {
        0
    } else {
        (length as i64).clamp(0, rows_i)
    };

    let start = ((rows_i - length) / 2).max(0);
    let end = ((rows_i + length) / 2).min(rows_i);
    (start as usize, end as usize)
}

/// Character used for a material.
#[must_use]
pub fn shade(palette: &Palette, material: Material) -> char {
    if material == palette.horizontal_wall {
        '#'
    } else if material == palette.vertical_wall {
        '%'
    } else if material == palette.out_of_bounds {
        ':'
    } else if material == palette.floor {
        ' '
    } else {
        '?'
    }
}

/// A rendered first-person view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    columns: usize,
    rows: usize,
    pixels: Vec<char>,
}

impl Frame {
    /// Cast one ray per column from `(x, y)` and draw the result.
    ///
    /// Columns are cast in parallel.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::EmptyFrame`] if either dimension is zero.
    pub fn render(
        level: &Level,
        x: f64,
        y: f64,
        facing: f64,
        columns: u16,
        rows: u16,
    ) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(ToolError::EmptyFrame { columns, rows });
        }

        let hits: Vec<RayHit> = column_angles(columns, rows)
            .par_iter()
            .map(|&relative| level.cast(x, y, facing, relative))
            .collect();

        let palette = &level.config().palette;
        let (width, height) = (usize::from(columns), usize::from(rows));
        let mut pixels = vec![shade(palette, palette.floor); width * height];
        for (col, hit) in hits.iter().enumerate() {
            let (start, end) = wall_span(hit.distance, columns, rows);
            let ch = shade(palette, hit.material);
            for row in start..end {
                pixels[row * width + col] = ch;
            }
        }

        tracing::debug!(columns, rows, x, y, facing, "Frame rendered");
        Ok(Self {
            columns: width,
            rows: height,
            pixels,
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Character at `(col, row)`, row 0 at the top.
    #[must_use]
    pub fn pixel(&self, col: usize, row: usize) -> Option<char> {
        if col < self.columns && row < self.rows {
            Some(self.pixels[row * self.columns + col])
        } else {
            None
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.pixels.chunks(self.columns) {
            // terminal cells are about twice as tall as wide
            for &ch in line {
                write!(f, "{ch}{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
