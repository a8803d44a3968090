//! The world grid consumed by the ray traversal.
//!
//! Every cell stores one material per side, so the edge between two cells is
//! described twice: by the right side of the western cell and by the left
//! side of the eastern cell. The two are independent, which allows walls
//! that are solid from one side and open from the other.
//!
//! `Top` faces increasing `y` and `Right` faces increasing `x`.

use serde::{Deserialize, Serialize};

use crate::error::{GridcastError, Result};

/// Largest accepted width or height, in cells.
pub const MAX_DIMENSION: u32 = 1 << 20;

/// Material code for one side of a cell.
///
/// Which codes mean "transparent" or "out of bounds" is chosen by the
/// caller on every cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Material(pub i32);

impl Material {
    /// Create a material from its code.
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// The material code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }
}

/// A side of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The side facing increasing `y`.
    Top = 0,
    /// The side facing increasing `x`.
    Right = 1,
    /// The side facing decreasing `y`.
    Bottom = 2,
    /// The side facing decreasing `x`.
    Left = 3,
}

impl Side {
    /// All sides in bit order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Side index (`Top = 0` .. `Left = 3`).
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Single-bit mask for this side.
    #[must_use]
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }

    /// The side across the shared edge: `(side + 2) mod 4`.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::ALL[((self.index() + 2) % 4) as usize]
    }
}

/// Materials on the four sides of a map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MapCell {
    /// Material facing increasing `y`.
    pub top: Material,
    /// Material facing increasing `x`.
    pub right: Material,
    /// Material facing decreasing `y`.
    pub bottom: Material,
    /// Material facing decreasing `x`.
    pub left: Material,
}

impl MapCell {
    /// A cell with the same material on every side.
    #[must_use]
    pub const fn solid(material: Material) -> Self {
        Self {
            top: material,
            right: material,
            bottom: material,
            left: material,
        }
    }

    /// Material on `side`.
    #[must_use]
    pub const fn material(&self, side: Side) -> Material {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// Replace the material on `side`.
    pub fn set_material(&mut self, side: Side, material: Material) {
        match side {
            Side::Top => self.top = material,
            Side::Right => self.right = material,
            Side::Bottom => self.bottom = material,
            Side::Left => self.left = material,
        }
    }

    /// Builder form of [`MapCell::set_material`].
    #[must_use]
    pub fn with_side(mut self, side: Side, material: Material) -> Self {
        self.set_material(side, material);
        self
    }
}

/// Rectangular grid of [`MapCell`]s, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    width: u32,
    height: u32,
    cells: Vec<MapCell>,
}

impl Map {
    /// Create a map with every side set to `Material(0)`.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds [`MAX_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Result<Self> {
        validate_dimensions(width, height)?;

        let cell_count = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            cells: vec![MapCell::default(); cell_count],
        })
    }

    /// Map width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Map height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn coords_to_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Check if signed coordinates are within the map.
    #[must_use]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    /// Cell at coordinates, or `None` if out of bounds.
    #[must_use]
    pub fn get_cell(&self, x: u32, y: u32) -> Option<MapCell> {
        if self.in_bounds(i64::from(x), i64::from(y)) {
            Some(self.cells[self.coords_to_index(x, y)])
        } else {
            None
        }
    }

    /// Replace the cell at coordinates.
    /// Returns `false` if out of bounds.
    pub fn set_cell(&mut self, x: u32, y: u32, cell: MapCell) -> bool {
        if self.in_bounds(i64::from(x), i64::from(y)) {
            let index = self.coords_to_index(x, y);
            self.cells[index] = cell;
            true
        } else {
            false
        }
    }

    /// Material on one side of a cell addressed with signed coordinates.
    #[must_use]
    pub fn material(&self, x: i64, y: i64, side: Side) -> Option<Material> {
        if self.in_bounds(x, y) {
            Some(self.cells[self.coords_to_index(x as u32, y as u32)].material(side))
        } else {
            None
        }
    }

    /// Set every side of every cell to `material`.
    pub fn fill(&mut self, material: Material) {
        self.fill_cell(MapCell::solid(material));
    }

    /// Set every cell to `cell`.
    pub fn fill_cell(&mut self, cell: MapCell) {
        self.cells.fill(cell);
    }

    /// Row-major view of all cells.
    #[must_use]
    pub fn cells(&self) -> &[MapCell] {
        &self.cells
    }
}

/// Shared dimension check for grid constructors.
pub(crate) fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(GridcastError::InvalidDimensions { width, height });
    }
    let largest = width.max(height);
    if largest > MAX_DIMENSION {
        return Err(GridcastError::DimensionTooLarge {
            requested: largest,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}
