//! Test fixtures and helpers.
//!
//! Pre-built maps and material constants for consistent testing.

use fixed::types::I32F32;
use gridcast_core::fixed_point::Fixed64;
use gridcast_core::map::{Map, MapCell, Material, Side};

/// Transparent material used by the fixtures.
pub const FLOOR: Material = Material(0);
/// Solid wall material used by the fixtures.
pub const WALL: Material = Material(1);
/// Out-of-bounds sentinel used by the fixtures.
pub const OOB: Material = Material(-1);

/// Create a 32.32 fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> Fixed64 {
    Fixed64::from_int(i64::from(n))
}

/// Create a 32.32 fixed-point number from a float (for tests only).
#[must_use]
pub fn fixed_f(n: f64) -> Fixed64 {
    Fixed64::from_real(n)
}

/// The `fixed` crate's reading of the same 32.32 value.
#[must_use]
pub fn reference(value: Fixed64) -> I32F32 {
    value.into()
}

/// A square map with every side set to [`FLOOR`].
///
/// # Panics
///
/// Panics if `size` is zero.
#[must_use]
pub fn open_map(size: u32) -> Map {
    let mut map = Map::new(size, size).expect("fixture size must be non-zero");
    map.fill(FLOOR);
    map
}

/// An open square map whose column `column` is solid [`WALL`].
#[must_use]
pub fn wall_column_map(size: u32, column: u32) -> Map {
    let mut map = open_map(size);
    for y in 0..size {
        map.set_cell(column, y, MapCell::solid(WALL));
    }
    map
}

/// An open square map whose outer ring of cells is solid [`WALL`].
///
/// A ray cast from any interior cell strikes the ring before it can reach
/// the map boundary.
#[must_use]
pub fn walled_room(size: u32) -> Map {
    let mut map = open_map(size);
    let last = size - 1;
    for i in 0..size {
        map.set_cell(i, 0, MapCell::solid(WALL));
        map.set_cell(i, last, MapCell::solid(WALL));
        map.set_cell(0, i, MapCell::solid(WALL));
        map.set_cell(last, i, MapCell::solid(WALL));
    }
    map
}

/// Open a cell's single side to [`FLOOR`], leaving the rest as they were.
pub fn open_side(map: &mut Map, x: u32, y: u32, side: Side) {
    if let Some(cell) = map.get_cell(x, y) {
        map.set_cell(x, y, cell.with_side(side, FLOOR));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_column_map() {
        let map = wall_column_map(6, 2);
        assert_eq!(map.get_cell(2, 4), Some(MapCell::solid(WALL)));
        assert_eq!(map.get_cell(3, 4), Some(MapCell::solid(FLOOR)));
    }

    #[test]
    fn test_walled_room_ring() {
        let map = walled_room(4);
        assert_eq!(map.get_cell(0, 0), Some(MapCell::solid(WALL)));
        assert_eq!(map.get_cell(3, 2), Some(MapCell::solid(WALL)));
        assert_eq!(map.get_cell(1, 2), Some(MapCell::solid(FLOOR)));
    }

    #[test]
    fn test_open_side() {
        let mut map = walled_room(3);
        open_side(&mut map, 1, 0, Side::Top);
        let cell = map.get_cell(1, 0).unwrap();
        assert_eq!(cell.top, FLOOR);
        assert_eq!(cell.bottom, WALL);
    }

    #[test]
    fn test_reference_matches_bits() {
        assert_eq!(reference(fixed(3)), I32F32::from_num(3));
        assert_eq!(reference(fixed_f(-0.5)), I32F32::from_num(-0.5));
    }
}
