//! Grid-traversal ray casting.
//!
//! A ray starts at a continuous position inside the [`Map`] and advances one
//! grid-line crossing at a time, always taking whichever crossing is nearer
//! along the ray: the next vertical line (constant `x`) or the next
//! horizontal line (constant `y`). At each crossing the two materials facing
//! each other across that edge are resolved, the departing cell's side
//! first. The first non-transparent material, or the map boundary, ends the
//! ray.
//!
//! The `x` coordinate at which the ray meets the next horizontal line is
//! kept in [`Fixed64`]. Deciding which crossing comes first is therefore an
//! exact integer comparison, and a ray passing exactly through a grid corner
//! always resolves the horizontal edge first.
//!
//! The returned distance is measured perpendicular to the view plane: the
//! straight-line travel distance scaled by `cos(relative_angle)`.

use serde::{Deserialize, Serialize};

use crate::fixed_point::Fixed64;
use crate::map::{Map, Material, Side};
use crate::math::{distance, normalize_angle, Quadrant};

/// Below this magnitude a direction component counts as zero and the ray
/// never crosses lines of that axis.
const AXIS_EPSILON: f64 = 1.0e-12;

/// Intercepts and steps are clamped to this magnitude before conversion to
/// fixed point. Anything this far out lies beyond every addressable column.
const INTERCEPT_LIMIT: f64 = (1u64 << 30) as f64;

/// Which family of grid lines the ray struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallOrientation {
    /// A line of constant `y` (the top or bottom edge of a cell).
    Horizontal,
    /// A line of constant `x` (the left or right edge of a cell).
    Vertical,
}

/// Result of a single cast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Fisheye-corrected distance to the struck edge.
    pub distance: f64,
    /// Material struck, or the out-of-bounds sentinel.
    pub material: Material,
    /// `x` of the collision point.
    pub point_x: f64,
    /// `y` of the collision point.
    pub point_y: f64,
    /// Orientation of the struck edge.
    pub orientation: WallOrientation,
    /// Whether the ray left the map before striking anything.
    pub out_of_bounds: bool,
}

impl RayHit {
    /// Position along the struck edge within its cell, in `[0, 1)`.
    ///
    /// Intended for texture lookup.
    #[must_use]
    pub fn texture_phase(&self) -> f64 {
        let along = match self.orientation {
            WallOrientation::Horizontal => self.point_x,
            WallOrientation::Vertical => self.point_y,
        };
        let phase = along.rem_euclid(1.0);
        // rem_euclid of a tiny negative value rounds up to exactly 1.0
        if phase >= 1.0 {
            0.0
        } else {
            phase
        }
    }
}

/// What a crossing resolved to.
enum EdgeOutcome {
    Open,
    Struck(Material),
    OutOfBounds,
}

/// Resolve the pair of materials across one edge.
///
/// `near` is the departing cell, `far` the cell being entered.
fn resolve_edge(
    map: &Map,
    near: (i64, i64),
    far: (i64, i64),
    near_side: Side,
    transparent: Material,
) -> EdgeOutcome {
    let near_material = map.material(near.0, near.1, near_side);
    let far_material = map.material(far.0, far.1, near_side.opposite());

    match (near_material, far_material) {
        (Some(n), _) if n == transparent => match far_material {
            Some(f) if f == transparent => EdgeOutcome::Open,
            Some(f) => EdgeOutcome::Struck(f),
            None => EdgeOutcome::OutOfBounds,
        },
        (Some(n), Some(_)) => EdgeOutcome::Struck(n),
        _ => EdgeOutcome::OutOfBounds,
    }
}

/// Cast one ray.
///
/// `origin_x`/`origin_y` must lie inside the map; an origin outside it
/// reports out-of-bounds at the first crossing. Angles are radians in any
/// range. `transparent` is the material the ray passes through and
/// `out_of_bounds` the material reported when it leaves the map.
///
/// Every ray over a finite map terminates: each step moves one grid line
/// further along an axis and the boundary is always reached.
#[must_use]
pub fn cast(
    map: &Map,
    origin_x: f64,
    origin_y: f64,
    facing_angle: f64,
    relative_angle: f64,
    transparent: Material,
    out_of_bounds: Material,
) -> RayHit {
    let angle = normalize_angle(facing_angle + relative_angle);
    let steps = Quadrant::of(angle).steps();
    let (sin, cos) = angle.sin_cos();

    let crosses_columns = cos.abs() > AXIS_EPSILON;
    let crosses_rows = sin.abs() > AXIS_EPSILON;
    let diagonal = crosses_columns && crosses_rows;

    // |dy/dx| and |dx/dy|; only meaningful when both axes advance
    let (slope_y, slope_x) = if diagonal {
        ((sin / cos).abs(), (cos / sin).abs())
    } else {
        (0.0, 0.0)
    };

    let origin_col = origin_x.floor() as i64;
    let origin_row = origin_y.floor() as i64;

    // Next vertical line and the y at which the ray meets it.
    let mut col_line = if steps.step_x > 0 { origin_col + 1 } else { origin_col };
    let mut y_at_col = origin_y + (col_line as f64 - origin_x).abs() * slope_y * steps.step_y as f64;
    let y_step = slope_y * steps.step_y as f64;

    // Next horizontal line and the x at which the ray meets it.
    let mut row_line = if steps.step_y > 0 { origin_row + 1 } else { origin_row };
    let x_offset = (row_line as f64 - origin_y).abs() * slope_x * steps.step_x as f64;
    let mut x_at_row = Fixed64::from_real(clamp_intercept(origin_x + x_offset));
    let x_step = Fixed64::from_real(clamp_intercept(slope_x * steps.step_x as f64));

    loop {
        let take_row = if !crosses_rows {
            false
        } else if !crosses_columns {
            true
        } else {
            // The horizontal crossing is first while its x has not passed
            // the next vertical line.
            let col_line_fixed = Fixed64::from_int(col_line);
            if steps.step_x > 0 {
                x_at_row <= col_line_fixed
            } else {
                x_at_row >= col_line_fixed
            }
        };

        if take_row {
            let col = x_at_row.integer_part();
            let (near_row, far_row) = if steps.step_y > 0 {
                (row_line - 1, row_line)
            } else {
                (row_line, row_line - 1)
            };
            let outcome =
                resolve_edge(map, (col, near_row), (col, far_row), steps.horizontal_near, transparent);
            if let Some(hit) = finish(
                outcome,
                (origin_x, origin_y),
                (x_at_row.to_real(), row_line as f64),
                WallOrientation::Horizontal,
                relative_angle,
                out_of_bounds,
            ) {
                return hit;
            }
            row_line += steps.step_y;
            x_at_row += x_step;
        } else {
            // Only the crossing order is exact; the row comes from the f64
            // intercept and may be off by one within rounding of a corner.
            let row = y_at_col.floor() as i64;
            let (near_col, far_col) = if steps.step_x > 0 {
                (col_line - 1, col_line)
            } else {
                (col_line, col_line - 1)
            };
            let outcome =
                resolve_edge(map, (near_col, row), (far_col, row), steps.vertical_near, transparent);
            if let Some(hit) = finish(
                outcome,
                (origin_x, origin_y),
                (col_line as f64, y_at_col),
                WallOrientation::Vertical,
                relative_angle,
                out_of_bounds,
            ) {
                return hit;
            }
            col_line += steps.step_x;
            y_at_col += y_step;
        }
    }
}

fn clamp_intercept(value: f64) -> f64 {
    value.clamp(-INTERCEPT_LIMIT, INTERCEPT_LIMIT)
}

fn finish(
    outcome: EdgeOutcome,
    origin: (f64, f64),
    point: (f64, f64),
    orientation: WallOrientation,
    relative_angle: f64,
    out_of_bounds: Material,
) -> Option<RayHit> {
    let (material, left_map) = match outcome {
        EdgeOutcome::Open => return None,
        EdgeOutcome::Struck(material) => (material, false),
        EdgeOutcome::OutOfBounds => (out_of_bounds, true),
    };

    let travelled = distance(origin.0, origin.1, point.0, point.1);
    Some(RayHit {
        distance: travelled * relative_angle.cos(),
        material,
        point_x: point.0,
        point_y: point.1,
        orientation,
        out_of_bounds: left_map,
    })
}

/// Cast one ray per relative angle, in order.
///
/// Typically one relative angle per screen column.
#[must_use]
pub fn cast_fan(
    map: &Map,
    origin_x: f64,
    origin_y: f64,
    facing_angle: f64,
    relative_angles: &[f64],
    transparent: Material,
    out_of_bounds: Material,
) -> Vec<RayHit> {
    relative_angles
        .iter()
        .map(|&relative| {
            cast(
                map,
                origin_x,
                origin_y,
                facing_angle,
                relative,
                transparent,
                out_of_bounds,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapCell;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, SQRT_2};

    const FLOOR: Material = Material(0);
    const WALL: Material = Material(1);
    const RED: Material = Material(2);
    const BLUE: Material = Material(3);
    const OOB: Material = Material(-1);

    const EPS: f64 = 1e-9;

    fn open_map(size: u32) -> Map {
        let mut map = Map::new(size, size).unwrap();
        map.fill(FLOOR);
        map
    }

    fn map_with_wall_column(size: u32, column: u32) -> Map {
        let mut map = open_map(size);
        for y in 0..size {
            map.set_cell(column, y, MapCell::solid(WALL));
        }
        map
    }

    #[test]
    fn test_straight_shot() {
        let map = map_with_wall_column(10, 5);
        let hit = cast(&map, 0.5, 3.5, 0.0, 0.0, FLOOR, OOB);
        assert!((hit.distance - 4.5).abs() < EPS, "distance {}", hit.distance);
        assert_eq!(hit.material, WALL);
        assert_eq!(hit.orientation, WallOrientation::Vertical);
        assert!(!hit.out_of_bounds);
    }

    #[test]
    fn test_out_of_bounds_each_cardinal() {
        let map = open_map(10);
        let cases = [
            (0.0, 7.5),
            (FRAC_PI_2, 6.5),
            (PI, 2.5),
            (3.0 * FRAC_PI_2, 3.5),
        ];
        for (angle, expected) in cases {
            let hit = cast(&map, 2.5, 3.5, angle, 0.0, FLOOR, OOB);
            assert_eq!(hit.material, OOB, "angle {angle}");
            assert!(hit.out_of_bounds);
            assert!(
                (hit.distance - expected).abs() < EPS,
                "angle {angle}: {} != {expected}",
                hit.distance
            );
        }
    }

    #[test]
    fn test_diagonal_hit() {
        let map = map_with_wall_column(10, 3);
        let hit = cast(&map, 0.5, 0.25, FRAC_PI_4, 0.0, FLOOR, OOB);
        assert_eq!(hit.material, WALL);
        assert_eq!(hit.orientation, WallOrientation::Vertical);
        assert!((hit.point_y - 2.75).abs() < 1e-9);
        assert!((hit.distance - 2.5 * SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_exact_corner_resolves_horizontal_first() {
        let map = map_with_wall_column(10, 3);
        let hit = cast(&map, 0.5, 0.5, FRAC_PI_4, 0.0, FLOOR, OOB);
        assert_eq!(hit.material, WALL);
        assert!((hit.distance - 2.5 * SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_directional_materials() {
        let mut map = open_map(10);
        for y in 0..10 {
            map.set_cell(3, y, MapCell::solid(FLOOR).with_side(Side::Right, RED));
            map.set_cell(4, y, MapCell::solid(FLOOR).with_side(Side::Left, BLUE));
        }

        let from_west = cast(&map, 0.5, 5.5, 0.0, 0.0, FLOOR, OOB);
        assert_eq!(from_west.material, RED);
        assert!((from_west.distance - 3.5).abs() < EPS);

        let from_east = cast(&map, 8.5, 5.5, PI, 0.0, FLOOR, OOB);
        assert_eq!(from_east.material, BLUE);
        assert!((from_east.distance - 4.5).abs() < EPS);
    }

    #[test]
    fn test_far_side_struck_when_near_side_open() {
        let mut map = open_map(10);
        map.set_cell(4, 5, MapCell::solid(FLOOR).with_side(Side::Left, BLUE));

        let hit = cast(&map, 0.5, 5.5, 0.0, 0.0, FLOOR, OOB);
        assert_eq!(hit.material, BLUE);
        assert!((hit.point_x - 4.0).abs() < EPS);
    }

    #[test]
    fn test_texture_phase_of_tiny_negative_coordinate() {
        let hit = RayHit {
            distance: 0.5,
            material: OOB,
            point_x: 0.0,
            point_y: -1.0e-17,
            orientation: WallOrientation::Vertical,
            out_of_bounds: true,
        };
        assert_eq!(hit.texture_phase(), 0.0);
    }

    #[test]
    fn test_horizontal_edge_hit() {
        let mut map = open_map(8);
        for x in 0..8 {
            map.set_cell(x, 6, MapCell::solid(WALL));
        }
        let hit = cast(&map, 2.5, 1.5, FRAC_PI_2, 0.0, FLOOR, OOB);
        assert_eq!(hit.material, WALL);
        assert_eq!(hit.orientation, WallOrientation::Horizontal);
        assert!((hit.distance - 4.5).abs() < EPS);
        assert!((hit.texture_phase() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fisheye_correction() {
        let map = map_with_wall_column(20, 15);
        let absolute = 0.3;
        let straight = cast(&map, 2.5, 10.5, absolute, 0.0, FLOOR, OOB);
        for relative in [-0.4, 0.1, 0.25] {
            let offset = cast(&map, 2.5, 10.5, absolute - relative, relative, FLOOR, OOB);
            assert_eq!(offset.material, straight.material);
            assert!((offset.distance - straight.distance * relative.cos()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_angle_normalisation_is_transparent() {
        let map = map_with_wall_column(10, 7);
        let a = cast(&map, 1.5, 4.5, 0.2, 0.0, FLOOR, OOB);
        let b = cast(&map, 1.5, 4.5, 0.2 + 4.0 * PI, 0.0, FLOOR, OOB);
        let c = cast(&map, 1.5, 4.5, 0.2 - 2.0 * PI, 0.0, FLOOR, OOB);
        assert!((a.distance - b.distance).abs() < 1e-9);
        assert!((a.distance - c.distance).abs() < 1e-9);
        assert_eq!(a.material, b.material);
    }

    #[test]
    fn test_one_by_one_map() {
        let map = open_map(1);
        let hit = cast(&map, 0.5, 0.5, 1.0, 0.0, FLOOR, OOB);
        assert!(hit.out_of_bounds);
        assert!(hit.distance <= SQRT_2);
    }

    #[test]
    fn test_near_cardinal_ray_terminates() {
        let map = open_map(16);
        for angle in [1.0e-13, FRAC_PI_2 + 1.0e-13, PI - 1.0e-10, -1.0e-11] {
            let hit = cast(&map, 8.5, 8.5, angle, 0.0, FLOOR, OOB);
            assert!(hit.out_of_bounds);
            assert!(hit.distance.is_finite());
        }
    }

    #[test]
    fn test_cast_fan_matches_single_casts() {
        let map = map_with_wall_column(10, 6);
        let angles = [-0.3, 0.0, 0.3];
        let fan = cast_fan(&map, 1.5, 5.5, 0.0, &angles, FLOOR, OOB);
        assert_eq!(fan.len(), 3);
        for (hit, &relative) in fan.iter().zip(&angles) {
            assert_eq!(*hit, cast(&map, 1.5, 5.5, 0.0, relative, FLOOR, OOB));
        }
    }
}
