//! Angle and distance helpers for ray traversal.
//!
//! Angles are radians. Angle 0 points along `+x`, angle π/2 along `+y`.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::map::Side;

/// Reduce any angle into `[0, 2π)`.
///
/// Non-finite input maps to 0 so a traversal can never be fed a
/// direction without a quadrant.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let reduced = angle.rem_euclid(TAU);
    // rem_euclid of a tiny negative angle can round up to exactly TAU
    if reduced >= TAU {
        0.0
    } else {
        reduced
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

/// One of the four π/2-wide direction ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `[0, π/2)`: travelling `+x`, `+y`.
    First,
    /// `[π/2, π)`: travelling `-x`, `+y`.
    Second,
    /// `[π, 3π/2)`: travelling `-x`, `-y`.
    Third,
    /// `[3π/2, 2π)`: travelling `+x`, `-y`.
    Fourth,
}

/// Stepping rules for a quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantSteps {
    /// Column step when crossing a vertical grid line.
    pub step_x: i64,
    /// Row step when crossing a horizontal grid line.
    pub step_y: i64,
    /// Side of the departing cell struck first at a vertical crossing.
    pub vertical_near: Side,
    /// Side of the departing cell struck first at a horizontal crossing.
    pub horizontal_near: Side,
}

const STEPS: [QuadrantSteps; 4] = [
    QuadrantSteps {
        step_x: 1,
        step_y: 1,
        vertical_near: Side::Right,
        horizontal_near: Side::Top,
    },
    QuadrantSteps {
        step_x: -1,
        step_y: 1,
        vertical_near: Side::Left,
        horizontal_near: Side::Top,
    },
    QuadrantSteps {
        step_x: -1,
        step_y: -1,
        vertical_near: Side::Left,
        horizontal_near: Side::Bottom,
    },
    QuadrantSteps {
        step_x: 1,
        step_y: -1,
        vertical_near: Side::Right,
        horizontal_near: Side::Bottom,
    },
];

impl Quadrant {
    /// Quadrant of an angle already reduced into `[0, 2π)`.
    #[must_use]
    pub fn of(angle: f64) -> Self {
        match (angle / FRAC_PI_2) as u32 {
            0 => Self::First,
            1 => Self::Second,
            2 => Self::Third,
            _ => Self::Fourth,
        }
    }

    /// 1-based quadrant number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
        }
    }

    /// Step signs and near sides for this quadrant.
    #[must_use]
    pub const fn steps(self) -> QuadrantSteps {
        STEPS[self.number() as usize - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_normalize_wraps_both_directions() {
        assert!((normalize_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-12);
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(TAU), 0.0);
    }

    #[test]
    fn test_normalize_tiny_negative_stays_in_range() {
        let a = normalize_angle(-1.0e-18);
        assert!((0.0..TAU).contains(&a));
    }

    #[test]
    fn test_normalize_non_finite() {
        assert_eq!(normalize_angle(f64::NAN), 0.0);
        assert_eq!(normalize_angle(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_quadrant_boundaries() {
        assert_eq!(Quadrant::of(0.0), Quadrant::First);
        assert_eq!(Quadrant::of(FRAC_PI_2), Quadrant::Second);
        assert_eq!(Quadrant::of(PI), Quadrant::Third);
        assert_eq!(Quadrant::of(3.0 * FRAC_PI_2), Quadrant::Fourth);
        assert_eq!(Quadrant::of(TAU - 1e-9), Quadrant::Fourth);
    }

    #[test]
    fn test_quadrant_steps() {
        let steps = Quadrant::Third.steps();
        assert_eq!((steps.step_x, steps.step_y), (-1, -1));
        assert_eq!(steps.vertical_near, Side::Left);
        assert_eq!(steps.horizontal_near, Side::Bottom);
        assert_eq!(Quadrant::Fourth.number(), 4);
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0);
    }
}
