//! Proptest strategies.
//!
//! These strategies generate random but reproducible inputs for
//! property-based testing of the fixed-point, maze and raycast modules.

use gridcast_core::fixed_point::{Fixed32, Fixed64, UFixed32, UFixed64};
use proptest::prelude::*;
use std::f64::consts::TAU;

/// Reals comfortably inside the signed 16.16 range.
pub fn arb_real_16() -> impl Strategy<Value = f64> {
    -30000.0f64..30000.0
}

/// Reals comfortably inside the signed 32.32 range.
pub fn arb_real_32() -> impl Strategy<Value = f64> {
    -2.0e9f64..2.0e9
}

/// Any signed 16.16 value.
pub fn arb_fixed32() -> impl Strategy<Value = Fixed32> {
    any::<i32>().prop_map(Fixed32::from_bits)
}

/// Any unsigned 16.16 value.
pub fn arb_ufixed32() -> impl Strategy<Value = UFixed32> {
    any::<u32>().prop_map(UFixed32::from_bits)
}

/// Any signed 32.32 value.
pub fn arb_fixed64() -> impl Strategy<Value = Fixed64> {
    any::<i64>().prop_map(Fixed64::from_bits)
}

/// Any unsigned 32.32 value.
pub fn arb_ufixed64() -> impl Strategy<Value = UFixed64> {
    any::<u64>().prop_map(UFixed64::from_bits)
}

/// Signed 32.32 values whose products with each other stay in range.
///
/// Range: roughly ±40000.
pub fn arb_fixed64_factor() -> impl Strategy<Value = Fixed64> {
    (-(40_000i64 << 32)..(40_000i64 << 32)).prop_map(Fixed64::from_bits)
}

/// Signed 16.16 values whose products with each other stay in range.
///
/// Range: roughly ±150.
pub fn arb_fixed32_factor() -> impl Strategy<Value = Fixed32> {
    (-(150i32 << 16)..(150i32 << 16)).prop_map(Fixed32::from_bits)
}

/// Unsigned 16.16 values of at least one, usable as well-behaved divisors.
pub fn arb_ufixed32_divisor() -> impl Strategy<Value = UFixed32> {
    ((1u32 << 16)..=u32::MAX).prop_map(UFixed32::from_bits)
}

/// An angle in `[0, 2π)`.
pub fn arb_angle() -> impl Strategy<Value = f64> {
    0.0f64..TAU
}

/// An angle anywhere in `[-8π, 8π)`, exercising normalisation.
pub fn arb_wide_angle() -> impl Strategy<Value = f64> {
    (-4.0f64 * TAU)..(4.0 * TAU)
}

/// A relative ray angle inside a ±60° field of view.
pub fn arb_relative_angle() -> impl Strategy<Value = f64> {
    -1.0f64..1.0
}

/// A point strictly inside a `width x height` map.
pub fn arb_origin(width: u32, height: u32) -> impl Strategy<Value = (f64, f64)> {
    (0.01f64..(f64::from(width) - 0.01), 0.01f64..(f64::from(height) - 0.01))
}

/// Maze dimensions from 1x1 up to `max x max`.
pub fn arb_maze_dims(max: u32) -> impl Strategy<Value = (u32, u32)> {
    (1u32..=max, 1u32..=max)
}

/// A generation seed.
pub fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}
