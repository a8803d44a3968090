//! Scaled-integer arithmetic for deterministic ray traversal.
//!
//! Four types share one algorithm set:
//!
//! | Type | Container | Integer bits | Fraction bits |
//! |------|-----------|--------------|---------------|
//! | [`Fixed32`] | `i32` | 16 | 16 |
//! | [`UFixed32`] | `u32` | 16 | 16 |
//! | [`Fixed64`] | `i64` | 32 | 32 |
//! | [`UFixed64`] | `u64` | 32 | 32 |
//!
//! The stored integer is always `real * 2^FRAC_BITS`. Addition, subtraction
//! and multiplication wrap on overflow like the container's two's-complement
//! arithmetic. Multiplication splits each operand into an integer limb and a
//! fraction limb so no intermediate wider than the container is needed, and
//! rounds the discarded low bits half-up. Division goes through a
//! double-width integer and rounds the last quotient bit half-up.
//!
//! Each type converts losslessly to and from its counterpart in the
//! [`fixed`] crate by raw bits.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::error::{GridcastError, Result};

macro_rules! fixed_point_type {
    (
        $(#[$meta:meta])*
        $name:ident {
            raw: $raw:ty,
            unsigned: $uraw:ty,
            wide: $wide:ty,
            frac_bits: $frac:expr,
            interop: $interop:ty $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name($raw);

        impl $name {
            /// Number of fractional bits.
            pub const FRAC_BITS: u32 = $frac;
            /// Zero.
            pub const ZERO: Self = Self(0);
            /// One.
            pub const ONE: Self = Self(1 << $frac);
            /// Smallest positive increment (one raw unit).
            pub const DELTA: Self = Self(1);
            /// Smallest representable value.
            pub const MIN: Self = Self(<$raw>::MIN);
            /// Largest representable value.
            pub const MAX: Self = Self(<$raw>::MAX);

            const SCALE: f64 = (1u64 << $frac) as f64;
            const FRAC_MASK: $uraw = ((1 as $uraw) << $frac) - 1;
            const ROUNDING_BIAS: $uraw = (1 as $uraw) << ($frac - 1);

            /// Wrap a raw scaled integer.
            #[must_use]
            pub const fn from_bits(bits: $raw) -> Self {
                Self(bits)
            }

            /// The raw scaled integer.
            #[must_use]
            pub const fn to_bits(self) -> $raw {
                self.0
            }

            /// Convert a whole number. Bits shifted past the container are lost.
            #[must_use]
            pub const fn from_int(value: $raw) -> Self {
                Self(value << $frac)
            }

            /// Convert a real number, truncating toward zero.
            ///
            /// Values outside the representable range saturate and NaN maps
            /// to zero.
            #[must_use]
            pub fn from_real(value: f64) -> Self {
                Self((value * Self::SCALE) as $raw)
            }

            /// Convert back to a real number.
            #[must_use]
            pub fn to_real(self) -> f64 {
                self.0 as f64 / Self::SCALE
            }

            /// The high limb: `raw >> FRAC_BITS`.
            ///
            /// For signed values this is the floor of the real value.
            #[must_use]
            pub const fn integer_part(self) -> $raw {
                self.0 >> $frac
            }

            /// The low limb as a non-negative magnitude, even for negative values.
            #[must_use]
            pub const fn fraction_part(self) -> $uraw {
                (self.0 as $uraw) & Self::FRAC_MASK
            }

            /// Exact sum of the raw representations, wrapping on overflow.
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub const fn add(self, rhs: Self) -> Self {
                Self(self.0.wrapping_add(rhs.0))
            }

            /// Exact difference of the raw representations, wrapping on overflow.
            #[must_use]
            pub const fn subtract(self, rhs: Self) -> Self {
                Self(self.0.wrapping_sub(rhs.0))
            }

            /// Split-limb product, rounding the discarded bits half-up.
            ///
            /// `(ai·bi << F) + (ai·bf + af·bi) + ((af·bf + 2^(F-1)) >> F)`
            #[must_use]
            pub const fn multiply(self, rhs: Self) -> Self {
                let a_int = self.integer_part();
                let a_frac = self.fraction_part();
                let b_int = rhs.integer_part();
                let b_frac = rhs.fraction_part();

                let int_product = a_int.wrapping_mul(b_int);
                let cross_sum = a_int
                    .wrapping_mul(b_frac as $raw)
                    .wrapping_add((a_frac as $raw).wrapping_mul(b_int));
                // Both limbs are below 2^F, so this cannot overflow the container.
                let frac_product = a_frac * b_frac + Self::ROUNDING_BIAS;

                Self(
                    (int_product << $frac)
                        .wrapping_add(cross_sum)
                        .wrapping_add((frac_product >> $frac) as $raw),
                )
            }

            /// Rounded quotient, or `None` when `rhs` is zero.
            ///
            /// The dividend is widened and shifted by `FRAC_BITS + 1`, divided,
            /// then the extra bit is rounded off half-up. A quotient that does
            /// not fit the container wraps.
            #[must_use]
            pub const fn checked_divide(self, rhs: Self) -> Option<Self> {
                if rhs.0 == 0 {
                    return None;
                }
                let shifted = (self.0 as $wide) << ($frac + 1);
                let quotient = shifted / (rhs.0 as $wide);
                Some(Self(((quotient + 1) >> 1) as $raw))
            }

            /// Rounded quotient.
            ///
            /// # Errors
            ///
            /// Returns [`GridcastError::DivisionByZero`] when `rhs` is zero.
            pub fn divide(self, rhs: Self) -> Result<Self> {
                self.checked_divide(rhs).ok_or(GridcastError::DivisionByZero)
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self::Output {
                $name::add(self, rhs)
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                *self = $name::add(*self, rhs);
            }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self::Output {
                self.subtract(rhs)
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                *self = self.subtract(rhs);
            }
        }

        impl Mul for $name {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self::Output {
                self.multiply(rhs)
            }
        }

        impl From<$interop> for $name {
            fn from(value: $interop) -> Self {
                Self(value.to_bits())
            }
        }

        impl From<$name> for $interop {
            fn from(value: $name) -> Self {
                <$interop>::from_bits(value.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_real())
            }
        }
    };
}

macro_rules! impl_signed_neg {
    ($($name:ident),*) => {
        $(
            impl Neg for $name {
                type Output = Self;

                fn neg(self) -> Self::Output {
                    Self(self.0.wrapping_neg())
                }
            }
        )*
    };
}

fixed_point_type! {
    /// Signed 16.16 fixed-point value in an `i32`.
    Fixed32 {
        raw: i32,
        unsigned: u32,
        wide: i64,
        frac_bits: 16,
        interop: fixed::types::I16F16,
    }
}

fixed_point_type! {
    /// Unsigned 16.16 fixed-point value in a `u32`.
    UFixed32 {
        raw: u32,
        unsigned: u32,
        wide: u64,
        frac_bits: 16,
        interop: fixed::types::U16F16,
    }
}

fixed_point_type! {
    /// Signed 32.32 fixed-point value in an `i64`.
    ///
    /// Used for the horizontal-line intercept during ray traversal.
    Fixed64 {
        raw: i64,
        unsigned: u64,
        wide: i128,
        frac_bits: 32,
        interop: fixed::types::I32F32,
    }
}

fixed_point_type! {
    /// Unsigned 32.32 fixed-point value in a `u64`.
    UFixed64 {
        raw: u64,
        unsigned: u64,
        wide: u128,
        frac_bits: 32,
        interop: fixed::types::U32F32,
    }
}

impl_signed_neg!(Fixed32, Fixed64);
