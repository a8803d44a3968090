//! # Gridcast Core
//!
//! First-person grid raycasting, minus the screen.
//!
//! This crate contains **only** the algorithmic core:
//! - No rendering
//! - No IO
//! - No global randomness (maze generation takes an explicit RNG)
//! - Fixed-point intercepts where traversal decisions must be exact
//!
//! ## Crate Structure
//!
//! - [`fixed_point`] - 16.16 and 32.32 scaled-integer arithmetic
//! - [`math`] - Angle normalisation and quadrant stepping rules
//! - [`map`] - World grid with per-side materials
//! - [`maze`] - Perfect-maze generation
//! - [`raycast`] - Grid-traversal ray casting
//! - [`level`] - Maze to map translation and level configuration

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod fixed_point;
pub mod level;
pub mod map;
pub mod math;
pub mod maze;
pub mod raycast;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{GridcastError, Result};
    pub use crate::fixed_point::{Fixed32, Fixed64, UFixed32, UFixed64};
    pub use crate::level::{build_map, Level, LevelConfig, Palette};
    pub use crate::map::{Map, MapCell, Material, Side};
    pub use crate::maze::Maze;
    pub use crate::raycast::{cast, cast_fan, RayHit, WallOrientation};
}
