//! # Gridcast Development Tools
//!
//! Command-line helpers for inspecting the raycasting core:
//! - ASCII maze printing
//! - Single-ray probes
//! - ASCII first-person frames
//! - Level config validation

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ascii;
pub mod config;
pub mod error;
pub mod validate;
