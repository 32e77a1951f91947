//! FILENAME: core/triangle/src/lib.rs
//! Loss development triangles for Calcula exhibits.
//!
//! A triangle is a labeled N-dimensional array: categorical index axes
//! (line of business, claim type, ...), a measure axis, and the two
//! triangle axes (origin period x development period).
//!
//! Layers:
//! - `triangle`: the array, cumulative conversion, grouping, cross-sections
//! - `builder`: long-format record ingestion
//! - `sample`: deterministic datasets

mod error;

pub mod builder;
pub mod sample;
pub mod triangle;

pub use builder::TriangleBuilder;
pub use error::TriangleError;
pub use triangle::{CrossSection, Triangle};
