//! Spatial data structures for regular grids
//!
//! This module contains:
//! - The bounding box and node spacing rules
//! - The grid model with its accessor and mutation API
//! - Seeded synthetic surfaces

/// Bounding box and node spacing
pub mod extent;
/// Grid storage, accessors and z-range maintenance
pub mod grid;
/// Random smooth surfaces for demos and benchmarks
pub mod synthetic;

pub use extent::Extent;
pub use grid::Grid;
