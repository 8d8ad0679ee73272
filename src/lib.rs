//! Regular 2D scalar grids and the Surfer 6 binary grid format
//!
//! A [`Grid`] holds `f64` samples on a rectangular mesh together with its bounding
//! box, node spacing, cached value range and "no data" sentinel. The codec reads
//! and writes the legacy Surfer 6 binary layout, narrowing cells to single
//! precision on the way out.

#![forbid(unsafe_code)]

/// Value-range and blank-coverage statistics
pub mod analysis;
/// Surfer 6 binary serialization
pub mod codec;
/// Input/output surfaces, configuration and error handling
pub mod io;
/// Grid model and spatial metadata
pub mod spatial;

pub use io::error::{GridError, Result};
pub use spatial::{Extent, Grid};
