//! Surfer 6 binary grid serialization
//!
//! This module contains:
//! - The fixed header layout and its validation
//! - Stream and file level read/write of whole grids

/// Header layout and validation
pub mod header;
/// Grid encode/decode over streams and files
pub mod surfer6;

pub use header::Surfer6Header;
pub use surfer6::{DecodeMode, decode, decode_strict, encode, read_grid_file, write_grid_file};
