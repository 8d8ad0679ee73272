//! Input/output surfaces, configuration and error handling

/// Command-line driver and batch processing
pub mod cli;
/// Format constants and runtime defaults
pub mod configuration;
/// Text dumps of grid metadata and cells
pub mod display;
/// Error types
pub mod error;
/// PNG preview export
pub mod image;
/// Batch progress display
pub mod progress;
