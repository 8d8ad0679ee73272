//! Format constants and runtime configuration defaults

// Surfer 6 binary layout
/// Tag written at the start of every Surfer 6 binary grid
pub const SURFER6_MAGIC: [u8; 4] = *b"DSBB";
/// Size of the fixed header preceding the cell values
pub const HEADER_SIZE: usize = 56;
/// Size of one encoded cell value
pub const CELL_SIZE: usize = 4;
/// Cells reserved per step while decoding, bounding memory held for short streams
pub const DECODE_CHUNK_CELLS: usize = 65_536;

/// Blank sentinel as stored by Surfer tooling (single precision)
pub const SURFER6_BLANK_F32: f32 = 1.701_41e38;
/// Default "no data" sentinel, the single precision blank widened exactly
pub const DEFAULT_BLANK_VALUE: f64 = SURFER6_BLANK_F32 as f64;

// Default example grid
/// Samples per axis of the default grid
pub const DEFAULT_GRID_SIZE: usize = 11;
/// Lower bound of both axes of the default grid
pub const DEFAULT_GRID_MIN: f64 = 0.0;
/// Upper bound of both axes of the default grid
pub const DEFAULT_GRID_MAX: f64 = 10.0;
/// Placeholder z range assigned before the first scan
pub const DEFAULT_Z_RANGE: (f64, f64) = (0.0, 1.0);

// Synthetic grid generation
/// Fixed seed for reproducible synthetic grids
pub const DEFAULT_SEED: u64 = 42;
/// Share of cells left blank in synthetic grids
pub const DEFAULT_BLANK_FRACTION: f64 = 0.05;

// Output settings
/// File extension of Surfer grids
pub const GRID_EXTENSION: &str = "grd";
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_output";
/// Suffix added to preview image filenames
pub const PREVIEW_SUFFIX: &str = "_preview";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn,surfgrid=info";
