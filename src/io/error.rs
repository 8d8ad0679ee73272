//! Error types for grid construction, access and Surfer 6 serialization

use std::fmt;
use std::path::PathBuf;

/// Main error type for all grid operations
#[derive(Debug)]
pub enum GridError {
    /// The cell buffer could not be reserved
    Allocation {
        /// Number of cells requested
        cells: usize,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The stream ended before a complete grid was read
    Truncated {
        /// Part of the layout being read when the stream ran out
        section: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Header fields cannot describe a usable grid
    InvalidHeader {
        /// Description of what's wrong with the header
        reason: String,
    },

    /// Cell coordinates outside the grid
    OutOfBounds {
        /// Requested column
        x: i64,
        /// Requested row
        y: i64,
        /// Grid dimensions (`x_size`, `y_size`)
        dimensions: (usize, usize),
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a preview image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Some inputs of a batch run could not be processed
    Batch {
        /// Number of inputs that failed
        failed: usize,
        /// Number of inputs attempted
        total: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation { cells } => {
                write!(f, "Failed to allocate storage for {cells} grid cells")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Truncated { section, source } => {
                write!(f, "Grid stream truncated while reading {section}: {source}")
            }
            Self::InvalidHeader { reason } => {
                write!(f, "Invalid grid header: {reason}")
            }
            Self::OutOfBounds { x, y, dimensions } => {
                write!(
                    f,
                    "Cell ({x}, {y}) is out of bounds (grid size {}x{})",
                    dimensions.0, dimensions.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::Batch { failed, total } => {
                write!(f, "{failed} of {total} grid files could not be processed")
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } | Self::Truncated { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for grid results
pub type Result<T> = std::result::Result<T, GridError>;

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl GridError {
    /// Attach a path and operation to an I/O-derived error
    ///
    /// Errors that already carry their own context pass through unchanged.
    #[must_use]
    pub fn at_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Self {
        match self {
            Self::FileSystem { source, .. } => Self::FileSystem {
                path: path.into(),
                operation,
                source,
            },
            other => other,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GridError {
    GridError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid header error
pub fn invalid_header(reason: &impl ToString) -> GridError {
    GridError::InvalidHeader {
        reason: reason.to_string(),
    }
}

/// Map a read failure to a truncation error when the stream ran short
pub fn read_error(section: &'static str, err: std::io::Error) -> GridError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        GridError::Truncated {
            section,
            source: err,
        }
    } else {
        GridError::from(err)
    }
}
