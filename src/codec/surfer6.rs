//! Surfer 6 binary grid read/write
//!
//! # Format
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │ HEADER (56 bytes)                                         │
//! │  0-3:   Magic "DSBB"                                      │
//! │  4-7:   x_size, y_size (i16 LE)                           │
//! │  8-39:  x_min, x_max, y_min, y_max (f64 LE)               │
//! │ 40-55:  z_min, z_max (f64 LE)                             │
//! ├───────────────────────────────────────────────────────────┤
//! │ CELLS (4 bytes per cell)                                  │
//! │  For each row y (0..y_size):                              │
//! │    For each column x (0..x_size):                         │
//! │      f32 value (LE)                                       │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Cells are narrowed to single precision on write and widened on read, so a
//! round trip keeps the layout and header exactly but rounds cell values. The
//! blank value is not part of the format: decoded grids always use the
//! default sentinel.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, error};

use crate::codec::header::Surfer6Header;
use crate::io::configuration::{CELL_SIZE, DECODE_CHUNK_CELLS, DEFAULT_BLANK_VALUE};
use crate::io::error::{GridError, Result, read_error};
use crate::spatial::Grid;
use crate::spatial::grid::allocate_cells;

/// How much of the header the reader trusts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Skip the tag and accept any non-negative sizes
    #[default]
    Permissive,
    /// Require the "DSBB" tag and at least two nodes per axis
    Strict,
}

/// Read a grid from a Surfer 6 binary stream
///
/// The first four bytes are skipped without inspection.
///
/// # Errors
///
/// Returns an error if:
/// - The stream ends before the header or cells are complete
/// - A size field is negative
/// - The cell buffer cannot be allocated
pub fn decode<R: Read>(reader: &mut R) -> Result<Grid> {
    decode_with(reader, DecodeMode::Permissive)
}

/// Read a grid, rejecting a wrong tag or degenerate sizes
///
/// # Errors
///
/// Returns an error if:
/// - The header fails [`Surfer6Header::validate`]
/// - The stream ends before the header or cells are complete
/// - The cell buffer cannot be allocated
pub fn decode_strict<R: Read>(reader: &mut R) -> Result<Grid> {
    decode_with(reader, DecodeMode::Strict)
}

/// Read a grid using the given header policy
///
/// # Errors
///
/// Returns an error under the conditions of [`decode`] and, in strict mode,
/// [`decode_strict`]
pub fn decode_with<R: Read>(reader: &mut R, mode: DecodeMode) -> Result<Grid> {
    let header = Surfer6Header::read_from(reader)?;
    if mode == DecodeMode::Strict {
        header.validate()?;
    }

    let count = header.cell_count()?;
    debug!(
        x_size = header.x_size,
        y_size = header.y_size,
        cells = count,
        "decoding surfer 6 grid"
    );

    // Reserved per chunk: a short stream fails on read, not on allocation
    let mut cells = allocate_cells(count.min(DECODE_CHUNK_CELLS))?;
    let mut word = [0u8; CELL_SIZE];
    while cells.len() < count {
        let chunk = (count - cells.len()).min(DECODE_CHUNK_CELLS);
        cells
            .try_reserve_exact(chunk)
            .map_err(|_reserve_error| GridError::Allocation { cells: count })?;
        for _ in 0..chunk {
            reader
                .read_exact(&mut word)
                .map_err(|e| read_error("cell values", e))?;
            cells.push(f64::from(f32::from_le_bytes(word)));
        }
    }

    // Non-negative after cell_count succeeded
    let x_size = header.x_size as usize;
    let y_size = header.y_size as usize;

    Grid::from_parts(
        header.extent,
        x_size,
        y_size,
        (header.z_min, header.z_max),
        DEFAULT_BLANK_VALUE,
        cells,
    )
}

/// Write a grid as a Surfer 6 binary stream
///
/// Sizes wrap into 16 bits, the cached z range is written as stored, and each
/// cell is rounded to the nearest `f32` (magnitudes beyond `f32::MAX` become
/// infinite).
///
/// # Errors
///
/// Returns an error if the writer fails
pub fn encode<W: Write>(grid: &Grid, writer: &mut W) -> Result<()> {
    let header = Surfer6Header::from_grid(grid);
    if usize::try_from(header.x_size).ok() != Some(grid.x_size())
        || usize::try_from(header.y_size).ok() != Some(grid.y_size())
    {
        debug!(
            x_size = grid.x_size(),
            y_size = grid.y_size(),
            "grid dimensions exceed the 16-bit size fields and will wrap"
        );
    }

    header.write_to(writer)?;
    for &value in grid.cells() {
        writer.write_all(&(value as f32).to_le_bytes())?;
    }
    Ok(())
}

/// Load a grid from a Surfer 6 binary file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its content cannot be
/// decoded under `mode`
pub fn read_grid_file(path: &Path, mode: DecodeMode) -> Result<Grid> {
    let file = File::open(path).map_err(|e| {
        error!(path = %path.display(), "failed to open grid file");
        GridError::FileSystem {
            path: path.to_path_buf(),
            operation: "open",
            source: e,
        }
    })?;

    let mut reader = BufReader::new(file);
    decode_with(&mut reader, mode).map_err(|e| e.at_path(path, "read"))
}

/// Save a grid to a Surfer 6 binary file, replacing any existing file
///
/// # Errors
///
/// Returns an error if the file cannot be created or written
pub fn write_grid_file(path: &Path, grid: &Grid) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        error!(path = %path.display(), "failed to create grid file");
        GridError::FileSystem {
            path: path.to_path_buf(),
            operation: "create",
            source: e,
        }
    })?;

    let mut writer = BufWriter::new(file);
    encode(grid, &mut writer).map_err(|e| e.at_path(path, "write"))?;
    writer.flush().map_err(|e| GridError::FileSystem {
        path: path.to_path_buf(),
        operation: "write",
        source: e,
    })
}
