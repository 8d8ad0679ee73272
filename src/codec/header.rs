//! Fixed 56-byte header of the Surfer 6 binary grid format

use std::io::{Read, Write};

use crate::io::configuration::{CELL_SIZE, HEADER_SIZE, SURFER6_MAGIC};
use crate::io::error::{Result, invalid_header, read_error};
use crate::spatial::{Extent, Grid};

/// Surfer 6 binary header
///
/// Layout (56 bytes, little-endian):
/// - Bytes 0-3: Magic "DSBB"
/// - Bytes 4-5: `x_size` (i16)
/// - Bytes 6-7: `y_size` (i16)
/// - Bytes 8-39: `x_min`, `x_max`, `y_min`, `y_max` (f64 each)
/// - Bytes 40-55: `z_min`, `z_max` (f64 each)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surfer6Header {
    /// Tag bytes, "DSBB" for well-formed files
    pub magic: [u8; 4],
    /// Number of columns
    pub x_size: i16,
    /// Number of rows
    pub y_size: i16,
    /// Bounding box
    pub extent: Extent,
    /// Stored minimum z value
    pub z_min: f64,
    /// Stored maximum z value
    pub z_max: f64,
}

impl Surfer6Header {
    /// Describe a grid as it will be written
    ///
    /// Sizes beyond the 16-bit range wrap, matching the legacy writer. The z
    /// range is copied from the grid cache without rescanning cells.
    pub const fn from_grid(grid: &Grid) -> Self {
        Self {
            magic: SURFER6_MAGIC,
            x_size: grid.x_size() as i16,
            y_size: grid.y_size() as i16,
            extent: grid.extent(),
            z_min: grid.z_min(),
            z_max: grid.z_max(),
        }
    }

    /// Check the tag bytes
    pub fn has_valid_magic(&self) -> bool {
        self.magic == SURFER6_MAGIC
    }

    /// Number of cells following the header
    ///
    /// # Errors
    ///
    /// Returns `InvalidHeader` if either size is negative
    pub fn cell_count(&self) -> Result<usize> {
        let x = usize::try_from(self.x_size)
            .map_err(|_negative| invalid_header(&format!("negative x_size {}", self.x_size)))?;
        let y = usize::try_from(self.y_size)
            .map_err(|_negative| invalid_header(&format!("negative y_size {}", self.y_size)))?;
        Ok(x * y)
    }

    /// Reject headers the permissive reader would accept
    ///
    /// # Errors
    ///
    /// Returns `InvalidHeader` if:
    /// - The tag is not "DSBB"
    /// - Either size is below 2
    pub fn validate(&self) -> Result<()> {
        if !self.has_valid_magic() {
            return Err(invalid_header(&format!(
                "unexpected tag {:?} (expected \"DSBB\")",
                String::from_utf8_lossy(&self.magic)
            )));
        }
        if self.x_size < 2 || self.y_size < 2 {
            return Err(invalid_header(&format!(
                "grid of {}x{} nodes has undefined spacing",
                self.x_size, self.y_size
            )));
        }
        Ok(())
    }

    /// Read a header from the start of a stream
    ///
    /// The tag bytes are consumed but not checked.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if the stream ends inside the header
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let magic = read_array::<4, R>(reader)?;
        let x_size = i16::from_le_bytes(read_array(reader)?);
        let y_size = i16::from_le_bytes(read_array(reader)?);
        let x_min = f64::from_le_bytes(read_array(reader)?);
        let x_max = f64::from_le_bytes(read_array(reader)?);
        let y_min = f64::from_le_bytes(read_array(reader)?);
        let y_max = f64::from_le_bytes(read_array(reader)?);
        let z_min = f64::from_le_bytes(read_array(reader)?);
        let z_max = f64::from_le_bytes(read_array(reader)?);

        Ok(Self {
            magic,
            x_size,
            y_size,
            extent: Extent::new(x_min, x_max, y_min, y_max),
            z_min,
            z_max,
        })
    }

    /// Write the header fields in layout order
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.magic)?;
        writer.write_all(&self.x_size.to_le_bytes())?;
        writer.write_all(&self.y_size.to_le_bytes())?;
        for value in [
            self.extent.x_min,
            self.extent.x_max,
            self.extent.y_min,
            self.extent.y_max,
            self.z_min,
            self.z_max,
        ] {
            writer.write_all(&value.to_le_bytes())?;
        }
        Ok(())
    }
}

/// Total encoded size of a grid with the given dimensions
pub const fn encoded_len(x_size: usize, y_size: usize) -> usize {
    HEADER_SIZE + CELL_SIZE * x_size * y_size
}

fn read_array<const N: usize, R: Read>(reader: &mut R) -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    reader
        .read_exact(&mut bytes)
        .map_err(|e| read_error("header", e))?;
    Ok(bytes)
}
