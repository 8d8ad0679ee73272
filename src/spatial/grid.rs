//! Regular 2D scalar grid with spatial metadata and blank-aware statistics
//!
//! Cells are stored row-major in an `Array2` of shape `(y_size, x_size)`, so the
//! flat view follows `index = y * x_size + x` with y as the slow axis. Node
//! spacing is derived from the extent and kept in sync by every bound setter.
//! The cached z range is only refreshed by [`Grid::recompute_z_range`].

use ndarray::Array2;
use tracing::warn;

use crate::analysis::statistics::value_range;
use crate::io::configuration::{
    DEFAULT_BLANK_VALUE, DEFAULT_GRID_MAX, DEFAULT_GRID_MIN, DEFAULT_GRID_SIZE, DEFAULT_Z_RANGE,
};
use crate::io::error::{GridError, Result, invalid_parameter};
use crate::spatial::extent::Extent;

/// Rectangular mesh of `f64` samples over a bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    extent: Extent,
    x_size: usize,
    y_size: usize,
    x_step: f64,
    y_step: f64,
    z_min: f64,
    z_max: f64,
    blank_value: f64,
    data: Array2<f64>,
}

impl Grid {
    /// Create a validated grid with every cell blank
    ///
    /// The z range collapses to the blank value since no cell holds data yet.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either size is below 2 (node spacing would be undefined)
    /// - The extent is not finite and strictly increasing on both axes
    /// - The cell buffer cannot be allocated
    pub fn new(extent: Extent, x_size: usize, y_size: usize) -> Result<Self> {
        validate_layout(&extent, x_size, y_size)?;

        let count = cell_count(x_size, y_size)?;
        let mut cells = allocate_cells(count)?;
        cells.resize(count, DEFAULT_BLANK_VALUE);

        Self::from_parts(
            extent,
            x_size,
            y_size,
            (DEFAULT_BLANK_VALUE, DEFAULT_BLANK_VALUE),
            DEFAULT_BLANK_VALUE,
            cells,
        )
    }

    /// Build the 11x11 example grid over `[0, 10] x [0, 10]`
    ///
    /// Cells hold `0..=120` in row-major order and the z range is computed from
    /// them, replacing the `[0, 1]` placeholder.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell buffer cannot be allocated
    pub fn create_default() -> Result<Self> {
        let extent = Extent::new(
            DEFAULT_GRID_MIN,
            DEFAULT_GRID_MAX,
            DEFAULT_GRID_MIN,
            DEFAULT_GRID_MAX,
        );
        let count = cell_count(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)?;
        let mut cells = allocate_cells(count)?;
        cells.extend((0..count).map(|i| i as f64));

        let mut grid = Self::from_parts(
            extent,
            DEFAULT_GRID_SIZE,
            DEFAULT_GRID_SIZE,
            DEFAULT_Z_RANGE,
            DEFAULT_BLANK_VALUE,
            cells,
        )?;
        grid.recompute_z_range();
        Ok(grid)
    }

    /// Assemble a grid from raw parts without validating the metadata
    ///
    /// Steps are derived from the extent and sizes; degenerate sizes produce
    /// degenerate steps. The z range is stored as given.
    ///
    /// # Errors
    ///
    /// Returns an error if `cells.len()` differs from `x_size * y_size`
    pub fn from_parts(
        extent: Extent,
        x_size: usize,
        y_size: usize,
        z_range: (f64, f64),
        blank_value: f64,
        cells: Vec<f64>,
    ) -> Result<Self> {
        let len = cells.len();
        let data = Array2::from_shape_vec((y_size, x_size), cells).map_err(|e| {
            invalid_parameter("cells", &len, &format!("expected {x_size}x{y_size}: {e}"))
        })?;

        Ok(Self {
            extent,
            x_size,
            y_size,
            x_step: extent.x_step(x_size),
            y_step: extent.y_step(y_size),
            z_min: z_range.0,
            z_max: z_range.1,
            blank_value,
            data,
        })
    }

    /// Bounding box of the grid
    pub const fn extent(&self) -> Extent {
        self.extent
    }

    /// Minimum x coordinate
    pub const fn x_min(&self) -> f64 {
        self.extent.x_min
    }

    /// Maximum x coordinate
    pub const fn x_max(&self) -> f64 {
        self.extent.x_max
    }

    /// Minimum y coordinate
    pub const fn y_min(&self) -> f64 {
        self.extent.y_min
    }

    /// Maximum y coordinate
    pub const fn y_max(&self) -> f64 {
        self.extent.y_max
    }

    /// Number of samples along x
    pub const fn x_size(&self) -> usize {
        self.x_size
    }

    /// Number of samples along y
    pub const fn y_size(&self) -> usize {
        self.y_size
    }

    /// Dimensions as (`x_size`, `y_size`)
    pub const fn shape(&self) -> (usize, usize) {
        (self.x_size, self.y_size)
    }

    /// Spacing between columns
    pub const fn x_step(&self) -> f64 {
        self.x_step
    }

    /// Spacing between rows
    pub const fn y_step(&self) -> f64 {
        self.y_step
    }

    /// Cached minimum of non-blank cells
    pub const fn z_min(&self) -> f64 {
        self.z_min
    }

    /// Cached maximum of non-blank cells
    pub const fn z_max(&self) -> f64 {
        self.z_max
    }

    /// Sentinel marking cells without data
    pub const fn blank_value(&self) -> f64 {
        self.blank_value
    }

    /// Replace the blank sentinel
    ///
    /// Existing cells are not rewritten and the z range is left untouched.
    pub const fn set_blank_value(&mut self, blank_value: f64) {
        self.blank_value = blank_value;
    }

    /// Cell array indexed by `[y, x]`
    pub const fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[f64] {
        self.data.as_slice().unwrap_or(&[])
    }

    /// Read a cell, falling back to the blank value outside the grid
    pub fn get(&self, x: i64, y: i64) -> f64 {
        match self.index(x, y).and_then(|idx| self.data.get(idx)) {
            Some(&value) => value,
            None => {
                warn!(x, y, x_size = self.x_size, y_size = self.y_size, "index out of bounds");
                self.blank_value
            }
        }
    }

    /// Write a cell, ignoring coordinates outside the grid
    ///
    /// The cached z range is not refreshed.
    pub fn set(&mut self, x: i64, y: i64, value: f64) {
        let (x_size, y_size) = self.shape();
        match self.index(x, y).and_then(|idx| self.data.get_mut(idx)) {
            Some(cell) => *cell = value,
            None => warn!(x, y, x_size, y_size, "index out of bounds, write dropped"),
        }
    }

    /// Read a cell, reporting coordinates outside the grid
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `x` or `y` lies outside the grid
    pub fn try_get(&self, x: i64, y: i64) -> Result<f64> {
        self.index(x, y)
            .and_then(|idx| self.data.get(idx))
            .copied()
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Write a cell, reporting coordinates outside the grid
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `x` or `y` lies outside the grid
    pub fn try_set(&mut self, x: i64, y: i64, value: f64) -> Result<()> {
        let err = self.out_of_bounds(x, y);
        let cell = self
            .index(x, y)
            .and_then(|idx| self.data.get_mut(idx))
            .ok_or(err)?;
        *cell = value;
        Ok(())
    }

    /// Cell value as data, `None` when blank or outside the grid
    // Exact match against the sentinel
    #[allow(clippy::float_cmp)]
    pub fn value(&self, x: i64, y: i64) -> Option<f64> {
        self.index(x, y)
            .and_then(|idx| self.data.get(idx))
            .copied()
            .filter(|&v| v != self.blank_value)
    }

    /// World coordinates of the node at column `x`, row `y`
    pub fn node_position(&self, x: i64, y: i64) -> Option<[f64; 2]> {
        self.index(x, y).map(|[row, col]| {
            [
                (col as f64).mul_add(self.x_step, self.extent.x_min),
                (row as f64).mul_add(self.y_step, self.extent.y_min),
            ]
        })
    }

    /// Move the lower x bound and refresh the column spacing
    pub fn set_x_min(&mut self, x_min: f64) {
        self.extent.x_min = x_min;
        self.x_step = self.extent.x_step(self.x_size);
    }

    /// Move the upper x bound and refresh the column spacing
    pub fn set_x_max(&mut self, x_max: f64) {
        self.extent.x_max = x_max;
        self.x_step = self.extent.x_step(self.x_size);
    }

    /// Move the lower y bound and refresh the row spacing
    pub fn set_y_min(&mut self, y_min: f64) {
        self.extent.y_min = y_min;
        self.y_step = self.extent.y_step(self.y_size);
    }

    /// Move the upper y bound and refresh the row spacing
    pub fn set_y_max(&mut self, y_max: f64) {
        self.extent.y_max = y_max;
        self.y_step = self.extent.y_step(self.y_size);
    }

    /// Rescan all cells and store the range of non-blank values
    ///
    /// Cells exactly equal to the blank value are skipped. When no cell
    /// contributes, both ends of the range become the blank value.
    pub fn recompute_z_range(&mut self) {
        let (z_min, z_max) = value_range(self.data.iter().copied(), self.blank_value)
            .unwrap_or((self.blank_value, self.blank_value));
        self.z_min = z_min;
        self.z_max = z_max;
    }

    // Converts signed coordinates into an `[row, col]` index within bounds
    fn index(&self, x: i64, y: i64) -> Option<[usize; 2]> {
        let col = usize::try_from(x).ok().filter(|&c| c < self.x_size)?;
        let row = usize::try_from(y).ok().filter(|&r| r < self.y_size)?;
        Some([row, col])
    }

    const fn out_of_bounds(&self, x: i64, y: i64) -> GridError {
        GridError::OutOfBounds {
            x,
            y,
            dimensions: (self.x_size, self.y_size),
        }
    }
}

/// Check that sizes and extent describe a well-formed grid
///
/// # Errors
///
/// Returns an error if:
/// - Either size is below 2 (node spacing would be undefined)
/// - The extent is not finite and strictly increasing on both axes
pub fn validate_layout(extent: &Extent, x_size: usize, y_size: usize) -> Result<()> {
    if x_size < 2 {
        return Err(invalid_parameter(
            "x_size",
            &x_size,
            &"at least two samples are required",
        ));
    }
    if y_size < 2 {
        return Err(invalid_parameter(
            "y_size",
            &y_size,
            &"at least two samples are required",
        ));
    }
    if !extent.is_valid() {
        return Err(invalid_parameter(
            "extent",
            &format!("{extent:?}"),
            &"bounds must be finite with max > min",
        ));
    }
    Ok(())
}

/// Number of cells for the given dimensions
///
/// # Errors
///
/// Returns `Allocation` if the product overflows `usize`
pub fn cell_count(x_size: usize, y_size: usize) -> Result<usize> {
    x_size
        .checked_mul(y_size)
        .ok_or(GridError::Allocation { cells: usize::MAX })
}

/// Reserve an empty buffer able to hold `cells` values
///
/// Reservation failure is reported instead of aborting the process.
///
/// # Errors
///
/// Returns `Allocation` if the memory cannot be reserved
pub fn allocate_cells(cells: usize) -> Result<Vec<f64>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(cells)
        .map_err(|_reserve_error| GridError::Allocation { cells })?;
    Ok(buffer)
}
