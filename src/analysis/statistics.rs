//! Value-range and blank-coverage statistics over grid cells

use bitvec::prelude::*;
use num_traits::Float;

use crate::spatial::Grid;

/// Minimum and maximum of all values not exactly equal to `blank`
///
/// The scan seeds with the largest finite extremes of `T` and only moves them on
/// strict comparisons, so NaN cells never contribute. Returns `None` when no
/// value contributed.
pub fn value_range<T, I>(values: I, blank: T) -> Option<(T, T)>
where
    T: Float,
    I: IntoIterator<Item = T>,
{
    let mut min = T::max_value();
    let mut max = T::min_value();
    let mut contributed = false;

    for value in values {
        if value == blank {
            continue;
        }
        if value < min {
            min = value;
            contributed = true;
        }
        if value > max {
            max = value;
            contributed = true;
        }
    }

    contributed.then_some((min, max))
}

/// One bit per cell in row-major order, set where the cell holds the blank value
// Exact match against the sentinel
#[allow(clippy::float_cmp)]
pub fn blank_mask(grid: &Grid) -> BitVec {
    let blank = grid.blank_value();
    grid.cells().iter().map(|&v| v == blank).collect()
}

/// Aggregate description of the cells of a grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridSummary {
    /// Total number of cells
    pub cells: usize,
    /// Cells holding the blank value
    pub blank_cells: usize,
    /// Range of non-blank values, computed fresh rather than read from the cache
    pub range: Option<(f64, f64)>,
    /// Mean of finite non-blank values
    pub mean: Option<f64>,
}

impl GridSummary {
    /// Scan a grid and collect its statistics
    pub fn from_grid(grid: &Grid) -> Self {
        let mask = blank_mask(grid);
        let blank_cells = mask.count_ones();

        let mut sum = 0.0;
        let mut finite = 0_usize;
        for (&value, blank) in grid.cells().iter().zip(mask.iter()) {
            if !*blank && value.is_finite() {
                sum += value;
                finite += 1;
            }
        }

        Self {
            cells: mask.len(),
            blank_cells,
            range: value_range(grid.cells().iter().copied(), grid.blank_value()),
            mean: (finite > 0).then(|| sum / finite as f64),
        }
    }

    /// Number of cells holding data
    pub const fn data_cells(&self) -> usize {
        self.cells - self.blank_cells
    }
}
