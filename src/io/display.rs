//! Human-readable dumps of grid metadata and cell values

use std::fmt;

use crate::analysis::statistics::GridSummary;
use crate::spatial::Grid;

/// Metadata summary of a grid, one attribute pair per line
pub struct GridInfo<'a>(pub &'a Grid);

impl fmt::Display for GridInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.0;
        writeln!(f, "Grid Information:")?;
        writeln!(f, "X Min: {:.6}, X Max: {:.6}", grid.x_min(), grid.x_max())?;
        writeln!(f, "Y Min: {:.6}, Y Max: {:.6}", grid.y_min(), grid.y_max())?;
        writeln!(f, "X Size: {}, Y Size: {}", grid.x_size(), grid.y_size())?;
        writeln!(f, "X Step: {:.6}, Y Step: {:.6}", grid.x_step(), grid.y_step())?;
        writeln!(f, "Z Min: {:.6}, Z Max: {:.6}", grid.z_min(), grid.z_max())?;
        writeln!(f, "Blank Value: {:.6}", grid.blank_value())
    }
}

/// Cell table with row 0 first, each value in a fixed-width column
pub struct GridData<'a>(pub &'a Grid);

impl fmt::Display for GridData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid Data:")?;
        for row in self.0.data().rows() {
            for value in row {
                write!(f, "{value:6.2} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for GridSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cells, {} blank", self.cells, self.blank_cells)?;
        if let Some((min, max)) = self.range {
            write!(f, ", values {min:.6}..{max:.6}")?;
        }
        if let Some(mean) = self.mean {
            write!(f, ", mean {mean:.6}")?;
        }
        Ok(())
    }
}
