//! Seeded synthetic surfaces for demonstrations and benchmarks

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::io::configuration::DEFAULT_BLANK_VALUE;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::extent::Extent;
use crate::spatial::grid::{Grid, allocate_cells, cell_count, validate_layout};

/// Parameters of a generated surface
#[derive(Debug, Clone, Copy)]
pub struct SurfaceConfig {
    /// Samples along x
    pub x_size: usize,
    /// Samples along y
    pub y_size: usize,
    /// Bounding box of the surface
    pub extent: Extent,
    /// Probability that a cell is left blank
    pub blank_fraction: f64,
    /// Seed for reproducible output
    pub seed: u64,
}

// Sum of a few random plane waves, smooth enough to look like terrain
struct Wave {
    amplitude: f64,
    frequency: [f64; 2],
    phase: f64,
}

impl Wave {
    fn random(rng: &mut StdRng) -> Self {
        Self {
            amplitude: rng.random_range(10.0..100.0),
            frequency: [rng.random_range(0.5..3.0), rng.random_range(0.5..3.0)],
            phase: rng.random_range(0.0..std::f64::consts::TAU),
        }
    }

    fn sample(&self, u: f64, v: f64) -> f64 {
        let angle = self.frequency[0].mul_add(u, self.frequency[1] * v) + self.phase;
        self.amplitude * angle.sin()
    }
}

/// Number of waves summed per surface
const WAVE_COUNT: usize = 4;

/// Generate a grid of smooth random values with scattered blank cells
///
/// The z range is computed before returning.
///
/// # Errors
///
/// Returns an error if:
/// - `blank_fraction` is outside `[0, 1]`
/// - The sizes or extent are rejected by [`validate_layout`]
/// - The cell buffer cannot be allocated
pub fn synthetic_grid(config: &SurfaceConfig) -> Result<Grid> {
    if !(0.0..=1.0).contains(&config.blank_fraction) {
        return Err(invalid_parameter(
            "blank_fraction",
            &config.blank_fraction,
            &"must lie within [0, 1]",
        ));
    }

    validate_layout(&config.extent, config.x_size, config.y_size)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let waves: Vec<Wave> = (0..WAVE_COUNT).map(|_| Wave::random(&mut rng)).collect();

    let count = cell_count(config.x_size, config.y_size)?;
    let mut cells = allocate_cells(count)?;
    for y in 0..config.y_size {
        let v = y as f64 / (config.y_size - 1) as f64 * std::f64::consts::TAU;
        for x in 0..config.x_size {
            let u = x as f64 / (config.x_size - 1) as f64 * std::f64::consts::TAU;
            let value = if rng.random_bool(config.blank_fraction) {
                DEFAULT_BLANK_VALUE
            } else {
                waves.iter().map(|w| w.sample(u, v)).sum()
            };
            cells.push(value);
        }
    }

    let mut grid = Grid::from_parts(
        config.extent,
        config.x_size,
        config.y_size,
        (DEFAULT_BLANK_VALUE, DEFAULT_BLANK_VALUE),
        DEFAULT_BLANK_VALUE,
        cells,
    )?;
    grid.recompute_z_range();
    Ok(grid)
}
