//! Bounding box of a regular grid and node spacing derivation

/// Rectangular spatial extent `[x_min, x_max] x [y_min, y_max]` covered by a grid
///
/// Bounds are stored as given. Nothing here enforces `min < max`; callers that
/// need that guarantee use [`Extent::is_valid`] or the checked grid constructor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Minimum x coordinate (column 0)
    pub x_min: f64,
    /// Maximum x coordinate (last column)
    pub x_max: f64,
    /// Minimum y coordinate (row 0)
    pub y_min: f64,
    /// Maximum y coordinate (last row)
    pub y_max: f64,
}

impl Extent {
    /// Create an extent from its four bounds
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Spacing between adjacent columns for `x_size` samples
    pub fn x_step(&self, x_size: usize) -> f64 {
        node_step(self.x_min, self.x_max, x_size)
    }

    /// Spacing between adjacent rows for `y_size` samples
    pub fn y_step(&self, y_size: usize) -> f64 {
        node_step(self.y_min, self.y_max, y_size)
    }

    /// Width of the extent along x
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the extent along y
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Check that both axes are finite and strictly increasing
    pub fn is_valid(&self) -> bool {
        self.x_min.is_finite()
            && self.x_max.is_finite()
            && self.y_min.is_finite()
            && self.y_max.is_finite()
            && self.x_max > self.x_min
            && self.y_max > self.y_min
    }

    /// Check if a world position lies inside the extent (inclusive)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

/// Distance between consecutive nodes when `size` samples span `[min, max]`
///
/// Sizes below 2 are not rejected: a single sample divides by zero and yields
/// an infinite or NaN step, a size of 0 divides by -1.
pub fn node_step(min: f64, max: f64, size: usize) -> f64 {
    (max - min) / (size as f64 - 1.0)
}
