//! Regular sample grids.
//!
//! A [`SampleGrid`] describes a rectangular patch of the plane `z = const`
//! sampled at a fixed spacing. Points are emitted row by row (y outer, x
//! inner) so a scalar field evaluated over them can be reshaped directly to
//! `(ny, nx)` for display.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a sample grid.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GridError {
    #[error("Grid spacing must be positive and finite, got {0}")]
    InvalidSpacing(f64),

    #[error("Invalid {axis} range [{min}, {max}]: min must be finite and below max")]
    InvalidRange { axis: char, min: f64, max: f64 },

    #[error("Grid spacing {spacing} gives more than {limit} samples")]
    TooManySamples { spacing: f64, limit: usize },
}

/// Largest number of points a grid may hold.
pub const MAX_SAMPLES: usize = 1 << 26;

/// A regular grid in the plane `z = z`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleGrid {
    /// Extent along x: [min, max] (m).
    pub x_range: [f64; 2],
    /// Extent along y: [min, max] (m).
    pub y_range: [f64; 2],
    /// Distance between neighbouring samples (m).
    pub spacing: f64,
    /// Height of the sampling plane (m).
    #[serde(default)]
    pub z: f64,
}

impl SampleGrid {
    /// Build a grid after checking the spacing and both ranges.
    pub fn new(x_range: [f64; 2], y_range: [f64; 2], spacing: f64, z: f64) -> Result<Self, GridError> {
        let grid = Self { x_range, y_range, spacing, z };
        grid.validate()?;
        Ok(grid)
    }

    /// Square grid centred on the origin, `[-half_width, half_width]` on both axes.
    pub fn centred(half_width: f64, spacing: f64) -> Result<Self, GridError> {
        Self::new([-half_width, half_width], [-half_width, half_width], spacing, 0.0)
    }

    /// Check the invariants of a grid that was deserialised rather than built.
    pub fn validate(&self) -> Result<(), GridError> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(GridError::InvalidSpacing(self.spacing));
        }
        for (axis, [min, max]) in [('x', self.x_range), ('y', self.y_range)] {
            if !(min.is_finite() && max.is_finite() && min < max) {
                return Err(GridError::InvalidRange { axis, min, max });
            }
        }
        let too_many = GridError::TooManySamples { spacing: self.spacing, limit: MAX_SAMPLES };
        let nx = bounded_axis_count(self.x_range, self.spacing).ok_or_else(|| too_many.clone())?;
        let ny = bounded_axis_count(self.y_range, self.spacing).ok_or_else(|| too_many.clone())?;
        match nx.checked_mul(ny) {
            Some(n) if n <= MAX_SAMPLES => Ok(()),
            _ => Err(too_many),
        }
    }

    /// Number of samples along x and y.
    pub fn dims(&self) -> (usize, usize) {
        (
            axis_count(self.x_range, self.spacing),
            axis_count(self.y_range, self.spacing),
        )
    }

    /// Total number of sample points.
    pub fn len(&self) -> usize {
        let (nx, ny) = self.dims();
        nx * ny
    }

    /// Always false for a validated grid; provided alongside [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample coordinates along x.
    pub fn x_coords(&self) -> Vec<f64> {
        axis_coords(self.x_range, self.spacing)
    }

    /// Sample coordinates along y.
    pub fn y_coords(&self) -> Vec<f64> {
        axis_coords(self.y_range, self.spacing)
    }

    /// Flatten the grid into an `N × 3` array of points, y outer and x inner.
    pub fn points(&self) -> Array2<f64> {
        let xs = self.x_coords();
        let ys = self.y_coords();
        let nx = xs.len();
        Array2::from_shape_fn((xs.len() * ys.len(), 3), |(i, c)| match c {
            0 => xs[i % nx],
            1 => ys[i / nx],
            _ => self.z,
        })
    }
}

// Samples start at `min` and step by `spacing` while staying within `max`;
// the small slack keeps the end point when the extent is an exact multiple.
fn axis_steps(range: [f64; 2], spacing: f64) -> f64 {
    ((range[1] - range[0]) / spacing + 1e-9).floor()
}

fn axis_count(range: [f64; 2], spacing: f64) -> usize {
    (axis_steps(range, spacing) as usize).saturating_add(1)
}

fn bounded_axis_count(range: [f64; 2], spacing: f64) -> Option<usize> {
    let steps = axis_steps(range, spacing);
    (steps < MAX_SAMPLES as f64).then(|| steps as usize + 1)
}

fn axis_coords(range: [f64; 2], spacing: f64) -> Vec<f64> {
    (0..axis_count(range, spacing))
        .map(|i| range[0] + i as f64 * spacing)
        .collect()
}

/// `n` evenly spaced values from `start` to `end`, both ends included.
///
/// `n = 1` yields `[start]`; `n = 0` yields an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n)
            .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}
