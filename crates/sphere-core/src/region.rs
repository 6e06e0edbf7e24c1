//! Region membership of sample points.
//!
//! Every evaluator dispatches on a single classification computed here, so
//! the potential, field, current and charge branches always agree on which
//! side of the interface a point lies.
//!
//! # Boundary convention
//!
//! The two-region test puts the boundary in the sphere: `r > R` is
//! [`Region::Background`] and `r <= R` is [`Region::Sphere`].
//!
//! The three-region test used for interface charge adds an open band
//! `|r - R| < dx/2` around the boundary. The band takes precedence over the
//! two other regions, so a point with `r == R` is always
//! [`ShellRegion::Interface`] there even though the two-region test calls it
//! [`Region::Sphere`].

use ndarray::{Array1, Zip};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::types::{SampleSet, VectorField};

/// Material domain of a sample point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Outside the sphere (`r > R`).
    Background,
    /// Inside or on the sphere (`r <= R`).
    Sphere,
}

impl Region {
    /// Classify a point from its distance to the sphere centre.
    ///
    /// # Panics
    /// If `r` cannot be compared with `radius` (NaN coordinates). Such a
    /// point belongs to neither region, which is a caller defect.
    pub fn classify(r: f64, radius: f64) -> Self {
        if r > radius {
            Region::Background
        } else {
            assert!(r <= radius, "sample at r = {r} is outside every region");
            Region::Sphere
        }
    }
}

/// Region of a sample point for interface-charge evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShellRegion {
    /// Outside the interface band.
    Background,
    /// Inside the interface band.
    Sphere,
    /// Within half a grid step of the boundary.
    Interface,
}

impl ShellRegion {
    /// Classify a point against a boundary band of total width `dx`.
    ///
    /// # Panics
    /// If `r` is NaN; see [`Region::classify`].
    pub fn classify(r: f64, radius: f64, dx: f64) -> Self {
        if (r - radius).abs() < dx / 2.0 {
            ShellRegion::Interface
        } else if r > radius {
            ShellRegion::Background
        } else {
            assert!(r < radius, "sample at r = {r} is outside every region");
            ShellRegion::Sphere
        }
    }
}

/// Distance from the origin.
#[inline]
pub fn radial_distance(x: f64, y: f64, z: f64) -> f64 {
    (x * x + y * y + z * z).sqrt()
}

/// Reject sample sets that are not `N × 3`.
pub(crate) fn check_samples(samples: &SampleSet) -> Result<(), ModelError> {
    if samples.ncols() != 3 {
        return Err(ModelError::InvalidShape {
            rows: samples.nrows(),
            cols: samples.ncols(),
        });
    }
    Ok(())
}

/// Reject a vector field that is not `N × 3` with `N` matching the samples.
pub(crate) fn check_vector_field(
    what: &'static str,
    field: &VectorField,
    samples: &SampleSet,
) -> Result<(), ModelError> {
    if field.ncols() != 3 {
        return Err(ModelError::InvalidShape { rows: field.nrows(), cols: field.ncols() });
    }
    if field.nrows() != samples.nrows() {
        return Err(ModelError::ShapeMismatch {
            what,
            expected: samples.nrows(),
            found: field.nrows(),
        });
    }
    Ok(())
}

/// Two-region classification of every sample point.
pub fn classify_regions(samples: &SampleSet, radius: f64) -> Result<Array1<Region>, ModelError> {
    check_samples(samples)?;
    Ok(Zip::from(samples.rows())
        .par_map_collect(|p| Region::classify(radial_distance(p[0], p[1], p[2]), radius)))
}

/// Three-region classification with an interface band of width `dx`.
pub fn classify_shell(
    samples: &SampleSet,
    radius: f64,
    dx: f64,
) -> Result<Array1<ShellRegion>, ModelError> {
    check_samples(samples)?;
    if !(dx.is_finite() && dx > 0.0) {
        return Err(ModelError::InvalidParameter {
            name: "dx",
            value: dx,
            reason: "must be positive and finite",
        });
    }
    Ok(Zip::from(samples.rows())
        .par_map_collect(|p| ShellRegion::classify(radial_distance(p[0], p[1], p[2]), radius, dx)))
}
