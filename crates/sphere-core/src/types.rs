//! Core types shared across the forward model.
//!
//! Sample sets and fields are plain `ndarray` containers so they interoperate
//! with the rest of the numerical ecosystem: a sample set is an `N × 3` array
//! of points, a scalar field has one value per point and a vector field has one
//! row per point. Every evaluator preserves point order, so fields computed by
//! different functions stay index-aligned.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::region::Region;

/// A single observation point (x, y, z) in metres.
pub type SamplePoint = [f64; 3];

/// Ordered observation points, shape (N, 3).
pub type SampleSet = Array2<f64>;

/// One real value per sample point, shape (N,).
pub type ScalarField = Array1<f64>;

/// One 3-vector per sample point, shape (N, 3).
pub type VectorField = Array2<f64>;

/// Physical parameters of the sphere problem.
///
/// The sphere is centred on the origin and the inducing field points along
/// +x. All quantities are SI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParameters {
    /// Background conductivity σ₀ (S/m).
    pub sig0: f64,
    /// Sphere conductivity σ₁ (S/m).
    pub sig1: f64,
    /// Sphere radius R (m).
    pub radius: f64,
    /// Magnitude of the inducing field E₀ (V/m).
    pub e0: f64,
}

impl MaterialParameters {
    /// Create a validated parameter set.
    pub fn new(sig0: f64, sig1: f64, radius: f64, e0: f64) -> Result<Self, ModelError> {
        let params = Self { sig0, sig1, radius, e0 };
        params.validate()?;
        Ok(params)
    }

    /// Check that both conductivities and the radius are strictly positive
    /// and that every value is finite.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in [("sig0", self.sig0), ("sig1", self.sig1), ("radius", self.radius)] {
            if !value.is_finite() {
                return Err(ModelError::InvalidParameter { name, value, reason: "must be finite" });
            }
            if value <= 0.0 {
                return Err(ModelError::InvalidParameter { name, value, reason: "must be positive" });
            }
        }
        if !self.e0.is_finite() {
            return Err(ModelError::InvalidParameter {
                name: "e0",
                value: self.e0,
                reason: "must be finite",
            });
        }
        Ok(())
    }

    /// Contrast factor $k = (\sigma_1 - \sigma_0)/(\sigma_1 + 2\sigma_0)$.
    pub fn contrast_factor(&self) -> f64 {
        contrast_factor(self.sig0, self.sig1)
    }

    /// Ratio of the uniform interior field to the inducing field,
    /// $3\sigma_0/(\sigma_1 + 2\sigma_0)$.
    pub fn interior_factor(&self) -> f64 {
        3.0 * self.sig0 / (self.sig1 + 2.0 * self.sig0)
    }

    /// Conductivity of the given region.
    pub fn conductivity_of(&self, region: Region) -> f64 {
        match region {
            Region::Background => self.sig0,
            Region::Sphere => self.sig1,
        }
    }
}

/// Contrast factor $k = (\sigma_1 - \sigma_0)/(\sigma_1 + 2\sigma_0)$.
///
/// Ranges from −1/2 (resistive sphere) to 1 (perfect conductor) and vanishes
/// when the sphere matches the background.
pub fn contrast_factor(sig0: f64, sig1: f64) -> f64 {
    (sig1 - sig0) / (sig1 + 2.0 * sig0)
}

/// Total, primary and secondary parts of a field.
///
/// The primary part is the response with the sphere absent; for potentials
/// and electric fields the secondary part is exactly `total - primary`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldComponents<T> {
    pub total: T,
    pub primary: T,
    pub secondary: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_contrast_factor_reference() {
        assert_relative_eq!(contrast_factor(10.0, 100.0), 0.75);
        assert_relative_eq!(contrast_factor(1.0, 1.0), 0.0);
        // resistive limit approaches -1/2
        assert!(contrast_factor(1.0, 1e-9) > -0.5);
    }

    #[test]
    fn test_interior_factor_reference() {
        let p = MaterialParameters::new(10.0, 100.0, 50.0, 1.0).unwrap();
        assert_relative_eq!(p.interior_factor(), 0.25);
        assert_relative_eq!(p.contrast_factor(), 0.75);
    }

    #[test]
    fn test_rejects_non_positive_parameters() {
        for (sig0, sig1, radius) in [(0.0, 1.0, 1.0), (1.0, -2.0, 1.0), (1.0, 1.0, 0.0)] {
            let err = MaterialParameters::new(sig0, sig1, radius, 1.0).unwrap_err();
            assert!(matches!(err, ModelError::InvalidParameter { reason: "must be positive", .. }));
        }
    }

    #[test]
    fn test_rejects_non_finite_parameters() {
        let err = MaterialParameters::new(1.0, f64::INFINITY, 1.0, 1.0).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidParameter { name: "sig1", value: f64::INFINITY, reason: "must be finite" }
        );
        assert!(MaterialParameters::new(1.0, 1.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_negative_field_is_allowed() {
        assert!(MaterialParameters::new(1.0, 2.0, 3.0, -5.0).is_ok());
    }
}
