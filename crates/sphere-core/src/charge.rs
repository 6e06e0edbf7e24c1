//! Charge accumulated on the sphere interface.
//!
//! The conductivity jump at $r = R$ accumulates a surface charge. On a
//! sampled grid the surface delta function is represented by a band of width
//! `dx` (one grid step) around the boundary, see [`ShellRegion`]. Inside the
//! band
//!
//! $$
//! \rho = 3\,\epsilon_0\, E_{p,x}\, k \,\frac{x}{\sqrt{x^2 + y^2}}
//! $$
//!
//! and the density is zero everywhere else.

use ndarray::Zip;

use crate::constants::VACUUM_PERMITTIVITY;
use crate::error::ModelError;
use crate::region::{check_vector_field, classify_shell, ShellRegion};
use crate::types::{FieldComponents, MaterialParameters, SampleSet, ScalarField, VectorField};

/// Interface charge density at every sample point.
///
/// `field` must be the electric field evaluated over the same `samples`;
/// the density depends on its primary part only. `dx` is the sampling step
/// and sets the width of the interface band.
///
/// Band points on the z axis (`x = y = 0`) have no defined in-plane normal
/// and are assigned zero.
pub fn charge_density(
    samples: &SampleSet,
    params: &MaterialParameters,
    field: &FieldComponents<VectorField>,
    dx: f64,
) -> Result<ScalarField, ModelError> {
    params.validate()?;
    let shells = classify_shell(samples, params.radius, dx)?;
    check_vector_field("total electric field", &field.total, samples)?;
    check_vector_field("primary electric field", &field.primary, samples)?;

    let k = params.contrast_factor();
    Ok(Zip::from(samples.rows())
        .and(field.primary.rows())
        .and(&shells)
        .par_map_collect(|p, ep, &shell| match shell {
            ShellRegion::Interface => {
                let rho_xy = (p[0] * p[0] + p[1] * p[1]).sqrt();
                if rho_xy > 0.0 {
                    VACUUM_PERMITTIVITY * 3.0 * ep[0] * k * p[0] / rho_xy
                } else {
                    0.0
                }
            }
            ShellRegion::Background | ShellRegion::Sphere => 0.0,
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::electric_field;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_charge_confined_to_interface_band() {
        let params = MaterialParameters::new(10.0, 100.0, 50.0, 1.0).unwrap();
        let samples = array![
            [50.0, 0.0, 0.0],
            [-50.4, 0.0, 0.0],
            [0.0, 50.0, 0.0],
            [60.0, 0.0, 0.0],
            [10.0, 0.0, 0.0],
            [0.0, 0.0, 50.0],
        ];
        let e = electric_field(&samples, &params).unwrap();
        let rho = charge_density(&samples, &params, &e, 1.0).unwrap();

        let peak = VACUUM_PERMITTIVITY * 3.0 * 0.75;
        assert_relative_eq!(rho[0], peak, max_relative = 1e-12);
        assert_relative_eq!(rho[1], -peak, max_relative = 1e-12);
        assert_eq!(rho[2], 0.0);
        assert_eq!(rho[3], 0.0);
        assert_eq!(rho[4], 0.0);
        assert_eq!(rho[5], 0.0);
    }

    #[test]
    fn test_no_contrast_gives_no_charge() {
        let params = MaterialParameters::new(3.0, 3.0, 5.0, 2.0).unwrap();
        let samples = array![[5.0, 0.0, 0.0], [3.0, 4.0, 0.0], [-4.0, 3.0, 0.0]];
        let e = electric_field(&samples, &params).unwrap();
        let rho = charge_density(&samples, &params, &e, 0.5).unwrap();
        assert!(rho.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_rejects_non_positive_band_width() {
        let params = MaterialParameters::new(1.0, 2.0, 1.0, 1.0).unwrap();
        let samples = array![[1.0, 0.0, 0.0]];
        let e = electric_field(&samples, &params).unwrap();
        assert!(charge_density(&samples, &params, &e, -1.0).is_err());
    }
}
