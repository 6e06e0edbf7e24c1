//! Electric potential of a conducting sphere in a uniform field.
//!
//! With the inducing field $E_0\hat{\mathbf{x}}$ and the sphere at the
//! origin, the total potential is
//!
//! $$
//! V_t = \begin{cases}
//!   -E_0 x \left(1 - k \dfrac{R^3}{r^3}\right) & r > R \\[4pt]
//!   -E_0 x \dfrac{3\sigma_0}{\sigma_1 + 2\sigma_0} & r \le R
//! \end{cases}
//! $$
//!
//! The primary potential is $V_p = -E_0 x$ and the secondary potential is
//! defined as $V_s = V_t - V_p$.

use ndarray::Zip;

use crate::error::ModelError;
use crate::region::{classify_regions, radial_distance, Region};
use crate::types::{FieldComponents, MaterialParameters, SampleSet, ScalarField};

/// Total potential at a point already classified into `region`.
fn total_potential(params: &MaterialParameters, x: f64, r: f64, region: Region) -> f64 {
    match region {
        Region::Background => {
            -params.e0 * x * (1.0 - params.contrast_factor() * params.radius.powi(3) / r.powi(3))
        }
        Region::Sphere => -params.e0 * x * params.interior_factor(),
    }
}

/// Total potential at a single point.
///
/// This is the same piecewise expression [`potential`] evaluates over a
/// sample set; survey electrodes use it directly.
pub fn total_potential_at(params: &MaterialParameters, x: f64, y: f64, z: f64) -> f64 {
    let r = radial_distance(x, y, z);
    total_potential(params, x, r, Region::classify(r, params.radius))
}

/// Primary (sphere-free) potential at abscissa `x`.
#[inline]
pub fn primary_potential_at(params: &MaterialParameters, x: f64) -> f64 {
    -params.e0 * x
}

/// Total, primary and secondary potential at every sample point.
pub fn potential(
    samples: &SampleSet,
    params: &MaterialParameters,
) -> Result<FieldComponents<ScalarField>, ModelError> {
    params.validate()?;
    let regions = classify_regions(samples, params.radius)?;

    let total = Zip::from(samples.rows())
        .and(&regions)
        .par_map_collect(|p, &region| {
            total_potential(params, p[0], radial_distance(p[0], p[1], p[2]), region)
        });
    let primary = samples.column(0).mapv(|x| primary_potential_at(params, x));
    let secondary = &total - &primary;

    Ok(FieldComponents { total, primary, secondary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn reference_params() -> MaterialParameters {
        MaterialParameters::new(10.0, 100.0, 50.0, 1.0).unwrap()
    }

    #[test]
    fn test_exterior_reference_point() {
        let v = potential(&array![[100.0, 0.0, 0.0]], &reference_params()).unwrap();
        assert_relative_eq!(v.total[0], -90.625, epsilon = 1e-12);
        assert_relative_eq!(v.primary[0], -100.0, epsilon = 1e-12);
        assert_relative_eq!(v.secondary[0], 9.375, epsilon = 1e-12);
    }

    #[test]
    fn test_interior_potential_is_scaled_primary() {
        let params = reference_params();
        let v = potential(&array![[10.0, 20.0, -5.0], [-30.0, 0.0, 0.0]], &params).unwrap();
        assert_relative_eq!(v.total[0], -10.0 * 0.25, epsilon = 1e-12);
        assert_relative_eq!(v.total[1], 30.0 * 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_potential_vanishes_on_symmetry_plane() {
        let v = potential(&array![[0.0, 80.0, 10.0], [0.0, 0.0, 0.0]], &reference_params()).unwrap();
        assert_eq!(v.total.to_vec(), vec![0.0, 0.0]);
        assert_eq!(v.secondary.to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_point_and_array_evaluation_agree() {
        let params = reference_params();
        let samples = array![[60.0, -20.0, 5.0], [12.0, 3.0, 4.0]];
        let v = potential(&samples, &params).unwrap();
        for (i, row) in samples.rows().into_iter().enumerate() {
            assert_eq!(v.total[i], total_potential_at(&params, row[0], row[1], row[2]));
        }
    }
}
