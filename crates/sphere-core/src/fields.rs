//! Electric field of a conducting sphere in a uniform field.
//!
//! Outside the sphere the total field is the inducing field plus that of an
//! induced dipole:
//!
//! $$
//! \mathbf{E}_t = E_0\hat{\mathbf{x}} + \frac{E_0 k R^3}{r^5}
//! \left(2x^2 - y^2 - z^2,\; 3xy,\; 3xz\right), \qquad r > R
//! $$
//!
//! and inside it is uniform, $\mathbf{E}_t = \frac{3\sigma_0}{\sigma_1 + 2\sigma_0} E_0 \hat{\mathbf{x}}$.

use ndarray::Zip;

use crate::error::ModelError;
use crate::region::{classify_regions, radial_distance, Region};
use crate::types::{
    FieldComponents, MaterialParameters, SamplePoint, SampleSet, ScalarField, VectorField,
};

fn total_field(params: &MaterialParameters, p: SamplePoint, region: Region) -> [f64; 3] {
    let [x, y, z] = p;
    match region {
        Region::Background => {
            let r = radial_distance(x, y, z);
            let a = params.e0 * params.contrast_factor() * params.radius.powi(3) / r.powi(5);
            [
                params.e0 + a * (2.0 * x * x - y * y - z * z),
                3.0 * a * x * y,
                3.0 * a * x * z,
            ]
        }
        Region::Sphere => [params.interior_factor() * params.e0, 0.0, 0.0],
    }
}

/// Total electric field at a single point.
pub fn electric_field_at(params: &MaterialParameters, p: SamplePoint) -> [f64; 3] {
    let region = Region::classify(radial_distance(p[0], p[1], p[2]), params.radius);
    total_field(params, p, region)
}

/// Total, primary and secondary electric field at every sample point.
///
/// The primary field is $(E_0, 0, 0)$ everywhere and the secondary field is
/// `total - primary`.
pub fn electric_field(
    samples: &SampleSet,
    params: &MaterialParameters,
) -> Result<FieldComponents<VectorField>, ModelError> {
    params.validate()?;
    let regions = classify_regions(samples, params.radius)?;
    let n = samples.nrows();

    let mut total = VectorField::zeros((n, 3));
    Zip::from(total.rows_mut())
        .and(samples.rows())
        .and(&regions)
        .par_for_each(|mut e, p, &region| {
            let v = total_field(params, [p[0], p[1], p[2]], region);
            e[0] = v[0];
            e[1] = v[1];
            e[2] = v[2];
        });

    let mut primary = VectorField::zeros((n, 3));
    primary.column_mut(0).fill(params.e0);
    let secondary = &total - &primary;

    Ok(FieldComponents { total, primary, secondary })
}

/// Euclidean norm of each row of a vector field.
pub fn vector_amplitude(field: &VectorField) -> ScalarField {
    Zip::from(field.rows()).par_map_collect(|v| v.dot(&v).sqrt())
}
