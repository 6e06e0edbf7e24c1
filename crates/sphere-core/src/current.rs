//! Current density from Ohm's law, $\mathbf{J} = \sigma \mathbf{E}$.
//!
//! The primary current always sees the background conductivity, while the
//! total current uses the conductivity of the region the point lies in. The
//! secondary current is therefore defined per region rather than as
//! `total - primary`:
//!
//! | Region     | $\mathbf{J}_t$          | $\mathbf{J}_s$                                     |
//! |------------|-------------------------|----------------------------------------------------|
//! | Background | $\sigma_0\mathbf{E}_t$  | $\sigma_0(\mathbf{E}_t - \mathbf{E}_p)$            |
//! | Sphere     | $\sigma_1\mathbf{E}_t$  | $\sigma_1\mathbf{E}_t - \sigma_0\mathbf{E}_p$      |

use ndarray::Zip;

use crate::error::ModelError;
use crate::region::{check_vector_field, classify_regions, Region};
use crate::types::{FieldComponents, MaterialParameters, SampleSet, VectorField};

/// Total, primary and secondary current density at every sample point.
///
/// `field` must be the electric field evaluated over the same `samples`;
/// only its total and primary parts are read.
pub fn current_density(
    samples: &SampleSet,
    params: &MaterialParameters,
    field: &FieldComponents<VectorField>,
) -> Result<FieldComponents<VectorField>, ModelError> {
    params.validate()?;
    let regions = classify_regions(samples, params.radius)?;
    check_vector_field("total electric field", &field.total, samples)?;
    check_vector_field("primary electric field", &field.primary, samples)?;

    let (sig0, sig1) = (params.sig0, params.sig1);
    let n = samples.nrows();
    let primary = &field.primary * sig0;
    let mut total = VectorField::zeros((n, 3));
    let mut secondary = VectorField::zeros((n, 3));

    Zip::from(total.rows_mut())
        .and(secondary.rows_mut())
        .and(field.total.rows())
        .and(field.primary.rows())
        .and(&regions)
        .par_for_each(|mut jt, mut js, et, ep, &region| match region {
            Region::Background => {
                for c in 0..3 {
                    jt[c] = sig0 * et[c];
                    js[c] = sig0 * (et[c] - ep[c]);
                }
            }
            Region::Sphere => {
                for c in 0..3 {
                    jt[c] = sig1 * et[c];
                    js[c] = sig1 * et[c] - sig0 * ep[c];
                }
            }
        });

    Ok(FieldComponents { total, primary, secondary })
}
