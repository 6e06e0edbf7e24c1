//! One-call evaluation of every field over a sample set.

use crate::charge::charge_density;
use crate::conductivity::conductivity;
use crate::current::current_density;
use crate::error::ModelError;
use crate::fields::electric_field;
use crate::potential::potential;
use crate::types::{FieldComponents, MaterialParameters, SampleSet, ScalarField, VectorField};

/// Every quantity of the sphere model, index-aligned with the sample set.
#[derive(Debug, Clone)]
pub struct ModelFields {
    /// Conductivity (S/m).
    pub conductivity: ScalarField,
    /// Potential (V).
    pub potential: FieldComponents<ScalarField>,
    /// Electric field (V/m).
    pub electric_field: FieldComponents<VectorField>,
    /// Current density (A/m²).
    pub current_density: FieldComponents<VectorField>,
    /// Interface charge density (C/m³).
    pub charge_density: ScalarField,
}

impl ModelFields {
    /// Number of sample points the fields were evaluated on.
    pub fn len(&self) -> usize {
        self.conductivity.len()
    }

    /// True for an empty sample set.
    pub fn is_empty(&self) -> bool {
        self.conductivity.is_empty()
    }
}

/// Evaluate conductivity, potential, electric field, current density and
/// interface charge at every point of `samples`.
///
/// `dx` is the sampling step used as the width of the interface band.
pub fn evaluate_model(
    params: &MaterialParameters,
    samples: &SampleSet,
    dx: f64,
) -> Result<ModelFields, ModelError> {
    params.validate()?;
    log::debug!(
        "evaluating sphere model on {} samples (R = {}, k = {:.4})",
        samples.nrows(),
        params.radius,
        params.contrast_factor()
    );

    let conductivity = conductivity(samples, params)?;
    let potential = potential(samples, params)?;
    let electric_field = electric_field(samples, params)?;
    let current_density = current_density(samples, params, &electric_field)?;
    let charge_density = charge_density(samples, params, &electric_field, dx)?;

    Ok(ModelFields {
        conductivity,
        potential,
        electric_field,
        current_density,
        charge_density,
    })
}
