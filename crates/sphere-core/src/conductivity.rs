//! Piecewise-constant conductivity model.

use ndarray::Zip;

use crate::error::ModelError;
use crate::region::classify_regions;
use crate::types::{MaterialParameters, SampleSet, ScalarField};

/// Conductivity at every sample point: σ₀ outside the sphere, σ₁ inside.
///
/// The step at `r = R` is kept sharp; the boundary itself takes σ₁.
pub fn conductivity(samples: &SampleSet, params: &MaterialParameters) -> Result<ScalarField, ModelError> {
    params.validate()?;
    let regions = classify_regions(samples, params.radius)?;
    Ok(Zip::from(&regions).par_map_collect(|&region| params.conductivity_of(region)))
}
