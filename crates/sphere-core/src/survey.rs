//! Synthetic dipole-dipole survey over the sphere.
//!
//! A straight profile from `start` to `end` carries `count` evenly spaced
//! measurement midpoints. Each midpoint is straddled by a potential-electrode
//! pair M, N separated by `spacing` (the MN distance) along the profile:
//!
//! ```text
//!   start                                                        end
//!     *------M--+--N---------M--+--N---------M--+--N--------------*
//!               mp₀            mp₁            mp₂
//! ```
//!
//! The reading at each dipole is the potential difference $V(M) - V(N)$ on
//! the plane $z = 0$, reported both raw and divided by the MN spacing.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sphere_geometry::linspace;

use crate::error::ModelError;
use crate::potential::{primary_potential_at, total_potential_at};
use crate::types::MaterialParameters;

/// Potential electrodes of one dipole, positions (x, y) in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectrodePair {
    /// Electrode before the midpoint along the profile.
    pub m: [f64; 2],
    /// Electrode after the midpoint along the profile.
    pub n: [f64; 2],
}

/// Dipole layout along a straight profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DipoleArray {
    /// Profile start (x, y).
    pub start: [f64; 2],
    /// Profile end (x, y).
    pub end: [f64; 2],
    /// MN electrode spacing (m).
    pub spacing: f64,
    /// Dipole midpoints, in profile order.
    pub midpoints: Vec<[f64; 2]>,
    /// Electrode pair for each midpoint.
    pub electrodes: Vec<ElectrodePair>,
}

impl DipoleArray {
    /// Lay out `count` dipoles from `start` to `end`, both ends included.
    ///
    /// A single dipole sits at the middle of the profile. The spacing may be
    /// negative, which swaps M and N, but not zero.
    pub fn along_profile(
        start: [f64; 2],
        end: [f64; 2],
        count: usize,
        spacing: f64,
    ) -> Result<Self, ModelError> {
        if count < 1 {
            return Err(ModelError::InvalidSurvey(
                "at least one dipole is required".into(),
            ));
        }
        if !spacing.is_finite() || spacing == 0.0 {
            return Err(ModelError::InvalidSurvey(format!(
                "MN spacing must be finite and non-zero, got {spacing}"
            )));
        }
        let (dx, dy) = (end[0] - start[0], end[1] - start[1]);
        let length = (dx * dx + dy * dy).sqrt();
        if !(length.is_finite() && length > 0.0) {
            return Err(ModelError::InvalidSurvey(format!(
                "profile from {start:?} to {end:?} has no direction"
            )));
        }
        let direction = [dx / length, dy / length];

        let midpoints: Vec<[f64; 2]> = if count == 1 {
            vec![[(start[0] + end[0]) / 2.0, (start[1] + end[1]) / 2.0]]
        } else {
            linspace(start[0], end[0], count)
                .into_iter()
                .zip(linspace(start[1], end[1], count))
                .map(|(x, y)| [x, y])
                .collect()
        };

        let half = spacing / 2.0;
        let electrodes = midpoints
            .iter()
            .map(|mp| ElectrodePair {
                m: [mp[0] - direction[0] * half, mp[1] - direction[1] * half],
                n: [mp[0] + direction[0] * half, mp[1] + direction[1] * half],
            })
            .collect();

        log::debug!(
            "dipole array: {} dipoles over {:.3} m, MN = {}",
            count,
            length,
            spacing
        );

        Ok(Self { start, end, spacing, midpoints, electrodes })
    }

    /// Number of dipoles.
    pub fn len(&self) -> usize {
        self.midpoints.len()
    }

    /// True when the array holds no dipoles (never for a constructed array).
    pub fn is_empty(&self) -> bool {
        self.midpoints.is_empty()
    }

    /// Check the invariants of an array that was deserialised or assembled
    /// by hand rather than laid out by [`along_profile`](Self::along_profile).
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.spacing.is_finite() || self.spacing == 0.0 {
            return Err(ModelError::InvalidSurvey(format!(
                "MN spacing must be finite and non-zero, got {}",
                self.spacing
            )));
        }
        if self.electrodes.is_empty() {
            return Err(ModelError::InvalidSurvey(
                "at least one dipole is required".into(),
            ));
        }
        if self.midpoints.len() != self.electrodes.len() {
            return Err(ModelError::InvalidSurvey(format!(
                "{} midpoints but {} electrode pairs",
                self.midpoints.len(),
                self.electrodes.len()
            )));
        }
        Ok(())
    }
}

/// Potential differences measured by a dipole array.
///
/// Each vector has one entry per dipole, in profile order. `*_normalised`
/// values are the differences divided by the MN spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub array: DipoleArray,
    pub total: Vec<f64>,
    pub total_normalised: Vec<f64>,
    pub secondary: Vec<f64>,
    pub secondary_normalised: Vec<f64>,
    pub primary: Vec<f64>,
    pub primary_normalised: Vec<f64>,
}

/// Evaluate the potential differences of every dipole in `array`.
pub fn survey_response(
    params: &MaterialParameters,
    array: &DipoleArray,
) -> Result<SurveyResponse, ModelError> {
    params.validate()?;
    array.validate()?;

    // (total, secondary, primary) difference per dipole
    let readings: Vec<[f64; 3]> = array
        .electrodes
        .par_iter()
        .map(|pair| {
            let vt_m = total_potential_at(params, pair.m[0], pair.m[1], 0.0);
            let vt_n = total_potential_at(params, pair.n[0], pair.n[1], 0.0);
            let vs_m = vt_m + params.e0 * pair.m[0];
            let vs_n = vt_n + params.e0 * pair.n[0];
            let vp_m = primary_potential_at(params, pair.m[0]);
            let vp_n = primary_potential_at(params, pair.n[0]);
            [vt_m - vt_n, vs_m - vs_n, vp_m - vp_n]
        })
        .collect();

    let column = |i: usize| readings.iter().map(|r| r[i]).collect::<Vec<f64>>();
    let normalise = |v: &[f64]| v.iter().map(|d| d / array.spacing).collect::<Vec<f64>>();

    let total = column(0);
    let secondary = column(1);
    let primary = column(2);

    Ok(SurveyResponse {
        array: array.clone(),
        total_normalised: normalise(&total),
        secondary_normalised: normalise(&secondary),
        primary_normalised: normalise(&primary),
        total,
        secondary,
        primary,
    })
}

/// Lay out a dipole-dipole array and evaluate it in one step.
pub fn dipole_dipole_response(
    params: &MaterialParameters,
    start: [f64; 2],
    end: [f64; 2],
    count: usize,
    spacing: f64,
) -> Result<SurveyResponse, ModelError> {
    params.validate()?;
    let array = DipoleArray::along_profile(start, end, count, spacing)?;
    survey_response(params, &array)
}
