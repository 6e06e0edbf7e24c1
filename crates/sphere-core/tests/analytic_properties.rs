//! Integration tests: analytic properties of the sphere solution.
//!
//! - Secondary = total − primary for potential and field
//! - Uniform interior field
//! - Potential continuity across the interface
//! - No-contrast limit
//! - Reference points and the two-dipole survey
//! - Index alignment of a full grid evaluation

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::{array, Array2};

use sphere_core::fields::{electric_field, vector_amplitude};
use sphere_core::potential::{potential, total_potential_at};
use sphere_core::region::{classify_regions, radial_distance, Region};
use sphere_core::survey::{dipole_dipole_response, DipoleArray};
use sphere_core::{evaluate_model, MaterialParameters, ModelError};
use sphere_geometry::SampleGrid;

// ─────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────

fn reference_params() -> MaterialParameters {
    MaterialParameters::new(10.0, 100.0, 50.0, 1.0).unwrap()
}

fn reference_grid() -> (SampleGrid, Array2<f64>) {
    let grid = SampleGrid::centred(100.0, 5.0).unwrap();
    let points = grid.points();
    (grid, points)
}

// ─────────────────────────────────────────────────────────────
// Identities
// ─────────────────────────────────────────────────────────────

#[test]
fn test_secondary_potential_is_total_minus_primary() {
    let (_, samples) = reference_grid();
    let v = potential(&samples, &reference_params()).unwrap();
    for i in 0..samples.nrows() {
        assert_eq!(v.secondary[i], v.total[i] - v.primary[i]);
    }
}

#[test]
fn test_secondary_field_is_total_minus_primary() {
    let (_, samples) = reference_grid();
    let e = electric_field(&samples, &reference_params()).unwrap();
    assert_eq!(e.secondary, &e.total - &e.primary);
}

#[test]
fn test_interior_field_is_uniform() {
    let params = reference_params();
    let (_, samples) = reference_grid();
    let e = electric_field(&samples, &params).unwrap();
    let regions = classify_regions(&samples, params.radius).unwrap();

    let mut interior = 0;
    for (i, region) in regions.iter().enumerate() {
        if *region == Region::Sphere {
            interior += 1;
            assert_eq!(e.total[[i, 0]], 0.25);
            assert_eq!(e.total[[i, 1]], 0.0);
            assert_eq!(e.total[[i, 2]], 0.0);
        }
    }
    assert!(interior > 100, "expected many interior samples, got {interior}");
}

#[test]
fn test_potential_continuous_across_interface() {
    let params = reference_params();
    let r = params.radius;
    for eps in [1e-3, 1e-6, 1e-9] {
        let inside = total_potential_at(&params, r - eps, 0.0, 0.0);
        let outside = total_potential_at(&params, r + eps, 0.0, 0.0);
        assert_abs_diff_eq!(inside, outside, epsilon = 10.0 * eps);
    }
    // off-axis as well
    let (c, s) = (0.6, 0.8);
    let inside = total_potential_at(&params, (r - 1e-7) * c, (r - 1e-7) * s, 0.0);
    let outside = total_potential_at(&params, (r + 1e-7) * c, (r + 1e-7) * s, 0.0);
    assert_abs_diff_eq!(inside, outside, epsilon = 1e-5);
}

#[test]
fn test_radial_field_times_conductivity_is_continuous() {
    // Normal current density is conserved across the interface.
    let params = reference_params();
    let r = params.radius;
    let j_in = params.sig1 * sphere_core::fields::electric_field_at(&params, [r - 1e-9, 0.0, 0.0])[0];
    let j_out = params.sig0 * sphere_core::fields::electric_field_at(&params, [r + 1e-9, 0.0, 0.0])[0];
    assert_relative_eq!(j_in, j_out, max_relative = 1e-6);
}

#[test]
fn test_no_contrast_limit() {
    let params = MaterialParameters::new(7.0, 7.0, 30.0, 2.0).unwrap();
    let (grid, samples) = reference_grid();
    let fields = evaluate_model(&params, &samples, grid.spacing).unwrap();

    assert_eq!(fields.electric_field.total, fields.electric_field.primary);
    assert!(fields.electric_field.secondary.iter().all(|&v| v == 0.0));
    assert!(fields.charge_density.iter().all(|&v| v == 0.0));
    assert!(fields.potential.secondary.iter().all(|&v| v.abs() < 1e-12));
}

// ─────────────────────────────────────────────────────────────
// Reference scenarios
// ─────────────────────────────────────────────────────────────

#[test]
fn test_reference_exterior_point() {
    let v = potential(&array![[100.0, 0.0, 0.0]], &reference_params()).unwrap();
    assert_relative_eq!(v.total[0], -90.625, epsilon = 1e-12);
    assert_relative_eq!(v.primary[0], -100.0, epsilon = 1e-12);
    assert_relative_eq!(v.secondary[0], 9.375, epsilon = 1e-12);
}

#[test]
fn test_reference_interior_point() {
    let e = electric_field(&array![[10.0, 0.0, 0.0]], &reference_params()).unwrap();
    assert_relative_eq!(e.total[[0, 0]], 0.25, epsilon = 1e-12);
    assert_eq!(e.total[[0, 1]], 0.0);
    assert_eq!(e.total[[0, 2]], 0.0);
    assert_relative_eq!(e.secondary[[0, 0]], -0.75, epsilon = 1e-12);
}

#[test]
fn test_reference_two_dipole_survey() {
    let response =
        dipole_dipole_response(&reference_params(), [0.0, 0.0], [100.0, 0.0], 2, 10.0).unwrap();

    assert_eq!(response.array.midpoints, vec![[0.0, 0.0], [100.0, 0.0]]);
    for (mp, pair) in response.array.midpoints.iter().zip(&response.array.electrodes) {
        assert_relative_eq!(pair.m[0], mp[0] - 5.0);
        assert_relative_eq!(pair.n[0], mp[0] + 5.0);
        assert_eq!(pair.m[1], 0.0);
        assert_eq!(pair.n[1], 0.0);
    }
    for i in 0..2 {
        assert_relative_eq!(response.total_normalised[i], response.total[i] / 10.0);
    }

    // Second dipole: both electrodes outside the sphere.
    let params = reference_params();
    let expected = total_potential_at(&params, 95.0, 0.0, 0.0) - total_potential_at(&params, 105.0, 0.0, 0.0);
    assert_relative_eq!(response.total[1], expected, epsilon = 1e-12);
    assert_relative_eq!(
        response.secondary[1],
        response.total[1] - response.primary[1],
        epsilon = 1e-12
    );
}

#[test]
fn test_survey_rejects_zero_spacing() {
    assert!(matches!(
        DipoleArray::along_profile([0.0, 0.0], [100.0, 0.0], 5, 0.0),
        Err(ModelError::InvalidSurvey(_))
    ));
}

// ─────────────────────────────────────────────────────────────
// Full grid
// ─────────────────────────────────────────────────────────────

#[test]
fn test_model_fields_are_index_aligned() {
    let params = reference_params();
    let (grid, samples) = reference_grid();
    let fields = evaluate_model(&params, &samples, grid.spacing).unwrap();
    let n = samples.nrows();

    assert_eq!(fields.len(), n);
    assert_eq!(fields.potential.total.len(), n);
    assert_eq!(fields.electric_field.total.dim(), (n, 3));
    assert_eq!(fields.current_density.secondary.dim(), (n, 3));
    assert_eq!(fields.charge_density.len(), n);

    for (i, p) in samples.rows().into_iter().enumerate() {
        let r = radial_distance(p[0], p[1], p[2]);
        let expected_sigma = if r > params.radius { params.sig0 } else { params.sig1 };
        assert_eq!(fields.conductivity[i], expected_sigma);
        assert_eq!(fields.potential.total[i], total_potential_at(&params, p[0], p[1], p[2]));
        if (r - params.radius).abs() >= grid.spacing / 2.0 {
            assert_eq!(fields.charge_density[i], 0.0);
        }
    }

    // Charge is positive on the +x side of the sphere and negative on the -x side.
    let max = fields.charge_density.iter().cloned().fold(f64::MIN, f64::max);
    let min = fields.charge_density.iter().cloned().fold(f64::MAX, f64::min);
    assert!(max > 0.0 && min < 0.0);
}

#[test]
fn test_field_amplitude_peaks_at_poles() {
    // For a conductive sphere the exterior field is strongest on the x axis at the surface.
    let params = reference_params();
    let samples = array![[50.001, 0.0, 0.0], [0.0, 50.001, 0.0], [150.0, 0.0, 0.0]];
    let e = electric_field(&samples, &params).unwrap();
    let amp = vector_amplitude(&e.total);
    assert!(amp[0] > amp[2]);
    assert!(amp[2] > amp[1]);
}
