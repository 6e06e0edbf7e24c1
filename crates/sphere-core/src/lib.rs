//! # Sphere Core
//!
//! Closed-form DC response of a homogeneous conducting sphere buried in a
//! uniform background and excited by a uniform electric field (Wait's sphere
//! problem). Every quantity is evaluated pointwise over a sample set; there
//! is no discretisation and no linear solve.
//!
//! ## Conventions
//!
//! The sphere of radius $R$ is centred on the origin, the inducing field
//! $E_0$ points along +x, and all quantities are SI. Each field is returned as
//! total, primary (sphere absent) and secondary parts.
//!
//! ## Modules
//!
//! - [`types`] — Parameters, sample sets and field containers.
//! - [`region`] — Inside/outside classification and the interface band.
//! - [`conductivity`] — Piecewise-constant conductivity.
//! - [`potential`] — Electric potential.
//! - [`fields`] — Electric field.
//! - [`current`] — Current density.
//! - [`charge`] — Interface charge density.
//! - [`survey`] — Dipole-dipole potential differences along a profile.
//! - [`model`] — All of the above in one call.

pub mod charge;
pub mod conductivity;
pub mod constants;
pub mod current;
pub mod error;
pub mod fields;
pub mod model;
pub mod potential;
pub mod region;
pub mod survey;
pub mod types;

pub use error::ModelError;
pub use model::{evaluate_model, ModelFields};
pub use types::{
    contrast_factor, FieldComponents, MaterialParameters, SamplePoint, SampleSet, ScalarField,
    VectorField,
};
