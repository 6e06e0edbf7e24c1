//! # Sphere Geometry
//!
//! Sampling geometry for the conducting-sphere forward model. This crate
//! provides:
//!
//! - **Sample grids** ([`grid`]) — Regular planar grids of observation points,
//!   flattened into the `N × 3` sample sets consumed by `sphere-core`.
//! - **Profiles** ([`grid::linspace`]) — Inclusive linear spacing used for
//!   survey lines.

pub mod grid;

pub use grid::{linspace, GridError, SampleGrid, MAX_SAMPLES};
