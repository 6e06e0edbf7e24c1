//! Physical constants.

/// Vacuum permittivity ε₀ in farads per metre (CODATA 2018).
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;
