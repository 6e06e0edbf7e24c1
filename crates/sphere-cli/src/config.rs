//! TOML configuration deserialisation for forward-model jobs.
//!
//! ```toml
//! [model]
//! sig0 = 10.0
//! sig1 = 100.0
//! radius = 50.0
//! e0 = 1.0
//!
//! [grid]
//! half_width = 100.0
//! spacing = 2.0
//!
//! [survey]
//! start = [-100.0, 0.0]
//! end = [100.0, 0.0]
//! dipoles = 41
//! mn = 10.0
//! ```

use anyhow::Context;
use serde::Deserialize;
use sphere_core::survey::DipoleArray;
use sphere_core::MaterialParameters;
use sphere_geometry::SampleGrid;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub model: MaterialParameters,
    pub grid: GridSpec,
    #[serde(default)]
    pub survey: Option<SurveyConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Sampling plane: either explicit ranges or a square centred on the sphere.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GridSpec {
    Extent {
        x_range: [f64; 2],
        y_range: [f64; 2],
        spacing: f64,
        #[serde(default)]
        z: f64,
    },
    Centred {
        half_width: f64,
        spacing: f64,
        #[serde(default)]
        z: f64,
    },
}

impl GridSpec {
    /// Build the sample grid, checking spacing and ranges.
    pub fn build(&self) -> anyhow::Result<SampleGrid> {
        let grid = match *self {
            GridSpec::Extent { x_range, y_range, spacing, z } => {
                SampleGrid::new(x_range, y_range, spacing, z)
            }
            GridSpec::Centred { half_width, spacing, z } => {
                SampleGrid::new([-half_width, half_width], [-half_width, half_width], spacing, z)
            }
        };
        grid.context("Invalid [grid] section")
    }
}

/// Dipole-dipole profile.
#[derive(Debug, Deserialize)]
pub struct SurveyConfig {
    /// Profile start (x, y) in metres.
    pub start: [f64; 2],
    /// Profile end (x, y) in metres.
    pub end: [f64; 2],
    /// Number of dipoles along the profile.
    #[serde(default = "default_dipoles")]
    pub dipoles: usize,
    /// MN electrode spacing in metres.
    pub mn: f64,
}

impl SurveyConfig {
    /// Lay out the dipole array described by this section.
    pub fn build(&self) -> anyhow::Result<DipoleArray> {
        DipoleArray::along_profile(self.start, self.end, self.dipoles, self.mn)
            .context("Invalid [survey] section")
    }
}

fn default_dipoles() -> usize {
    21
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to write the sampled fields as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_fields: bool,
    /// Whether to also write the survey response as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_fields: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

impl JobConfig {
    /// Check the physical parameters, the grid and the survey layout.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.model.validate().context("Invalid [model] section")?;
        self.grid.build()?;
        if let Some(survey) = &self.survey {
            survey.build()?;
        }
        Ok(())
    }
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}
