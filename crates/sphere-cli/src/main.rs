//! Command-line driver for the conducting-sphere forward model.
//!
//! Run jobs from TOML configuration files:
//! ```sh
//! sphere-cli run job.toml
//! sphere-cli validate job.toml
//! sphere-cli point --sig0 10 --sig1 100 --radius 50 --e0 1 100 0 0
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use sphere_core::MaterialParameters;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sphere-cli")]
#[command(about = "DC response of a conducting sphere in a uniform electric field")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the model on the grid (and survey) described by a TOML file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without evaluating the model.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Print potential, field and current density at a single point.
    Point {
        /// Background conductivity (S/m).
        #[arg(long)]
        sig0: f64,
        /// Sphere conductivity (S/m).
        #[arg(long)]
        sig1: f64,
        /// Sphere radius (m).
        #[arg(long)]
        radius: f64,
        /// Inducing field magnitude (V/m).
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        e0: f64,
        /// Observation point x (m).
        #[arg(allow_negative_numbers = true)]
        x: f64,
        /// Observation point y (m).
        #[arg(allow_negative_numbers = true)]
        y: f64,
        /// Observation point z (m).
        #[arg(allow_negative_numbers = true)]
        z: f64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Sphere forward model");
            println!("====================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());
            job.validate()?;

            let result = runner::run_job(&job)?;

            // Determine output directory
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            log::debug!("writing outputs to {}", out_dir.display());

            if job.output.save_fields {
                runner::write_fields_csv(&result, &out_dir.join("fields.csv"), &job)?;
            }

            if let Some(survey) = &result.survey {
                runner::write_survey_csv(survey, &out_dir.join("survey.csv"))?;
                if job.output.save_json {
                    runner::write_survey_json(survey, &out_dir.join("survey.json"))?;
                }
            }

            println!("Evaluation complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            job.validate()?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Point { sig0, sig1, radius, e0, x, y, z } => {
            let params = MaterialParameters::new(sig0, sig1, radius, e0)?;
            runner::print_point_report(&params, [x, y, z])
        }
    }
}
