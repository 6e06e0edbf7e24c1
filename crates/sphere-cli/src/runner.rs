//! Job runner: ties together the sample grid, the forward model and the survey.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use ndarray::{array, Array2};

use sphere_core::conductivity::conductivity;
use sphere_core::current::current_density;
use sphere_core::fields::{electric_field, vector_amplitude};
use sphere_core::potential::potential;
use sphere_core::survey::{survey_response, SurveyResponse};
use sphere_core::{evaluate_model, MaterialParameters, ModelFields};
use sphere_geometry::SampleGrid;

use crate::config::JobConfig;

/// Results from a job run.
pub struct JobOutput {
    pub grid: SampleGrid,
    pub samples: Array2<f64>,
    pub fields: ModelFields,
    pub survey: Option<SurveyResponse>,
}

/// Run a full job from a parsed configuration.
pub fn run_job(job: &JobConfig) -> Result<JobOutput> {
    let params = job.model;
    params.validate().context("Invalid [model] section")?;

    println!(
        "  Sphere: R={} m, sig0={} S/m, sig1={} S/m, E0={} V/m (k={:.4})",
        params.radius,
        params.sig0,
        params.sig1,
        params.e0,
        params.contrast_factor()
    );

    let grid = job.grid.build()?;
    let (nx, ny) = grid.dims();
    println!("  Grid: {}x{} samples, spacing={} m, z={} m", nx, ny, grid.spacing, grid.z);

    let samples = grid.points();
    let fields = evaluate_model(&params, &samples, grid.spacing)
        .context("Forward model evaluation failed")?;

    let survey = match &job.survey {
        Some(cfg) => {
            let array = cfg.build()?;
            println!(
                "  Survey: {} dipoles from {:?} to {:?}, MN={} m",
                array.len(),
                array.start,
                array.end,
                array.spacing
            );
            Some(survey_response(&params, &array)?)
        }
        None => None,
    };

    Ok(JobOutput { grid, samples, fields, survey })
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

/// Write every sampled field to a CSV file with a metadata header.
pub fn write_fields_csv(output: &JobOutput, path: &Path, job: &JobConfig) -> Result<()> {
    create_parent(path)?;
    let mut file = std::fs::File::create(path)?;

    let (nx, ny) = output.grid.dims();
    writeln!(file, "# Sphere forward model — sampled fields")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        file,
        "# sig0={} S/m, sig1={} S/m, radius={} m, e0={} V/m",
        job.model.sig0, job.model.sig1, job.model.radius, job.model.e0
    )?;
    writeln!(file, "# Grid: {}x{}, spacing={} m, z={} m", nx, ny, output.grid.spacing, output.grid.z)?;
    writeln!(file, "#")?;
    writeln!(
        file,
        "x_m,y_m,z_m,sigma_S_per_m,vt_V,vp_V,vs_V,\
         etx_V_per_m,ety_V_per_m,etz_V_per_m,et_amp,\
         esx_V_per_m,esy_V_per_m,esz_V_per_m,es_amp,\
         jtx_A_per_m2,jty_A_per_m2,jtz_A_per_m2,jt_amp,\
         jsx_A_per_m2,jsy_A_per_m2,jsz_A_per_m2,js_amp,rho_C_per_m3"
    )?;

    let f = &output.fields;
    let et_amp = vector_amplitude(&f.electric_field.total);
    let es_amp = vector_amplitude(&f.electric_field.secondary);
    let jt_amp = vector_amplitude(&f.current_density.total);
    let js_amp = vector_amplitude(&f.current_density.secondary);

    for (i, p) in output.samples.rows().into_iter().enumerate() {
        let et = f.electric_field.total.row(i);
        let es = f.electric_field.secondary.row(i);
        let jt = f.current_density.total.row(i);
        let js = f.current_density.secondary.row(i);
        writeln!(
            file,
            "{:.4},{:.4},{:.4},{:.6e},{:.6e},{:.6e},{:.6e},\
             {:.6e},{:.6e},{:.6e},{:.6e},\
             {:.6e},{:.6e},{:.6e},{:.6e},\
             {:.6e},{:.6e},{:.6e},{:.6e},\
             {:.6e},{:.6e},{:.6e},{:.6e},{:.6e}",
            p[0], p[1], p[2],
            f.conductivity[i],
            f.potential.total[i], f.potential.primary[i], f.potential.secondary[i],
            et[0], et[1], et[2], et_amp[i],
            es[0], es[1], es[2], es_amp[i],
            jt[0], jt[1], jt[2], jt_amp[i],
            js[0], js[1], js[2], js_amp[i],
            f.charge_density[i],
        )?;
    }

    println!("Fields written to: {}", path.display());
    Ok(())
}

/// Write a survey response to a CSV file, one row per dipole.
pub fn write_survey_csv(survey: &SurveyResponse, path: &Path) -> Result<()> {
    create_parent(path)?;
    let mut file = std::fs::File::create(path)?;

    let array = &survey.array;
    writeln!(file, "# Sphere forward model — dipole-dipole survey")?;
    writeln!(
        file,
        "# Profile: {:?} -> {:?}, {} dipoles, MN={} m",
        array.start,
        array.end,
        array.len(),
        array.spacing
    )?;
    writeln!(file, "#")?;
    writeln!(
        file,
        "mid_x_m,mid_y_m,m_x_m,m_y_m,n_x_m,n_y_m,\
         dvt_V,dvt_per_mn_V_per_m,dvs_V,dvs_per_mn_V_per_m,dvp_V,dvp_per_mn_V_per_m"
    )?;

    for (i, (mp, pair)) in array.midpoints.iter().zip(&array.electrodes).enumerate() {
        writeln!(
            file,
            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e}",
            mp[0], mp[1], pair.m[0], pair.m[1], pair.n[0], pair.n[1],
            survey.total[i], survey.total_normalised[i],
            survey.secondary[i], survey.secondary_normalised[i],
            survey.primary[i], survey.primary_normalised[i],
        )?;
    }

    println!("Survey written to: {}", path.display());
    Ok(())
}

/// Write a survey response to a JSON file.
pub fn write_survey_json(survey: &SurveyResponse, path: &Path) -> Result<()> {
    create_parent(path)?;
    let json = serde_json::to_string_pretty(survey)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Survey (JSON) written to: {}", path.display());
    Ok(())
}

/// Print every quantity of the model at a single point.
///
/// Interface charge is omitted: it is only defined relative to a sampling
/// step.
pub fn print_point_report(params: &MaterialParameters, point: [f64; 3]) -> Result<()> {
    let samples = array![[point[0], point[1], point[2]]];
    let sigma = conductivity(&samples, params)?;
    let v = potential(&samples, params)?;
    let e = electric_field(&samples, params)?;
    let j = current_density(&samples, params, &e)?;

    let fmt = |a: &Array2<f64>| format!("({:.6e}, {:.6e}, {:.6e})", a[[0, 0]], a[[0, 1]], a[[0, 2]]);

    println!("Point ({}, {}, {}) m, k = {:.6}", point[0], point[1], point[2], params.contrast_factor());
    println!("  sigma        {:.6e} S/m", sigma[0]);
    println!("  V  total     {:.6e} V", v.total[0]);
    println!("     primary   {:.6e} V", v.primary[0]);
    println!("     secondary {:.6e} V", v.secondary[0]);
    println!("  E  total     {} V/m", fmt(&e.total));
    println!("     primary   {} V/m", fmt(&e.primary));
    println!("     secondary {} V/m", fmt(&e.secondary));
    println!("  J  total     {} A/m²", fmt(&j.total));
    println!("     primary   {} A/m²", fmt(&j.primary));
    println!("     secondary {} A/m²", fmt(&j.secondary));
    Ok(())
}
