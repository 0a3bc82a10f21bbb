use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use glyph_bounds::LayoutWidth;
use glyph_bounds_tool::cli::{
    font::{open_font, FontSources},
    measure::{measure, Measurement, Request},
    opt::{BatchScript, Job},
    render::render,
    report::print_measurement,
};
use log::{info, LevelFilter};
use ttf_oracle::{FontRegistry, TtfOracle};

#[derive(Parser, Debug)]
/// Run a batch script
pub struct RunOpts {
    /// A batch script (RON)
    file: PathBuf,

    /// Pixels per point for PNG output
    #[clap(long, default_value_t = 4.0)]
    scale: f32,
}

fn run_job(oracle: &TtfOracle, job: &Job, scale: f32) -> eyre::Result<Measurement> {
    let font = open_font(oracle, &job.font, job.size)?;
    let mut request = Request::new(&job.text, job.tracking);
    request.width = LayoutWidth::from(job.width);
    if job.auto_extremes {
        request = request.with_extremes(job.chars.as_deref());
    }
    let m = measure(oracle, &font, &job.font, job.size, &request)?;
    print_measurement(&m);
    if let Some(png) = &job.png {
        if let Some(parent) = png.parent() {
            std::fs::create_dir_all(parent)?;
        }
        render(oracle, &font, &m, scale, png)?;
    }
    Ok(m)
}

pub fn run(script: &BatchScript, opt: &RunOpts) -> eyre::Result<()> {
    let mut registry = FontRegistry::new();
    FontSources {
        dirs: &script.font_dirs,
        files: &script.font_files,
        urls: &script.font_urls,
        system: script.system_fonts,
    }
    .load(&mut registry)?;
    let oracle = TtfOracle::new(registry);

    let mut results = Vec::with_capacity(script.jobs.len());
    for (index, job) in script.jobs.iter().enumerate() {
        info!("Job {}: '{}' at {}pt", index, job.font, job.size);
        let m = run_job(&oracle, job, opt.scale)
            .wrap_err_with(|| format!("Job {} ('{}') failed", index, job.font))?;
        results.push(m);
    }

    if let Some(report) = &script.report {
        let text = ron::ser::to_string_pretty(&results, ron::ser::PrettyConfig::default())?;
        if let Some(parent) = report.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(report, text)
            .wrap_err_with(|| format!("Failed to write report `{}`", report.display()))?;
        info!("Wrote report to '{}'", report.display());
    }
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Info)
        .parse_env(glyph_bounds_tool::cli::LOG_ENV)
        .init();
    let opt = RunOpts::parse();

    let script = BatchScript::load(&opt.file)
        .wrap_err_with(|| format!("Failed to load batch script `{}`", opt.file.display()))?;
    run(&script, &opt)
}
