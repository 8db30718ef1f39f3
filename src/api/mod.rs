//! High-level, ergonomic library API: process one image in memory, one file
//! to another, or a whole manifest of jobs. Prefer these entrypoints over the
//! low-level stage modules when integrating SPRITEKEY.
use std::path::{Path, PathBuf};

use image::RgbaImage;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::params::PipelineParams;
use crate::core::processing::pipeline::process_rgba_pipeline;
use crate::error::Result;
use crate::io::loader::load_rgba;
use crate::io::manifest::{Manifest, ManifestJob};
use crate::io::writers::png::write_rgba_png;

/// Run the full pipeline on an already decoded image (no disk I/O)
pub fn process_image(img: RgbaImage, params: &PipelineParams) -> Result<RgbaImage> {
    process_rgba_pipeline(img, params)
}

/// Load `input`, run the pipeline and write `output` as PNG.
///
/// Nothing is written unless every stage succeeds; `output` may equal `input`.
pub fn process_file(input: &Path, output: &Path, params: &PipelineParams) -> Result<()> {
    params.validate()?;
    let img = load_rgba(input)?;
    let processed = process_rgba_pipeline(img, params)?;
    write_rgba_png(output, &processed)
}

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Log and record failures instead of stopping at the first one
    pub continue_on_error: bool,
    /// Process jobs concurrently with rayon
    pub parallel: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            continue_on_error: true,
            parallel: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobFailure {
    pub input: PathBuf,
    pub output: PathBuf,
    pub message: String,
}

/// Outcome of a manifest run, in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub errors: usize,
    pub failures: Vec<JobFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

fn run_job(job: &ManifestJob, defaults: &PipelineParams) -> Result<()> {
    info!("Processing: {:?} -> {:?}", job.input, job.output);
    let params = job.resolve_params(defaults);
    process_file(&job.input, &job.output, &params)
}

/// Process every job of `manifest`. Job parameters fall back to the
/// manifest's `defaults`, then to `fallback`.
///
/// With `continue_on_error` each failure is logged and recorded and the run
/// goes on. Without it the first failing job (in manifest order) is returned
/// as the error; in parallel mode later jobs may already have been written.
pub fn process_manifest(
    manifest: &Manifest,
    fallback: &PipelineParams,
    options: BatchOptions,
) -> Result<BatchReport> {
    let defaults = manifest.defaults.as_ref().unwrap_or(fallback);
    info!(
        "Starting batch of {} jobs (parallel={}, continue_on_error={})",
        manifest.jobs.len(),
        options.parallel,
        options.continue_on_error
    );

    let outcomes: Vec<Result<()>> = if options.parallel {
        manifest
            .jobs
            .par_iter()
            .map(|job| run_job(job, defaults))
            .collect()
    } else if options.continue_on_error {
        manifest
            .jobs
            .iter()
            .map(|job| run_job(job, defaults))
            .collect()
    } else {
        let mut outcomes = Vec::with_capacity(manifest.jobs.len());
        for job in &manifest.jobs {
            let outcome = run_job(job, defaults);
            let failed = outcome.is_err();
            outcomes.push(outcome);
            if failed {
                break;
            }
        }
        outcomes
    };

    let mut report = BatchReport::default();
    for (job, outcome) in manifest.jobs.iter().zip(outcomes) {
        match outcome {
            Ok(()) => {
                info!("Successfully processed: {:?}", job.input);
                report.processed += 1;
            }
            Err(e) => {
                warn!("Error processing {:?}: {}", job.input, e);
                if !options.continue_on_error {
                    return Err(e);
                }
                report.errors += 1;
                report.failures.push(JobFailure {
                    input: job.input.clone(),
                    output: job.output.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    info!("Batch processing complete!");
    info!("Processed: {}", report.processed);
    info!("Errors: {}", report.errors);
    Ok(report)
}
