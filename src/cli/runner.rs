use std::path::PathBuf;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use spritekey::io::load_manifest;
use spritekey::{
    BatchOptions, BoundingBox, EdgeFeather, PipelineParams, ReferenceBoxSpec, ResizePolicy,
    process_file, process_manifest,
};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    // A subscriber may already be installed when embedded or under test
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

pub(crate) fn parse_dimensions(value: &str) -> Result<(u32, u32), AppError> {
    let invalid = || AppError::InvalidSize {
        size: value.to_string(),
    };
    let (w, h) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;
    let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = h.trim().parse::<u32>().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

pub(crate) fn parse_box(value: &str) -> Result<BoundingBox, AppError> {
    let invalid = || AppError::InvalidBox {
        value: value.to_string(),
    };
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        &[left, top, right, bottom] => {
            BoundingBox::new(left, top, right, bottom).ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

/// Preset (or defaults) overlaid with every explicitly given flag.
pub(crate) fn build_params(args: &CliArgs) -> Result<PipelineParams, AppError> {
    let mut params = args
        .preset
        .map(|preset| preset.params())
        .unwrap_or_default();

    if let Some(strategy) = args.matte {
        params.matte.strategy = strategy;
    }
    if let Some(tolerance) = args.tolerance {
        params.matte.tolerance = tolerance;
    }
    if let Some(cutoff) = args.cutoff {
        params.matte.cutoff = cutoff;
    }
    if let Some(alpha) = args.alpha {
        params.alpha = alpha;
    }
    if let Some(fill) = args.fill {
        params.fill = fill;
    }
    if args.feather {
        params.feather = Some(EdgeFeather::default());
    }
    if args.no_crop {
        params.crop = false;
    }
    if args.resize_first {
        params.resize_first = true;
    }

    if let Some(max_size) = args.max_size {
        params.resize = ResizePolicy::Fit {
            max_size,
            allow_upscale: args.upscale,
        };
    }
    if let Some(size) = &args.size {
        let (width, height) = parse_dimensions(size)?;
        params.resize = ResizePolicy::Exact { width, height };
    }

    if let Some(value) = &args.reference_box {
        params.canvas = Some(ReferenceBoxSpec::new(parse_box(value)?));
        // An explicit box replaces any resize the preset carried
        if args.max_size.is_none() && args.size.is_none() {
            params.resize = ResizePolicy::None;
        }
    }
    if let Some(canvas) = &args.canvas {
        let (width, height) = parse_dimensions(canvas)?;
        let spec = params.canvas.ok_or(AppError::MissingArgument {
            arg: "--reference-box (or a preset with one) for --canvas".to_string(),
        })?;
        params.canvas = Some(spec.with_canvas(width, height));
    }

    params.validate()?;
    Ok(params)
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    init_logging(args.log);

    let params = build_params(&args)?;

    if let Some(manifest_path) = &args.manifest {
        let manifest = load_manifest(manifest_path)?;
        info!("Starting batch processing from manifest: {:?}", manifest_path);

        let options = BatchOptions {
            continue_on_error: !args.fail_fast,
            parallel: args.parallel,
        };
        let report = process_manifest(&manifest, &params, options)?;
        if !report.is_success() {
            warn!(
                "{} of {} jobs failed; no output was written for them",
                report.errors,
                manifest.jobs.len()
            );
        }
    } else {
        let input: PathBuf = args.input.ok_or(AppError::MissingArgument {
            arg: "<INPUT>".to_string(),
        })?;
        let output: PathBuf = args.output.ok_or(AppError::MissingArgument {
            arg: "<OUTPUT>".to_string(),
        })?;

        if let Err(e) = process_file(&input, &output, &params) {
            error!("Error processing {:?}: {}", input, e);
            return Err(e.into());
        }
        info!("Successfully processed: {:?} -> {:?}", input, output);
    }

    Ok(())
}
