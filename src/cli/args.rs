use clap::Parser;
use std::path::PathBuf;

use spritekey::Preset;
use spritekey::{AlphaMode, BackgroundFill, MatteStrategy};

#[derive(Parser, Debug)]
#[command(name = "spritekey", version, about = "SPRITEKEY CLI")]
pub struct CliArgs {
    /// Input image (single file mode)
    pub input: Option<PathBuf>,

    /// Output PNG path; may equal the input (single file mode)
    pub output: Option<PathBuf>,

    /// JSON manifest of input/output jobs (batch mode)
    #[arg(long, conflicts_with_all = ["input", "output"])]
    pub manifest: Option<PathBuf>,

    /// Batch mode: process manifest jobs concurrently
    #[arg(long, default_value_t = false, requires = "manifest")]
    pub parallel: bool,

    /// Batch mode: stop at the first failing job instead of logging and moving on
    #[arg(long, default_value_t = false, requires = "manifest")]
    pub fail_fast: bool,

    /// Start from a named parameter set; explicit flags override it
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Background classification (conjunctive or disjunctive)
    #[arg(long, value_enum)]
    pub matte: Option<MatteStrategy>,

    /// Conjunctive matte: distance from white still keyed as background (0-255)
    #[arg(long)]
    pub tolerance: Option<u8>,

    /// Disjunctive matte: channel value below which a pixel is foreground (0-255)
    #[arg(long)]
    pub cutoff: Option<u8>,

    /// Foreground alpha handling (preserve or opaque)
    #[arg(long, value_enum)]
    pub alpha: Option<AlphaMode>,

    /// RGB written into keyed pixels (white or keep)
    #[arg(long, value_enum)]
    pub fill: Option<BackgroundFill>,

    /// Soften bright anti-aliased fringes with an alpha ramp
    #[arg(long, default_value_t = false)]
    pub feather: bool,

    /// Do not crop to the non-transparent bounding box
    #[arg(long, default_value_t = false)]
    pub no_crop: bool,

    /// Fit the long side to this many pixels, preserving aspect ratio
    #[arg(long, conflicts_with = "size")]
    pub max_size: Option<u32>,

    /// Allow --max-size to enlarge images that already fit
    #[arg(long, default_value_t = false, requires = "max_size")]
    pub upscale: bool,

    /// Exact output size as WIDTHxHEIGHT (e.g. 640x640); aspect ratio may change
    #[arg(long)]
    pub size: Option<String>,

    /// Resize before matting instead of after cropping
    #[arg(long, default_value_t = false)]
    pub resize_first: bool,

    /// Align the result to LEFT,TOP,RIGHT,BOTTOM on a transparent canvas
    #[arg(long)]
    pub reference_box: Option<String>,

    /// Canvas size as WIDTHxHEIGHT for --reference-box or a preset's box (default 640x640)
    #[arg(long)]
    pub canvas: Option<String>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
