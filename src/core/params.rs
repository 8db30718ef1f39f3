use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{AlphaMode, BackgroundFill, MatteStrategy, ReferenceBoxSpec, ResizePolicy};

/// Matte classification settings. Conjunctive keying reads `tolerance`,
/// disjunctive keying reads `cutoff`; the other value is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatteParams {
    pub strategy: MatteStrategy,
    /// Distance from pure white still treated as background (0..=255).
    pub tolerance: u8,
    /// Channel value below which a channel counts as "dark".
    pub cutoff: u8,
}

impl MatteParams {
    pub const DEFAULT_TOLERANCE: u8 = 30;
    pub const DEFAULT_CUTOFF: u8 = 225;

    pub fn conjunctive(tolerance: u8) -> Self {
        Self {
            strategy: MatteStrategy::Conjunctive,
            tolerance,
            ..Self::default()
        }
    }

    pub fn disjunctive(cutoff: u8) -> Self {
        Self {
            strategy: MatteStrategy::Disjunctive,
            cutoff,
            ..Self::default()
        }
    }
}

impl Default for MatteParams {
    fn default() -> Self {
        Self {
            strategy: MatteStrategy::Conjunctive,
            tolerance: Self::DEFAULT_TOLERANCE,
            cutoff: Self::DEFAULT_CUTOFF,
        }
    }
}

/// Alpha ramp for light anti-aliased fringe pixels that survive the matte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeFeather {
    /// Pixels with every channel above this value are feathered.
    pub floor: u8,
    /// Alpha lost per unit of mean brightness above `floor`.
    pub slope: u8,
}

impl Default for EdgeFeather {
    fn default() -> Self {
        Self {
            floor: 200,
            slope: 4,
        }
    }
}

/// Pipeline parameters suitable for manifests and presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub matte: MatteParams,
    pub alpha: AlphaMode,
    pub fill: BackgroundFill,
    pub feather: Option<EdgeFeather>,
    /// Crop to the non-transparent bounding box; an empty box aborts the file
    pub crop: bool,
    pub resize: ResizePolicy,
    /// Resize the decoded image before matting instead of after cropping
    pub resize_first: bool,
    /// Paste onto a transparent canvas at a reference box; implies an exact resize
    pub canvas: Option<ReferenceBoxSpec>,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            matte: MatteParams::default(),
            alpha: AlphaMode::Preserve,
            fill: BackgroundFill::White,
            feather: None,
            crop: true,
            resize: ResizePolicy::None,
            resize_first: false,
            canvas: None,
        }
    }
}

impl PipelineParams {
    /// Resize actually performed: the canvas reference box wins over `resize`.
    pub fn effective_resize(&self) -> ResizePolicy {
        match &self.canvas {
            Some(spec) => spec.target_policy(),
            None => self.resize,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.resize {
            ResizePolicy::Fit { max_size: 0, .. } => {
                return Err(Error::invalid("max_size", 0));
            }
            ResizePolicy::Exact { width, height } if width == 0 || height == 0 => {
                return Err(Error::invalid("size", format!("{}x{}", width, height)));
            }
            _ => {}
        }

        if let Some(spec) = &self.canvas {
            if spec.canvas_width == 0 || spec.canvas_height == 0 {
                return Err(Error::invalid(
                    "canvas",
                    format!("{}x{}", spec.canvas_width, spec.canvas_height),
                ));
            }
            if spec.reference.width() == 0 || spec.reference.height() == 0 {
                return Err(Error::invalid("reference_box", spec.reference));
            }
            if !spec
                .reference
                .fits_within(spec.canvas_width, spec.canvas_height)
            {
                return Err(Error::invalid(
                    "reference_box",
                    format!(
                        "{} outside {}x{} canvas",
                        spec.reference, spec.canvas_width, spec.canvas_height
                    ),
                ));
            }
            if self.resize != ResizePolicy::None && self.resize != spec.target_policy() {
                return Err(Error::invalid(
                    "resize",
                    format!("{} conflicts with reference box {}", self.resize, spec.reference),
                ));
            }
            if self.resize_first {
                return Err(Error::invalid(
                    "resize_first",
                    "cannot be combined with a canvas reference box",
                ));
            }
        }

        Ok(())
    }
}
