//! Shared types and enums used across SPRITEKEY.
//! Includes the matte strategy (`MatteStrategy`), alpha handling (`AlphaMode`,
//! `BackgroundFill`), resize policies (`ResizePolicy`) and the geometry types
//! (`BoundingBox`, `ReferenceBoxSpec`).
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How a pixel is classified as background.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatteStrategy {
    /// Background iff every channel is within `tolerance` of white.
    Conjunctive,
    /// Foreground iff any channel is darker than `cutoff`.
    Disjunctive,
}

impl std::fmt::Display for MatteStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatteStrategy::Conjunctive => write!(f, "Conjunctive"),
            MatteStrategy::Disjunctive => write!(f, "Disjunctive"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlphaMode {
    /// Foreground pixels keep their source alpha.
    Preserve,
    /// Foreground pixels become fully opaque.
    Opaque,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundFill {
    /// Keyed pixels become (255, 255, 255, 0).
    White,
    /// Keyed pixels keep their RGB, only alpha is cleared.
    Keep,
}

/// Resize policy applied after cropping (or before matting, see
/// `PipelineParams::resize_first`).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum ResizePolicy {
    None,
    /// Scale so the long side equals `max_size`, preserving aspect ratio.
    /// Without `allow_upscale`, images that already fit are left alone.
    Fit {
        max_size: u32,
        #[serde(default)]
        allow_upscale: bool,
    },
    /// Scale both axes independently to exactly `width` x `height`.
    Exact { width: u32, height: u32 },
}

impl std::fmt::Display for ResizePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizePolicy::None => write!(f, "None"),
            ResizePolicy::Fit {
                max_size,
                allow_upscale,
            } => {
                if *allow_upscale {
                    write!(f, "Fit({})", max_size)
                } else {
                    write!(f, "Fit({}, shrink only)", max_size)
                }
            }
            ResizePolicy::Exact { width, height } => write!(f, "Exact({}x{})", width, height),
        }
    }
}

/// Axis-aligned rectangle in pixel coordinates; `right` and `bottom` are exclusive.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    /// Returns `None` unless `left < right` and `top < bottom`.
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Option<Self> {
        (left < right && top < bottom).then_some(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right <= width && self.bottom <= height
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Placement contract for the canvas compositor: the foreground ends up
/// exactly covering `reference` on a transparent `canvas_width` x `canvas_height` canvas.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ReferenceBoxSpec {
    pub reference: BoundingBox,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl ReferenceBoxSpec {
    pub const DEFAULT_CANVAS: u32 = 640;

    pub fn new(reference: BoundingBox) -> Self {
        Self {
            reference,
            canvas_width: Self::DEFAULT_CANVAS,
            canvas_height: Self::DEFAULT_CANVAS,
        }
    }

    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Resize target derived from the reference box.
    pub fn target_policy(&self) -> ResizePolicy {
        ResizePolicy::Exact {
            width: self.reference.width(),
            height: self.reference.height(),
        }
    }
}
