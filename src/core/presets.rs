//! Named parameter sets for the asset jobs this tool was built around.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::params::{EdgeFeather, MatteParams, PipelineParams};
use crate::types::{BackgroundFill, BoundingBox, ReferenceBoxSpec, ResizePolicy};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Key near-white to transparent in place; no crop or resize
    Cutout,
    /// Key light pixels (every channel > 200), crop, fit to 400px
    Clean,
    /// Disjunctive key at 225 keeping RGB, crop, shrink to at most 500px
    CleanV2,
    /// Resize to 640x640 first, then key with tolerance 40
    Cover,
    /// Light key with a soft alpha ramp on bright fringes
    Soft,
    /// Crop and align to the ledger slot (60, 9, 580, 632) on a 640x640 canvas
    Ledger,
    /// Crop and align to the lamp slot (88, 34, 552, 596) on a 640x640 canvas
    Lamp,
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preset::Cutout => write!(f, "cutout"),
            Preset::Clean => write!(f, "clean"),
            Preset::CleanV2 => write!(f, "clean-v2"),
            Preset::Cover => write!(f, "cover"),
            Preset::Soft => write!(f, "soft"),
            Preset::Ledger => write!(f, "ledger"),
            Preset::Lamp => write!(f, "lamp"),
        }
    }
}

fn aligned(left: u32, top: u32, right: u32, bottom: u32) -> PipelineParams {
    PipelineParams {
        matte: MatteParams::conjunctive(50),
        canvas: BoundingBox::new(left, top, right, bottom).map(ReferenceBoxSpec::new),
        ..PipelineParams::default()
    }
}

impl Preset {
    pub fn params(self) -> PipelineParams {
        match self {
            Preset::Cutout => PipelineParams {
                matte: MatteParams::conjunctive(30),
                crop: false,
                ..PipelineParams::default()
            },
            Preset::Clean => PipelineParams {
                // "> 200" on every channel
                matte: MatteParams::conjunctive(54),
                resize: ResizePolicy::Fit {
                    max_size: 400,
                    allow_upscale: true,
                },
                ..PipelineParams::default()
            },
            Preset::CleanV2 => PipelineParams {
                matte: MatteParams::disjunctive(225),
                fill: BackgroundFill::Keep,
                resize: ResizePolicy::Fit {
                    max_size: 500,
                    allow_upscale: false,
                },
                ..PipelineParams::default()
            },
            Preset::Cover => PipelineParams {
                matte: MatteParams::conjunctive(40),
                crop: false,
                resize_first: true,
                resize: ResizePolicy::Exact {
                    width: 640,
                    height: 640,
                },
                ..PipelineParams::default()
            },
            Preset::Soft => PipelineParams {
                // "> 235" on every channel
                matte: MatteParams::conjunctive(19),
                fill: BackgroundFill::Keep,
                feather: Some(EdgeFeather::default()),
                crop: false,
                ..PipelineParams::default()
            },
            Preset::Ledger => aligned(60, 9, 580, 632),
            Preset::Lamp => aligned(88, 34, 552, 596),
        }
    }
}
