//! JSON job manifests: lists of input/output pairs with optional per-job
//! parameters, replacing hardcoded path tables.
//!
//! ```json
//! {
//!   "defaults": { "matte": { "tolerance": 50 } },
//!   "jobs": [
//!     { "input": "raw/crate.png", "output": "assets/crate.png" },
//!     { "input": "raw/lamp.png", "output": "assets/lamp.png", "preset": "lamp" }
//!   ]
//! }
//! ```
//!
//! A bare array of jobs is accepted as well. Relative paths resolve against
//! the manifest's directory.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::params::PipelineParams;
use crate::core::presets::Preset;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestJob {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Full parameter set for this job; takes precedence over `preset`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<PipelineParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
}

impl ManifestJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            params: None,
            preset: None,
        }
    }

    /// Parameters for this job, falling back to `defaults`.
    pub fn resolve_params(&self, defaults: &PipelineParams) -> PipelineParams {
        match (&self.params, self.preset) {
            (Some(params), _) => params.clone(),
            (None, Some(preset)) => preset.params(),
            (None, None) => defaults.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<PipelineParams>,
    #[serde(default)]
    pub jobs: Vec<ManifestJob>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestFile {
    // Tried first: a derived struct would also accept a JSON array
    Jobs(Vec<ManifestJob>),
    Full(Manifest),
}

impl Manifest {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(match serde_json::from_str::<ManifestFile>(json)? {
            ManifestFile::Full(manifest) => manifest,
            ManifestFile::Jobs(jobs) => Manifest {
                defaults: None,
                jobs,
            },
        })
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for job in &mut self.jobs {
            if job.input.is_relative() {
                job.input = base.join(&job.input);
            }
            if job.output.is_relative() {
                job.output = base.join(&job.output);
            }
        }
    }
}

/// Read and parse a manifest file, resolving relative job paths against its directory.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    if !path.is_file() {
        return Err(Error::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let json = fs::read_to_string(path)?;
    let mut manifest = Manifest::from_json(&json).map_err(|source| Error::Manifest {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(base) = path.parent() {
        manifest.resolve_relative_to(base);
    }
    debug!("Loaded manifest {:?} with {} jobs", path, manifest.jobs.len());
    Ok(manifest)
}
