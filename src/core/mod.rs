//! Core processing building blocks: pipeline parameters, named presets, and
//! the individual stages (matte, alpha, crop, resize, canvas). These are
//! internal primitives consumed by the high-level `api` module.
pub mod params;
pub mod presets;
pub mod processing;
