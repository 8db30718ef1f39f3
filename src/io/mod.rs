//! I/O layer: image decoding (`loader`), JSON job manifests (`manifest`),
//! and `writers` for PNG output.
pub mod loader;
pub use loader::load_rgba;

pub mod manifest;
pub use manifest::{Manifest, ManifestJob, load_manifest};

pub mod writers;
pub use writers::png::write_rgba_png;
