//! Pipeline stages in the order they run: matte generation, alpha keying,
//! bounding-box crop, Lanczos resize and canvas composition.
pub mod alpha;
pub mod canvas;
pub mod crop;
pub mod matte;
pub mod pipeline;
pub mod resize;
