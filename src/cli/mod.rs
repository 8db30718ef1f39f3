//! Command Line Interface (CLI) layer for SPRITEKEY.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-file and manifest
//! processing flows. It wires user-provided options to the underlying
//! library functionality exposed via `spritekey::api`.
//!
//! If you are embedding SPRITEKEY into another application, prefer using
//! the high-level `spritekey::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use errors::AppError;
pub use runner::run;
