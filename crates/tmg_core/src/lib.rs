//! TMG Core - Backend logic for Test Media Generator
//!
//! This crate contains all business logic with zero UI dependencies.
//! It is used by both the command-line driver and the desktop GUI.
//!
//! Layout, leaf-first:
//! - [`tools`]: locate or install `ffmpeg` and the overlay font
//! - [`command`]: ordered ffmpeg argument builder
//! - [`media`]: CSV format rows and the per-row media job
//! - [`batch`]: sequential batch driver over a format table

pub mod batch;
pub mod command;
pub mod config;
pub mod logging;
pub mod media;
pub mod tools;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
