//! Command-line argument definitions.

use std::path::{Path, PathBuf};

use clap::Parser;

/// Name of the CSV looked up beside the executable when none is given.
pub const DEFAULT_CSV_NAME: &str = "formats.csv";

#[derive(Parser, Debug)]
#[command(
    name = "tmg",
    version,
    about = "Test Media Generator: builds placeholder videos and images from a CSV",
    long_about = "Reads a CSV with Resolution, Content Type and Duration columns and \
                  generates one labelled black video or still image per row using ffmpeg. \
                  ffmpeg and the overlay font are downloaded on first use."
)]
pub struct Cli {
    /// Format CSV (defaults to formats.csv beside the executable)
    #[arg(value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// Directory generated files are written to (must already exist)
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Settings file, read only if it exists
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// CSV path, falling back to `formats.csv` in `exe_dir`.
    pub fn csv_path(&self, exe_dir: &Path) -> PathBuf {
        self.csv
            .clone()
            .unwrap_or_else(|| exe_dir.join(DEFAULT_CSV_NAME))
    }
}
