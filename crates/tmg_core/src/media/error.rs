//! Error types for format tables and media jobs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors reading or interpreting the format CSV.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The CSV file could not be opened.
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV is malformed (unbalanced quotes, ragged rows, bad UTF-8).
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The file has no header row.
    #[error("CSV has no header row")]
    Empty,

    /// A required column is absent.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
}

/// Errors running one media job.
#[derive(Error, Debug)]
pub enum JobError {
    /// The ffmpeg process could not be started.
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// ffmpeg exited unsuccessfully. `stderr` is its captured diagnostic output.
    #[error("ffmpeg failed creating {file_name} (exit code {exit_code}):\n{stderr}")]
    Execution {
        file_name: String,
        exit_code: i32,
        stderr: String,
    },
}

impl JobError {
    /// Captured diagnostic text, if the process ran.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            JobError::Execution { stderr, .. } => Some(stderr),
            JobError::Spawn { .. } => None,
        }
    }
}
