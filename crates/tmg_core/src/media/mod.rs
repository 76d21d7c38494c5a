//! Format rows and media jobs.
//!
//! A [`FormatTable`] is read from CSV; each [`FormatRow`] becomes a
//! [`MediaJob`] which builds one ffmpeg command and runs it through a
//! [`ProcessRunner`].

mod error;
mod job;
mod row;
mod runner;

pub use error::{FormatError, JobError};
pub use job::{escape_text, MediaJob, MediaKind};
pub use row::{
    FormatRow, FormatTable, COL_CONTENT_TYPE, COL_DURATION, COL_RESOLUTION, REQUIRED_COLUMNS,
};
pub use runner::{ProcessOutput, ProcessRunner, SystemRunner};

#[cfg(test)]
pub(crate) use runner::fake;

/// File names the table would produce, in row order.
pub fn preview_file_names(table: &FormatTable) -> Result<Vec<String>, FormatError> {
    table
        .rows()
        .iter()
        .map(|row| MediaJob::from_row(row).map(|job| job.file_name()))
        .collect()
}
