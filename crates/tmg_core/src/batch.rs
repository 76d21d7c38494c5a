//! Sequential batch driver.
//!
//! Runs every row of a [`FormatTable`] in file order and stops at the first
//! failure. Files generated before the failure are left in place.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::MediaSettings;
use crate::media::{FormatError, FormatTable, JobError, MediaJob, ProcessRunner};
use crate::tools::Toolchain;

/// Errors that end a batch.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The output directory is absent or not a directory.
    #[error("Output directory does not exist: {0}")]
    OutputDirMissing(PathBuf),

    /// A row is missing a required value.
    #[error("Row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: FormatError,
    },

    /// A row's job failed. `row` is 1-based.
    #[error("Row {row} ({file_name}) failed: {source}")]
    RowFailed {
        row: usize,
        file_name: String,
        #[source]
        source: JobError,
    },
}

/// Reported after each successful row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
    pub file_name: String,
}

/// Result of a completed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub generated: Vec<PathBuf>,
}

/// A configured batch run.
pub struct Batch<'a> {
    toolchain: &'a Toolchain,
    output_dir: &'a Path,
    settings: MediaSettings,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Batch<'a> {
    pub fn new(
        toolchain: &'a Toolchain,
        output_dir: &'a Path,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            toolchain,
            output_dir,
            settings: MediaSettings::default(),
            runner,
        }
    }

    pub fn with_settings(mut self, settings: MediaSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Check the output directory without creating it.
    pub fn check_output_dir(output_dir: &Path) -> Result<(), BatchError> {
        if output_dir.is_dir() {
            Ok(())
        } else {
            Err(BatchError::OutputDirMissing(output_dir.to_path_buf()))
        }
    }

    /// Run every row of `table`.
    pub fn run(
        &self,
        table: &FormatTable,
        on_progress: impl Fn(BatchProgress),
    ) -> Result<BatchSummary, BatchError> {
        Self::check_output_dir(self.output_dir)?;

        let total = table.len();
        tracing::info!(
            "Generating {} files into {}",
            total,
            self.output_dir.display()
        );

        let mut summary = BatchSummary::default();
        for (index, row) in table.rows().iter().enumerate() {
            let row_number = index + 1;
            let job = MediaJob::from_row(row).map_err(|e| BatchError::InvalidRow {
                row: row_number,
                source: e,
            })?;
            let file_name = job.file_name();

            let path = job
                .run(self.toolchain, self.output_dir, &self.settings, self.runner)
                .map_err(|e| BatchError::RowFailed {
                    row: row_number,
                    file_name: file_name.clone(),
                    source: e,
                })?;

            summary.generated.push(path);
            on_progress(BatchProgress {
                completed: row_number,
                total,
                file_name,
            });
        }

        tracing::info!("Generated {} files", summary.generated.len());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::fake::RecordingRunner;
    use crate::tools::FfmpegBinary;
    use std::sync::Mutex;
    use tempfile::tempdir;

    const CSV: &str = "Resolution,Content Type,Duration\n\
                       1280x720,Video,5\n\
                       640x480,Static,0\n\
                       320x240,Video,1\n";

    fn table() -> FormatTable {
        FormatTable::from_reader(CSV.as_bytes()).unwrap()
    }

    fn toolchain() -> Toolchain {
        Toolchain::new(FfmpegBinary::new("/opt/ffmpeg"), "/fonts/Ubuntu-Regular.ttf")
    }

    #[test]
    fn missing_output_dir_fails_before_any_row() {
        let parent = tempdir().unwrap();
        let missing = parent.path().join("not-there");
        let runner = RecordingRunner::default();
        let tools = toolchain();

        let err = Batch::new(&tools, &missing, &runner)
            .run(&table(), |_| {})
            .unwrap_err();

        assert!(matches!(err, BatchError::OutputDirMissing(ref p) if p == &missing));
        assert!(!missing.exists());
        assert!(runner.file_names().is_empty());
    }

    #[test]
    fn file_as_output_dir_is_rejected() {
        let parent = tempdir().unwrap();
        let file = parent.path().join("plain-file");
        std::fs::write(&file, b"").unwrap();

        assert!(matches!(
            Batch::check_output_dir(&file),
            Err(BatchError::OutputDirMissing(_))
        ));
    }

    #[test]
    fn runs_all_rows_in_order() {
        let out = tempdir().unwrap();
        let runner = RecordingRunner::default();
        let tools = toolchain();
        let progress = Mutex::new(Vec::new());

        let summary = Batch::new(&tools, out.path(), &runner)
            .run(&table(), |p| progress.lock().unwrap().push(p))
            .unwrap();

        assert_eq!(
            runner.file_names(),
            [
                "1280x720_video_5.mp4",
                "640x480_static_0.jpg",
                "320x240_video_1.mp4"
            ]
        );
        assert_eq!(summary.generated.len(), 3);

        let progress = progress.into_inner().unwrap();
        assert_eq!(progress.len(), 3);
        assert_eq!(
            progress[2],
            BatchProgress {
                completed: 3,
                total: 3,
                file_name: "320x240_video_1.mp4".to_string(),
            }
        );
    }

    #[test]
    fn stops_at_first_failure_with_diagnostics() {
        crate::logging::init_test_tracing();
        let out = tempdir().unwrap();
        let runner = RecordingRunner::failing_on("640x480_static_0.jpg", "Invalid frame size");
        let tools = toolchain();

        let err = Batch::new(&tools, out.path(), &runner)
            .run(&table(), |_| {})
            .unwrap_err();

        match &err {
            BatchError::RowFailed { row, file_name, .. } => {
                assert_eq!(*row, 2);
                assert_eq!(file_name, "640x480_static_0.jpg");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("Invalid frame size"));

        // Third row never ran; first row's file is kept
        assert_eq!(runner.file_names().len(), 2);
        assert!(out.path().join("1280x720_video_5.mp4").exists());
        assert!(!out.path().join("320x240_video_1.mp4").exists());
    }

    #[test]
    fn empty_table_generates_nothing() {
        let out = tempdir().unwrap();
        let runner = RecordingRunner::default();
        let tools = toolchain();
        let empty = FormatTable::from_reader("Resolution,Content Type,Duration\n".as_bytes())
            .unwrap();

        let summary = Batch::new(&tools, out.path(), &runner)
            .run(&empty, |_| {})
            .unwrap();
        assert!(summary.generated.is_empty());
    }
}
