//! Process execution seam for media jobs.

use std::io;
use std::path::Path;
use std::process::Stdio;

use crate::command::FfmpegCommand;

/// Result of running one external process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stderr: String,
}

/// Runs an ffmpeg command to completion.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, program: &Path, command: &FfmpegCommand) -> io::Result<ProcessOutput>;
}

/// Spawns real processes, discarding stdout and capturing stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, command: &FfmpegCommand) -> io::Result<ProcessOutput> {
        let output = command
            .to_command(program)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()?;

        Ok(ProcessOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::fs;
    use std::sync::Mutex;

    /// Records every command and writes its output file, failing for
    /// outputs whose file name matches `fail_on`.
    #[derive(Default)]
    pub(crate) struct RecordingRunner {
        pub calls: Mutex<Vec<FfmpegCommand>>,
        pub fail_on: Option<String>,
        pub stderr: String,
    }

    impl RecordingRunner {
        pub fn failing_on(file_name: &str, stderr: &str) -> Self {
            Self {
                fail_on: Some(file_name.to_string()),
                stderr: stderr.to_string(),
                ..Default::default()
            }
        }

        pub fn file_names(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|c| {
                    c.output_path()
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default()
                })
                .collect()
        }
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, _program: &Path, command: &FfmpegCommand) -> io::Result<ProcessOutput> {
            self.calls.lock().unwrap().push(command.clone());

            let name = command
                .output_path()
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if self.fail_on.as_deref() == Some(name.as_str()) {
                return Ok(ProcessOutput {
                    success: false,
                    exit_code: Some(1),
                    stderr: self.stderr.clone(),
                });
            }

            fs::write(command.output_path(), b"media")?;
            Ok(ProcessOutput {
                success: true,
                exit_code: Some(0),
                stderr: String::new(),
            })
        }
    }
}
