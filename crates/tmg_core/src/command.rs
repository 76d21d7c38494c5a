//! ffmpeg command options builder.
//!
//! Builds command-line tokens from ordered (key, value) lists so the
//! resulting argument vector is deterministic:
//!
//! ```text
//! -y  -<in-key> <in-value> ...  [-filter_complex <filter>]  -<out-key> <out-value> ...  <output>
//! ```
//!
//! Keys are given without the leading dash. Nothing is escaped or validated.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One ffmpeg invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FfmpegCommand {
    inputs: Vec<(String, String)>,
    filter: String,
    outputs: Vec<(String, String)>,
    output_path: PathBuf,
}

impl FfmpegCommand {
    /// Start a command writing to `output_path`.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            ..Default::default()
        }
    }

    /// Append an input option.
    pub fn input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.push((key.into(), value.into()));
        self
    }

    /// Set the `-filter_complex` expression. Empty means no filter.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Append an output option.
    pub fn output(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs.push((key.into(), value.into()));
        self
    }

    pub fn inputs(&self) -> &[(String, String)] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[(String, String)] {
        &self.outputs
    }

    pub fn filter_expr(&self) -> &str {
        &self.filter
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Value of the first output option named `key`.
    pub fn output_value(&self, key: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Build the complete argument list (without the program name).
    ///
    /// The output path is passed through unchanged, so non-UTF-8 paths
    /// reach ffmpeg intact.
    pub fn args(&self) -> Vec<OsString> {
        let mut tokens: Vec<OsString> = Vec::with_capacity(
            2 + 2 * (self.inputs.len() + self.outputs.len()) + 2,
        );

        // Force overwrite
        tokens.push("-y".into());

        for (key, value) in &self.inputs {
            tokens.push(format!("-{}", key).into());
            tokens.push(value.into());
        }

        if !self.filter.is_empty() {
            tokens.push("-filter_complex".into());
            tokens.push((&self.filter).into());
        }

        for (key, value) in &self.outputs {
            tokens.push(format!("-{}", key).into());
            tokens.push(value.into());
        }

        tokens.push(self.output_path.clone().into_os_string());
        tokens
    }

    /// Build a process for `program` with these arguments.
    pub fn to_command(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(self.args());
        cmd
    }

    /// Shell-like one-liner for logs.
    pub fn display(&self, program: &Path) -> String {
        let mut parts = vec![quote_if_needed(&program.to_string_lossy())];
        parts.extend(
            self.args()
                .iter()
                .map(|t| quote_if_needed(&t.to_string_lossy())),
        );
        parts.join(" ")
    }
}

fn quote_if_needed(token: &str) -> String {
    if token.is_empty() || token.contains(|c: char| c.is_whitespace() || c == '\'' || c == '"') {
        format!("\"{}\"", token.replace('"', "\\\""))
    } else {
        token.to_string()
    }
}
