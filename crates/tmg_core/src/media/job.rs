//! One media job: a format row turned into an ffmpeg invocation.

use std::path::{Path, PathBuf};

use crate::command::FfmpegCommand;
use crate::config::MediaSettings;
use crate::tools::Toolchain;

use super::error::{FormatError, JobError};
use super::row::{FormatRow, COL_CONTENT_TYPE, COL_DURATION, COL_RESOLUTION};
use super::runner::ProcessRunner;

/// What a row asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Still,
}

impl MediaKind {
    /// `video` in any ASCII case is a video; everything else is a still.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.eq_ignore_ascii_case("video") {
            MediaKind::Video
        } else {
            MediaKind::Still
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Video => "mp4",
            MediaKind::Still => "jpg",
        }
    }

    /// Word shown in the overlay.
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Video => "Video",
            MediaKind::Still => "Static",
        }
    }
}

/// A validated format row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaJob {
    resolution: String,
    content_type: String,
    duration: String,
    kind: MediaKind,
}

impl MediaJob {
    pub fn from_row(row: &FormatRow) -> Result<Self, FormatError> {
        let resolution = row.require(COL_RESOLUTION)?.to_string();
        let content_type = row.require(COL_CONTENT_TYPE)?.to_string();
        let duration = row.require(COL_DURATION)?.to_string();
        let kind = MediaKind::from_content_type(&content_type);

        Ok(Self {
            resolution,
            content_type,
            duration,
            kind,
        })
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// `{Resolution}_{content type, lowercased}_{Duration}.{mp4|jpg}`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.{}",
            self.resolution,
            self.content_type.to_lowercase(),
            self.duration,
            self.kind.extension()
        )
    }

    /// Unescaped overlay text. `\n` is a literal backslash-n that drawtext
    /// renders as a line break.
    pub fn overlay_text(&self) -> String {
        format!(
            "{}\\n{}\\nDuration: {}s",
            self.resolution,
            self.kind.label(),
            self.duration
        )
    }

    /// The `drawtext` filter expression centering the overlay on a
    /// half-transparent black box.
    pub fn drawtext_filter(&self, font: &Path, font_size: u32) -> String {
        format!(
            "drawtext=fontfile='{}':fontsize={}:fontcolor=white:x=(w-tw)/2:y=(h-th)/2:text='{}':box=1:boxcolor=black@0.5:boxborderw=5",
            font.display(),
            font_size,
            escape_text(&self.overlay_text())
        )
    }

    /// Build the ffmpeg command writing into `output_dir`.
    pub fn build_command(
        &self,
        font: &Path,
        output_dir: &Path,
        settings: &MediaSettings,
    ) -> FfmpegCommand {
        let output_path = output_dir.join(self.file_name());
        let filter = self.drawtext_filter(font, settings.font_size);

        match self.kind {
            MediaKind::Video => FfmpegCommand::new(output_path)
                .input("f", "lavfi")
                .input(
                    "i",
                    format!(
                        "color=c=black:s={}:d={}:r={}",
                        self.resolution, self.duration, settings.frame_rate
                    ),
                )
                .filter(filter)
                .output("c:v", "libx264")
                .output("t", self.duration.clone())
                .output("pix_fmt", "yuv420p")
                .output("movflags", "+faststart"),
            MediaKind::Still => FfmpegCommand::new(output_path)
                .input("f", "lavfi")
                .input("i", format!("color=c=black:s={}", self.resolution))
                .filter(filter)
                .output("frames:v", "1"),
        }
    }

    /// Generate the artifact and return its path.
    pub fn run(
        &self,
        toolchain: &Toolchain,
        output_dir: &Path,
        settings: &MediaSettings,
        runner: &dyn ProcessRunner,
    ) -> Result<PathBuf, JobError> {
        let command = self.build_command(&toolchain.font, output_dir, settings);
        let program = toolchain.ffmpeg.path();
        tracing::debug!("$ {}", command.display(program));

        let output = runner.run(program, &command).map_err(|e| JobError::Spawn {
            program: program.to_path_buf(),
            source: e,
        })?;

        if !output.success {
            return Err(JobError::Execution {
                file_name: self.file_name(),
                exit_code: output.exit_code.unwrap_or(-1),
                stderr: output.stderr,
            });
        }

        tracing::info!("Created {}", self.file_name());
        Ok(command.output_path().to_path_buf())
    }
}

/// Escape text for a single-quoted drawtext `text=` value.
///
/// Backslashes are doubled first, then `:` and `'` are prefixed with a
/// backslash, each step working on the previous step's output.
pub fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::runner::fake::RecordingRunner;
    use crate::tools::FfmpegBinary;
    use tempfile::tempdir;

    fn row(res: &str, ct: &str, dur: &str) -> FormatRow {
        FormatRow::from_pairs([
            (COL_RESOLUTION, res),
            (COL_CONTENT_TYPE, ct),
            (COL_DURATION, dur),
        ])
    }

    fn toolchain() -> Toolchain {
        Toolchain::new(FfmpegBinary::new("/opt/ffmpeg"), "/fonts/Ubuntu-Regular.ttf")
    }

    #[test]
    fn escaping_applies_rules_in_order() {
        assert_eq!(
            escape_text("Special characters: \\ : '"),
            "Special characters\\: \\\\ \\: \\'"
        );
    }

    #[test]
    fn escaping_does_not_double_escape_inserted_backslashes() {
        assert_eq!(escape_text(":"), "\\:");
        assert_eq!(escape_text("'"), "\\'");
        assert_eq!(escape_text("\\:"), "\\\\\\:");
    }

    #[test]
    fn still_file_name_is_deterministic() {
        let job = MediaJob::from_row(&row("640x480", "Static", "0")).unwrap();
        assert_eq!(job.file_name(), "640x480_static_0.jpg");
        assert_eq!(job.file_name(), job.file_name());
    }

    #[test]
    fn content_type_is_matched_case_insensitively() {
        let job = MediaJob::from_row(&row("1920x1080", "VIDEO", "10")).unwrap();
        assert_eq!(job.kind(), MediaKind::Video);
        assert_eq!(job.file_name(), "1920x1080_video_10.mp4");

        let job = MediaJob::from_row(&row("1920x1080", "poster", "0")).unwrap();
        assert_eq!(job.kind(), MediaKind::Still);
    }

    #[test]
    fn overlay_text_uses_literal_line_breaks() {
        let job = MediaJob::from_row(&row("1280x720", "Video", "5")).unwrap();
        assert_eq!(job.overlay_text(), "1280x720\\nVideo\\nDuration: 5s");
    }

    #[test]
    fn filter_embeds_escaped_text() {
        let job = MediaJob::from_row(&row("640x480", "Static", "0")).unwrap();
        let filter = job.drawtext_filter(Path::new("/f/font.ttf"), 32);
        assert_eq!(
            filter,
            "drawtext=fontfile='/f/font.ttf':fontsize=32:fontcolor=white:x=(w-tw)/2:y=(h-th)/2:\
             text='640x480\\\\nStatic\\\\nDuration\\: 0s':box=1:boxcolor=black@0.5:boxborderw=5"
        );
    }

    #[test]
    fn video_row_selects_video_shape() {
        let job = MediaJob::from_row(&row("1280x720", "Video", "5")).unwrap();
        let cmd = job.build_command(
            Path::new("/f/font.ttf"),
            Path::new("/out"),
            &MediaSettings::default(),
        );

        assert_eq!(
            cmd.inputs(),
            [
                ("f".to_string(), "lavfi".to_string()),
                ("i".to_string(), "color=c=black:s=1280x720:d=5:r=25".to_string()),
            ]
        );
        assert_eq!(cmd.output_value("c:v"), Some("libx264"));
        assert_eq!(cmd.output_value("t"), Some("5"));
        assert_eq!(cmd.output_value("pix_fmt"), Some("yuv420p"));
        assert_eq!(cmd.output_value("movflags"), Some("+faststart"));
        assert_eq!(cmd.output_path(), Path::new("/out/1280x720_video_5.mp4"));
    }

    #[test]
    fn still_row_selects_single_frame_shape() {
        let job = MediaJob::from_row(&row("640x480", "Static", "0")).unwrap();
        let cmd = job.build_command(
            Path::new("/f/font.ttf"),
            Path::new("/out"),
            &MediaSettings::default(),
        );

        assert_eq!(cmd.inputs()[1].1, "color=c=black:s=640x480");
        assert_eq!(cmd.outputs(), [("frames:v".to_string(), "1".to_string())]);
        assert_eq!(cmd.output_path(), Path::new("/out/640x480_static_0.jpg"));
    }

    #[test]
    fn media_settings_flow_into_command() {
        let job = MediaJob::from_row(&row("320x240", "video", "2")).unwrap();
        let settings = MediaSettings {
            frame_rate: 60,
            font_size: 18,
        };
        let cmd = job.build_command(Path::new("font.ttf"), Path::new("."), &settings);
        assert!(cmd.inputs()[1].1.ends_with(":r=60"));
        assert!(cmd.filter_expr().contains(":fontsize=18:"));
    }

    #[test]
    fn missing_column_is_format_error() {
        let row = FormatRow::from_pairs([(COL_RESOLUTION, "640x480")]);
        assert!(matches!(
            MediaJob::from_row(&row),
            Err(FormatError::MissingColumn(c)) if c == COL_CONTENT_TYPE
        ));
    }

    #[test]
    fn run_returns_output_path() {
        let dir = tempdir().unwrap();
        let runner = RecordingRunner::default();
        let job = MediaJob::from_row(&row("640x480", "Static", "0")).unwrap();

        let path = job
            .run(&toolchain(), dir.path(), &MediaSettings::default(), &runner)
            .unwrap();

        assert_eq!(path, dir.path().join("640x480_static_0.jpg"));
        assert!(path.exists());
        assert_eq!(runner.file_names(), ["640x480_static_0.jpg"]);
    }

    #[test]
    fn failure_message_includes_diagnostics() {
        let dir = tempdir().unwrap();
        let runner =
            RecordingRunner::failing_on("640x480_static_0.jpg", "Unknown encoder 'libx264'");
        let job = MediaJob::from_row(&row("640x480", "Static", "0")).unwrap();

        let err = job
            .run(&toolchain(), dir.path(), &MediaSettings::default(), &runner)
            .unwrap_err();

        assert!(matches!(err, JobError::Execution { exit_code: 1, .. }));
        assert_eq!(err.diagnostics(), Some("Unknown encoder 'libx264'"));
        let message = err.to_string();
        assert!(message.contains("640x480_static_0.jpg"));
        assert!(message.contains("Unknown encoder 'libx264'"));
    }
}
