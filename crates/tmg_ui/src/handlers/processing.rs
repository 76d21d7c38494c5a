//! Processing handlers: tool preparation and the background batch.

use std::path::PathBuf;

use iced::futures::channel::mpsc;
use iced::futures::{SinkExt, Stream};
use iced::Task;

use tmg_core::batch::Batch;
use tmg_core::config::{DownloadSettings, MediaSettings};
use tmg_core::media::{FormatTable, SystemRunner};
use tmg_core::tools::{FfmpegBinary, FfmpegInstaller, FontInstaller, InstallProgress, Toolchain};

use crate::app::{App, BatchEvent, Message, Notice, Phase};

impl App {
    /// Handle Start: check the output directory, then prepare tools.
    pub fn handle_start(&mut self) -> Task<Message> {
        if !self.can_start() {
            return Task::none();
        }

        let output_dir = PathBuf::from(self.output_dir.trim());
        if let Err(e) = Batch::check_output_dir(&output_dir) {
            self.show_error(e.to_string());
            return Task::none();
        }

        let total = self.csv.as_ref().map(|c| c.table.len()).unwrap_or(0);
        self.phase = Phase::Processing;
        self.notice = None;
        self.progress = (0, total);
        self.status_text = "Preparing ffmpeg and font...".to_string();
        self.append_log(&format!("Starting: {} files into {}", total, output_dir.display()));

        let settings = self.settings();
        let cwd = std::env::current_dir().unwrap_or_default();
        let tools_dir = settings.paths.tools_dir(&cwd);
        let cached = self.ffmpeg.clone();

        Task::perform(
            prepare_tools(settings.downloads, tools_dir, output_dir, cached),
            Message::ToolsReady,
        )
    }

    /// Handle ToolsReady: start the batch or report the failure.
    pub fn handle_tools_ready(&mut self, result: Result<Toolchain, String>) -> Task<Message> {
        let toolchain = match result {
            Ok(toolchain) => toolchain,
            Err(e) => {
                self.phase = Phase::Error;
                self.show_error(e);
                return Task::none();
            }
        };

        let Some(table) = self.csv.as_ref().map(|c| c.table.clone()) else {
            self.phase = Phase::Idle;
            return Task::none();
        };

        self.ffmpeg = Some(toolchain.ffmpeg.clone());
        self.append_log(&format!("Using ffmpeg at {}", toolchain.ffmpeg.path().display()));
        self.status_text = "Generating...".to_string();

        let output_dir = PathBuf::from(self.output_dir.trim());
        let media = self.media_settings();

        Task::run(
            batch_stream(table, toolchain, output_dir, media),
            Message::Batch,
        )
    }

    /// Handle events from the background batch.
    pub fn handle_batch_event(&mut self, event: BatchEvent) {
        match event {
            BatchEvent::Progress(p) => {
                self.progress = (p.completed, p.total);
                self.status_text = format!("Generated {} of {}", p.completed, p.total);
                self.append_log(&format!("Created {}", p.file_name));
            }
            BatchEvent::Finished(Ok(count)) => {
                self.phase = self.loaded_phase();
                self.status_text = "Processing complete!".to_string();
                self.append_log(&format!("Processing complete: {} files", count));
                self.notice = Some(Notice::Success(format!(
                    "Processing complete! {} files generated.",
                    count
                )));
            }
            BatchEvent::Finished(Err(e)) => {
                self.phase = Phase::Error;
                self.status_text = "Processing failed".to_string();
                self.show_error(format!("Error creating media: {}", e));
            }
        }
    }
}

/// Ensure the font in `output_dir` and ffmpeg in `tools_dir`, reusing a
/// previously resolved ffmpeg.
async fn prepare_tools(
    downloads: DownloadSettings,
    tools_dir: PathBuf,
    output_dir: PathBuf,
    cached: Option<FfmpegBinary>,
) -> Result<Toolchain, String> {
    let font = FontInstaller::new()
        .with_url(&downloads.font_url)
        .ensure(&output_dir, log_install_progress)
        .await
        .map_err(|e| format!("Error ensuring font exists: {}", e))?;

    let ffmpeg = match cached.filter(|b| b.path().is_file()) {
        Some(binary) => binary,
        None => FfmpegInstaller::new(tools_dir)
            .with_download_url(&downloads.ffmpeg_url)
            .ensure_present(log_install_progress)
            .await
            .map_err(|e| format!("Error ensuring FFmpeg exists: {}", e))?,
    };

    Ok(Toolchain::new(ffmpeg, font))
}

fn log_install_progress(progress: InstallProgress) {
    match progress {
        InstallProgress::Downloading { what, percent } => {
            tracing::debug!("Downloading {}: {}%", what, percent)
        }
        InstallProgress::Extracting => tracing::info!("Extracting ffmpeg..."),
        InstallProgress::Ready { what } => tracing::info!("{} ready", what),
    }
}

/// Run the batch on a blocking thread, forwarding progress as it happens.
fn batch_stream(
    table: FormatTable,
    toolchain: Toolchain,
    output_dir: PathBuf,
    media: MediaSettings,
) -> impl Stream<Item = BatchEvent> {
    iced::stream::channel(16, move |mut output: mpsc::Sender<BatchEvent>| async move {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let worker = tokio::task::spawn_blocking(move || {
            let runner = SystemRunner;
            Batch::new(&toolchain, &output_dir, &runner)
                .with_settings(media)
                .run(&table, |p| {
                    let _ = tx.send(BatchEvent::Progress(p));
                })
                .map(|summary| summary.generated.len())
                .map_err(|e| e.to_string())
        });

        while let Some(event) = rx.recv().await {
            let _ = output.send(event).await;
        }

        let finished = match worker.await {
            Ok(result) => result,
            Err(e) => Err(format!("Batch task failed: {}", e)),
        };
        let _ = output.send(BatchEvent::Finished(finished)).await;
    })
}
