//! Main application module for Test Media Generator.
//!
//! Holds the application state, the message enum and the top-level
//! update/view/subscription functions. Message handling lives in the
//! `handlers` modules as `impl App` blocks.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use iced::{event, window, Element, Event, Subscription, Task};

use tmg_core::batch::BatchProgress;
use tmg_core::config::{ConfigManager, ConfigSection, MediaSettings, Settings};
use tmg_core::media::FormatTable;
use tmg_core::tools::{FfmpegBinary, Toolchain};

use crate::pages;

/// Where the app is in its load → run cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No CSV loaded.
    Idle,
    /// A CSV is loaded and previewed; Start is enabled.
    CsvLoaded,
    /// Tools are being prepared or the batch is running.
    Processing,
    /// The last run failed. The table is kept and Start is enabled.
    Error,
}

/// Banner shown above the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

/// Events sent by the background batch task.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Progress(BatchProgress),
    /// Number of generated files, or the error message.
    Finished(Result<usize, String>),
}

/// All messages the application can receive.
#[derive(Debug, Clone)]
pub enum Message {
    // CSV input
    FileDropped(PathBuf),
    BrowseCsv,
    CsvSelected(Option<PathBuf>),

    // Output directory
    OutputDirChanged(String),
    BrowseOutput,
    OutputSelected(Option<PathBuf>),

    // Processing
    Start,
    ToolsReady(Result<Toolchain, String>),
    Batch(BatchEvent),

    DismissNotice,
}

/// A loaded CSV and the file names it will produce.
#[derive(Debug, Clone)]
pub struct LoadedCsv {
    pub path: PathBuf,
    pub table: FormatTable,
    pub preview: Vec<String>,
}

/// Main application state.
pub struct App {
    pub config: Arc<Mutex<ConfigManager>>,

    pub phase: Phase,
    pub csv: Option<LoadedCsv>,
    pub output_dir: String,
    pub notice: Option<Notice>,

    /// `(completed, total)` of the running batch.
    pub progress: (usize, usize),
    pub status_text: String,
    pub log_lines: Vec<String>,

    /// ffmpeg resolved by an earlier run.
    pub ffmpeg: Option<FfmpegBinary>,
}

impl App {
    pub fn new(config: Arc<Mutex<ConfigManager>>) -> (Self, Task<Message>) {
        let settings = read_settings(&config);
        let cwd = std::env::current_dir().unwrap_or_default();
        let output_dir = settings.paths.output_dir(&cwd).to_string_lossy().to_string();

        let mut app = Self {
            config,
            phase: Phase::Idle,
            csv: None,
            output_dir,
            notice: None,
            progress: (0, 0),
            status_text: "Drop formats.csv here".to_string(),
            log_lines: Vec::new(),
            ffmpeg: None,
        };
        app.append_log(&format!(
            "Test Media Generator {} started. Output: {}",
            tmg_core::version(),
            app.output_dir
        ));

        (app, Task::none())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FileDropped(path) => {
                self.handle_csv_path(path);
                Task::none()
            }
            Message::BrowseCsv => self.browse_csv(),
            Message::CsvSelected(path) => {
                if let Some(path) = path {
                    self.handle_csv_path(path);
                }
                Task::none()
            }

            Message::OutputDirChanged(text) => {
                self.handle_output_dir_changed(text);
                Task::none()
            }
            Message::BrowseOutput => self.browse_output(),
            Message::OutputSelected(path) => {
                self.handle_output_selected(path);
                Task::none()
            }

            Message::Start => self.handle_start(),
            Message::ToolsReady(result) => self.handle_tools_ready(result),
            Message::Batch(event) => {
                self.handle_batch_event(event);
                Task::none()
            }

            Message::DismissNotice => {
                self.notice = None;
                if self.phase == Phase::Error {
                    self.phase = self.loaded_phase();
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        pages::main_window::view(self)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    pub fn append_log(&mut self, message: &str) {
        tracing::info!("{}", message);
        self.log_lines.push(message.to_string());
    }

    /// Show an error banner and log it.
    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.log_lines.push(format!("Error: {}", message));
        self.notice = Some(Notice::Error(message));
    }

    /// Phase to fall back to when nothing is running.
    pub fn loaded_phase(&self) -> Phase {
        if self.csv.is_some() {
            Phase::CsvLoaded
        } else {
            Phase::Idle
        }
    }

    pub fn can_start(&self) -> bool {
        self.csv.is_some() && matches!(self.phase, Phase::CsvLoaded | Phase::Error)
    }

    pub fn settings(&self) -> Settings {
        read_settings(&self.config)
    }

    pub fn media_settings(&self) -> MediaSettings {
        self.settings().media
    }

    /// Apply `change` to the paths section and persist it.
    pub fn update_paths(&self, change: impl FnOnce(&mut tmg_core::config::PathSettings)) {
        match self.config.lock() {
            Ok(mut cfg) => {
                change(&mut cfg.settings_mut().paths);
                if let Err(e) = cfg.update_section(ConfigSection::Paths) {
                    tracing::warn!("Failed to save paths: {}", e);
                }
            }
            Err(e) => tracing::warn!("Config lock poisoned: {}", e),
        }
    }
}

fn read_settings(config: &Arc<Mutex<ConfigManager>>) -> Settings {
    match config.lock() {
        Ok(cfg) => cfg.settings().clone(),
        Err(e) => {
            tracing::warn!("Config lock poisoned, using defaults: {}", e);
            Settings::default()
        }
    }
}
