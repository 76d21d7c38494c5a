//! Test Media Generator GUI - Main entry point
//!
//! Handles:
//! - Configuration loading
//! - Application-level logging initialization
//! - Application launch

use std::sync::{Arc, Mutex};

use tmg_core::config::{default_config_path, ConfigManager};
use tmg_core::logging::init_tracing_with_file;

mod app;
mod handlers;
mod pages;
mod theme;

use app::App;

fn main() -> iced::Result {
    // Load configuration first (needed for logs directory path)
    let mut config_manager = ConfigManager::new(default_config_path());

    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    let logs_dir = config_manager.logs_folder();
    let _log_guard = init_tracing_with_file(config_manager.settings().logging.level, &logs_dir);

    tracing::info!("Test Media Generator starting");
    tracing::info!("Config: {}", config_manager.path().display());
    tracing::info!("Core version: {}", tmg_core::version());

    if let Err(e) = config_manager.ensure_dirs_exist() {
        tracing::error!("Failed to create directories: {}", e);
    }

    let config = Arc::new(Mutex::new(config_manager));

    iced::application(move || App::new(config.clone()), App::update, App::view)
        .title("Test Media Generator")
        .subscription(App::subscription)
        .window_size((640.0, 560.0))
        .run()
}
