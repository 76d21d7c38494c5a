//! Test Media Generator - command-line driver.
//!
//! Checks the output directory and CSV, makes sure the overlay font and
//! ffmpeg are available, then generates one file per CSV row.

mod cli;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tmg_core::batch::{Batch, BatchProgress, BatchSummary};
use tmg_core::config::{default_config_path, ConfigManager, Settings};
use tmg_core::logging::{init_tracing, LogLevel};
use tmg_core::media::{FormatTable, ProcessRunner, SystemRunner};
use tmg_core::tools::{InstallProgress, Toolchain};

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = ConfigManager::new(cli.config.clone().unwrap_or_else(default_config_path));
    let config_result = config.load_if_present();

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config.settings().logging.level
    };
    init_tracing(level);

    if let Err(e) = config_result {
        tracing::error!("{}", e);
        return ExitCode::FAILURE;
    }

    let result = Environment::current()
        .and_then(|env| execute(&cli, config.settings(), &env, &SystemRunner));

    match result {
        Ok(summary) => {
            tracing::info!("Done: {} files", summary.generated.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Process-level paths the driver resolves defaults against.
struct Environment {
    cwd: PathBuf,
    exe_dir: PathBuf,
}

impl Environment {
    fn current() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let exe = std::env::current_exe().context("Failed to locate executable")?;
        let exe_dir = exe.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self { cwd, exe_dir })
    }
}

/// Output dir, CSV, font, ffmpeg, parse, batch. Stops at the first failure.
fn execute(
    cli: &Cli,
    settings: &Settings,
    env: &Environment,
    runner: &dyn ProcessRunner,
) -> Result<BatchSummary> {
    let output_dir = cli
        .output
        .clone()
        .unwrap_or_else(|| settings.paths.output_dir(&env.cwd));
    Batch::check_output_dir(&output_dir)?;

    let csv_path = cli.csv_path(&env.exe_dir);
    if !csv_path.is_file() {
        bail!("CSV file does not exist: {}", csv_path.display());
    }

    let tools_dir = settings.paths.tools_dir(&env.cwd);
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let toolchain = runtime
        .block_on(Toolchain::prepare(
            &settings.downloads,
            &tools_dir,
            &output_dir,
            log_install_progress,
        ))
        .context("Failed to prepare ffmpeg and font")?;
    tracing::debug!("Using ffmpeg at {}", toolchain.ffmpeg.path().display());

    let table = FormatTable::from_path(&csv_path)
        .with_context(|| format!("Failed to read {}", csv_path.display()))?;

    let summary = Batch::new(&toolchain, &output_dir, runner)
        .with_settings(settings.media.clone())
        .run(&table, |p: BatchProgress| {
            tracing::debug!("[{}/{}] {}", p.completed, p.total, p.file_name);
        })?;

    tracing::info!(
        "Generated {} files in {}",
        summary.generated.len(),
        output_dir.display()
    );
    Ok(summary)
}

fn log_install_progress(progress: InstallProgress) {
    match progress {
        InstallProgress::Downloading { what, percent } => {
            tracing::debug!("Downloading {}: {}%", what, percent)
        }
        InstallProgress::Extracting => tracing::info!("Extracting ffmpeg..."),
        InstallProgress::Ready { what } => tracing::debug!("{} ready", what),
    }
}
