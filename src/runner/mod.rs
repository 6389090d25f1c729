// src/runner/mod.rs

//! Sequential execution of the rendered command sequence.
//!
//! - [`backend`] holds the two execution strategies (simulated and real) and
//!   their per-command primitives.
//! - [`log`] owns the line-oriented build log file.
//! - [`progress`] defines the [`ProgressSink`] every produced line is
//!   delivered to.
//!
//! The runner itself drives one command at a time, in rendered order, and
//! stops at the first failing command. A failed command is a normal outcome
//! (`success = false` in the [`BuildResult`]); only environmental failures
//! (log directory/file, process spawning) abort the run with an error.

pub mod backend;
pub mod log;
pub mod progress;

pub use backend::{ExecutionBackend, StepOutcome};
pub use progress::ProgressSink;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::render::render_command_sequence;
use crate::runner::log::BuildLog;

/// Log file name inside the runner's log directory.
const LOG_FILE_NAME: &str = "build.log";

/// Terminal record of a single build run.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// The commands the run was asked to execute, in order.
    pub commands: Vec<String>,
    /// Where the run's log was written.
    pub log_path: PathBuf,
    /// False as soon as any command exits non-zero.
    pub success: bool,
}

/// Executes the command sequence for one configuration, sequentially,
/// streaming every produced line to a [`ProgressSink`] and the build log.
///
/// Each invocation of [`IsoBuildRunner::run`] is fully independent and
/// recreates the log file.
pub struct IsoBuildRunner {
    config: BuildConfig,
    log_dir: PathBuf,
}

impl IsoBuildRunner {
    /// Create a runner logging under `<workdir>/logs`.
    pub fn new(config: BuildConfig) -> Result<Self> {
        let log_dir = config.workdir().join("logs");
        Self::with_log_dir(config, log_dir)
    }

    /// Create a runner with an explicit log directory.
    ///
    /// The directory (including parents) is created immediately; failure to
    /// create it fails construction.
    pub fn with_log_dir(config: BuildConfig, log_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&log_dir)
            .with_context(|| format!("creating log directory at {}", log_dir.display()))?;
        Ok(Self { config, log_dir })
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    /// Render the configuration and run the full command sequence.
    pub async fn run(&self, sink: &mut dyn ProgressSink) -> Result<BuildResult> {
        let commands = render_command_sequence(&self.config);
        self.run_commands(commands, sink).await
    }

    /// Run an explicit command sequence. This is the primitive behind
    /// [`IsoBuildRunner::run`]; the backend is still chosen by
    /// `config.simulate`.
    pub async fn run_commands(
        &self,
        commands: Vec<String>,
        sink: &mut dyn ProgressSink,
    ) -> Result<BuildResult> {
        let backend = ExecutionBackend::for_config(self.config.simulate());
        let log_path = self.log_path();
        let mut log = BuildLog::create(&log_path, backend.log_header()).await?;

        info!(?backend, total = commands.len(), "starting build run");

        let total = commands.len();
        let mut success = true;
        for (index, command) in commands.iter().enumerate() {
            let index = index + 1;
            debug!(index, total, %command, "running command");
            match backend.run_step(index, total, command, &mut log, sink).await? {
                StepOutcome::Completed => {}
                StepOutcome::Failed(code) => {
                    info!(index, exit_code = code, "command failed, halting sequence");
                    success = false;
                    break;
                }
            }
        }

        info!(success, log = %log_path.display(), "build run finished");

        Ok(BuildResult {
            commands,
            log_path,
            success,
        })
    }

    /// Serialize the full configuration as pretty TOML to `destination`,
    /// overwriting any existing file. Returns the destination path.
    pub fn export_config(&self, destination: &Path) -> Result<PathBuf> {
        let record = self.config.to_record();
        let rendered =
            toml::to_string_pretty(&record).context("serializing configuration to TOML")?;
        fs::write(destination, rendered)
            .with_context(|| format!("writing configuration to {}", destination.display()))?;
        Ok(destination.to_path_buf())
    }
}
