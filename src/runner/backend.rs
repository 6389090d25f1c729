// src/runner/backend.rs

//! Execution backends for the build runner.
//!
//! The backend is chosen once per run from `config.simulate` and never mixed
//! within a run. Sequencing, halting, and result assembly live in the runner;
//! a backend only supplies the per-command primitive and the log header, so
//! both paths speak the same line/callback protocol.

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::debug;

use crate::runner::log::BuildLog;
use crate::runner::progress::ProgressSink;

/// Fixed pause after each simulated step, standing in for real elapsed time.
const SIMULATED_STEP_DELAY: Duration = Duration::from_millis(100);

/// How a single command step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    /// Non-zero exit; carries the exit code. Halts the sequence.
    Failed(i32),
}

/// Closed set of execution strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionBackend {
    /// Append a synthetic progress line per command and pause briefly.
    /// Failure is not a reachable outcome.
    Simulated,
    /// Hand each command verbatim to `sh -c`, stream merged stdout/stderr,
    /// and consult the exit status.
    Real,
}

impl ExecutionBackend {
    pub fn for_config(simulate: bool) -> Self {
        if simulate {
            ExecutionBackend::Simulated
        } else {
            ExecutionBackend::Real
        }
    }

    /// First line written to the log when the file is recreated, if any.
    pub fn log_header(&self) -> Option<&'static str> {
        match self {
            ExecutionBackend::Simulated => Some("Simulated build run."),
            ExecutionBackend::Real => None,
        }
    }

    /// Execute one command (1-indexed `index` out of `total`).
    ///
    /// Only environmental failures (spawning, log I/O) return `Err`; a
    /// failing command is reported as `Ok(StepOutcome::Failed(code))` with
    /// the diagnostic line already delivered to the sink.
    pub async fn run_step(
        &self,
        index: usize,
        total: usize,
        command: &str,
        log: &mut BuildLog,
        sink: &mut dyn ProgressSink,
    ) -> Result<StepOutcome> {
        match self {
            ExecutionBackend::Simulated => simulate_step(index, total, command, log, sink).await,
            ExecutionBackend::Real => execute_step(index, total, command, log, sink).await,
        }
    }
}

async fn simulate_step(
    index: usize,
    total: usize,
    command: &str,
    log: &mut BuildLog,
    sink: &mut dyn ProgressSink,
) -> Result<StepOutcome> {
    let line = format!("[{index}/{total}] {command}");
    log.append(&line).await?;
    sink.line(&line);
    tokio::time::sleep(SIMULATED_STEP_DELAY).await;
    Ok(StepOutcome::Completed)
}

async fn execute_step(
    index: usize,
    total: usize,
    command: &str,
    log: &mut BuildLog,
    sink: &mut dyn ProgressSink,
) -> Result<StepOutcome> {
    // The per-command banner goes to the sink only; the log carries nothing
    // but actual command output.
    sink.line(&format!("[{index}/{total}] $ {command}"));

    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(command)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        // Cancellation policy: dropping the runner's future kills any
        // in-flight subprocess rather than orphaning it.
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning shell for command {index}/{total}"))?;

    // Merge stdout and stderr into one channel of lines; each line is
    // delivered to the sink and appended to the log, in receipt order,
    // before the next one is taken.
    let (line_tx, mut line_rx) = mpsc::channel::<String>(64);
    if let Some(stdout) = child.stdout.take() {
        spawn_line_forwarder(stdout, line_tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        spawn_line_forwarder(stderr, line_tx.clone());
    }
    drop(line_tx);

    while let Some(line) = line_rx.recv().await {
        sink.line(&line);
        log.append(&line).await?;
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for command {index}/{total}"))?;

    debug!(index, total, code = ?status.code(), "command exited");

    if status.success() {
        Ok(StepOutcome::Completed)
    } else {
        let code = status.code().unwrap_or(-1);
        sink.line(&format!("Command failed with exit code {code}"));
        Ok(StepOutcome::Failed(code))
    }
}

/// Forward lines from one child stream into the merged channel until the
/// stream or the receiver goes away.
fn spawn_line_forwarder<R>(reader: R, tx: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
    });
}
