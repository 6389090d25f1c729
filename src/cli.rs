// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `sid-iso-builder`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sid-iso-builder",
    version,
    about = "Assemble a Debian Sid live ISO from a declarative configuration.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the build configuration file (TOML).
    ///
    /// When omitted, the built-in default configuration is used.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Print the configuration and the rendered command sequence, but don't
    /// execute anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Execute the commands for real, overriding `simulate` in the config.
    #[arg(long)]
    pub execute: bool,

    /// Simulate the run, overriding `simulate` in the config.
    #[arg(long, conflicts_with = "execute")]
    pub simulate: bool,

    /// Export the effective configuration as TOML to PATH and exit.
    #[arg(long, value_name = "PATH")]
    pub export: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SID_ISO_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
