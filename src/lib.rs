// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod render;
pub mod runner;

use std::path::Path;

use anyhow::{Result, anyhow};
use tracing::info;

use crate::cli::CliArgs;
use crate::config::{BuildConfig, load_and_validate};
use crate::render::render_command_sequence;
use crate::runner::IsoBuildRunner;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file or built-in defaults)
/// - CLI overrides for simulate/execute
/// - config export
/// - dry-run printing
/// - the build runner, streaming progress lines to stdout
pub async fn run(args: CliArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_and_validate(path)?,
        None => BuildConfig::default(),
    };
    let config = apply_overrides(config, &args);

    if let Some(destination) = &args.export {
        let runner = IsoBuildRunner::new(config)?;
        let path = runner.export_config(Path::new(destination))?;
        println!("configuration exported to {}", path.display());
        return Ok(());
    }

    if args.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    let runner = IsoBuildRunner::new(config)?;
    let mut sink = |line: &str| println!("{line}");
    let result = runner.run(&mut sink).await?;

    if result.success {
        info!(log = %result.log_path.display(), "build finished successfully");
        Ok(())
    } else {
        Err(anyhow!(
            "build failed; see log at {}",
            result.log_path.display()
        ))
    }
}

/// Apply `--simulate` / `--execute` on top of the loaded configuration.
fn apply_overrides(config: BuildConfig, args: &CliArgs) -> BuildConfig {
    if args.execute {
        config.with_simulate(false)
    } else if args.simulate {
        config.with_simulate(true)
    } else {
        config
    }
}

/// Simple dry-run output: print the configuration and the numbered command
/// sequence.
fn print_dry_run(config: &BuildConfig) {
    println!("sid-iso-builder dry-run");
    println!("  architecture: {}", config.architecture());
    println!("  variant:      {}", config.variant());
    println!("  mirror:       {}", config.mirror());
    println!("  components:   {}", config.components_csv());
    println!("  hostname:     {}", config.hostname());
    println!("  username:     {}", config.username());
    println!("  secure boot:  {}", config.enable_secure_boot());
    println!("  firmware:     {}", config.firmware_csv());
    let selection = config.package_selection();
    if !selection.is_empty() {
        println!("  packages:     {}", selection.packages.join(", "));
        println!("  tasks:        {}", selection.tasks.join(", "));
    }
    println!("  workdir:      {}", config.workdir().display());
    println!("  simulate:     {}", config.simulate());
    println!();

    let commands = render_command_sequence(config);
    println!("commands ({}):", commands.len());
    for (index, command) in commands.iter().enumerate() {
        println!("  [{}/{}] {}", index + 1, commands.len(), command);
    }
}
