use std::error::Error;
use std::fs;

use sid_iso_builder::config::{BuildConfig, BuildConfigRecord, PackageSelection};
use sid_iso_builder::runner::IsoBuildRunner;

type TestResult = Result<(), Box<dyn Error>>;

fn simulated_config(workdir: &std::path::Path) -> BuildConfig {
    BuildConfig::default().with_workdir(workdir).with_simulate(true)
}

fn real_config(workdir: &std::path::Path) -> BuildConfig {
    BuildConfig::default().with_workdir(workdir).with_simulate(false)
}

#[test]
fn construction_creates_the_log_directory() -> TestResult {
    let dir = tempfile::tempdir()?;
    let workdir = dir.path().join("nested").join("sid-build");

    let runner = IsoBuildRunner::new(simulated_config(&workdir))?;

    assert!(workdir.join("logs").is_dir());
    assert_eq!(runner.log_path(), workdir.join("logs").join("build.log"));
    Ok(())
}

#[tokio::test]
async fn simulated_run_reports_every_command_and_succeeds() -> TestResult {
    let dir = tempfile::tempdir()?;
    let runner = IsoBuildRunner::new(simulated_config(dir.path()))?;

    let mut lines: Vec<String> = Vec::new();
    let mut sink = |line: &str| lines.push(line.to_string());
    let result = runner.run(&mut sink).await?;

    assert!(result.success);
    assert!(result.log_path.exists());
    assert_eq!(lines.len(), result.commands.len());
    for (index, line) in lines.iter().enumerate() {
        assert!(
            line.starts_with(&format!("[{}/{}] ", index + 1, result.commands.len())),
            "unexpected progress line: {line}"
        );
    }

    let log = fs::read_to_string(&result.log_path)?;
    let mut log_lines = log.lines();
    assert_eq!(log_lines.next(), Some("Simulated build run."));
    assert_eq!(log_lines.count(), result.commands.len());
    Ok(())
}

#[tokio::test]
async fn real_run_executes_commands_and_logs_output() -> TestResult {
    let dir = tempfile::tempdir()?;
    let runner = IsoBuildRunner::new(real_config(dir.path()))?;

    let mut lines: Vec<String> = Vec::new();
    let mut sink = |line: &str| lines.push(line.to_string());
    let commands = vec!["echo one".to_string(), "echo two".to_string()];
    let result = runner.run_commands(commands, &mut sink).await?;

    assert!(result.success);
    assert_eq!(
        lines,
        vec!["[1/2] $ echo one", "one", "[2/2] $ echo two", "two"]
    );

    // Only command output lands in the log, not the per-command banners.
    let log = fs::read_to_string(&result.log_path)?;
    assert_eq!(log, "one\ntwo\n");
    Ok(())
}

#[tokio::test]
async fn real_run_halts_at_first_failing_command() -> TestResult {
    let dir = tempfile::tempdir()?;
    let runner = IsoBuildRunner::new(real_config(dir.path()))?;

    let mut lines: Vec<String> = Vec::new();
    let mut sink = |line: &str| lines.push(line.to_string());
    let commands = vec![
        "echo first".to_string(),
        "echo oops && exit 3".to_string(),
        "echo never".to_string(),
    ];
    let result = runner.run_commands(commands, &mut sink).await?;

    assert!(!result.success);
    assert_eq!(
        lines,
        vec![
            "[1/3] $ echo first",
            "first",
            "[2/3] $ echo oops && exit 3",
            "oops",
            "Command failed with exit code 3",
        ]
    );
    assert!(lines.iter().all(|line| !line.contains("[3/3]")));
    assert!(lines.iter().all(|line| line != "never"));

    let log = fs::read_to_string(&result.log_path)?;
    assert_eq!(log, "first\noops\n");
    Ok(())
}

#[tokio::test]
async fn real_run_captures_stderr_in_the_merged_stream() -> TestResult {
    let dir = tempfile::tempdir()?;
    let runner = IsoBuildRunner::new(real_config(dir.path()))?;

    let mut lines: Vec<String> = Vec::new();
    let mut sink = |line: &str| lines.push(line.to_string());
    let commands = vec!["echo onlyerr >&2".to_string()];
    let result = runner.run_commands(commands, &mut sink).await?;

    assert!(result.success);
    assert_eq!(lines, vec!["[1/1] $ echo onlyerr >&2", "onlyerr"]);
    assert_eq!(fs::read_to_string(&result.log_path)?, "onlyerr\n");
    Ok(())
}

#[tokio::test]
async fn rerunning_overwrites_the_previous_log() -> TestResult {
    let dir = tempfile::tempdir()?;
    let runner = IsoBuildRunner::new(real_config(dir.path()))?;

    let mut sink = |_line: &str| {};
    runner
        .run_commands(vec!["echo stale".to_string()], &mut sink)
        .await?;
    let result = runner
        .run_commands(vec!["echo fresh".to_string()], &mut sink)
        .await?;

    assert_eq!(fs::read_to_string(&result.log_path)?, "fresh\n");
    Ok(())
}

#[test]
fn export_config_roundtrips_through_toml() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = BuildConfig::default()
        .with_workdir(dir.path())
        .with_package_selection(PackageSelection::from_csv("curl", "standard"));
    let runner = IsoBuildRunner::new(config.clone())?;

    let destination = dir.path().join("config.toml");
    let written = runner.export_config(&destination)?;
    assert_eq!(written, destination);

    let record: BuildConfigRecord = toml::from_str(&fs::read_to_string(&destination)?)?;
    assert_eq!(BuildConfig::try_from(record)?, config);
    Ok(())
}
