// src/runner/log.rs

//! Build log persistence.
//!
//! The log is plain text, one record per line, newline-terminated, UTF-8.
//! It is recreated (truncated) at the start of every run and only ever
//! appended to afterwards.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

pub struct BuildLog {
    path: PathBuf,
    file: File,
}

impl BuildLog {
    /// Create the log file, truncating any previous contents, and write the
    /// optional header line.
    pub async fn create(path: &Path, header: Option<&str>) -> Result<Self> {
        let file = File::create(path)
            .await
            .with_context(|| format!("creating build log at {}", path.display()))?;
        let mut log = Self {
            path: path.to_path_buf(),
            file,
        };
        if let Some(header) = header {
            log.append(header).await?;
        }
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line, newline-terminated, flushed before returning so the
    /// log stays durable line-by-line.
    pub async fn append(&mut self, line: &str) -> Result<()> {
        self.file
            .write_all(line.as_bytes())
            .await
            .with_context(|| format!("writing to build log at {}", self.path.display()))?;
        self.file
            .write_all(b"\n")
            .await
            .with_context(|| format!("writing to build log at {}", self.path.display()))?;
        self.file
            .flush()
            .await
            .with_context(|| format!("flushing build log at {}", self.path.display()))?;
        Ok(())
    }
}
