// src/errors.rs

//! Crate-wide error types.
//!
//! Configuration problems get a structured [`ConfigError`] so the boundary
//! that accepts user input can reject the edit and keep the previous valid
//! configuration. Environmental failures in the runner (log I/O, process
//! spawning) flow through `anyhow` with context attached.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unsupported architecture: {0}")]
    UnsupportedArchitecture(String),

    #[error("unsupported variant: {0}")]
    UnsupportedVariant(String),

    #[error("at least one repository component must be selected")]
    NoComponents,

    #[error("a package mirror must be provided")]
    MissingMirror,

    #[error("hostname cannot be empty")]
    MissingHostname,

    #[error("username cannot be empty")]
    MissingUsername,

    #[error("reading config file at {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing TOML config")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

pub use anyhow::{Error, Result};
