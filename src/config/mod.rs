// src/config/mod.rs

//! Build configuration model, validation, and persistence.
//!
//! Responsibilities:
//! - Define the configuration data model and its derived-update API (`model.rs`).
//! - Enforce the non-emptiness rules so an invalid instance never escapes
//!   (`validate.rs`).
//! - Load a config file from disk (`loader.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{Architecture, BuildConfig, BuildConfigRecord, PackageSelection, Variant};
