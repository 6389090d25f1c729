// src/config/model.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::validate::validate;
use crate::errors::ConfigError;

/// Target CPU architecture understood by debootstrap and live-build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    Amd64,
    Arm64,
    Armhf,
    I386,
    Ppc64el,
    S390x,
}

impl Architecture {
    /// Every architecture the builder supports, in presentation order.
    pub const ALL: &'static [Architecture] = &[
        Architecture::Amd64,
        Architecture::Arm64,
        Architecture::Armhf,
        Architecture::I386,
        Architecture::Ppc64el,
        Architecture::S390x,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::Amd64 => "amd64",
            Architecture::Arm64 => "arm64",
            Architecture::Armhf => "armhf",
            Architecture::I386 => "i386",
            Architecture::Ppc64el => "ppc64el",
            Architecture::S390x => "s390x",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Architecture::ALL
            .iter()
            .copied()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| ConfigError::UnsupportedArchitecture(s.to_string()))
    }
}

/// Bootstrap completeness level passed to debootstrap via `--variant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Minbase,
    Standard,
    Buildd,
}

impl Variant {
    /// Every variant the builder supports.
    pub const ALL: &'static [Variant] = &[Variant::Minbase, Variant::Standard, Variant::Buildd];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Minbase => "minbase",
            Variant::Standard => "standard",
            Variant::Buildd => "buildd",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .iter()
            .copied()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| ConfigError::UnsupportedVariant(s.to_string()))
    }
}

/// Extra packages and tasksel tasks to bake into the image.
///
/// Order within each list is preserved; it affects the order of the rendered
/// flags, nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSelection {
    #[serde(default)]
    pub packages: Vec<String>,

    #[serde(default)]
    pub tasks: Vec<String>,
}

impl PackageSelection {
    /// Build a selection from two comma-separated strings, trimming
    /// whitespace and dropping empty tokens.
    pub fn from_csv(package_csv: &str, task_csv: &str) -> Self {
        Self {
            packages: split_csv(package_csv),
            tasks: split_csv(task_csv),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.tasks.is_empty()
    }

    /// Render the selection as `lb config` flags: one `--include=` listing
    /// every package, plus one `--tasksel=` per task.
    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if !self.packages.is_empty() {
            flags.push(format!("--include={}", self.packages.join(" ")));
        }
        flags.extend(self.tasks.iter().map(|task| format!("--tasksel={task}")));
        flags
    }
}

fn split_csv(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// A validated Debian Sid ISO build configuration.
///
/// Instances can only be obtained through paths that run validation
/// ([`BuildConfig::default`], [`TryFrom<BuildConfigRecord>`], the `with_*`
/// updaters), so a holder never observes an invalid configuration. Every
/// update produces a new instance; the previous one stays valid and usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    architecture: Architecture,
    mirror: String,
    components: Vec<String>,
    variant: Variant,
    hostname: String,
    username: String,
    enable_secure_boot: bool,
    firmware_packages: Vec<String>,
    package_selection: PackageSelection,
    workdir: PathBuf,
    simulate: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            architecture: Architecture::Amd64,
            mirror: "http://deb.debian.org/debian".to_string(),
            components: vec![
                "main".to_string(),
                "contrib".to_string(),
                "non-free-firmware".to_string(),
            ],
            variant: Variant::Standard,
            hostname: "sid-builder".to_string(),
            username: "sid".to_string(),
            enable_secure_boot: true,
            firmware_packages: vec!["firmware-linux".to_string()],
            package_selection: PackageSelection::default(),
            workdir: PathBuf::from("./sid-build"),
            simulate: true,
        }
    }
}

impl BuildConfig {
    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn mirror(&self) -> &str {
        &self.mirror
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn enable_secure_boot(&self) -> bool {
        self.enable_secure_boot
    }

    pub fn firmware_packages(&self) -> &[String] {
        &self.firmware_packages
    }

    pub fn package_selection(&self) -> &PackageSelection {
        &self.package_selection
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn simulate(&self) -> bool {
        self.simulate
    }

    /// Components as a single comma-separated string.
    pub fn components_csv(&self) -> String {
        self.components.join(", ")
    }

    /// Firmware packages as a single comma-separated string.
    pub fn firmware_csv(&self) -> String {
        self.firmware_packages.join(", ")
    }

    // Updaters for fields whose validity is carried by the type system.
    // These cannot fail: every other field was already validated.

    pub fn with_architecture(&self, architecture: Architecture) -> Self {
        Self {
            architecture,
            ..self.clone()
        }
    }

    pub fn with_variant(&self, variant: Variant) -> Self {
        Self {
            variant,
            ..self.clone()
        }
    }

    pub fn with_secure_boot(&self, enable_secure_boot: bool) -> Self {
        Self {
            enable_secure_boot,
            ..self.clone()
        }
    }

    pub fn with_firmware_packages(&self, firmware_packages: Vec<String>) -> Self {
        Self {
            firmware_packages,
            ..self.clone()
        }
    }

    pub fn with_package_selection(&self, package_selection: PackageSelection) -> Self {
        Self {
            package_selection,
            ..self.clone()
        }
    }

    pub fn with_workdir(&self, workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            ..self.clone()
        }
    }

    pub fn with_simulate(&self, simulate: bool) -> Self {
        Self {
            simulate,
            ..self.clone()
        }
    }

    // Updaters for fields with a non-emptiness rule. These re-validate and
    // fail without producing an instance, leaving the receiver untouched.

    pub fn with_mirror(&self, mirror: impl Into<String>) -> Result<Self, ConfigError> {
        let next = Self {
            mirror: mirror.into(),
            ..self.clone()
        };
        validate(&next)?;
        Ok(next)
    }

    pub fn with_components(&self, components: Vec<String>) -> Result<Self, ConfigError> {
        let next = Self {
            components,
            ..self.clone()
        };
        validate(&next)?;
        Ok(next)
    }

    pub fn with_hostname(&self, hostname: impl Into<String>) -> Result<Self, ConfigError> {
        let next = Self {
            hostname: hostname.into(),
            ..self.clone()
        };
        validate(&next)?;
        Ok(next)
    }

    pub fn with_username(&self, username: impl Into<String>) -> Result<Self, ConfigError> {
        let next = Self {
            username: username.into(),
            ..self.clone()
        };
        validate(&next)?;
        Ok(next)
    }

    /// Plain serializable form of this configuration.
    pub fn to_record(&self) -> BuildConfigRecord {
        BuildConfigRecord {
            architecture: self.architecture.to_string(),
            mirror: self.mirror.clone(),
            components: self.components.clone(),
            variant: self.variant.to_string(),
            hostname: self.hostname.clone(),
            username: self.username.clone(),
            enable_secure_boot: self.enable_secure_boot,
            firmware_packages: self.firmware_packages.clone(),
            workdir: self.workdir.display().to_string(),
            simulate: self.simulate,
            package_selection: self.package_selection.clone(),
        }
    }
}

/// The on-disk form of a [`BuildConfig`], as read from and written to TOML.
///
/// Enum-valued fields are plain strings and `workdir` is a plain string path;
/// no validation has been applied. Missing fields are filled from the default
/// configuration. Convert with [`BuildConfig::try_from`], which parses the
/// enum fields and runs full validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfigRecord {
    pub architecture: String,
    pub mirror: String,
    pub components: Vec<String>,
    pub variant: String,
    pub hostname: String,
    pub username: String,
    pub enable_secure_boot: bool,
    pub firmware_packages: Vec<String>,
    pub workdir: String,
    pub simulate: bool,
    // Last so the nested table serializes after all scalar keys in TOML.
    pub package_selection: PackageSelection,
}

impl Default for BuildConfigRecord {
    fn default() -> Self {
        BuildConfig::default().to_record()
    }
}

impl TryFrom<BuildConfigRecord> for BuildConfig {
    type Error = ConfigError;

    fn try_from(record: BuildConfigRecord) -> Result<Self, Self::Error> {
        let config = BuildConfig {
            architecture: record.architecture.parse()?,
            mirror: record.mirror,
            components: record.components,
            variant: record.variant.parse()?,
            hostname: record.hostname,
            username: record.username,
            enable_secure_boot: record.enable_secure_boot,
            firmware_packages: record.firmware_packages,
            package_selection: record.package_selection,
            workdir: PathBuf::from(record.workdir),
            simulate: record.simulate,
        };
        validate(&config)?;
        Ok(config)
    }
}
