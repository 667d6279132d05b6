//! TOML-based configuration for the form shell.
//!
//! Example:
//!
//! ```toml
//! [form]
//! log_level = "debug"
//! min_lookup_len = 6
//! lookup_timeout_ms = 3000
//!
//! [[directory]]
//! pincode = "110001"
//! state = "Delhi"
//! city = "New Delhi"
//! ```
//!
//! Every field carries a `#[serde(default = "...")]`, so a missing file, an
//! empty file, or an older file without newer keys all load cleanly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vendor_form_core::{SyncSettings, PINCODE_LEN};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but is outside its allowed range.
    #[error("invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub directory: Vec<PincodeEntry>,
}

/// Form session behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormConfig {
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Digits required before a pincode lookup is issued.
    #[serde(default = "default_min_lookup_len")]
    pub min_lookup_len: usize,
    /// Per-lookup timeout in milliseconds; `0` disables the timeout.
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
}

/// One pincode directory row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PincodeEntry {
    pub pincode: String,
    pub state: String,
    pub city: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_min_lookup_len() -> usize {
    6
}
fn default_lookup_timeout_ms() -> u64 {
    3000
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            min_lookup_len: default_min_lookup_len(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

impl FormConfig {
    /// Checks values that parse but would break pincode autofill.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `min_lookup_len` is outside
    /// `1..=PINCODE_LEN`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=PINCODE_LEN).contains(&self.min_lookup_len) {
            return Err(ConfigError::Invalid {
                key: "form.min_lookup_len",
                reason: format!("{} is outside 1..={}", self.min_lookup_len, PINCODE_LEN),
            });
        }
        Ok(())
    }

    /// Controller settings derived from this section.
    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings {
            min_lookup_len: self.min_lookup_len,
        }
    }

    /// Lookup timeout, or `None` when disabled.
    pub fn lookup_timeout(&self) -> Option<Duration> {
        (self.lookup_timeout_ms > 0).then(|| Duration::from_millis(self.lookup_timeout_ms))
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::Invalid`] if a value is out of range.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parses and range-checks a TOML document.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`].
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    config.form.validate()?;
    Ok(config)
}

/// Renders `config` as pretty TOML.
///
/// # Errors
///
/// Returns [`ConfigError::Serialize`] if serialization fails.
pub fn render_config(config: &AppConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
