//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module reads the TOML file that tunes the form session
//! (log level, lookup threshold and timeout) and seeds the pincode directory,
//! falling back to defaults when the file does not exist.

pub mod config;
