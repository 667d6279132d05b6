//! Pincode-derived geography.
//!
//! The state and city inputs are normally filled in from the pincode and
//! shown read-only (`GeoMode::Auto`).  When a lookup fails the form falls back
//! to `GeoMode::Manual` so the user can type them in.
//!
//! ```text
//!            lookup fails
//!   Auto  ─────────────────►  Manual
//!    ▲                          │
//!    └──────────────────────────┘
//!          any pincode edit
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether state/city are system-derived or user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoMode {
    /// Filled from the pincode lookup; read-only.
    #[default]
    Auto,
    /// Lookup failed; the user may type state and city.
    Manual,
}

/// Successful answer from a pincode resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoResolution {
    pub state: String,
    pub city: String,
}

/// Failure reported by a pincode resolver.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The resolver has no entry for this pincode.
    #[error("no location found for pincode {0}")]
    NotFound(String),

    /// The resolver did not answer within the configured timeout.
    #[error("pincode lookup timed out")]
    Timeout,

    /// The resolver could not be reached or failed internally.
    #[error("pincode lookup unavailable: {0}")]
    Unavailable(String),
}

/// Errors from direct edits to the derived geography fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeoError {
    /// State and city are read-only while the pincode lookup is authoritative.
    #[error("state and city are filled from the pincode and cannot be edited")]
    ReadOnly,
}

/// Current pincode, derived state/city, and lookup status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeoState {
    pub pincode: String,
    pub state: String,
    pub city: String,
    pub mode: GeoMode,
    pub last_error: Option<String>,
    pub is_loading: bool,
}

impl GeoState {
    /// Returns `true` if the user may edit state and city.
    pub fn is_editable(&self) -> bool {
        self.mode == GeoMode::Manual
    }
}
