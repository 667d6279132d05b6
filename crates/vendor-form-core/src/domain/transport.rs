//! Transport-mode selection.
//!
//! The form lists four transport modes but only road transport is currently
//! accepted.  Rather than disabling option elements imperatively, the shell
//! renders whatever [`TransportMode::options`] returns and reports changes
//! through the sync controller, which pins the reported value to
//! [`TransportMode::PINNED`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mode of transport offered by a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Road,
    Air,
    Rail,
    Ship,
}

/// One entry in the transport selector as the shell should render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportOption {
    pub mode: TransportMode,
    pub label: String,
    /// `false` means rendered but disabled and not focusable.
    pub selectable: bool,
}

impl TransportMode {
    /// The only mode the business currently accepts.
    pub const PINNED: TransportMode = TransportMode::Road;

    /// All modes in display order.
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Road,
        TransportMode::Air,
        TransportMode::Rail,
        TransportMode::Ship,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TransportMode::Road => "Road",
            TransportMode::Air => "Air",
            TransportMode::Rail => "Rail",
            TransportMode::Ship => "Ship",
        }
    }

    /// Derived selector contents: every mode is listed, only the pinned one is selectable.
    pub fn options() -> Vec<TransportOption> {
        Self::ALL
            .into_iter()
            .map(|mode| TransportOption {
                mode,
                label: mode.label().to_string(),
                selectable: mode == Self::PINNED,
            })
            .collect()
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Lowercase wire spelling, matching serde.
        f.write_str(match self {
            TransportMode::Road => "road",
            TransportMode::Air => "air",
            TransportMode::Rail => "rail",
            TransportMode::Ship => "ship",
        })
    }
}
