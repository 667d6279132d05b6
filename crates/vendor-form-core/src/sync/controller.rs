//! FormSyncController: pincode-driven geography and transport pinning.
//!
//! The controller is the single owner of [`GeoState`] and of the reported
//! transport mode.  It performs no I/O itself: a pincode edit hands back a
//! [`LookupTicket`], the caller resolves it however it likes (see the
//! `GeoSyncService` in the `vendor-form` crate), and the answer comes back
//! through [`FormSyncController::apply_lookup`].
//!
//! # Lookup lifecycle
//!
//! ```text
//! on_pincode_edit("400001")
//!   ├─ mode = Auto, last_error = None, seq += 1
//!   ├─ is_loading = true                     (state/city keep old values)
//!   └─ returns LookupTicket { seq, "400001" }
//!
//! apply_lookup(ticket, result)
//!   ├─ ticket.seq != latest        → Stale   (nothing changes)
//!   ├─ Ok(GeoResolution)           → Applied (state/city overwritten, Auto)
//!   └─ Err(LookupError)            → Failed  (Manual, warning surfaced)
//! ```
//!
//! State and city can only be typed into while the mode is `Manual`, which
//! happens only after a failed lookup.

use tracing::{debug, info, warn};

use crate::domain::field::FieldId;
use crate::domain::geo::{GeoError, GeoMode, GeoResolution, GeoState, LookupError};
use crate::domain::mask::mask;
use crate::domain::transport::{TransportMode, TransportOption};

use super::sequence::LookupSequence;

/// Maximum characters accepted for a manually typed state or city.
const MAX_GEO_NAME_LEN: usize = 50;

/// Digits in a complete pincode.
pub const PINCODE_LEN: usize = 6;

/// Tunables for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    /// Minimum number of pincode digits before a lookup is issued.
    pub min_lookup_len: usize,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            min_lookup_len: PINCODE_LEN,
        }
    }
}

impl SyncSettings {
    /// `min_lookup_len` limited to `1..=PINCODE_LEN`.
    ///
    /// An empty pincode never triggers a lookup, and a complete one always does.
    pub fn lookup_threshold(&self) -> usize {
        self.min_lookup_len.clamp(1, PINCODE_LEN)
    }
}

/// A request to resolve one pincode, tagged with its sequence number.
///
/// Tickets are only minted by [`FormSyncController::on_pincode_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    seq: u64,
    pincode: String,
}

impl LookupTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn pincode(&self) -> &str {
        &self.pincode
    }
}

/// What [`FormSyncController::apply_lookup`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// State and city were overwritten with the resolved values.
    Applied,
    /// The lookup failed; the form is now in manual mode.
    Failed,
    /// The ticket was superseded by a later edit; the result was discarded.
    Stale,
}

/// Reconciles pincode-derived geography with manual fallback and pins the
/// transport mode.
#[derive(Debug, Clone, Default)]
pub struct FormSyncController {
    geo: GeoState,
    sequence: LookupSequence,
    settings: SyncSettings,
}

impl FormSyncController {
    pub fn new(settings: SyncSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Current geography snapshot.
    pub fn geo(&self) -> &GeoState {
        &self.geo
    }

    /// Returns `true` if state and city accept direct edits.
    pub fn geo_editable(&self) -> bool {
        self.geo.is_editable()
    }

    /// Handles a pincode edit.
    ///
    /// Always resets the mode to `Auto` and supersedes any lookup in flight.
    /// Returns a ticket to resolve once the pincode is long enough, otherwise
    /// `None`.
    pub fn on_pincode_edit(&mut self, raw: &str) -> Option<LookupTicket> {
        let pincode = mask(FieldId::Pincode, raw);
        let seq = self.sequence.advance();

        if self.geo.mode == GeoMode::Manual {
            debug!(%pincode, "pincode edited; leaving manual geo mode");
        }
        self.geo.pincode = pincode.clone();
        self.geo.mode = GeoMode::Auto;
        self.geo.last_error = None;

        if pincode.len() < self.settings.lookup_threshold() {
            self.geo.is_loading = false;
            return None;
        }

        self.geo.is_loading = true;
        debug!(seq, %pincode, "issuing pincode lookup");
        Some(LookupTicket { seq, pincode })
    }

    /// Applies a resolver answer, unless it belongs to a superseded edit.
    pub fn apply_lookup(
        &mut self,
        ticket: &LookupTicket,
        result: Result<GeoResolution, LookupError>,
    ) -> LookupOutcome {
        if !self.sequence.is_current(ticket.seq) || !self.geo.is_loading {
            debug!(
                seq = ticket.seq,
                latest = self.sequence.current(),
                pincode = %ticket.pincode,
                "discarding stale pincode lookup"
            );
            return LookupOutcome::Stale;
        }

        self.geo.is_loading = false;
        match result {
            Ok(resolved) => {
                self.geo.state = resolved.state;
                self.geo.city = resolved.city;
                self.geo.mode = GeoMode::Auto;
                self.geo.last_error = None;
                LookupOutcome::Applied
            }
            Err(e) => {
                warn!(pincode = %ticket.pincode, error = %e, "pincode lookup failed; state and city are now editable");
                self.geo.mode = GeoMode::Manual;
                self.geo.last_error = Some(e.to_string());
                LookupOutcome::Failed
            }
        }
    }

    /// Sets the state name while in manual mode.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::ReadOnly`] while the pincode lookup is authoritative.
    pub fn edit_state(&mut self, raw: &str) -> Result<(), GeoError> {
        let value = self.manual_value(raw)?;
        self.geo.state = value;
        Ok(())
    }

    /// Sets the city name while in manual mode.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::ReadOnly`] while the pincode lookup is authoritative.
    pub fn edit_city(&mut self, raw: &str) -> Result<(), GeoError> {
        let value = self.manual_value(raw)?;
        self.geo.city = value;
        Ok(())
    }

    fn manual_value(&self, raw: &str) -> Result<String, GeoError> {
        if !self.geo_editable() {
            return Err(GeoError::ReadOnly);
        }
        Ok(raw
            .chars()
            .filter(|c| !c.is_control())
            .take(MAX_GEO_NAME_LEN)
            .collect())
    }

    /// Handles a transport selection change; the reported value is always
    /// [`TransportMode::PINNED`].
    pub fn select_transport(&self, requested: TransportMode) -> TransportMode {
        if requested != TransportMode::PINNED {
            info!(%requested, pinned = %TransportMode::PINNED, "transport selection overridden");
        }
        TransportMode::PINNED
    }

    /// The reported transport mode.
    pub fn transport(&self) -> TransportMode {
        TransportMode::PINNED
    }

    /// Selector contents for the rendering shell.
    pub fn transport_options(&self) -> Vec<TransportOption> {
        TransportMode::options()
    }
}
