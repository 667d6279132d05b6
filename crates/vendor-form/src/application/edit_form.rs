//! FormSession: the edit-form use case.
//!
//! A session ties one [`FormStore`] to one [`FormSyncController`].  The
//! rendering shell turns raw UI events into [`FormEvent`]s and hands them to
//! [`FormSession::handle`]; everything it renders afterwards is read back from
//! the session.
//!
//! # Event flow
//!
//! ```text
//! EditField(id, raw) ──► mask(id, raw) ──► FormStore::set_field
//!                                  └─ id == pincode ──► controller.on_pincode_edit ──► LookupTicket
//! Blur(id)           ──► FormStore::validate_field      (never on keystrokes)
//! EditState / EditCity ─► controller (manual mode only)
//! SelectTransport    ──► controller.select_transport   (always road)
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use vendor_form_core::{
    mask, FieldId, FormSyncController, GeoError, GeoResolution, GeoState, LookupError,
    LookupOutcome, LookupTicket, SyncSettings, TransportMode, TransportOption, ValidationError,
};

/// Errors returned by [`FormSession::handle`].
///
/// None of them end the session; the shell shows the message and carries on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Geo(#[from] GeoError),
}

/// External form-state store.
///
/// Owns the field values and the per-field validation messages.  The
/// production shell binds this to its own state container; tests use the
/// in-memory store from the infrastructure layer or a mock.
#[cfg_attr(test, mockall::automock)]
pub trait FormStore: Send {
    /// Stores an already-masked value.
    fn set_field(&mut self, field: FieldId, value: String);

    /// Validates the current value and records the outcome for display.
    fn validate_field(&mut self, field: FieldId) -> Result<(), ValidationError>;

    /// Current value of `field` (empty if never set).
    fn value(&self, field: FieldId) -> String;

    /// Snapshot of every value that has been set.
    fn values(&self) -> BTreeMap<FieldId, String>;

    /// Validation messages recorded by the last blur of each field.
    fn errors(&self) -> BTreeMap<FieldId, ValidationError>;
}

/// A UI event addressed to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    EditField { field: FieldId, value: String },
    Blur { field: FieldId },
    EditState { value: String },
    EditCity { value: String },
    SelectTransport { mode: TransportMode },
}

/// Result of an [`FormSession::edit_field`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    /// The masked value that was stored.
    pub value: String,
    /// A lookup to resolve, for pincode edits only.
    pub lookup: Option<LookupTicket>,
}

/// One onboarding form being filled in.
pub struct FormSession<S: FormStore> {
    id: Uuid,
    store: S,
    sync: FormSyncController,
}

impl<S: FormStore> FormSession<S> {
    pub fn new(store: S, settings: SyncSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            store,
            sync: FormSyncController::new(settings),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn geo(&self) -> &GeoState {
        self.sync.geo()
    }

    pub fn transport(&self) -> TransportMode {
        self.sync.transport()
    }

    pub fn transport_options(&self) -> Vec<TransportOption> {
        self.sync.transport_options()
    }

    /// Dispatches a UI event.  Returns a lookup ticket when a pincode edit
    /// needs resolving.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Geo`] for state/city edits outside manual mode.
    pub fn handle(&mut self, event: FormEvent) -> Result<Option<LookupTicket>, SessionError> {
        match event {
            FormEvent::EditField { field, value } => Ok(self.edit_field(field, &value).lookup),
            FormEvent::Blur { field } => {
                self.blur_field(field).ok();
                Ok(None)
            }
            FormEvent::EditState { value } => {
                self.sync.edit_state(&value)?;
                Ok(None)
            }
            FormEvent::EditCity { value } => {
                self.sync.edit_city(&value)?;
                Ok(None)
            }
            FormEvent::SelectTransport { mode } => {
                self.select_transport(mode);
                Ok(None)
            }
        }
    }

    /// Masks `raw`, stores it, and for the pincode starts a lookup.
    pub fn edit_field(&mut self, field: FieldId, raw: &str) -> FieldEdit {
        let value = mask(field, raw);
        self.store.set_field(field, value.clone());

        let lookup = match field {
            FieldId::Pincode => self.sync.on_pincode_edit(&value),
            _ => None,
        };
        FieldEdit { value, lookup }
    }

    /// Validates a field when it loses focus.
    pub fn blur_field(&mut self, field: FieldId) -> Result<(), ValidationError> {
        let result = self.store.validate_field(field);
        if let Err(e) = &result {
            debug!(session = %self.id, %field, error = %e, "field failed validation");
        }
        result
    }

    /// Applies a resolver answer for a ticket this session issued.
    pub fn apply_lookup(
        &mut self,
        ticket: &LookupTicket,
        result: Result<GeoResolution, LookupError>,
    ) -> LookupOutcome {
        self.sync.apply_lookup(ticket, result)
    }

    /// Reports the transport mode after a selection change.
    pub fn select_transport(&mut self, requested: TransportMode) -> TransportMode {
        self.sync.select_transport(requested)
    }

    /// Validates every field through the store, as before submission.
    ///
    /// This is the only whole-form check: each failure is recorded in the
    /// store for display, and the failing fields are returned.  An empty map
    /// means all fields are valid.
    pub fn validate_all(&mut self) -> BTreeMap<FieldId, ValidationError> {
        FieldId::ALL
            .into_iter()
            .filter_map(|id| self.store.validate_field(id).err().map(|e| (id, e)))
            .collect()
    }

    /// `true` when every field is valid and state/city are settled and filled.
    ///
    /// Always validates every field, so the store holds fresh messages afterwards.
    pub fn is_ready(&mut self) -> bool {
        let fields_ok = self.validate_all().is_empty();
        let geo = self.sync.geo();
        fields_ok && !geo.is_loading && !geo.state.trim().is_empty() && !geo.city.trim().is_empty()
    }
}
