//! # vendor-form-core
//!
//! Shared library for the vendor onboarding form containing the per-field
//! input masks, the field validation rules, and the controller that keeps
//! pincode-derived geography and the transport-mode selector in sync.
//!
//! This crate has zero dependencies on UI frameworks, async runtimes, or
//! network services.  The rendering shell and the external collaborators
//! (form-state store, pincode resolver) live in the `vendor-form` crate.
//!
//! # Architecture overview
//!
//! The onboarding form collects company and contact data.  Most of it is
//! plain text entry, but a few rules are precise enough to live here:
//!
//! - **`domain`** – Pure business rules.  [`FieldId`] and [`FieldSpec`]
//!   describe every input; [`mask`] turns raw keystrokes into sanitized
//!   values; [`validate`] checks a finished value when the field loses focus;
//!   [`TransportMode`] and [`GeoState`] model the two derived selectors.
//!
//! - **`sync`** – The [`FormSyncController`] state machine.  A pincode edit
//!   issues a [`LookupTicket`]; the resolved state/city is applied only if the
//!   ticket is still the latest one, so slow answers for an old pincode can
//!   never overwrite the answer for the current one.

pub mod domain;
pub mod sync;

// Re-export the most-used types at the crate root so callers can write
// `vendor_form_core::mask` instead of `vendor_form_core::domain::mask::mask`.
pub use domain::field::{CaseTransform, CharClass, FieldId, FieldIdError, FieldSpec};
pub use domain::geo::{GeoError, GeoMode, GeoResolution, GeoState, LookupError};
pub use domain::mask::mask;
pub use domain::transport::{TransportMode, TransportOption};
pub use domain::validation::{validate, ValidationError};
pub use sync::controller::{
    FormSyncController, LookupOutcome, LookupTicket, SyncSettings, PINCODE_LEN,
};
pub use sync::sequence::LookupSequence;
