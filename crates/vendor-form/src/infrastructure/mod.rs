//! Infrastructure layer for the onboarding form.
//!
//! Contains the concrete collaborators: the in-memory form-state store, the
//! pincode directory resolver, TOML configuration, and the UI command bridge.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `vendor_form_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod form_store;
pub mod geo_lookup;
pub mod storage;
pub mod ui_bridge;
