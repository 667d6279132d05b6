//! Application layer use cases for the onboarding form.
//!
//! Use cases in this layer orchestrate the domain rules from
//! `vendor-form-core` and depend only on abstractions (the [`FormStore`] and
//! [`PincodeResolver`] traits), so the infrastructure can be swapped without
//! changing this code.
//!
//! # Sub-modules
//!
//! - **`edit_form`** – The [`FormSession`]: masks every keystroke, forwards the
//!   sanitized value to the form store, validates on blur, and routes pincode,
//!   state/city, and transport events through the sync controller.
//!
//! - **`geo_sync`** – The [`GeoSyncService`]: resolves lookup tickets on
//!   background tasks and hands the answers back to the session owner, in
//!   whatever order they finish.
//!
//! [`FormStore`]: edit_form::FormStore
//! [`PincodeResolver`]: geo_sync::PincodeResolver
//! [`FormSession`]: edit_form::FormSession
//! [`GeoSyncService`]: geo_sync::GeoSyncService

pub mod edit_form;
pub mod geo_sync;
