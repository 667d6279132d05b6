//! Domain entities for the vendor onboarding form.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies.  Code in outer layers (the form session, the pincode
//! resolver, the UI bridge) depends on the domain, but the domain never
//! depends on them, so every rule here can be tested in isolation.

/// Field identifiers and the static per-field rule table.
pub mod field;

/// Pincode-derived geography: resolved values, geo mode, and lookup errors.
pub mod geo;

/// Keystroke masking.
pub mod mask;

/// Transport-mode enumeration and the selectable-option rule.
pub mod transport;

/// On-blur field validation.
pub mod validation;
