//! Keystroke masking.
//!
//! [`mask`] maps whatever the user typed (or pasted) to the value the form is
//! allowed to hold.  It never fails: characters outside the field's
//! [`CharClass`](super::field::CharClass) are silently dropped.
//!
//! The steps always run in this order:
//!
//! 1. case transform (`vendorCode`, `gstin` are upper-cased)
//! 2. character filtering
//! 3. truncation to `max_length` characters
//!
//! Filtering before truncation matters: `"12a3-456b7890123"` must keep ten
//! digits, which it would not if the raw text were cut to ten characters first.

use super::field::{CaseTransform, FieldId};

/// Sanitizes `raw` for `field`.
///
/// Pure, deterministic, and idempotent: `mask(f, &mask(f, x)) == mask(f, x)`.
///
/// # Examples
///
/// ```rust
/// use vendor_form_core::{mask, FieldId};
///
/// assert_eq!(mask(FieldId::VendorCode, "ab-12cd"), "AB12CD");
/// assert_eq!(mask(FieldId::Pincode, "110 001 9"), "110001");
/// ```
pub fn mask(field: FieldId, raw: &str) -> String {
    let spec = field.spec();
    let limit = spec.max_length.unwrap_or(usize::MAX);

    let cased = raw.chars().map(|c| match spec.case {
        // ASCII-only upper-casing keeps one char in, one char out; non-ASCII
        // letters are rejected by every upper-cased class anyway.
        CaseTransform::Upper => c.to_ascii_uppercase(),
        CaseTransform::None => c,
    });

    cased.filter(|&c| spec.allowed.allows(c)).take(limit).collect()
}
