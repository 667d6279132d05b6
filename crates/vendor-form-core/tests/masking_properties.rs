//! Property-style checks for `mask` across every field.
//!
//! These exercise the public API only: for a fixed corpus of awkward inputs
//! (pasted text, mixed scripts, control characters, very long strings) the
//! masked value must stay inside its character class, respect its length cap,
//! and be a fixed point of `mask`.

use vendor_form_core::{mask, CaseTransform, CharClass, FieldId};

fn corpus() -> Vec<String> {
    vec![
        String::new(),
        " ".to_string(),
        "ab-12cd".to_string(),
        "12a3-456b7890123".to_string(),
        "22aaaaa0000a1z5extra".to_string(),
        "Mary-Jane O'Neil".to_string(),
        "  leading and trailing  ".to_string(),
        "tab\tnew\nline\r".to_string(),
        "ünïcödé ßtraße 東京 😀".to_string(),
        "ñ".repeat(200),
        "9".repeat(500),
        "z".repeat(500),
        "<script>alert('x')</script>".to_string(),
        "vendor@example.co.in".to_string(),
        "Plot 14, Sector 5/B, MIDC #2".to_string(),
    ]
}

#[test]
fn test_masked_output_only_contains_allowed_chars() {
    for id in FieldId::ALL {
        let spec = id.spec();
        if spec.allowed == CharClass::Any {
            continue;
        }
        for raw in corpus() {
            let masked = mask(id, &raw);
            assert!(
                masked.chars().all(|c| spec.allowed.allows(c)),
                "{id}: {masked:?} contains a disallowed character (input {raw:?})"
            );
        }
    }
}

#[test]
fn test_masked_output_respects_max_length() {
    for id in FieldId::ALL {
        let Some(max) = id.spec().max_length else {
            continue;
        };
        for raw in corpus() {
            let masked = mask(id, &raw);
            assert!(
                masked.chars().count() <= max,
                "{id}: {} chars exceeds {max}",
                masked.chars().count()
            );
        }
    }
}

#[test]
fn test_mask_is_idempotent() {
    for id in FieldId::ALL {
        for raw in corpus() {
            let once = mask(id, &raw);
            let twice = mask(id, &once);
            assert_eq!(once, twice, "{id} not idempotent for {raw:?}");
        }
    }
}

#[test]
fn test_upper_fields_never_emit_lowercase() {
    for id in FieldId::ALL {
        if id.spec().case != CaseTransform::Upper {
            continue;
        }
        for raw in corpus() {
            let masked = mask(id, &raw);
            assert!(!masked.chars().any(|c| c.is_lowercase()), "{id}: {masked:?}");
        }
    }
}

#[test]
fn test_documented_examples() {
    assert_eq!(mask(FieldId::VendorCode, "ab-12cd"), "AB12CD");
    assert_eq!(mask(FieldId::PrimaryContactPhone, "12a3-456b7890123"), "1234567890");
    assert_eq!(mask(FieldId::Gstin, "22aaaaa0000a1z5extra"), "22AAAAA0000A1Z5");
}

#[test]
fn test_filtering_happens_before_truncation() {
    // Ten junk characters up front; truncating first would leave nothing.
    let raw = format!("{}400001", "-".repeat(10));
    assert_eq!(mask(FieldId::Pincode, &raw), "400001");
}
