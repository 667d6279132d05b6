//! On-blur field validation.
//!
//! Masking keeps the *characters* of a value legal while the user types;
//! validation checks whether the finished value is *complete and well formed*.
//! It runs when a field loses focus (or for every field before submission),
//! never on each keystroke, and its errors are advisory: they are displayed
//! inline and block nothing.

use thiserror::Error;

use super::field::FieldId;

/// Why a field value is not acceptable.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("this field is required")]
    Required,
    #[error("enter a valid email address")]
    InvalidEmail,
    #[error("enter a 10-digit phone number")]
    InvalidPhone,
    #[error("enter a valid 6-digit pincode")]
    InvalidPincode,
    #[error("enter a valid 15-character GSTIN")]
    InvalidGstin,
}

/// Validates one field value.
///
/// Empty optional fields are always valid; format rules only apply once the
/// user has entered something.
pub fn validate(field: FieldId, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return if field.spec().required {
            Err(ValidationError::Required)
        } else {
            Ok(())
        };
    }

    match field {
        f if f.is_email() => check(is_email(value), ValidationError::InvalidEmail),
        f if f.is_phone() => check(is_digits(value, 10), ValidationError::InvalidPhone),
        FieldId::Pincode => check(is_pincode(value), ValidationError::InvalidPincode),
        FieldId::Gstin => check(is_gstin(value), ValidationError::InvalidGstin),
        _ => Ok(()),
    }
}

fn check(ok: bool, err: ValidationError) -> Result<(), ValidationError> {
    if ok {
        Ok(())
    } else {
        Err(err)
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_pincode(value: &str) -> bool {
    is_digits(value, 6) && !value.starts_with('0')
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

/// GSTIN layout: 2-digit state code, 10-char PAN (5 letters, 4 digits,
/// 1 letter), entity number (1-9 or A-Z), literal `Z`, check character.
fn is_gstin(value: &str) -> bool {
    let b = value.as_bytes();
    if b.len() != 15 {
        return false;
    }
    b[0..2].iter().all(u8::is_ascii_digit)
        && b[2..7].iter().all(u8::is_ascii_uppercase)
        && b[7..11].iter().all(u8::is_ascii_digit)
        && b[11].is_ascii_uppercase()
        && (b[12].is_ascii_uppercase() || (b'1'..=b'9').contains(&b[12]))
        && b[13] == b'Z'
        && (b[14].is_ascii_uppercase() || b[14].is_ascii_digit())
}
