//! Field identifiers and the static rule table.
//!
//! Every input on the onboarding form is named by a [`FieldId`].  Each id maps
//! to exactly one [`FieldSpec`], defined once in [`FieldId::spec`] and never
//! mutated.  The table drives both keystroke masking (`domain::mask`) and the
//! `required` check of on-blur validation (`domain::validation`).
//!
//! # Wire names
//!
//! The rendering shell addresses fields by their camelCase names
//! (`"vendorCode"`, `"primaryContactPhone"`, ...).  [`FieldId`] parses from and
//! displays as those names, and serde uses the same spelling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a wire name does not match any form field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldIdError {
    #[error("unknown field id: {0:?}")]
    Unknown(String),
}

/// Identifies one input on the onboarding form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    LegalCompanyName,
    DisplayName,
    CompanyName,
    SubVendor,
    VendorCode,
    PrimaryContactName,
    ContactPersonName,
    PrimaryContactPhone,
    VendorPhoneNumber,
    PrimaryContactEmail,
    VendorEmailAddress,
    Gstin,
    Address,
    Pincode,
}

/// The set of characters a field accepts.  Anything else is dropped while typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// No filtering.
    Any,
    /// ASCII `A–Z` and `0–9` (applied after upper-casing).
    UpperAlphanumeric,
    /// ASCII letters, U+0020 space, hyphen, and apostrophe.
    PersonName,
    /// ASCII `0–9`.
    Digits,
}

impl CharClass {
    /// Returns `true` if `c` belongs to this class.
    pub fn allows(self, c: char) -> bool {
        match self {
            CharClass::Any => true,
            CharClass::UpperAlphanumeric => c.is_ascii_uppercase() || c.is_ascii_digit(),
            CharClass::PersonName => c.is_ascii_alphabetic() || matches!(c, ' ' | '-' | '\''),
            CharClass::Digits => c.is_ascii_digit(),
        }
    }
}

/// Case transform applied before character filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTransform {
    None,
    Upper,
}

/// Static description of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field_id: FieldId,
    /// Maximum length in `char`s; `None` means unbounded.
    pub max_length: Option<usize>,
    pub allowed: CharClass,
    pub case: CaseTransform,
    pub required: bool,
}

impl FieldSpec {
    const fn new(
        field_id: FieldId,
        max_length: Option<usize>,
        allowed: CharClass,
        case: CaseTransform,
        required: bool,
    ) -> Self {
        Self {
            field_id,
            max_length,
            allowed,
            case,
            required,
        }
    }

    /// Shorthand for a free-text field with a length cap.
    const fn text(field_id: FieldId, max: usize, required: bool) -> Self {
        Self::new(field_id, Some(max), CharClass::Any, CaseTransform::None, required)
    }
}

use self::CaseTransform as Case;
use self::CharClass as Class;
use self::FieldId as F;

const SPECS: [FieldSpec; 14] = [
    FieldSpec::text(F::LegalCompanyName, 60, true),
    FieldSpec::text(F::DisplayName, 30, true),
    FieldSpec::text(F::CompanyName, 30, false),
    FieldSpec::text(F::SubVendor, 20, false),
    FieldSpec::new(F::VendorCode, Some(20), Class::UpperAlphanumeric, Case::Upper, true),
    FieldSpec::new(F::PrimaryContactName, Some(25), Class::PersonName, Case::None, true),
    FieldSpec::new(F::ContactPersonName, Some(30), Class::PersonName, Case::None, false),
    FieldSpec::new(F::PrimaryContactPhone, Some(10), Class::Digits, Case::None, true),
    FieldSpec::new(F::VendorPhoneNumber, Some(10), Class::Digits, Case::None, false),
    FieldSpec::new(F::PrimaryContactEmail, None, Class::Any, Case::None, true),
    FieldSpec::new(F::VendorEmailAddress, None, Class::Any, Case::None, false),
    FieldSpec::new(F::Gstin, Some(15), Class::UpperAlphanumeric, Case::Upper, true),
    FieldSpec::text(F::Address, 150, true),
    FieldSpec::new(F::Pincode, Some(6), Class::Digits, Case::None, true),
];

impl FieldId {
    /// All fields in form order.
    pub const ALL: [FieldId; 14] = [
        F::LegalCompanyName,
        F::DisplayName,
        F::CompanyName,
        F::SubVendor,
        F::VendorCode,
        F::PrimaryContactName,
        F::ContactPersonName,
        F::PrimaryContactPhone,
        F::VendorPhoneNumber,
        F::PrimaryContactEmail,
        F::VendorEmailAddress,
        F::Gstin,
        F::Address,
        F::Pincode,
    ];

    /// Returns the static rule for this field.
    pub fn spec(self) -> &'static FieldSpec {
        // SPECS is laid out in the same order as ALL.
        &SPECS[self as usize]
    }

    /// The camelCase name used by the rendering shell.
    pub fn as_str(self) -> &'static str {
        match self {
            F::LegalCompanyName => "legalCompanyName",
            F::DisplayName => "displayName",
            F::CompanyName => "companyName",
            F::SubVendor => "subVendor",
            F::VendorCode => "vendorCode",
            F::PrimaryContactName => "primaryContactName",
            F::ContactPersonName => "contactPersonName",
            F::PrimaryContactPhone => "primaryContactPhone",
            F::VendorPhoneNumber => "vendorPhoneNumber",
            F::PrimaryContactEmail => "primaryContactEmail",
            F::VendorEmailAddress => "vendorEmailAddress",
            F::Gstin => "gstin",
            F::Address => "address",
            F::Pincode => "pincode",
        }
    }

    /// Returns `true` for the two email inputs.
    pub fn is_email(self) -> bool {
        matches!(self, F::PrimaryContactEmail | F::VendorEmailAddress)
    }

    /// Returns `true` for the two phone inputs.
    pub fn is_phone(self) -> bool {
        matches!(self, F::PrimaryContactPhone | F::VendorPhoneNumber)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = FieldIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| FieldIdError::Unknown(s.to_string()))
    }
}
