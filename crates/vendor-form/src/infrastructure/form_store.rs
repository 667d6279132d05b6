//! In-memory form-state store.
//!
//! The reference [`FormStore`] used by the headless shell and the integration
//! tests.  Values are stored exactly as given (callers pass masked values);
//! validation uses the shared rules from `vendor_form_core::validate`.

use std::collections::BTreeMap;

use vendor_form_core::{validate, FieldId, ValidationError};

use crate::application::edit_form::FormStore;

#[derive(Debug, Default, Clone)]
pub struct InMemoryFormStore {
    values: BTreeMap<FieldId, String>,
    errors: BTreeMap<FieldId, ValidationError>,
}

impl InMemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormStore for InMemoryFormStore {
    fn set_field(&mut self, field: FieldId, value: String) {
        self.values.insert(field, value);
    }

    fn validate_field(&mut self, field: FieldId) -> Result<(), ValidationError> {
        let value = self.values.get(&field).map(String::as_str).unwrap_or("");
        let result = validate(field, value);
        match result {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(e) => {
                self.errors.insert(field, e);
            }
        }
        result
    }

    fn value(&self, field: FieldId) -> String {
        self.values.get(&field).cloned().unwrap_or_default()
    }

    fn values(&self) -> BTreeMap<FieldId, String> {
        self.values.clone()
    }

    fn errors(&self) -> BTreeMap<FieldId, ValidationError> {
        self.errors.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_starts_empty() {
        let store = InMemoryFormStore::new();
        assert!(store.values().is_empty());
        assert!(store.errors().is_empty());
        assert_eq!(store.value(FieldId::Address), "");
    }

    #[test]
    fn test_set_field_overwrites_previous_value() {
        let mut store = InMemoryFormStore::new();
        store.set_field(FieldId::DisplayName, "Acme".to_string());
        store.set_field(FieldId::DisplayName, "Acme Corp".to_string());
        assert_eq!(store.value(FieldId::DisplayName), "Acme Corp");
    }

    #[test]
    fn test_validate_records_and_clears_errors() {
        // Arrange
        let mut store = InMemoryFormStore::new();
        store.set_field(FieldId::PrimaryContactPhone, "12345".to_string());

        // Act – invalid first
        let first = store.validate_field(FieldId::PrimaryContactPhone);

        // Assert
        assert_eq!(first, Err(ValidationError::InvalidPhone));
        assert_eq!(
            store.errors().get(&FieldId::PrimaryContactPhone),
            Some(&ValidationError::InvalidPhone)
        );

        // Act – fix and re-validate
        store.set_field(FieldId::PrimaryContactPhone, "9876543210".to_string());
        let second = store.validate_field(FieldId::PrimaryContactPhone);

        // Assert
        assert_eq!(second, Ok(()));
        assert!(store.errors().is_empty());
    }

    #[test]
    fn test_validating_unset_required_field_reports_required() {
        let mut store = InMemoryFormStore::new();
        assert_eq!(
            store.validate_field(FieldId::LegalCompanyName),
            Err(ValidationError::Required)
        );
    }

    #[test]
    fn test_editing_does_not_clear_error_until_next_blur() {
        let mut store = InMemoryFormStore::new();
        store.validate_field(FieldId::Address).ok();
        store.set_field(FieldId::Address, "12 MG Road".to_string());
        assert!(store.errors().contains_key(&FieldId::Address));
    }
}
