//! Pincode resolvers.
//!
//! [`DirectoryResolver`] answers from an in-memory pincode directory loaded
//! from the `[[directory]]` entries of the TOML config.  It performs no
//! network I/O.
//!
//! # Testability
//!
//! [`mock::GatedResolver`] lets tests decide exactly when, and in which order,
//! each lookup completes.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, warn};

use vendor_form_core::{mask, FieldId, GeoResolution, LookupError, PINCODE_LEN};

use crate::application::geo_sync::PincodeResolver;
use crate::infrastructure::storage::config::PincodeEntry;

pub mod mock;

/// Resolves pincodes from a fixed directory.
#[derive(Debug, Default, Clone)]
pub struct DirectoryResolver {
    entries: HashMap<String, GeoResolution>,
}

impl DirectoryResolver {
    /// Builds the directory; later entries for the same pincode win.
    ///
    /// Keys are masked the same way as typed pincodes, so `"110 001"` is stored
    /// as `"110001"`.  Rows that do not mask to a full pincode could never be
    /// looked up and are skipped with a warning.
    pub fn new(entries: impl IntoIterator<Item = PincodeEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter_map(|e| {
                let pincode = mask(FieldId::Pincode, &e.pincode);
                if pincode.len() != PINCODE_LEN {
                    warn!(pincode = %e.pincode, "skipping directory row with incomplete pincode");
                    return None;
                }
                Some((
                    pincode,
                    GeoResolution {
                        state: e.state,
                        city: e.city,
                    },
                ))
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl PincodeResolver for DirectoryResolver {
    async fn resolve(&self, pincode: &str) -> Result<GeoResolution, LookupError> {
        let found = self.entries.get(pincode).cloned();
        debug!(%pincode, found = found.is_some(), "directory lookup");
        found.ok_or_else(|| LookupError::NotFound(pincode.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pincode: &str, state: &str, city: &str) -> PincodeEntry {
        PincodeEntry {
            pincode: pincode.to_string(),
            state: state.to_string(),
            city: city.to_string(),
        }
    }

    #[test]
    fn test_known_pincode_resolves() {
        // Arrange
        let resolver = DirectoryResolver::new([entry("400001", "Maharashtra", "Mumbai")]);

        // Act
        let result = tokio_test::block_on(resolver.resolve("400001"));

        // Assert
        assert_eq!(
            result,
            Ok(GeoResolution {
                state: "Maharashtra".to_string(),
                city: "Mumbai".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_pincode_is_not_found() {
        let resolver = DirectoryResolver::default();
        let result = tokio_test::block_on(resolver.resolve("000000"));
        assert_eq!(result, Err(LookupError::NotFound("000000".to_string())));
    }

    #[test]
    fn test_directory_keys_are_masked_like_typed_pincodes() {
        // Arrange
        let resolver = DirectoryResolver::new([entry("110 001", "Delhi", "New Delhi")]);

        // Act
        let result = tokio_test::block_on(resolver.resolve("110001"));

        // Assert
        assert_eq!(result.map(|r| r.city), Ok("New Delhi".to_string()));
    }

    #[test]
    fn test_incomplete_directory_pincodes_are_skipped() {
        let resolver = DirectoryResolver::new([
            entry("11001", "Delhi", "New Delhi"),
            entry("not-a-pin", "Goa", "Panaji"),
            entry("400001", "Maharashtra", "Mumbai"),
        ]);
        assert_eq!(resolver.len(), 1);
        assert!(tokio_test::block_on(resolver.resolve("400001")).is_ok());
    }

    #[test]
    fn test_duplicate_entries_keep_the_last() {
        let resolver = DirectoryResolver::new([
            entry("560001", "Karnataka", "Bangalore"),
            entry("560001", "Karnataka", "Bengaluru"),
        ]);
        assert_eq!(resolver.len(), 1);
        let result = tokio_test::block_on(resolver.resolve("560001")).unwrap();
        assert_eq!(result.city, "Bengaluru");
    }
}
