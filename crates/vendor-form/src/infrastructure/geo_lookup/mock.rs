//! Gated pincode resolver for testing lookup ordering.
//!
//! Each call to [`GatedResolver::resolve`] parks until the test releases that
//! pincode with [`GatedResolver::release`], so tests can force lookups to
//! finish in any order without sleeping.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use vendor_form_core::{GeoResolution, LookupError};

use crate::application::geo_sync::PincodeResolver;

type Answer = Result<GeoResolution, LookupError>;

#[derive(Default)]
struct Gates {
    /// Lookups waiting for an answer, by pincode.
    waiting: HashMap<String, oneshot::Sender<Answer>>,
    /// Answers released before the lookup started.
    released: HashMap<String, Answer>,
}

/// A resolver whose answers are released by the test.
#[derive(Default)]
pub struct GatedResolver {
    gates: Mutex<Gates>,
}

impl GatedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completes the lookup for `pincode`, now or as soon as it starts.
    pub fn release(&self, pincode: &str, answer: Answer) {
        let mut gates = self.gates.lock().expect("lock poisoned");
        match gates.waiting.remove(pincode) {
            Some(tx) => {
                // The lookup may have been dropped; nothing to do then.
                let _ = tx.send(answer);
            }
            None => {
                gates.released.insert(pincode.to_string(), answer);
            }
        }
    }

    /// Number of lookups currently parked.
    pub fn waiting(&self) -> usize {
        self.gates.lock().expect("lock poisoned").waiting.len()
    }
}

#[async_trait]
impl PincodeResolver for GatedResolver {
    async fn resolve(&self, pincode: &str) -> Result<GeoResolution, LookupError> {
        let rx = {
            let mut gates = self.gates.lock().expect("lock poisoned");
            if let Some(answer) = gates.released.remove(pincode) {
                return answer;
            }
            let (tx, rx) = oneshot::channel();
            gates.waiting.insert(pincode.to_string(), tx);
            rx
        };
        rx.await
            .unwrap_or_else(|_| Err(LookupError::Unavailable("gate dropped".to_string())))
    }
}
