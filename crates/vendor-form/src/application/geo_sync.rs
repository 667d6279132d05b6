//! GeoSyncService: resolves pincode lookup tickets off the event loop.
//!
//! Every ticket is resolved on its own Tokio task, and each answer is sent
//! back over an unbounded channel as a [`LookupResult`].  Results arrive in
//! completion order, not submission order; the session owner feeds each one to
//! `FormSession::apply_lookup`, whose sequence check drops the stale ones.
//! Superseded tasks are never cancelled, they simply finish into the void.
//!
//! ```text
//! FormSession ──ticket──► GeoSyncService::submit ──spawn──► resolver.resolve()
//!      ▲                                                        │
//!      └──────────── LookupResult (mpsc) ◄──────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use vendor_form_core::{GeoResolution, LookupError, LookupTicket};

/// External geo-resolution collaborator.
#[async_trait]
pub trait PincodeResolver: Send + Sync {
    /// Resolves a sanitized 6-digit pincode to its state and city.
    async fn resolve(&self, pincode: &str) -> Result<GeoResolution, LookupError>;
}

/// An answer for one ticket, ready to be applied by the session owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub ticket: LookupTicket,
    pub result: Result<GeoResolution, LookupError>,
}

/// Spawns lookups and funnels their answers into a single channel.
#[derive(Clone)]
pub struct GeoSyncService {
    resolver: Arc<dyn PincodeResolver>,
    timeout: Option<Duration>,
    results_tx: mpsc::UnboundedSender<LookupResult>,
}

impl GeoSyncService {
    /// Creates the service and the receiver the session owner should drain.
    ///
    /// `timeout` bounds each lookup; a resolver that takes longer yields
    /// [`LookupError::Timeout`].
    pub fn new(
        resolver: Arc<dyn PincodeResolver>,
        timeout: Option<Duration>,
    ) -> (Self, mpsc::UnboundedReceiver<LookupResult>) {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        (
            Self {
                resolver,
                timeout,
                results_tx,
            },
            results_rx,
        )
    }

    /// Starts resolving `ticket` in the background.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, ticket: LookupTicket) -> JoinHandle<()> {
        let resolver = Arc::clone(&self.resolver);
        let timeout = self.timeout;
        let tx = self.results_tx.clone();

        tokio::spawn(async move {
            let result = resolve_with_timeout(resolver.as_ref(), ticket.pincode(), timeout).await;
            let seq = ticket.seq();
            if tx.send(LookupResult { ticket, result }).is_err() {
                debug!(seq, "lookup finished after the session closed");
            }
        })
    }
}

async fn resolve_with_timeout(
    resolver: &dyn PincodeResolver,
    pincode: &str,
    timeout: Option<Duration>,
) -> Result<GeoResolution, LookupError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, resolver.resolve(pincode))
            .await
            .unwrap_or(Err(LookupError::Timeout)),
        None => resolver.resolve(pincode).await,
    }
}
