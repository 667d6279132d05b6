//! Synchronization of derived form state.
//!
//! [`FormSyncController`] owns the pincode → state/city rule and the
//! transport-mode pin.  [`LookupSequence`] numbers lookups so that late
//! answers for superseded pincodes are discarded.

pub mod controller;
pub mod sequence;

pub use controller::{FormSyncController, LookupOutcome, LookupTicket, SyncSettings};
pub use sequence::LookupSequence;
