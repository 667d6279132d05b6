//! Monotonic sequence numbers for pincode lookups.
//!
//! # Why sequence numbers?
//!
//! Every pincode edit may start a lookup, and lookups finish in whatever order
//! the resolver answers them.  If the user types `110001` and then corrects it
//! to `400001`, the answer for `110001` can arrive *after* the answer for
//! `400001`.  Applying it would show the wrong state and city.
//!
//! Each edit therefore takes the next sequence number.  A result is applied
//! only if it carries the number of the most recent edit; anything older is
//! stale and is dropped on arrival.  Nothing has to be cancelled.
//!
//! # Ownership
//!
//! The sequence is owned by a single [`FormSyncController`](super::FormSyncController)
//! and is only advanced from the form's event loop, so a plain `u64` is enough.

/// A monotonically increasing counter identifying the latest lookup request.
///
/// The counter starts at 0, meaning "nothing issued yet".  The first call to
/// [`advance`](Self::advance) returns 1.  The counter wraps from `u64::MAX` to
/// 0 without panicking.
///
/// # Examples
///
/// ```rust
/// use vendor_form_core::LookupSequence;
///
/// let mut seq = LookupSequence::new();
/// let first = seq.advance();
/// let second = seq.advance();
/// assert!(!seq.is_current(first));
/// assert!(seq.is_current(second));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LookupSequence {
    latest: u64,
}

impl LookupSequence {
    /// Creates a sequence with nothing issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersedes every earlier number and returns the new latest one.
    pub fn advance(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.latest
    }

    /// Returns the most recently issued number without advancing.
    pub fn current(&self) -> u64 {
        self.latest
    }

    /// Returns `true` if `seq` is the most recently issued number.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}
