//! Cooperative interruption.
//!
//! Long-running passes (canonical ordering, reduction) poll a shared flag
//! periodically. Interruption is never preemptive: the pass notices the
//! flag at its next poll point, abandons the work and returns a
//! best-effort result, leaving the tree uncorrupted.

use std::sync::atomic::{AtomicBool, Ordering};

/// How many node visits elapse between interruption polls.
pub const INTERRUPT_POLL_PERIOD: u32 = 64;

/// A shared cooperative interruption flag.
///
/// Raised from outside a traversal (e.g. a key-press handler), polled
/// inside it.
#[derive(Debug, Default)]
pub struct InterruptFlag(AtomicBool);

impl InterruptFlag {
    /// Creates a lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag; the running pass aborts at its next poll.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Lowers the flag for the next operation.
    pub fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// Returns true if interruption was requested.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
