//! Lightweight expression handles.
//!
//! Handles are 32-bit indices into the node pool, providing a copyable
//! value-like reference to a tree without pointer management.

use std::fmt;

/// A handle to a node in the pool.
///
/// Handles can be copied freely; the pool owns the storage. Slot 0 is
/// permanently reserved for the allocation-failed sentinel, so
/// `NodeRef::FAILED` is a valid handle in every pool.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(u32);

impl NodeRef {
    /// The shared allocation-failed sentinel.
    ///
    /// Returned by the pool on exhaustion; every node-producing operation
    /// checks for it before trusting its result.
    pub const FAILED: NodeRef = NodeRef(0);

    /// Creates a handle from a raw slot index.
    ///
    /// Primarily for internal use by the pool.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw slot index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns true if this handle is the allocation-failed sentinel.
    #[must_use]
    pub const fn is_allocation_failure(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_allocation_failure() {
            write!(f, "Node(failed)")
        } else {
            write!(f, "Node({})", self.0)
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
