#![forbid(unsafe_code)]

//! Process-wide identities for layout nodes and listener registrations.
//!
//! Every entity, container, and anonymous subscription draws a [`NodeId`]
//! from a single monotonic counter. The counter is initialised once and never
//! reset, so ids are unique for the lifetime of the process.
//!
//! Listener registrations on an [`Observable`](crate::reactive::Observable)
//! are keyed by [`ListenerKey`], a `(NodeId, role)` pair. Keys are explicit
//! values rather than object identity: the same owner may hold several
//! registrations on one observable as long as their roles differ.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of a node, container, or subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocate the next id from the process-wide counter.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value (for logging).
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Key under which a listener is registered on an observable.
///
/// Re-registering an existing key replaces the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey {
    owner: NodeId,
    role: &'static str,
}

impl ListenerKey {
    /// Key for `owner`'s registration in the given role.
    #[must_use]
    pub const fn new(owner: NodeId, role: &'static str) -> Self {
        Self { owner, role }
    }

    /// Key with a freshly allocated owner, for one-off subscriptions.
    #[must_use]
    pub fn unique(role: &'static str) -> Self {
        Self::new(NodeId::next(), role)
    }

    /// Owner of the registration.
    #[inline]
    #[must_use]
    pub const fn owner(&self) -> NodeId {
        self.owner
    }

    /// Role label of the registration.
    #[inline]
    #[must_use]
    pub const fn role(&self) -> &'static str {
        self.role
    }
}

impl fmt::Display for ListenerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.role)
    }
}
