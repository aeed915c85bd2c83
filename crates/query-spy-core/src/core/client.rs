// crates/query-spy-core/src/core/client.rs
// ============================================================================
// Module: Query Spy Client Handles
// Description: Synthetic client identities and their id allocators.
// Purpose: Mint unique, opaque client handles for simulated connections.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ClientHandle`] stands in for a real database connection. Handles are
//! minted by a [`ClientIdAllocator`], which either shares one process-wide
//! counter with every other process allocator or owns a private counter.
//! Invariants:
//! - Two calls to [`ClientIdAllocator::allocate`] on allocators backed by the same
//!   counter never return the same id.
//! - Handles are never mutated after creation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Client Handle
// ============================================================================

/// Opaque identity of a simulated connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClientHandle {
    /// Allocator-assigned identifier.
    id: u64,
}

impl ClientHandle {
    /// Creates a handle with an explicit identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
        }
    }

    /// Returns the handle identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.id
    }
}

impl fmt::Display for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client#{}", self.id)
    }
}

// ============================================================================
// SECTION: Id Allocation
// ============================================================================

/// Counter shared by every process-scoped allocator.
static PROCESS_CLIENT_IDS: AtomicU64 = AtomicU64::new(0);

/// Backing counter for an allocator.
#[derive(Debug, Clone)]
enum CounterSource {
    /// The process-wide counter.
    Process,
    /// A counter owned by one allocator and its clones.
    Isolated(Arc<AtomicU64>),
}

/// Monotonic source of [`ClientHandle`] identifiers.
///
/// # Invariants
/// - Clones share the counter of the allocator they were cloned from.
#[derive(Debug, Clone)]
pub struct ClientIdAllocator {
    /// Counter backing this allocator.
    source: CounterSource,
}

impl ClientIdAllocator {
    /// Returns an allocator backed by the process-wide counter.
    #[must_use]
    pub const fn process() -> Self {
        Self {
            source: CounterSource::Process,
        }
    }

    /// Returns an allocator with a private counter starting at zero.
    #[must_use]
    pub fn isolated() -> Self {
        Self {
            source: CounterSource::Isolated(Arc::new(AtomicU64::new(0))),
        }
    }

    /// Returns true when this allocator uses the process-wide counter.
    #[must_use]
    pub const fn is_process_wide(&self) -> bool {
        matches!(self.source, CounterSource::Process)
    }

    /// Mints the next client handle.
    #[must_use]
    pub fn allocate(&self) -> ClientHandle {
        let counter = match &self.source {
            CounterSource::Process => &PROCESS_CLIENT_IDS,
            CounterSource::Isolated(counter) => counter.as_ref(),
        };
        ClientHandle::new(counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ClientIdAllocator {
    fn default() -> Self {
        Self::process()
    }
}
