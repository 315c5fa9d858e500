//! JSON-RPC request ID generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of JSON-RPC request IDs.
///
/// Implementations must be safe to call from concurrent tasks. Any
/// `Fn() -> u64 + Send + Sync` closure is a generator, which keeps tests
/// deterministic without a custom type.
pub trait RequestIdGenerator: Send + Sync {
    fn next_id(&self) -> u64;
}

impl<F> RequestIdGenerator for F
where
    F: Fn() -> u64 + Send + Sync,
{
    fn next_id(&self) -> u64 {
        self()
    }
}

/// Monotonic request ID counter.
///
/// Cloning yields a handle to the same counter, so several clients can draw
/// from one sequence. The counter starts at zero and the first ID handed out
/// is 1. IDs are unique within a process run only.
#[derive(Debug, Clone, Default)]
pub struct RequestIdCounter {
    last: Arc<AtomicU64>,
}

impl RequestIdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last ID handed out, or 0 when none has been.
    pub fn current(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }
}

impl RequestIdGenerator for RequestIdCounter {
    fn next_id(&self) -> u64 {
        // Single fetch-and-add: concurrent callers never observe the same value.
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }
}
