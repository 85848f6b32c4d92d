//! Cache statistics tracking

use std::sync::atomic::{AtomicU64, Ordering};

/// Outcome class of a read request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Served entirely from the slot
    Hit,

    /// Served by refilling the slot with one device read
    Miss,

    /// Bypassed the slot because the request exceeds its capacity
    Uncacheable,
}

/// Byte counters per read outcome
///
/// Each counter accumulates the *requested* length of the call, not the
/// bytes actually transferred, so `hit + miss + uncacheable == requested`
/// holds after any sequence of operations.
#[derive(Debug, Default)]
pub struct CacheStats {
    requested: AtomicU64,
    hit: AtomicU64,
    miss: AtomicU64,
    uncacheable: AtomicU64,
}

/// Integer percentage with floor division
fn percent(part: u64, total: u64) -> u64 {
    if total == 0 {
        0
    } else {
        part * 100 / total
    }
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a read of `len` requested bytes with the given outcome
    pub fn record(&self, outcome: Outcome, len: u64) {
        let counter = match outcome {
            Outcome::Hit => &self.hit,
            Outcome::Miss => &self.miss,
            Outcome::Uncacheable => &self.uncacheable,
        };
        counter.fetch_add(len, Ordering::Relaxed);
        self.requested.fetch_add(len, Ordering::Relaxed);
    }

    /// Total bytes requested across all reads
    pub fn requested_bytes(&self) -> u64 {
        self.requested.load(Ordering::Relaxed)
    }

    /// Bytes requested by reads served from the slot
    pub fn hit_bytes(&self) -> u64 {
        self.hit.load(Ordering::Relaxed)
    }

    /// Bytes requested by reads that refilled the slot
    pub fn miss_bytes(&self) -> u64 {
        self.miss.load(Ordering::Relaxed)
    }

    /// Bytes requested by reads that bypassed the slot
    pub fn uncacheable_bytes(&self) -> u64 {
        self.uncacheable.load(Ordering::Relaxed)
    }

    /// Hit percentage of requested bytes (floor)
    pub fn hit_percent(&self) -> u64 {
        percent(self.hit_bytes(), self.requested_bytes())
    }

    /// Miss percentage of requested bytes (floor)
    pub fn miss_percent(&self) -> u64 {
        percent(self.miss_bytes(), self.requested_bytes())
    }

    /// Uncacheable percentage of requested bytes (floor)
    pub fn uncacheable_percent(&self) -> u64 {
        percent(self.uncacheable_bytes(), self.requested_bytes())
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.requested.store(0, Ordering::Relaxed);
        self.hit.store(0, Ordering::Relaxed);
        self.miss.store(0, Ordering::Relaxed);
        self.uncacheable.store(0, Ordering::Relaxed);
    }
}
