//! # slotcache
//!
//! Single-slot read-through cache for block devices.
//!
//! Wraps a [`blockdev::BlockDevice`] and serves small sequential reads from
//! one capacity-sized cache line, refilled with a single device read on each
//! miss. Writes pass straight through and invalidate any overlapping cached
//! range. Oversize reads bypass the slot entirely.
//!
//! ## Architecture
//! - **Slot**: one fixed-capacity cache line (aligned buffer + base offset)
//! - **SlotCache**: read/write/seek interception over a `BlockDevice`
//! - **CacheStats**: per-outcome byte counters with a text report

#![warn(missing_docs)]

mod buffer;
mod cache;
mod error;
mod slot;
mod stats;

pub use cache::{SlotCache, DEFAULT_CAPACITY};
pub use error::{CacheError, Result};
pub use stats::{CacheStats, Outcome};
