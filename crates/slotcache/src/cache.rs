//! Read-through cache controller wrapping a block device

use std::path::Path;

use blockdev::{BlockDevice, FileDevice, Whence};
use tracing::{debug, warn};

use crate::buffer::{AlignedBuf, BUFFER_ALIGN};
use crate::error::{CacheError, Result};
use crate::slot::Slot;
use crate::stats::{CacheStats, Outcome};

/// Default cache capacity (16 KB)
pub const DEFAULT_CAPACITY: usize = 16 * 1024;

/// Single-slot read-through cache over a block device.
///
/// Intercepts the device's read, write, and seek entry points. Reads that
/// fit inside the currently cached range are served from memory; reads that
/// fit the slot capacity but miss trigger exactly one capacity-sized device
/// read to refill the slot; larger reads go straight to the device. Writes
/// invalidate any overlapping cached range and pass through unmodified.
///
/// The cache holds no locks: callers must serialize access, the same
/// contract the wrapped device already imposes.
pub struct SlotCache<B: BlockDevice> {
    /// Wrapped device; the cache delegates all physical I/O to it
    backend: B,

    /// The single cache line
    slot: Slot,

    /// Byte counters per read outcome
    stats: CacheStats,
}

impl SlotCache<FileDevice> {
    /// Open a file as the backend device and wrap it in a cache
    ///
    /// # Arguments
    /// * `path` - File path
    /// * `capacity` - Cache line size in bytes, a positive multiple of the
    ///   device sector size
    ///
    /// # Returns
    /// * `Result<SlotCache<FileDevice>>` - Cache with an empty slot
    pub fn open<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Self> {
        let backend = FileDevice::open(path).map_err(CacheError::Binding)?;
        Self::new(backend, capacity)
    }
}

impl<B: BlockDevice> SlotCache<B> {
    /// Wrap an already-bound device in a cache
    ///
    /// Fails if `capacity` is zero or not a multiple of the device's sector
    /// size, or if the backing buffer cannot be allocated.
    pub fn new(backend: B, capacity: usize) -> Result<Self> {
        let sector = backend.sector_size();
        if capacity == 0 || capacity % sector != 0 {
            return Err(CacheError::Alignment { capacity, sector });
        }

        let buf = AlignedBuf::zeroed(capacity, BUFFER_ALIGN)
            .ok_or(CacheError::Allocation(capacity))?;

        Ok(SlotCache {
            backend,
            slot: Slot::new(buf),
            stats: CacheStats::new(),
        })
    }

    /// Read into `dest` at the device cursor, advancing it by the bytes read
    ///
    /// Served from the slot on a hit; refills the slot with one
    /// capacity-sized device read on a miss; bypasses the slot when `dest`
    /// exceeds the capacity.
    pub fn read(&mut self, dest: &mut [u8]) -> Result<usize> {
        let len = dest.len();
        let pos = self.position()?;

        if self.slot.contains(pos, len) {
            let copied = self.slot.copy_out(pos, dest);
            self.backend
                .seek((pos + copied as u64) as i64, Whence::Absolute)?;
            self.stats.record(Outcome::Hit, len as u64);
            return Ok(copied);
        }

        if len <= self.capacity() {
            debug!("cache miss at 0x{:08X} <{}>", pos, len);
            let Self { backend, slot, .. } = self;
            let result = slot.fill(pos, |buf| backend.read(buf));
            self.stats.record(Outcome::Miss, len as u64);

            let filled = match result {
                Ok(n) => n,
                Err(e) => {
                    warn!("fill read failed: {}", e);
                    return Err(e.into());
                }
            };

            let copied = len.min(filled);
            dest[..copied].copy_from_slice(self.slot.filled_prefix(copied));
            self.backend
                .seek((pos + copied as u64) as i64, Whence::Absolute)?;
            return Ok(copied);
        }

        // Oversize request: route around the slot
        self.stats.record(Outcome::Uncacheable, len as u64);
        Ok(self.backend.read(dest)?)
    }

    /// Write `data` at the device cursor, advancing it by the bytes written
    ///
    /// Invalidates the slot if the write overlaps, touches, or encloses the
    /// cached range, then passes the write through. Nothing is retained:
    /// there is no write-back path.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        let pos = self.position()?;
        self.slot.invalidate_range(pos, data.len());
        Ok(self.backend.write(data)?)
    }

    /// Reposition the device cursor; pure pass-through
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<i64> {
        Ok(self.backend.seek(offset, whence)?)
    }

    /// Render the stats report
    ///
    /// With no reads recorded the report is the single line
    /// `no cache call yet`. Otherwise: capacity, hit/miss/uncacheable
    /// percentages (floor) with raw byte counts, and the slot's base offset
    /// (`0xFFFFFFFF` when invalid). If `reset` is set, all counters are
    /// zeroed after rendering.
    pub fn report(&self, reset: bool) -> String {
        let requested = self.stats.requested_bytes();

        let text = if requested == 0 {
            "no cache call yet\n".to_string()
        } else {
            let pos = match self.slot.base_offset() {
                Some(base) => format!("0x{:08X}", base),
                None => "0xFFFFFFFF".to_string(),
            };

            format!(
                "cache size: {}KB\nhit percent: {:02}%/{:02}%/{:02}%, [{}/{}/{}/{}]\ncaches stat:\nCache Pos: {}\n",
                self.capacity() / 1024,
                self.stats.hit_percent(),
                self.stats.miss_percent(),
                self.stats.uncacheable_percent(),
                self.stats.hit_bytes(),
                self.stats.miss_bytes(),
                self.stats.uncacheable_bytes(),
                requested,
                pos,
            )
        };

        if reset {
            self.stats.reset();
        }

        text
    }

    /// Get cache capacity in bytes
    pub fn capacity(&self) -> usize {
        self.slot.capacity()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Whether the slot currently holds a valid range
    pub fn is_valid(&self) -> bool {
        self.slot.base_offset().is_some()
    }

    /// Drop the cached range (device and counters remain unchanged)
    pub fn invalidate(&mut self) {
        self.slot.invalidate();
    }

    /// Borrow the wrapped device
    pub fn get_ref(&self) -> &B {
        &self.backend
    }

    /// Unwrap the cache, returning the device
    pub fn into_inner(self) -> B {
        self.backend
    }

    /// Current device cursor position
    fn position(&mut self) -> Result<u64> {
        Ok(self.backend.seek(0, Whence::Current)? as u64)
    }
}
