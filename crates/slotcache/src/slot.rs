//! The single cache line

use crate::buffer::AlignedBuf;

/// One fixed-capacity cache line over a contiguous device range.
///
/// When valid, the buffer holds exactly the device contents for
/// `[base, base + capacity)` as of the last fill. Created invalid; becomes
/// valid only through [`Slot::fill`], and invalid again through
/// [`Slot::invalidate`] or [`Slot::invalidate_range`]. The base offset is
/// set only after a fill's supply succeeds, so an interrupted fill leaves
/// the slot invalid, never stale.
pub(crate) struct Slot {
    buf: AlignedBuf,
    base: Option<u64>,
}

/// Half-open range membership test: `pos` in `[start, start + len)`
fn within(pos: u64, start: u64, len: usize) -> bool {
    pos >= start && pos < start + len as u64
}

impl Slot {
    pub(crate) fn new(buf: AlignedBuf) -> Self {
        Slot { buf, base: None }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Base offset of the cached range, or `None` when invalid
    pub(crate) fn base_offset(&self) -> Option<u64> {
        self.base
    }

    /// Hit test: valid, and both `pos` and `pos + len` fall strictly inside
    /// `[base, base + capacity)`.
    ///
    /// Both endpoints use the same strict upper bound, so a request ending
    /// exactly at `base + capacity` is not a hit even though every byte of
    /// it is resident.
    pub(crate) fn contains(&self, pos: u64, len: usize) -> bool {
        match self.base {
            Some(base) => {
                within(pos, base, self.capacity())
                    && within(pos + len as u64, base, self.capacity())
            }
            None => false,
        }
    }

    /// Mark the slot invalid; idempotent
    pub(crate) fn invalidate(&mut self) {
        self.base = None;
    }

    /// Invalidate if the write `[pos, pos + len)` touches the cached range:
    /// its start inside the range, its end inside the range, or the write
    /// enclosing the range entirely. A write strictly outside leaves the
    /// slot valid.
    pub(crate) fn invalidate_range(&mut self, pos: u64, len: usize) {
        let Some(base) = self.base else {
            return;
        };

        let write_end = pos + len as u64;
        let slot_end = base + self.capacity() as u64;

        if within(pos, base, self.capacity())
            || within(write_end, base, self.capacity())
            || (pos <= base && write_end >= slot_end)
        {
            self.invalidate();
        }
    }

    /// Refill the slot from `supply`, which reads device bytes into the
    /// buffer and returns how many it produced.
    ///
    /// Invalidates first; the base is set to `base` only if the supply
    /// succeeds, so a failed supply leaves the slot invalid with nothing to
    /// roll back.
    pub(crate) fn fill<E>(
        &mut self,
        base: u64,
        supply: impl FnOnce(&mut [u8]) -> std::result::Result<usize, E>,
    ) -> std::result::Result<usize, E> {
        self.base = None;
        let n = supply(self.buf.as_mut_slice())?;
        self.base = Some(base);
        Ok(n)
    }

    /// Copy cached bytes starting at device offset `pos` into `dest`,
    /// clamped to the end of the cached range. Returns the bytes copied.
    ///
    /// Callers check [`Slot::contains`] first; on an invalid slot this
    /// copies nothing.
    pub(crate) fn copy_out(&self, pos: u64, dest: &mut [u8]) -> usize {
        let Some(base) = self.base else {
            return 0;
        };

        let start = (pos - base) as usize;
        let n = dest.len().min(self.capacity() - start);
        dest[..n].copy_from_slice(&self.buf.as_slice()[start..start + n]);

        n
    }

    /// First `n` bytes of the buffer (the freshly filled prefix)
    pub(crate) fn filled_prefix(&self, n: usize) -> &[u8] {
        &self.buf.as_slice()[..n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BUFFER_ALIGN;

    fn slot(capacity: usize) -> Slot {
        Slot::new(AlignedBuf::zeroed(capacity, BUFFER_ALIGN).unwrap())
    }

    fn filled_slot(capacity: usize, base: u64) -> Slot {
        let mut s = slot(capacity);
        s.fill(base, |buf| {
            for (i, b) in buf.iter_mut().enumerate() {
                *b = i as u8;
            }
            Ok::<usize, ()>(buf.len())
        })
        .unwrap();
        s
    }

    #[test]
    fn test_new_slot_invalid() {
        let s = slot(1024);

        assert_eq!(s.base_offset(), None);
        assert!(!s.contains(0, 1));
    }

    #[test]
    fn test_fill_then_contains() {
        let s = filled_slot(1024, 512);

        assert_eq!(s.base_offset(), Some(512));
        assert!(s.contains(512, 100));
        assert!(s.contains(1000, 500));
        assert!(!s.contains(400, 50));
        assert!(!s.contains(512 + 1024, 1));
    }

    #[test]
    fn test_contains_end_of_slot_boundary() {
        let s = filled_slot(1024, 0);

        // Request ending exactly at base + capacity is not a hit, even
        // though every byte is resident.
        assert!(s.contains(1000, 23));
        assert!(!s.contains(1000, 24));
        assert!(!s.contains(0, 1024));
    }

    #[test]
    fn test_fill_failure_leaves_invalid() {
        let mut s = filled_slot(1024, 0);

        let result = s.fill(2048, |_| Err::<usize, &str>("device gone"));

        assert!(result.is_err());
        assert_eq!(s.base_offset(), None);
    }

    #[test]
    fn test_invalidate_idempotent() {
        let mut s = filled_slot(1024, 0);

        s.invalidate();
        s.invalidate();
        assert_eq!(s.base_offset(), None);
    }

    #[test]
    fn test_invalidate_range_overlap() {
        // Write starting inside the slot
        let mut s = filled_slot(1024, 1024);
        s.invalidate_range(1500, 100);
        assert_eq!(s.base_offset(), None);

        // Write ending inside the slot
        let mut s = filled_slot(1024, 1024);
        s.invalidate_range(1000, 100);
        assert_eq!(s.base_offset(), None);

        // Write enclosing the slot
        let mut s = filled_slot(1024, 1024);
        s.invalidate_range(512, 4096);
        assert_eq!(s.base_offset(), None);
    }

    #[test]
    fn test_invalidate_range_disjoint() {
        let mut s = filled_slot(1024, 1024);

        s.invalidate_range(0, 100);
        assert_eq!(s.base_offset(), Some(1024));

        s.invalidate_range(4096, 100);
        assert_eq!(s.base_offset(), Some(1024));
    }

    #[test]
    fn test_copy_out() {
        let s = filled_slot(256, 100);

        let mut dest = [0u8; 4];
        assert_eq!(s.copy_out(110, &mut dest), 4);
        assert_eq!(dest, [10, 11, 12, 13]);
    }

    #[test]
    fn test_copy_out_clamps_at_slot_end() {
        let s = filled_slot(256, 0);

        let mut dest = [0u8; 16];
        assert_eq!(s.copy_out(250, &mut dest), 6);
    }
}
