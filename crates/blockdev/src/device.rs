//! Block device capability trait

use crate::error::Result;

/// Origin for a seek operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Offset from the start of the device
    Absolute,

    /// Offset from the current cursor position
    Current,
}

/// A stateful block storage handle.
///
/// The device owns its cursor: `read` and `write` operate at the current
/// position and advance it by the number of bytes transferred. Callers that
/// need the current position seek by zero from [`Whence::Current`].
///
/// Implementations do not synchronize internally; callers must serialize
/// access to a device.
pub trait BlockDevice {
    /// Minimum aligned transfer granularity in bytes
    fn sector_size(&self) -> usize;

    /// Move the cursor and return the new absolute position
    fn seek(&mut self, offset: i64, whence: Whence) -> Result<i64>;

    /// Read up to `buf.len()` bytes at the cursor, advancing it by the
    /// number of bytes read
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write `buf` at the cursor, advancing it by the number of bytes written
    fn write(&mut self, buf: &[u8]) -> Result<usize>;
}
