//! In-memory block device for tests and benches

use crate::device::{BlockDevice, Whence};
use crate::error::{Error, Result};
use crate::file::SECTOR_SIZE;

/// Block device backed by a byte vector
///
/// Reads clamp at the end of the data; writes past the end extend it,
/// zero-filling any gap between the old end and the cursor.
pub struct MemDevice {
    data: Vec<u8>,
    pos: u64,
    sector_size: usize,
}

impl MemDevice {
    /// Create an empty device
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a device over existing contents, cursor at offset 0
    pub fn from_vec(data: Vec<u8>) -> Self {
        MemDevice {
            data,
            pos: 0,
            sector_size: SECTOR_SIZE,
        }
    }

    /// Override the advertised sector size
    pub fn with_sector_size(mut self, sector_size: usize) -> Self {
        self.sector_size = sector_size;
        self
    }

    /// Borrow the device contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the device, returning its contents
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl Default for MemDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockDevice for MemDevice {
    fn sector_size(&self) -> usize {
        self.sector_size
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<i64> {
        let target = match whence {
            Whence::Absolute => offset,
            Whence::Current => self.pos as i64 + offset,
        };

        if target < 0 {
            return Err(Error::OutOfRange(target));
        }

        self.pos = target as u64;
        Ok(target)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let start = self.pos as usize;
        if start >= self.data.len() {
            return Ok(0);
        }

        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        self.pos += n as u64;

        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let start = self.pos as usize;
        let end = start + buf.len();

        if end > self.data.len() {
            self.data.resize(end, 0);
        }

        self.data[start..end].copy_from_slice(buf);
        self.pos = end as u64;

        Ok(buf.len())
    }
}
