//! File-backed block device

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::device::{BlockDevice, Whence};
use crate::error::{Error, Result};

/// Default sector size for file devices (512 bytes)
pub const SECTOR_SIZE: usize = 512;

/// Block device backed by a regular file
///
/// The file is opened read/write; the device cursor is the file cursor.
pub struct FileDevice {
    file: File,
    sector_size: usize,
}

impl FileDevice {
    /// Open an existing file as a device
    ///
    /// # Arguments
    /// * `path` - File path
    ///
    /// # Returns
    /// * `Result<FileDevice>` - Device handle positioned at offset 0
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;

        Ok(FileDevice {
            file,
            sector_size: SECTOR_SIZE,
        })
    }

    /// Create a new file (or truncate an existing one) as a device
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        Ok(FileDevice {
            file,
            sector_size: SECTOR_SIZE,
        })
    }

    /// Override the advertised sector size
    pub fn with_sector_size(mut self, sector_size: usize) -> Self {
        self.sector_size = sector_size;
        self
    }
}

impl BlockDevice for FileDevice {
    fn sector_size(&self) -> usize {
        self.sector_size
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<i64> {
        let target = match whence {
            Whence::Absolute => {
                if offset < 0 {
                    return Err(Error::OutOfRange(offset));
                }
                SeekFrom::Start(offset as u64)
            }
            Whence::Current => SeekFrom::Current(offset),
        };

        let pos = self.file.seek(target)?;
        Ok(pos as i64)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.file.read(buf)?)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        Ok(self.file.write(buf)?)
    }
}
