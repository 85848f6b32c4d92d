//! Error types for slotcache

use std::fmt;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Error types for cache construction and operation
#[derive(Debug)]
pub enum CacheError {
    /// Capacity is zero or not a multiple of the device sector size
    Alignment {
        /// Requested cache capacity in bytes
        capacity: usize,
        /// Device sector size in bytes
        sector: usize,
    },

    /// Backing buffer could not be allocated
    Allocation(usize),

    /// Backend device could not be opened
    Binding(blockdev::Error),

    /// Device error during a read, write, or seek
    Device(blockdev::Error),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Alignment { capacity, sector } => write!(
                f,
                "Capacity {} is not a positive multiple of sector size {}",
                capacity, sector
            ),
            CacheError::Allocation(size) => {
                write!(f, "Failed to allocate {} byte cache buffer", size)
            }
            CacheError::Binding(e) => write!(f, "Failed to bind backend device: {}", e),
            CacheError::Device(e) => write!(f, "Device error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Binding(e) | CacheError::Device(e) => Some(e),
            _ => None,
        }
    }
}

impl From<blockdev::Error> for CacheError {
    fn from(err: blockdev::Error) -> Self {
        CacheError::Device(err)
    }
}
