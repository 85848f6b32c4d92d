//! Error types for blockdev

use std::fmt;
use std::io;

/// Result type alias for device operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for device operations
#[derive(Debug)]
pub enum Error {
    /// I/O error from the underlying storage
    Io(io::Error),

    /// Seek target before the start of the device
    OutOfRange(i64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::OutOfRange(offset) => write!(f, "Seek out of range: {}", offset),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
