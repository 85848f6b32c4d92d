//! # blockdev
//!
//! Block device layer: the seek/read/write capability that storage backends
//! expose and that higher layers (caches, tools) consume.
//!
//! ## Architecture
//! - **BlockDevice**: stateful cursor-owning trait (seek, read, write)
//! - **FileDevice**: regular file opened read/write, 512-byte sectors
//! - **MemDevice**: in-memory vector device for tests and benches

#![warn(missing_docs)]

mod device;
mod error;
mod file;
mod mem;

pub use device::{BlockDevice, Whence};
pub use error::{Error, Result};
pub use file::{FileDevice, SECTOR_SIZE};
pub use mem::MemDevice;
