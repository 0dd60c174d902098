//! Storage engine for OxbowDB.
//!
//! This crate provides:
//! - Disk manager for page-granular file I/O
//! - Page allocation and deallocation over a flat page space
//!
//! The disk manager implements the buffer pool's `PageStore` seam, so the
//! pool in `oxbow-buffer` runs against it unchanged.

mod disk;

pub use disk::{DiskManager, DiskManagerConfig};
