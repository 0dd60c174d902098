//! Buffer pool management for OxbowDB.
//!
//! This crate provides in-memory page caching with:
//! - Fixed-size buffer pool with configurable frame count
//! - Clock (second chance) eviction policy behind a pluggable policy trait
//! - Pin counting to protect frames from eviction while in use
//! - Dirty page tracking with synchronous write-back on eviction
//!
//! The pool is fully synchronous: every operation runs to completion on the
//! calling thread, and callers provide external serialization if the pool is
//! shared.

mod frame;
mod page_table;
mod pool;
mod replacer;
mod store;

pub use frame::{FrameDesc, FrameId};
pub use pool::{BufferPool, BufferPoolConfig, BufferPoolStats, PinMode};
pub use replacer::{ClockReplacer, Replacer};
pub use store::PageStore;
