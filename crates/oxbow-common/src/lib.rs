//! OxbowDB common types, errors, and utilities.
//!
//! This crate provides shared definitions used across all OxbowDB components.

pub mod error;
pub mod page;

pub use error::{OxbowError, Result};
pub use page::{Page, PageId, PAGE_SIZE};
