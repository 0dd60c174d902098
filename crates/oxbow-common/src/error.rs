//! Error types for OxbowDB.

use crate::page::PageId;
use thiserror::Error;

/// Result type alias using OxbowError.
pub type Result<T> = std::result::Result<T, OxbowError>;

/// Errors that can occur in OxbowDB operations.
#[derive(Debug, Error)]
pub enum OxbowError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Buffer pool errors
    #[error("Buffer pool full, unable to allocate frame")]
    BufferPoolFull,

    #[error("Page {page_id} is pinned")]
    PagePinned { page_id: PageId },

    #[error("Page {page_id} is not pinned")]
    PageNotPinned { page_id: PageId },

    #[error("Page {page_id} is not resident in the buffer pool")]
    PageNotResident { page_id: PageId },

    #[error("Unrecognized pin mode: {0}")]
    InvalidPinMode(u8),

    // Disk errors
    #[error("Page not found: {page_id}")]
    PageNotFound { page_id: PageId },

    #[error("Run length must be at least one page")]
    InvalidRunLength,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_io_error_conversion() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let oxbow_err: OxbowError = io_err.into();
        assert!(matches!(oxbow_err, OxbowError::Io(_)));
        assert!(oxbow_err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_buffer_pool_full_display() {
        let err = OxbowError::BufferPoolFull;
        assert_eq!(err.to_string(), "Buffer pool full, unable to allocate frame");
    }

    #[test]
    fn test_pin_errors_display() {
        let err = OxbowError::PagePinned {
            page_id: PageId(42),
        };
        assert_eq!(err.to_string(), "Page 42 is pinned");

        let err = OxbowError::PageNotPinned {
            page_id: PageId(42),
        };
        assert_eq!(err.to_string(), "Page 42 is not pinned");

        let err = OxbowError::PageNotResident {
            page_id: PageId(99),
        };
        assert_eq!(err.to_string(), "Page 99 is not resident in the buffer pool");
    }

    #[test]
    fn test_invalid_pin_mode_display() {
        let err = OxbowError::InvalidPinMode(7);
        assert_eq!(err.to_string(), "Unrecognized pin mode: 7");
    }

    #[test]
    fn test_disk_errors_display() {
        let err = OxbowError::PageNotFound {
            page_id: PageId(100),
        };
        assert_eq!(err.to_string(), "Page not found: 100");

        let err = OxbowError::InvalidRunLength;
        assert_eq!(err.to_string(), "Run length must be at least one page");
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(OxbowError::BufferPoolFull)
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OxbowError>();
    }
}
