//! Page identifiers and page content buffers for OxbowDB storage.

use serde::{Deserialize, Serialize};

/// Default page size in bytes (16 KB).
pub const PAGE_SIZE: usize = 16 * 1024;

/// Unique identifier for a disk page.
///
/// Stable for the lifetime of the allocated disk page.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PageId(pub u32);

impl PageId {
    /// Sentinel for "no page".
    pub const INVALID: PageId = PageId(u32::MAX);

    /// Creates a new PageId.
    pub fn new(page_num: u32) -> Self {
        Self(page_num)
    }

    /// Returns true if this is a valid page ID.
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    /// Returns the underlying page number.
    pub fn page_num(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed-size page content buffer.
///
/// Content crossing the buffer pool boundary is always moved by copy: a
/// caller's `Page` and a frame's storage are never the same allocation after
/// a pool call returns.
#[derive(Clone)]
pub struct Page {
    data: Box<[u8; PAGE_SIZE]>,
}

impl Page {
    /// Creates a new zeroed page.
    pub fn new() -> Self {
        Self {
            data: Box::new([0u8; PAGE_SIZE]),
        }
    }

    /// Returns the page bytes.
    #[inline]
    pub fn data(&self) -> &[u8; PAGE_SIZE] {
        &self.data
    }

    /// Returns the page bytes for writing.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8; PAGE_SIZE] {
        &mut self.data
    }

    /// Copies data into the page, truncated to the page size.
    pub fn copy_from(&mut self, src: &[u8]) {
        let len = src.len().min(PAGE_SIZE);
        self.data[..len].copy_from_slice(&src[..len]);
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("len", &PAGE_SIZE)
            .field("prefix", &&self.data[..8])
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_constant() {
        assert_eq!(PAGE_SIZE, 16 * 1024);
        assert_eq!(PAGE_SIZE, 16384);
    }

    #[test]
    fn test_page_id_new() {
        let page_id = PageId::new(100);
        assert_eq!(page_id.page_num(), 100);
        assert!(page_id.is_valid());
    }

    #[test]
    fn test_page_id_invalid_sentinel() {
        assert!(!PageId::INVALID.is_valid());
        assert_ne!(PageId::new(0), PageId::INVALID);
    }

    #[test]
    fn test_page_id_display() {
        assert_eq!(PageId::new(123).to_string(), "123");
        assert_eq!(PageId::new(0).to_string(), "0");
    }

    #[test]
    fn test_page_id_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(PageId::new(1));
        set.insert(PageId::new(2));
        set.insert(PageId::new(1)); // Duplicate

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_page_id_ordering() {
        assert!(PageId::new(1) < PageId::new(2));
        assert!(PageId::new(100) < PageId::INVALID);
    }

    #[test]
    fn test_page_id_serde_roundtrip() {
        let original = PageId::new(500);
        let serialized = serde_json::to_string(&original).unwrap();
        let deserialized: PageId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_page_new_is_zeroed() {
        let page = Page::new();
        assert!(page.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_page_data_mut() {
        let mut page = Page::new();
        page.data_mut()[0] = 0xAB;
        page.data_mut()[PAGE_SIZE - 1] = 0xCD;

        assert_eq!(page.data()[0], 0xAB);
        assert_eq!(page.data()[PAGE_SIZE - 1], 0xCD);
    }

    #[test]
    fn test_page_copy_from() {
        let mut page = Page::new();
        page.copy_from(&[1, 2, 3, 4, 5]);

        assert_eq!(&page.data()[..5], &[1, 2, 3, 4, 5]);
        assert_eq!(page.data()[5], 0);
    }

    #[test]
    fn test_page_copy_from_truncates() {
        let mut page = Page::new();
        let oversized = vec![0xFFu8; PAGE_SIZE + 100];
        page.copy_from(&oversized);

        assert!(page.data().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_page_clone_is_independent() {
        let mut page = Page::new();
        page.data_mut()[0] = 0xAA;

        let mut copy = page.clone();
        copy.data_mut()[0] = 0xBB;

        assert_eq!(page.data()[0], 0xAA);
        assert_eq!(copy.data()[0], 0xBB);
    }

    #[test]
    fn test_page_debug() {
        let page = Page::new();
        let debug_str = format!("{:?}", page);
        assert!(debug_str.contains("Page"));
        assert!(debug_str.contains("len"));
    }
}
