//! Disk-layer interface used by the buffer pool.

use oxbow_common::page::{PageId, PAGE_SIZE};
use oxbow_common::Result;

/// Page-granular persistent storage underneath the buffer pool.
///
/// The pool is the only caller; content crosses this boundary by copy into
/// and out of caller-provided buffers, never by aliasing frame storage.
/// Implementations are synchronous: each call completes or fails before
/// returning.
pub trait PageStore {
    /// Allocates `run_length` contiguous pages and returns the first ID.
    fn allocate_run(&mut self, run_length: u32) -> Result<PageId>;

    /// Returns an allocated page to the store for future reuse.
    fn deallocate(&mut self, page_id: PageId) -> Result<()>;

    /// Reads an allocated page into `buf`.
    fn read_page(&mut self, page_id: PageId, buf: &mut [u8; PAGE_SIZE]) -> Result<()>;

    /// Writes a page. Writes to deallocated (but previously allocated) pages
    /// are permitted so that a lazily recycled frame can still be written
    /// back when it is finally evicted.
    fn write_page(&mut self, page_id: PageId, data: &[u8; PAGE_SIZE]) -> Result<()>;
}
