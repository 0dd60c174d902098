//! Disk manager for page-granular file I/O.

use oxbow_buffer::PageStore;
use oxbow_common::page::{PageId, PAGE_SIZE};
use oxbow_common::{OxbowError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Name of the data file inside the data directory.
const DATA_FILE: &str = "oxbow.dat";

/// Configuration for the disk manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskManagerConfig {
    /// Base directory for the data file.
    pub data_dir: PathBuf,
    /// Enable fsync after writes.
    pub fsync_enabled: bool,
}

impl Default for DiskManagerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            fsync_enabled: true,
        }
    }
}

/// Manages reading and writing pages of a single flat data file.
///
/// Pages are addressed by page number times the page size. Allocation state
/// is a high-water page count plus an in-memory set of freed pages;
/// `allocate_run` prefers a contiguous run of freed pages and extends the
/// file otherwise. The free set is rebuilt empty on reopen, so a restarted
/// manager allocates from the high-water mark until pages are freed again.
pub struct DiskManager {
    /// Configuration.
    config: DiskManagerConfig,
    /// The data file handle.
    file: File,
    /// Number of pages the file has ever held (high-water mark).
    num_pages: u32,
    /// Page numbers below the high-water mark that are free for reuse.
    free: BTreeSet<u32>,
}

impl DiskManager {
    /// Creates a new disk manager, creating the data file if needed.
    pub fn new(config: DiskManagerConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let path = config.data_dir.join(DATA_FILE);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)?;

        let file_size = file.metadata()?.len();
        let num_pages = (file_size / PAGE_SIZE as u64) as u32;

        Ok(Self {
            config,
            file,
            num_pages,
            free: BTreeSet::new(),
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Returns the number of pages in the data file.
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// Returns the number of freed pages awaiting reuse.
    pub fn free_page_count(&self) -> usize {
        self.free.len()
    }

    /// Returns true if the page is currently allocated.
    pub fn is_allocated(&self, page_id: PageId) -> bool {
        page_id.0 < self.num_pages && !self.free.contains(&page_id.0)
    }

    /// Flushes all pending writes to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    fn page_offset(page_num: u32) -> u64 {
        (page_num as u64) * (PAGE_SIZE as u64)
    }

    /// Finds the first contiguous run of `run_length` freed pages.
    fn find_free_run(&self, run_length: u32) -> Option<u32> {
        let mut run_start = None;
        let mut run_len = 0u32;

        for &page_num in &self.free {
            match run_start {
                Some(start) if page_num == start + run_len => run_len += 1,
                _ => {
                    run_start = Some(page_num);
                    run_len = 1;
                }
            }
            if run_len == run_length {
                return run_start;
            }
        }
        None
    }

    /// Writes a zeroed page at the given page number.
    fn write_zero_page(&mut self, page_num: u32) -> Result<()> {
        self.file.seek(SeekFrom::Start(Self::page_offset(page_num)))?;
        self.file.write_all(&[0u8; PAGE_SIZE])?;
        Ok(())
    }
}

impl PageStore for DiskManager {
    /// Allocates `run_length` contiguous pages, reusing a freed run when one
    /// exists and extending the file otherwise. New pages read as zeroes.
    fn allocate_run(&mut self, run_length: u32) -> Result<PageId> {
        if run_length == 0 {
            return Err(OxbowError::InvalidRunLength);
        }

        let first = match self.find_free_run(run_length) {
            Some(start) => {
                for page_num in start..start + run_length {
                    self.free.remove(&page_num);
                }
                start
            }
            None => {
                let start = self.num_pages;
                self.num_pages = start + run_length;
                start
            }
        };

        // Zero the run so reused pages do not leak their previous content.
        for page_num in first..first + run_length {
            self.write_zero_page(page_num)?;
        }
        if self.config.fsync_enabled {
            self.file.sync_all()?;
        }

        Ok(PageId::new(first))
    }

    fn deallocate(&mut self, page_id: PageId) -> Result<()> {
        if !self.is_allocated(page_id) {
            return Err(OxbowError::PageNotFound { page_id });
        }
        self.free.insert(page_id.0);
        Ok(())
    }

    fn read_page(&mut self, page_id: PageId, buf: &mut [u8; PAGE_SIZE]) -> Result<()> {
        if !self.is_allocated(page_id) {
            return Err(OxbowError::PageNotFound { page_id });
        }

        self.file.seek(SeekFrom::Start(Self::page_offset(page_id.0)))?;
        self.file.read_exact(buf)?;
        Ok(())
    }

    /// Writes a page. Freed pages below the high-water mark are writable so
    /// that a lazily recycled frame can still be written back on eviction.
    fn write_page(&mut self, page_id: PageId, data: &[u8; PAGE_SIZE]) -> Result<()> {
        if page_id.0 >= self.num_pages {
            return Err(OxbowError::PageNotFound { page_id });
        }

        self.file.seek(SeekFrom::Start(Self::page_offset(page_id.0)))?;
        self.file.write_all(data)?;

        if self.config.fsync_enabled {
            self.file.sync_all()?;
        }

        Ok(())
    }
}

impl Drop for DiskManager {
    fn drop(&mut self) {
        let _ = self.file.sync_all();
    }
}
