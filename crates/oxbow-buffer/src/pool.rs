//! Buffer pool manager.

use crate::frame::{FrameDesc, FrameId};
use crate::page_table::PageTable;
use crate::replacer::{ClockReplacer, Replacer};
use crate::store::PageStore;
use oxbow_common::page::{Page, PageId, PAGE_SIZE};
use oxbow_common::{OxbowError, Result};
use sysinfo::System;

/// How `pin_page` obtains content for a page that is not resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PinMode {
    /// Read the page from disk into the frame.
    LoadFromDisk = 0,
    /// Seed the frame from the caller's buffer. Used when the caller is
    /// constructing a brand-new page whose disk content is meaningless.
    InitFromCaller = 1,
}

impl TryFrom<u8> for PinMode {
    type Error = OxbowError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(PinMode::LoadFromDisk),
            1 => Ok(PinMode::InitFromCaller),
            other => Err(OxbowError::InvalidPinMode(other)),
        }
    }
}

/// Configuration for the buffer pool.
#[derive(Debug, Clone)]
pub struct BufferPoolConfig {
    /// Number of frames in the pool.
    pub num_frames: usize,
}

impl Default for BufferPoolConfig {
    fn default() -> Self {
        Self { num_frames: 1024 }
    }
}

/// Buffer pool manager.
///
/// Multiplexes a fixed array of in-memory frames over the disk page space,
/// with:
/// - Page ID to frame ID mapping for resident pages
/// - Pluggable replacement policy (clock by default) for eviction
/// - Pin counting to protect in-use frames
/// - Dirty tracking with synchronous write-back before frame reuse
///
/// All operations are synchronous and take `&mut self`; callers serialize
/// access externally if the pool is shared.
pub struct BufferPool<D> {
    /// Configuration.
    config: BufferPoolConfig,
    /// Per-frame descriptors.
    frames: Vec<FrameDesc>,
    /// Per-frame page content, indexed in lockstep with `frames`.
    contents: Vec<Box<[u8; PAGE_SIZE]>>,
    /// Page ID to frame ID mapping for resident pages.
    page_table: PageTable,
    /// Page replacement policy.
    replacer: Box<dyn Replacer>,
    /// Underlying page store.
    disk: D,
}

impl<D: PageStore> BufferPool<D> {
    /// Creates a new buffer pool with the clock replacement policy.
    pub fn new(config: BufferPoolConfig, disk: D) -> Self {
        Self::with_replacer(config, disk, Box::new(ClockReplacer::new()))
    }

    /// Creates a buffer pool with a caller-supplied replacement policy.
    pub fn with_replacer(
        config: BufferPoolConfig,
        disk: D,
        replacer: Box<dyn Replacer>,
    ) -> Self {
        let num_frames = config.num_frames;

        let frames: Vec<_> = (0..num_frames).map(|_| FrameDesc::new()).collect();
        let contents: Vec<_> = (0..num_frames)
            .map(|_| Box::new([0u8; PAGE_SIZE]))
            .collect();

        Self {
            config,
            frames,
            contents,
            page_table: PageTable::new(num_frames),
            replacer,
            disk,
        }
    }

    /// Creates a buffer pool sized to 25% of available system RAM.
    ///
    /// Queries the system for available memory and allocates 25% of it for
    /// the buffer pool. Minimum 1,000 frames to ensure useful caching even
    /// on low-memory systems.
    pub fn auto_sized(disk: D) -> Self {
        let mut sys = System::new_all();
        sys.refresh_memory();

        let available_bytes = sys.available_memory() as usize;
        let target_bytes = available_bytes / 4; // 25% of available RAM
        let num_frames = (target_bytes / PAGE_SIZE).max(1_000);

        Self::new(BufferPoolConfig { num_frames }, disk)
    }

    /// Returns the number of frames in the pool.
    pub fn num_frames(&self) -> usize {
        self.config.num_frames
    }

    /// Returns the number of frames with a pin count of zero.
    ///
    /// Never-loaded frames count too; this is the pool's headroom for new
    /// pins, and `allocate_run` uses it as its pre-check.
    pub fn unpinned_count(&self) -> usize {
        self.frames.iter().filter(|f| !f.is_pinned()).count()
    }

    /// Returns the number of pages currently resident.
    pub fn page_count(&self) -> usize {
        self.page_table.len()
    }

    /// Returns true if a page is resident in the pool.
    pub fn contains(&self, page_id: PageId) -> bool {
        self.page_table.contains(page_id)
    }

    /// Returns the frame holding a page, if resident.
    pub fn frame_of(&self, page_id: PageId) -> Option<FrameId> {
        self.page_table.get(page_id)
    }

    /// Returns the underlying page store.
    pub fn disk(&self) -> &D {
        &self.disk
    }

    /// Returns the underlying page store for direct access.
    pub fn disk_mut(&mut self) -> &mut D {
        &mut self.disk
    }

    /// Pins a page into the buffer pool and copies its content into `page`.
    ///
    /// If the page is already resident this only increments the pin count
    /// and copies the frame out; the referenced bit and dirty flag are left
    /// alone, since second-chance status is granted by unpin-to-zero and
    /// revoked by the clock sweep, never by a re-pin.
    ///
    /// On a miss a victim frame is selected, written back if valid and
    /// dirty, then filled according to `mode`: `LoadFromDisk` reads the page
    /// from the store, `InitFromCaller` seeds the frame from `page` (and
    /// reflects the frame's now-authoritative bytes back into `page`).
    ///
    /// Fails with `BufferPoolFull` when no frame can be freed. A failing
    /// call leaves pool state unchanged apart from referenced bits toggled
    /// by the bounded victim scan.
    pub fn pin_page(&mut self, page_id: PageId, page: &mut Page, mode: PinMode) -> Result<()> {
        if let Some(frame_id) = self.page_table.get(page_id) {
            let idx = frame_id.index();
            self.frames[idx].pin();
            page.data_mut().copy_from_slice(&self.contents[idx][..]);
            self.replacer.notify_pin(frame_id);
            return Ok(());
        }

        let frame_id = self
            .replacer
            .pick_victim(&mut self.frames)
            .ok_or(OxbowError::BufferPoolFull)?;
        let idx = frame_id.index();

        // Write back the victim before reuse. On failure nothing in the pool
        // has been touched yet.
        if self.frames[idx].is_valid() && self.frames[idx].is_dirty() {
            let victim_page_id = self.frames[idx].page_id();
            self.disk.write_page(victim_page_id, &self.contents[idx])?;
        }

        match mode {
            PinMode::LoadFromDisk => {
                // Stage the read so a disk failure cannot clobber the
                // victim's bytes.
                let mut staged = Box::new([0u8; PAGE_SIZE]);
                self.disk.read_page(page_id, &mut staged)?;
                self.contents[idx].copy_from_slice(&staged[..]);
                page.data_mut().copy_from_slice(&staged[..]);
            }
            PinMode::InitFromCaller => {
                self.contents[idx].copy_from_slice(&page.data()[..]);
                // The frame is now the authoritative copy; hand its bytes
                // back so the caller observes exactly what got stored.
                page.data_mut().copy_from_slice(&self.contents[idx][..]);
            }
        }

        if self.frames[idx].is_valid() {
            self.page_table.remove(self.frames[idx].page_id());
        }
        self.frames[idx].load(page_id);
        self.page_table.insert(page_id, frame_id);
        self.replacer.notify_new_page(frame_id);
        self.replacer.notify_pin(frame_id);

        Ok(())
    }

    /// Unpins a page, decreasing its pin count.
    ///
    /// The dirty flag is overwritten with `dirty`, not OR-ed: an unpin with
    /// `dirty = false` clears a previously dirty frame, so callers that
    /// modified the page must say so on every unpin. When the count reaches
    /// zero the frame gains one sweep of second-chance protection.
    ///
    /// Fails with `PageNotPinned` if the page is not resident or its pin
    /// count is already zero.
    pub fn unpin_page(&mut self, page_id: PageId, dirty: bool) -> Result<()> {
        let frame_id = self
            .page_table
            .get(page_id)
            .ok_or(OxbowError::PageNotPinned { page_id })?;
        let frame = &mut self.frames[frame_id.index()];

        if !frame.is_pinned() {
            return Err(OxbowError::PageNotPinned { page_id });
        }

        frame.set_dirty(dirty);
        frame.unpin();
        self.replacer.notify_unpin(frame_id);

        Ok(())
    }

    /// Allocates a run of contiguous new pages on disk and pins the first.
    ///
    /// `first_page` provides the first page's initial content; pages two
    /// through `run_length` are allocated on disk only and not loaded into
    /// any frame. Returns the ID of the first page.
    ///
    /// Fails with `BufferPoolFull` if no frame is currently unpinned (a
    /// conservative guard ahead of the actual load), and with `PagePinned`
    /// if the store hands back an ID that is already resident and pinned.
    pub fn allocate_run(&mut self, first_page: &mut Page, run_length: u32) -> Result<PageId> {
        if self.unpinned_count() == 0 {
            return Err(OxbowError::BufferPoolFull);
        }

        let page_id = self.disk.allocate_run(run_length)?;

        // Defensive check against store-level ID reuse.
        if let Some(frame_id) = self.page_table.get(page_id) {
            if self.frames[frame_id.index()].is_pinned() {
                return Err(OxbowError::PagePinned { page_id });
            }
        }

        self.pin_page(page_id, first_page, PinMode::InitFromCaller)?;
        Ok(page_id)
    }

    /// Deallocates a single page from disk.
    ///
    /// Fails with `PagePinned` while the page is resident with a nonzero pin
    /// count. A resident-but-unpinned frame is left in place along with its
    /// page table entry; the slot is recycled only when the replacement
    /// policy eventually selects it.
    pub fn free_page(&mut self, page_id: PageId) -> Result<()> {
        let resident = self.page_table.get(page_id);
        if let Some(frame_id) = resident {
            if self.frames[frame_id.index()].is_pinned() {
                return Err(OxbowError::PagePinned { page_id });
            }
        }

        self.disk.deallocate(page_id)?;

        if let Some(frame_id) = resident {
            self.replacer.notify_free_page(frame_id);
        }

        Ok(())
    }

    /// Writes a resident page to disk if it is dirty, clearing the flag.
    ///
    /// A clean resident page is a no-op. Fails with `PageNotResident` if the
    /// page is not currently in any frame.
    pub fn flush_page(&mut self, page_id: PageId) -> Result<()> {
        let frame_id = self
            .page_table
            .get(page_id)
            .ok_or(OxbowError::PageNotResident { page_id })?;
        let idx = frame_id.index();

        if self.frames[idx].is_dirty() {
            self.disk.write_page(page_id, &self.contents[idx])?;
            self.frames[idx].set_dirty(false);
        }

        Ok(())
    }

    /// Flushes every valid, dirty frame in ascending frame order.
    ///
    /// The sweep continues past per-frame failures so that one bad page does
    /// not keep the rest from reaching disk; the first error is reported
    /// after the sweep completes. Returns the number of pages flushed.
    pub fn flush_all(&mut self) -> Result<usize> {
        let mut flushed = 0;
        let mut first_err = None;

        for idx in 0..self.frames.len() {
            if !self.frames[idx].is_valid() || !self.frames[idx].is_dirty() {
                continue;
            }
            let page_id = self.frames[idx].page_id();
            match self.disk.write_page(page_id, &self.contents[idx]) {
                Ok(()) => {
                    self.frames[idx].set_dirty(false);
                    flushed += 1;
                }
                Err(e) => {
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(flushed),
        }
    }

    /// Returns statistics about the buffer pool.
    pub fn stats(&self) -> BufferPoolStats {
        let mut resident_frames = 0;
        let mut pinned_frames = 0;
        let mut dirty_frames = 0;

        for frame in &self.frames {
            if frame.is_valid() {
                resident_frames += 1;
            }
            if frame.is_pinned() {
                pinned_frames += 1;
            }
            if frame.is_dirty() {
                dirty_frames += 1;
            }
        }

        BufferPoolStats {
            total_frames: self.config.num_frames,
            resident_frames,
            pinned_frames,
            dirty_frames,
        }
    }
}

/// Statistics about the buffer pool.
#[derive(Debug, Clone)]
pub struct BufferPoolStats {
    /// Total number of frames.
    pub total_frames: usize,
    /// Number of frames holding a page.
    pub resident_frames: usize,
    /// Number of pinned frames.
    pub pinned_frames: usize,
    /// Number of dirty frames.
    pub dirty_frames: usize,
}
