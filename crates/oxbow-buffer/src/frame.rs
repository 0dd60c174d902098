//! Buffer frame descriptors.

use oxbow_common::page::PageId;

/// Unique identifier for a frame in the buffer pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub u32);

impl FrameId {
    /// Invalid frame ID.
    pub const INVALID: FrameId = FrameId(u32::MAX);

    /// Returns true if this is a valid frame ID.
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    /// Returns the frame ID as a slot index.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame:{}", self.0)
    }
}

/// Per-frame metadata: which page the frame holds and in what state.
///
/// A frame starts invalid and becomes valid the first time it is chosen as a
/// load target. It returns to invalid only when the replacement policy picks
/// it as a victim for a different page. The descriptor is owned exclusively
/// by its slot in the pool's frame array.
#[derive(Debug, Clone)]
pub struct FrameDesc {
    /// Page currently held by this frame (INVALID while the frame is invalid).
    page_id: PageId,
    /// Number of users currently holding this page.
    pin_count: u32,
    /// Whether the frame content has been modified relative to disk.
    dirty: bool,
    /// Whether the frame has ever been loaded.
    valid: bool,
    /// Second-chance bit for the clock sweep.
    referenced: bool,
}

impl FrameDesc {
    /// Creates a descriptor for a never-loaded frame.
    pub fn new() -> Self {
        Self {
            page_id: PageId::INVALID,
            pin_count: 0,
            dirty: false,
            valid: false,
            referenced: false,
        }
    }

    /// Returns the page held by this frame.
    #[inline]
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Returns the current pin count.
    #[inline]
    pub fn pin_count(&self) -> u32 {
        self.pin_count
    }

    /// Returns true if this frame is pinned.
    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.pin_count > 0
    }

    /// Returns true if this frame is dirty.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Sets the dirty flag.
    #[inline]
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Returns true if this frame has ever been loaded.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the second-chance bit.
    #[inline]
    pub fn referenced(&self) -> bool {
        self.referenced
    }

    /// Sets the second-chance bit.
    #[inline]
    pub fn set_referenced(&mut self, referenced: bool) {
        self.referenced = referenced;
    }

    /// Increments the pin count and returns the new count.
    ///
    /// Re-pinning does not touch the referenced bit: second-chance status is
    /// granted by unpin-to-zero and revoked by the clock sweep, nothing else.
    #[inline]
    pub fn pin(&mut self) -> u32 {
        self.pin_count += 1;
        self.pin_count
    }

    /// Decrements the pin count and returns the new count.
    ///
    /// When the count reaches zero the referenced bit is set, granting the
    /// frame one extra sweep of protection before it becomes a victim.
    /// Callers must check `is_pinned` first; the count never underflows.
    #[inline]
    pub fn unpin(&mut self) -> u32 {
        debug_assert!(self.pin_count > 0, "unpin on unpinned frame");
        self.pin_count -= 1;
        if self.pin_count == 0 {
            self.referenced = true;
        }
        self.pin_count
    }

    /// Takes ownership of the frame for a freshly loaded page.
    ///
    /// Leaves the frame valid, pinned once, clean, and unreferenced.
    pub fn load(&mut self, page_id: PageId) {
        self.page_id = page_id;
        self.pin_count = 1;
        self.dirty = false;
        self.valid = true;
        self.referenced = false;
    }

    /// Resets the descriptor to the never-loaded state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for FrameDesc {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_id_validity() {
        let valid = FrameId(0);
        let invalid = FrameId::INVALID;

        assert!(valid.is_valid());
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_frame_id_display() {
        let frame_id = FrameId(42);
        assert_eq!(frame_id.to_string(), "frame:42");
    }

    #[test]
    fn test_frame_desc_new() {
        let desc = FrameDesc::new();

        assert_eq!(desc.page_id(), PageId::INVALID);
        assert_eq!(desc.pin_count(), 0);
        assert!(!desc.is_pinned());
        assert!(!desc.is_dirty());
        assert!(!desc.is_valid());
        assert!(!desc.referenced());
    }

    #[test]
    fn test_frame_desc_load() {
        let mut desc = FrameDesc::new();
        desc.load(PageId::new(7));

        assert_eq!(desc.page_id(), PageId::new(7));
        assert_eq!(desc.pin_count(), 1);
        assert!(desc.is_valid());
        assert!(!desc.is_dirty());
        assert!(!desc.referenced());
    }

    #[test]
    fn test_frame_desc_pin_unpin() {
        let mut desc = FrameDesc::new();
        desc.load(PageId::new(1));

        assert_eq!(desc.pin(), 2);
        assert_eq!(desc.pin_count(), 2);

        assert_eq!(desc.unpin(), 1);
        assert!(desc.is_pinned());
        assert!(!desc.referenced());

        assert_eq!(desc.unpin(), 0);
        assert!(!desc.is_pinned());
    }

    #[test]
    fn test_unpin_to_zero_sets_referenced() {
        let mut desc = FrameDesc::new();
        desc.load(PageId::new(1));
        desc.pin();

        // 2 -> 1: still pinned, no second chance yet
        desc.unpin();
        assert!(!desc.referenced());

        // 1 -> 0: second chance granted
        desc.unpin();
        assert!(desc.referenced());
    }

    #[test]
    fn test_repin_does_not_touch_referenced() {
        let mut desc = FrameDesc::new();
        desc.load(PageId::new(1));
        desc.unpin();
        assert!(desc.referenced());

        desc.pin();
        assert!(desc.referenced());

        desc.set_referenced(false);
        desc.pin();
        assert!(!desc.referenced());
    }

    #[test]
    fn test_load_clears_previous_state() {
        let mut desc = FrameDesc::new();
        desc.load(PageId::new(1));
        desc.set_dirty(true);
        desc.unpin();
        assert!(desc.referenced());

        desc.load(PageId::new(2));
        assert_eq!(desc.page_id(), PageId::new(2));
        assert_eq!(desc.pin_count(), 1);
        assert!(!desc.is_dirty());
        assert!(!desc.referenced());
        assert!(desc.is_valid());
    }

    #[test]
    fn test_frame_desc_reset() {
        let mut desc = FrameDesc::new();
        desc.load(PageId::new(5));
        desc.set_dirty(true);

        desc.reset();

        assert_eq!(desc.page_id(), PageId::INVALID);
        assert_eq!(desc.pin_count(), 0);
        assert!(!desc.is_dirty());
        assert!(!desc.is_valid());
        assert!(!desc.referenced());
    }
}
