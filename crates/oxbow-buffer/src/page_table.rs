//! Page table mapping resident page IDs to frame slots.

use crate::frame::FrameId;
use oxbow_common::page::PageId;
use std::collections::HashMap;

/// Forward map from resident page ID to frame ID.
///
/// The reverse direction is not kept as a second map: each frame descriptor
/// records the page it holds, so descriptor state plus this map form the
/// bijection over valid frames. On eviction the pool removes the victim's
/// stale entry (read from its descriptor) before inserting the new pairing,
/// which keeps the bijection intact across the swap.
pub struct PageTable {
    map: HashMap<PageId, FrameId>,
}

impl PageTable {
    /// Creates a page table sized for the given number of frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Looks up the frame holding a page.
    #[inline]
    pub fn get(&self, page_id: PageId) -> Option<FrameId> {
        self.map.get(&page_id).copied()
    }

    /// Installs a page-to-frame pairing.
    pub fn insert(&mut self, page_id: PageId, frame_id: FrameId) {
        self.map.insert(page_id, frame_id);
    }

    /// Removes a pairing, returning the frame it pointed at.
    pub fn remove(&mut self, page_id: PageId) -> Option<FrameId> {
        self.map.remove(&page_id)
    }

    /// Returns true if the page is resident.
    pub fn contains(&self, page_id: PageId) -> bool {
        self.map.contains_key(&page_id)
    }

    /// Returns the number of resident pages.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no pages are resident.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over all resident pairings.
    pub fn iter(&self) -> impl Iterator<Item = (PageId, FrameId)> + '_ {
        self.map.iter().map(|(&page_id, &frame_id)| (page_id, frame_id))
    }
}
