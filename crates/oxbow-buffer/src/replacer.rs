//! Page replacement policies for the buffer pool.

use crate::frame::{FrameDesc, FrameId};

/// Trait for victim-selection strategies.
///
/// The pool fires every notify hook at the matching transition point no
/// matter which policy is installed, so policies that keep auxiliary state
/// (an LRU recency list, a random candidate set) stay consistent without the
/// pool knowing which one is plugged in. The clock policy reads everything
/// it needs from the frame descriptors, so its hooks are the default no-ops.
pub trait Replacer {
    /// Selects a victim frame for reuse.
    ///
    /// Returns None if no frame can be freed. The scan may toggle referenced
    /// bits; that is part of the policy's observable behavior, not pool
    /// mutation, so a caller that fails afterwards has nothing to undo.
    fn pick_victim(&mut self, frames: &mut [FrameDesc]) -> Option<FrameId>;

    /// Called after a page is loaded into a frame.
    fn notify_new_page(&mut self, _frame_id: FrameId) {}

    /// Called when a resident page is deallocated on disk.
    fn notify_free_page(&mut self, _frame_id: FrameId) {}

    /// Called after a frame's pin count is incremented.
    fn notify_pin(&mut self, _frame_id: FrameId) {}

    /// Called after a frame's pin count is decremented.
    fn notify_unpin(&mut self, _frame_id: FrameId) {}
}

/// Clock (second chance) replacement.
///
/// A single sweep hand walks the frame array circularly. At each frame:
/// - invalid: immediate victim
/// - unpinned with referenced bit clear: victim
/// - unpinned with referenced bit set: clear the bit and move on
/// - pinned: skip unchanged
///
/// The scan is bounded at two revolutions: the first clears every referenced
/// bit still set, so the second is guaranteed to reach a frame whose bit was
/// already clear if any unpinned frame exists at all.
pub struct ClockReplacer {
    /// Sweep hand, persisted across calls.
    hand: usize,
}

impl ClockReplacer {
    /// Creates a clock replacer with the hand at frame 0.
    pub fn new() -> Self {
        Self { hand: 0 }
    }
}

impl Default for ClockReplacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Replacer for ClockReplacer {
    fn pick_victim(&mut self, frames: &mut [FrameDesc]) -> Option<FrameId> {
        let num_frames = frames.len();
        if num_frames == 0 {
            return None;
        }

        for _ in 0..(2 * num_frames) {
            let idx = self.hand;
            // Advance past every visited frame, victim included, so the next
            // call resumes just beyond wherever this one stopped.
            self.hand = (self.hand + 1) % num_frames;

            let frame = &mut frames[idx];
            if !frame.is_valid() {
                return Some(FrameId(idx as u32));
            }
            if frame.is_pinned() {
                continue;
            }
            if frame.referenced() {
                frame.set_referenced(false);
            } else {
                return Some(FrameId(idx as u32));
            }
        }

        None
    }
}
