//! The run-once-next-frame queue.
//!
//! Callbacks pushed during a frame land in the `next` buffer. At the start of
//! the following frame the buffers are swapped and only the swapped-out
//! batch runs; anything pushed while that batch runs waits for another frame.

use std::fmt;

use crate::dom::tree::Dom;

/// A callback scheduled for the next frame.
pub type Deferred = Box<dyn FnOnce(&mut Dom)>;

/// Double-buffered next-frame queue.
#[derive(Default)]
pub struct FrameQueue {
    next: Vec<Deferred>,
    current: Vec<Deferred>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `callback` for the next frame.
    pub fn push(&mut self, callback: Deferred) {
        self.next.push(callback);
    }

    /// Callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// Swap buffers and hand out the batch that should run this frame.
    pub fn begin_frame(&mut self) -> Vec<Deferred> {
        std::mem::swap(&mut self.next, &mut self.current);
        std::mem::take(&mut self.current)
    }
}

impl fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameQueue").field("pending", &self.next.len()).finish()
    }
}

/// Run the batch scheduled for this frame. Returns how many callbacks ran.
pub fn drain(dom: &mut Dom) -> usize {
    let batch = dom.queue_mut().begin_frame();
    let count = batch.len();
    for callback in batch {
        callback(dom);
    }
    count
}

// ===========================================================================
// Tests
// ===========================================================================
