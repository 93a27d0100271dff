//! Frame scheduling on top of winit redraws
//!
//! The event loop waits for events; every frame the animation asks for turns
//! into a `request_redraw`, and the `RedrawRequested` handler takes the due
//! frame back out of the queue.

use std::sync::Arc;
use winit::window::Window;

use gasket_core::{FrameHandle, FrameQueue, FrameRequester};

/// Something that can be asked to redraw
pub trait RedrawTarget {
    fn request_redraw(&self);
}

impl RedrawTarget for Arc<Window> {
    fn request_redraw(&self) {
        Window::request_redraw(self);
    }
}

/// A [`FrameQueue`] that wakes the window when a frame is requested
pub struct RedrawRequester<T: RedrawTarget> {
    queue: FrameQueue,
    target: T,
}

impl<T: RedrawTarget> RedrawRequester<T> {
    pub fn new(target: T) -> Self {
        Self {
            queue: FrameQueue::new(),
            target,
        }
    }

    /// Take the frame that is due on this redraw, if any
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.queue.take_due()
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        self.queue.has_pending()
    }
}

impl<T: RedrawTarget> FrameRequester for RedrawRequester<T> {
    fn request_next_frame(&mut self) -> FrameHandle {
        let handle = self.queue.request_next_frame();
        self.target.request_redraw();
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.queue.cancel(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingTarget {
        redraws: Cell<u32>,
    }

    impl RedrawTarget for &CountingTarget {
        fn request_redraw(&self) {
            self.redraws.set(self.redraws.get() + 1);
        }
    }

    #[test]
    fn test_request_wakes_target() {
        let target = CountingTarget::default();
        let mut frames = RedrawRequester::new(&target);

        let handle = frames.request_next_frame();
        assert_eq!(target.redraws.get(), 1);
        assert!(frames.has_pending());
        assert_eq!(frames.take_due(), Some(handle));
        assert!(!frames.has_pending());
    }

    #[test]
    fn test_cancel_clears_pending() {
        let target = CountingTarget::default();
        let mut frames = RedrawRequester::new(&target);

        let handle = frames.request_next_frame();
        frames.cancel(handle);
        // The redraw may still arrive, but no frame is due
        assert_eq!(frames.take_due(), None);
        assert_eq!(target.redraws.get(), 1);
    }
}
