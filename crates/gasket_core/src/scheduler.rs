//! Frame scheduling and cancellation
//!
//! An animation run is an explicit loop: each tick asks the
//! [`FrameRequester`] for the next frame and keeps the returned
//! [`FrameHandle`] as its cancellation token. When a frame fires, the
//! [`AnimationLoop`] only ticks if the fired handle is the one it is waiting
//! for, so a frame that was cancelled (or belongs to an earlier run) can
//! never advance the sequencer.

use gasket_math::Mat4;

use crate::sequencer::{Sequencer, Tick};

/// Opaque id of a requested frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Raw id, for logging
    #[inline]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Something that can call back on the next frame
pub trait FrameRequester {
    /// Schedule one frame callback
    fn request_next_frame(&mut self) -> FrameHandle;

    /// Cancel a scheduled callback; unknown or already fired handles are ignored
    fn cancel(&mut self, handle: FrameHandle);
}

/// Single-slot cooperative frame queue
///
/// At most one frame is pending; requesting a new one replaces it. The owner
/// of the event loop calls [`FrameQueue::take_due`] once per frame.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending frame, if any
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Whether a frame is waiting to fire
    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameRequester for FrameQueue {
    fn request_next_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// Outcome of a fired frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameEvent {
    /// The run advanced; draw with this model-view matrix
    Draw(Mat4),
    /// The run completed on this frame; no further frame is scheduled
    Finished,
    /// The frame was not the one the loop waits for and was ignored
    Stale,
}

/// A sequencer driven by self-rescheduling frames
#[derive(Debug, Default)]
pub struct AnimationLoop {
    sequencer: Option<Sequencer>,
    pending: Option<FrameHandle>,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh run, cancelling any run in progress
    pub fn start<F: FrameRequester>(&mut self, total_cycles: u32, frames: &mut F) {
        self.cancel(frames);
        self.sequencer = Some(Sequencer::new(total_cycles));
        self.pending = Some(frames.request_next_frame());
    }

    /// Handle a fired frame
    pub fn on_frame<F: FrameRequester>(&mut self, handle: FrameHandle, frames: &mut F) -> FrameEvent {
        if self.pending != Some(handle) {
            return FrameEvent::Stale;
        }
        self.pending = None;

        let Some(sequencer) = self.sequencer.as_mut() else {
            return FrameEvent::Stale;
        };

        match sequencer.tick() {
            Tick::Running(matrix) => {
                self.pending = Some(frames.request_next_frame());
                FrameEvent::Draw(matrix)
            }
            Tick::Finished => FrameEvent::Finished,
        }
    }

    /// Stop the run; the pending frame, if any, is cancelled
    ///
    /// The sequencer is kept so its last state stays inspectable.
    pub fn cancel<F: FrameRequester>(&mut self, frames: &mut F) {
        if let Some(handle) = self.pending.take() {
            frames.cancel(handle);
        }
    }

    /// Whether a frame is scheduled for this run
    #[inline]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Sequencer of the current or last run
    #[inline]
    pub fn sequencer(&self) -> Option<&Sequencer> {
        self.sequencer.as_ref()
    }
}
