//! Animation-frame throttle for pointer input.
//!
//! Pointer moves arrive far faster than frames. [`FrameThrottle`] keeps only the
//! newest value and asks the host to schedule a frame only when none is already
//! scheduled:
//!
//! ```
//! use gridboard::session::{FrameRequest, FrameThrottle};
//!
//! let mut throttle = FrameThrottle::new();
//! assert_eq!(throttle.push(1), FrameRequest::Schedule);
//! assert_eq!(throttle.push(2), FrameRequest::Coalesced);
//!
//! // Frame callback
//! assert_eq!(throttle.take(), Some(2));
//! assert_eq!(throttle.take(), None);
//! ```

/// What the host must do after a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameRequest {
    /// No frame is scheduled: request one and call back on it.
    Schedule,
    /// A frame is already scheduled; the new value replaced the pending one.
    Coalesced,
}

/// Latest-wins buffer with a single in-flight frame flag.
///
/// All operations are O(1). Not thread-safe; use from the UI thread.
#[derive(Debug, Clone)]
pub struct FrameThrottle<T> {
    pending: Option<T>,
    in_flight: bool,
}

impl<T> Default for FrameThrottle<T> {
    fn default() -> Self {
        Self {
            pending: None,
            in_flight: false,
        }
    }
}

impl<T> FrameThrottle<T> {
    /// Empty throttle with no frame in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, superseding any pending one.
    pub fn push(&mut self, value: T) -> FrameRequest {
        self.pending = Some(value);
        if self.in_flight {
            FrameRequest::Coalesced
        } else {
            self.in_flight = true;
            FrameRequest::Schedule
        }
    }

    /// Called from the frame callback: yield the newest value and clear the
    /// in-flight flag so the next push schedules a new frame.
    pub fn take(&mut self) -> Option<T> {
        self.in_flight = false;
        self.pending.take()
    }

    /// Drop the pending value. A frame that still fires finds nothing to do.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.in_flight = false;
    }

    /// True if a value is waiting for a frame.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// True if a frame has been requested and has not fired yet.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}
