//! Short-lived input buffer
//!
//! Remembers the most recent jump or attack press for a fixed window so a
//! press that arrives slightly before it can be acted on is not lost.

use serde::{Deserialize, Serialize};
use skylark_core::{TimerHandle, TimerQueue};
use tracing::debug;

/// Default time a buffered press stays live, in seconds
pub const DEFAULT_BUFFER_TIME: f32 = 0.2;

/// Intent held by the buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferedInput {
    #[default]
    None,
    Attack,
    Jump,
}

/// Holds at most one buffered intent with an expiry timer
#[derive(Debug, Clone)]
pub struct InputBuffer {
    current: BufferedInput,
    buffer_time: f32,
    expiry: Option<TimerHandle>,
    timers: TimerQueue<BufferedInput>,
}

impl InputBuffer {
    /// Create an empty buffer whose presses live for `buffer_time` seconds
    pub fn new(buffer_time: f32) -> Self {
        Self {
            current: BufferedInput::None,
            buffer_time,
            expiry: None,
            timers: TimerQueue::new(),
        }
    }

    /// Currently buffered intent
    pub fn current(&self) -> BufferedInput {
        self.current
    }

    /// Check if an intent is buffered
    pub fn is_live(&self) -> bool {
        self.current != BufferedInput::None
    }

    /// Seconds each press stays buffered
    pub fn buffer_time(&self) -> f32 {
        self.buffer_time
    }

    /// Seconds before the live intent expires
    pub fn time_remaining(&self) -> Option<f32> {
        self.expiry.and_then(|handle| self.timers.remaining(handle))
    }

    /// Record an intent.
    ///
    /// `None` is ignored. Re-buffering the live kind restarts its window;
    /// a different kind replaces the live one.
    pub fn buffer(&mut self, input: BufferedInput) {
        if input == BufferedInput::None {
            return;
        }

        if input == self.current {
            debug!(?input, "Refreshed buffered input");
        } else {
            debug!(?input, replaced = ?self.current, "Buffered input");
        }

        self.cancel_expiry();
        self.current = input;
        self.expiry = Some(self.timers.schedule(self.buffer_time, input));
    }

    /// Clear the buffer immediately. Safe to call when empty.
    pub fn consume(&mut self) {
        self.cancel_expiry();
        self.current = BufferedInput::None;
    }

    /// Advance the expiry timer by `dt`
    pub fn advance(&mut self, dt: f32) {
        for (handle, input) in self.timers.advance(dt) {
            if self.expiry == Some(handle) {
                debug!(?input, "Buffered input expired");
                self.current = BufferedInput::None;
                self.expiry = None;
            }
        }
    }

    fn cancel_expiry(&mut self) {
        if let Some(handle) = self.expiry.take() {
            self.timers.cancel(handle);
        }
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_TIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_after_buffer_time() {
        let mut buffer = InputBuffer::new(0.2);
        assert_eq!(buffer.buffer_time(), 0.2);
        buffer.buffer(BufferedInput::Jump);

        buffer.advance(0.1);
        assert_eq!(buffer.current(), BufferedInput::Jump);

        buffer.advance(0.15);
        assert_eq!(buffer.current(), BufferedInput::None);
        assert_eq!(buffer.time_remaining(), None);
    }

    #[test]
    fn test_rebuffering_same_kind_restarts_window() {
        let mut buffer = InputBuffer::new(0.2);
        buffer.buffer(BufferedInput::Jump);
        buffer.advance(0.18);

        buffer.buffer(BufferedInput::Jump);
        buffer.advance(0.1);

        // 0.28s since the first press, past its original window
        assert_eq!(buffer.current(), BufferedInput::Jump);
        assert_eq!(buffer.timers.len(), 1);

        buffer.advance(0.11);
        assert_eq!(buffer.current(), BufferedInput::None);
    }

    #[test]
    fn test_different_kind_replaces_live_one() {
        let mut buffer = InputBuffer::new(0.2);
        buffer.buffer(BufferedInput::Attack);
        buffer.advance(0.15);
        buffer.buffer(BufferedInput::Jump);

        assert_eq!(buffer.current(), BufferedInput::Jump);

        // The attack's stale timer must not clear the jump
        buffer.advance(0.1);
        assert_eq!(buffer.current(), BufferedInput::Jump);
    }

    #[test]
    fn test_buffering_none_is_noop() {
        let mut buffer = InputBuffer::new(0.2);
        buffer.buffer(BufferedInput::None);
        assert!(!buffer.is_live());

        buffer.buffer(BufferedInput::Attack);
        buffer.buffer(BufferedInput::None);
        assert_eq!(buffer.current(), BufferedInput::Attack);
    }

    #[test]
    fn test_consume_is_idempotent() {
        let mut buffer = InputBuffer::new(0.2);
        buffer.consume();
        assert_eq!(buffer.current(), BufferedInput::None);

        buffer.buffer(BufferedInput::Jump);
        buffer.consume();
        buffer.consume();
        assert_eq!(buffer.current(), BufferedInput::None);
        assert!(buffer.timers.is_empty());
    }

    #[test]
    fn test_consumed_then_rebuffered_keeps_new_window() {
        let mut buffer = InputBuffer::new(0.2);
        buffer.buffer(BufferedInput::Jump);
        buffer.advance(0.15);
        buffer.consume();
        buffer.buffer(BufferedInput::Jump);

        buffer.advance(0.1);
        assert_eq!(buffer.current(), BufferedInput::Jump);
    }
}
