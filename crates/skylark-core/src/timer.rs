//! Cancellable delayed tasks driven by the simulation clock
//!
//! A [`TimerQueue`] never runs code on its own. The owner advances it from its
//! tick and reacts to whatever fired, so timers and the state they touch live
//! on the same thread and step boundary.

/// Handle to a scheduled timer. Handles are never reused within a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct PendingTimer<T> {
    handle: TimerHandle,
    remaining: f32,
    payload: T,
}

/// Queue of one-shot timers carrying a payload
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    timers: Vec<PendingTimer<T>>,
    next_id: u64,
}

impl<T> TimerQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `payload` to fire after `delay` seconds of advanced time.
    pub fn schedule(&mut self, delay: f32, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(PendingTimer {
            handle,
            remaining: delay.max(0.0),
            payload,
        });
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Whether the timer is still waiting to fire
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Seconds left before the timer fires, if it is pending
    pub fn remaining(&self, handle: TimerHandle) -> Option<f32> {
        self.timers
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.remaining)
    }

    /// Advance every timer by `dt` and return the ones that fired.
    ///
    /// Fired timers come out most-overdue first; ties keep scheduling order.
    pub fn advance(&mut self, dt: f32) -> Vec<(TimerHandle, T)> {
        for timer in &mut self.timers {
            timer.remaining -= dt;
        }

        let (mut fired, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|t| t.remaining <= 0.0);
        self.timers = pending;

        fired.sort_by(|a, b| {
            a.remaining
                .total_cmp(&b.remaining)
                .then(a.handle.cmp(&b.handle))
        });
        fired.into_iter().map(|t| (t.handle, t.payload)).collect()
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule(0.1, "expire");

        assert!(queue.advance(0.05).is_empty());
        assert!(queue.is_pending(handle));

        let fired = queue.advance(0.06);
        assert_eq!(fired, vec![(handle, "expire")]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule(0.1, ());

        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        assert!(queue.advance(1.0).is_empty());
    }

    #[test]
    fn test_fired_in_due_order() {
        let mut queue = TimerQueue::new();
        let late = queue.schedule(0.3, 'b');
        let early = queue.schedule(0.1, 'a');

        let fired = queue.advance(0.5);
        assert_eq!(fired, vec![(early, 'a'), (late, 'b')]);
    }

    #[test]
    fn test_handles_are_not_reused() {
        let mut queue = TimerQueue::new();
        let first = queue.schedule(0.1, ());
        queue.advance(0.2);
        let second = queue.schedule(0.1, ());
        assert_ne!(first, second);
        assert!(!queue.is_pending(first));
    }

    #[test]
    fn test_remaining_counts_down() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule(0.2, ());
        queue.advance(0.05);
        let left = queue.remaining(handle).unwrap();
        assert!((left - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_clear_drops_pending() {
        let mut queue = TimerQueue::new();
        let first = queue.schedule(0.1, 1);
        queue.schedule(0.2, 2);
        assert_eq!(queue.len(), 2);

        queue.clear();
        assert!(queue.is_empty());
        assert!(!queue.is_pending(first));
        assert!(queue.advance(1.0).is_empty());

        let next = queue.schedule(0.1, 3);
        assert_ne!(next, first);
    }
}
