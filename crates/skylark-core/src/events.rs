//! Observer channels
//!
//! Each subscriber gets its own inbox, so several independent reactions can
//! listen to the same signal. Subscribing and unsubscribing are single calls,
//! which lets a behaviour tie its subscriptions to activation.

/// Identifies one subscription on an [`EventChannel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Broadcast channel with one inbox per subscriber
#[derive(Debug)]
pub struct EventChannel<E> {
    inboxes: Vec<(SubscriberId, Vec<E>)>,
    next_id: u64,
}

impl<E: Clone> EventChannel<E> {
    pub fn new() -> Self {
        Self {
            inboxes: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a new subscriber. It only sees events published from now on.
    pub fn subscribe(&mut self) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.inboxes.push((id, Vec::new()));
        id
    }

    /// Remove a subscriber and discard its undelivered events.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.inboxes.len();
        self.inboxes.retain(|(sub, _)| *sub != id);
        self.inboxes.len() != before
    }

    pub fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.inboxes.iter().any(|(sub, _)| *sub == id)
    }

    /// Deliver an event to every current subscriber
    pub fn publish(&mut self, event: E) {
        for (_, inbox) in &mut self.inboxes {
            inbox.push(event.clone());
        }
    }

    /// Take all pending events for a subscriber, oldest first.
    pub fn drain(&mut self, id: SubscriberId) -> Vec<E> {
        self.inboxes
            .iter_mut()
            .find(|(sub, _)| *sub == id)
            .map(|(_, inbox)| std::mem::take(inbox))
            .unwrap_or_default()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inboxes.len()
    }
}

impl<E: Clone> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Signal {
        Drop,
        Cancel,
    }

    #[test]
    fn test_every_subscriber_sees_event() {
        let mut channel = EventChannel::new();
        let a = channel.subscribe();
        let b = channel.subscribe();

        channel.publish(Signal::Drop);

        assert_eq!(channel.drain(a), vec![Signal::Drop]);
        assert_eq!(channel.drain(b), vec![Signal::Drop]);
        assert!(channel.drain(a).is_empty());
    }

    #[test]
    fn test_unsubscribed_receives_nothing() {
        let mut channel = EventChannel::new();
        let id = channel.subscribe();
        channel.publish(Signal::Cancel);

        assert!(channel.unsubscribe(id));
        assert_eq!(channel.subscriber_count(), 0);
        channel.publish(Signal::Drop);

        assert!(!channel.is_subscribed(id));
        assert!(channel.drain(id).is_empty());
    }

    #[test]
    fn test_late_subscriber_misses_earlier_events() {
        let mut channel = EventChannel::new();
        channel.publish(Signal::Drop);
        let id = channel.subscribe();
        channel.publish(Signal::Cancel);

        assert_eq!(channel.drain(id), vec![Signal::Cancel]);
    }
}
