use super::event::Event;
use super::types::Timestamp;
use std::collections::{BTreeMap, VecDeque};

/// Time-ordered queue of pending simulation events
///
/// Events are ordered by timestamp; events sharing a timestamp come out in
/// the order they were enqueued.
#[derive(Debug, Default)]
pub struct EventQueue {
    buckets: BTreeMap<Timestamp, VecDeque<Event>>,
    count: usize,
}

impl EventQueue {
    /// Create a new, empty EventQueue
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
            count: 0,
        }
    }

    /// Insert an event behind any others already queued at the same timestamp
    pub fn enqueue(&mut self, event: Event) {
        self.buckets
            .entry(event.timestamp)
            .or_insert_with(VecDeque::new)
            .push_back(event);
        self.count += 1;
    }

    /// Remove and return the earliest event, or `None` when empty
    pub fn dequeue(&mut self) -> Option<Event> {
        let mut bucket = self.buckets.first_entry()?;
        let event = bucket.get_mut().pop_front();
        if bucket.get().is_empty() {
            bucket.remove();
        }
        if event.is_some() {
            self.count -= 1;
        }
        event
    }

    /// Timestamp of the earliest pending event
    pub fn peek_time(&self) -> Option<Timestamp> {
        self.buckets.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::EventKind;
    use crate::core::types::ProcessId;

    #[test]
    fn test_empty_queue() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.peek_time(), None);
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_dequeue_in_timestamp_order() {
        let mut queue = EventQueue::new();
        for t in [9, 3, 7, 1, 3, 0] {
            queue.enqueue(Event::new(t, EventKind::Dispatch));
        }
        assert_eq!(queue.len(), 6);

        let mut times = Vec::new();
        while let Some(event) = queue.dequeue() {
            times.push(event.timestamp);
        }
        assert_eq!(times, vec![0, 1, 3, 3, 7, 9]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_keep_enqueue_order() {
        let mut queue = EventQueue::new();
        queue.enqueue(Event::new(5, EventKind::Complete(ProcessId::new(1))));
        queue.enqueue(Event::new(2, EventKind::Dispatch));
        queue.enqueue(Event::new(5, EventKind::Dispatch));
        queue.enqueue(Event::new(5, EventKind::Arrival(ProcessId::new(2))));

        assert_eq!(queue.dequeue().map(|e| e.kind), Some(EventKind::Dispatch));
        assert_eq!(
            queue.dequeue().map(|e| e.kind),
            Some(EventKind::Complete(ProcessId::new(1)))
        );
        assert_eq!(queue.dequeue().map(|e| e.kind), Some(EventKind::Dispatch));
        assert_eq!(
            queue.dequeue().map(|e| e.kind),
            Some(EventKind::Arrival(ProcessId::new(2)))
        );
    }

    #[test]
    fn test_enqueue_at_current_time_while_draining() {
        let mut queue = EventQueue::new();
        queue.enqueue(Event::new(4, EventKind::Dispatch));
        queue.enqueue(Event::new(4, EventKind::StartRun));

        let first = queue.dequeue().unwrap();
        queue.enqueue(Event::new(first.timestamp, EventKind::Dispatch));

        assert_eq!(queue.peek_time(), Some(4));
        assert_eq!(queue.dequeue().map(|e| e.kind), Some(EventKind::StartRun));
        assert_eq!(queue.dequeue().map(|e| e.kind), Some(EventKind::Dispatch));
        assert_eq!(queue.len(), 0);
    }
}
