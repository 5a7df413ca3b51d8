//! Blocking FIFO queue with competing-consumer delivery
//!
//! This module provides the unit of delivery in the routing system:
//! - FIFO ordering of pending messages
//! - Blocking `pop` parked on a condition variable while the queue is empty
//! - Each pushed message handed to exactly one popper
//! - Process-unique identity, independent of the queue name

use crate::core::sync::{lock_or_recover, recover};
use crate::queue::message::Message;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

static NEXT_QUEUE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity token for a queue instance
///
/// The relation registry keys edges by this token, so two queues that share a
/// name are never conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueueId(u64);

impl QueueId {
    fn next() -> Self {
        QueueId(NEXT_QUEUE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Named, thread-safe FIFO of pending messages for one message kind
///
/// Queues are shared as `Arc<Queue<T>>` between the application, the relation
/// registry and any number of producers and consumers. Concurrent poppers
/// compete: a message pushed once is returned by exactly one `pop`.
///
/// A queue that is abandoned while threads are blocked in [`Queue::pop`]
/// leaves those threads parked forever. Callers must not do that.
pub struct Queue<T> {
    id: QueueId,
    name: String,
    pending: Mutex<VecDeque<Message<T>>>,
    available: Condvar,
}

impl<T> Queue<T> {
    pub fn new(name: impl Into<String>) -> Self {
        let queue = Self {
            id: QueueId::next(),
            name: name.into(),
            pending: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
        };
        log::trace!("Created queue '{}' ({})", queue.name, queue.id);
        queue
    }

    pub fn id(&self) -> QueueId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of messages waiting to be popped
    pub fn len(&self) -> usize {
        lock_or_recover(&self.pending, "queue pending").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a message and wake one blocked popper, if any
    pub fn push(&self, message: Message<T>) {
        {
            let mut pending = lock_or_recover(&self.pending, "queue pending");
            pending.push_back(message);
        }
        self.available.notify_one();
    }

    /// Remove and return the head message, blocking while the queue is empty
    pub fn pop(&self) -> Message<T> {
        let mut pending = lock_or_recover(&self.pending, "queue pending");
        loop {
            if let Some(message) = pending.pop_front() {
                return message;
            }
            log::trace!("Queue '{}' ({}) empty, waiting", self.name, self.id);
            // Re-check after every wakeup: spurious wakeups happen and another
            // popper may have claimed the message first
            pending = recover(self.available.wait(pending), "queue pending");
        }
    }

    /// Remove and return the head message without blocking
    pub fn try_pop(&self) -> Option<Message<T>> {
        lock_or_recover(&self.pending, "queue pending").pop_front()
    }

    /// Like [`Queue::pop`], but give up after `timeout`
    ///
    /// Returns `None` if no message could be claimed before the deadline. A
    /// zero timeout behaves like [`Queue::try_pop`].
    pub fn pop_timeout(&self, timeout: Duration) -> Option<Message<T>> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Some(self.pop());
        };

        let mut pending = lock_or_recover(&self.pending, "queue pending");
        loop {
            if let Some(message) = pending.pop_front() {
                return Some(message);
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            let (guard, _timed_out) = recover(
                self.available.wait_timeout(pending, deadline - now),
                "queue pending",
            );
            pending = guard;
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new("default")
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("pending", &self.len())
            .finish()
    }
}
