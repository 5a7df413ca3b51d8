//! Consumer for fetching messages from topics
//!
//! A fetch pops one message from each queue related to the topic. Consumers
//! fetching through the same queue compete: every message is delivered to
//! exactly one of them.

use crate::core::settings::FetchSettings;
use crate::queue::manager::QueueManager;
use crate::queue::message::Message;
use crate::queue::subscription::Subscriptions;
use crate::queue::topic::Topic;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Fetching handle for message kind `T`
///
/// # Example
///
/// ```rust
/// use relaymq::queue::{Consumer, Message, Queue, QueueManager, Topic};
/// use std::sync::Arc;
///
/// let manager = Arc::new(QueueManager::<i32>::new());
/// let topic = Topic::new("numbers");
/// let queue = Arc::new(Queue::new("numbers-queue"));
/// manager.relate(&topic, &queue);
/// queue.push(Message::new(5));
///
/// let mut consumer = Consumer::with_manager(manager);
/// consumer.subscribe(topic.clone());
///
/// let fetched = consumer.fetch(&topic);
/// assert_eq!(fetched.len(), 1);
/// assert_eq!(*fetched[0].content(), 5);
/// ```
#[derive(Debug)]
pub struct Consumer<T> {
    manager: Arc<QueueManager<T>>,
    subscriptions: Subscriptions,
}

impl<T: Send + 'static> Consumer<T> {
    /// Create a consumer routing through the global manager for `T`
    pub fn new() -> Self {
        Self::with_manager(QueueManager::instance())
    }
}

impl<T: Send + 'static> Default for Consumer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Consumer<T> {
    /// Create a consumer routing through a specific manager
    pub fn with_manager(manager: Arc<QueueManager<T>>) -> Self {
        Self {
            manager,
            subscriptions: Subscriptions::default(),
        }
    }

    pub fn manager(&self) -> &Arc<QueueManager<T>> {
        &self.manager
    }

    /// Record interest in a topic; scopes [`Consumer::fetch_all`]
    pub fn subscribe(&mut self, topic: Topic) {
        if self.subscriptions.add(topic) {
            log::trace!("Consumer subscriptions: {:?}", self.subscriptions.as_slice());
        }
    }

    pub fn unsubscribe(&mut self, topic: &Topic) {
        self.subscriptions.remove(topic);
    }

    pub fn is_subscribed(&self, topic: &Topic) -> bool {
        self.subscriptions.contains(topic)
    }

    pub fn subscriptions(&self) -> &[Topic] {
        self.subscriptions.as_slice()
    }

    /// Pop one message from each queue related to `topic`
    ///
    /// Blocks on each queue in turn until it yields a message. Returns an
    /// empty vector immediately when the topic has no related queue.
    pub fn fetch(&self, topic: &Topic) -> Vec<Message<T>> {
        self.manager
            .related_queues(topic)
            .iter()
            .map(|queue| queue.pop())
            .collect()
    }

    /// [`Consumer::fetch`] over every subscribed topic, in subscription order
    pub fn fetch_all(&self) -> Vec<Message<T>> {
        self.subscriptions
            .as_slice()
            .iter()
            .flat_map(|topic| self.fetch(topic))
            .collect()
    }

    /// Like [`Consumer::fetch`], bounded by an overall deadline
    ///
    /// Queues that stay empty until the deadline contribute nothing, so the
    /// result may hold fewer messages than there are related queues.
    pub fn fetch_timeout(&self, topic: &Topic, timeout: Duration) -> Vec<Message<T>> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.fetch(topic);
        };

        self.manager
            .related_queues(topic)
            .iter()
            .filter_map(|queue| {
                queue.pop_timeout(deadline.saturating_duration_since(Instant::now()))
            })
            .collect()
    }

    /// Fetch using the configured bound, or block indefinitely if none is set
    pub fn fetch_configured(&self, topic: &Topic, settings: &FetchSettings) -> Vec<Message<T>> {
        match settings.timeout() {
            Some(timeout) => self.fetch_timeout(topic, timeout),
            None => self.fetch(topic),
        }
    }
}
