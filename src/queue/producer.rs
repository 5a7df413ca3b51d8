//! Producer for publishing messages to topics
//!
//! Producers never hold queues themselves. At publish time they ask the
//! queue manager which queues the topic currently feeds into and push a copy
//! of the message into each of them.

use crate::queue::manager::QueueManager;
use crate::queue::message::Message;
use crate::queue::subscription::Subscriptions;
use crate::queue::topic::Topic;
use std::sync::Arc;

/// Publishing handle for message kind `T`
///
/// Subscriptions are informational: `publish` works for any topic that has
/// related queues, subscribed or not. They scope [`Producer::broadcast`].
///
/// # Example
///
/// ```rust
/// use relaymq::queue::{Message, Producer, Queue, QueueManager, Topic};
/// use std::sync::Arc;
///
/// let manager = Arc::new(QueueManager::<String>::new());
/// let topic = Topic::new("greetings");
/// let queue = Arc::new(Queue::new("inbox"));
/// manager.relate(&topic, &queue);
///
/// let producer = Producer::with_manager(Arc::clone(&manager));
/// let delivered = producer.publish(&topic, Message::new("hello".to_string()));
/// assert_eq!(delivered, 1);
/// assert_eq!(queue.len(), 1);
/// ```
#[derive(Debug)]
pub struct Producer<T> {
    manager: Arc<QueueManager<T>>,
    subscriptions: Subscriptions,
}

impl<T: Send + 'static> Producer<T> {
    /// Create a producer routing through the global manager for `T`
    pub fn new() -> Self {
        Self::with_manager(QueueManager::instance())
    }
}

impl<T: Send + 'static> Default for Producer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Producer<T> {
    /// Create a producer routing through a specific manager
    pub fn with_manager(manager: Arc<QueueManager<T>>) -> Self {
        Self {
            manager,
            subscriptions: Subscriptions::default(),
        }
    }

    pub fn manager(&self) -> &Arc<QueueManager<T>> {
        &self.manager
    }

    /// Record interest in a topic
    pub fn subscribe(&mut self, topic: Topic) {
        if self.subscriptions.add(topic) {
            log::trace!("Producer subscriptions: {:?}", self.subscriptions.as_slice());
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
}

impl<T: Clone> Producer<T> {
    /// Push a message into every queue related to `topic`
    ///
    /// Returns the number of queues the message was delivered to. With no
    /// related queue the message is dropped; that is not an error.
    pub fn publish(&self, topic: &Topic, message: Message<T>) -> usize {
        let queues = self.manager.related_queues(topic);
        let Some((last, rest)) = queues.split_last() else {
            log::debug!("Dropping message for topic '{}': no related queue", topic);
            return 0;
        };

        for queue in rest {
            queue.push(message.clone());
        }
        last.push(message);

        queues.len()
    }

    /// Publish a message to every subscribed topic
    ///
    /// Returns the total number of queue deliveries.
    pub fn broadcast(&self, message: Message<T>) -> usize {
        self.subscriptions
            .as_slice()
            .iter()
            .map(|topic| self.publish(topic, message.clone()))
            .sum()
    }
}
