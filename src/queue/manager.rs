//! QueueManager - Topic to queue relation registry
//!
//! The QueueManager owns the many-to-many relation between topics and queues
//! for one message kind. Producers ask it which queues a topic feeds into;
//! consumers ask it which queues to pop from. There is one process-wide
//! instance per message kind, created lazily by [`QueueManager::instance`],
//! and independent instances can be built with [`QueueManager::new`] for
//! dependency injection.

use crate::core::sync::{read_or_recover, write_or_recover};
use crate::queue::internal::Queue;
use crate::queue::topic::Topic;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, RwLock};

type ManagerTable = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// Global per-kind manager instances, keyed by the payload type
static MANAGERS: LazyLock<RwLock<ManagerTable>> = LazyLock::new(|| {
    log::trace!("Initializing queue manager table");
    RwLock::new(HashMap::new())
});

/// Relation registry between topics and queues for message kind `T`
///
/// # Thread Safety
///
/// All operations take the internal lock only for their own duration and are
/// individually atomic. Concurrent `relate`/`unrelate` calls never lose
/// updates or create duplicate edges. A [`QueueManager::related_queues`]
/// snapshot taken while other threads mutate may reflect any point between
/// the start and the end of those mutations.
///
/// # Example
///
/// ```rust
/// use relaymq::queue::{Queue, QueueManager, Topic};
/// use std::sync::Arc;
///
/// let manager = QueueManager::<i32>::new();
/// let topic = Topic::new("numbers");
/// let queue = Arc::new(Queue::new("evens"));
///
/// manager.relate(&topic, &queue);
/// manager.relate(&topic, &queue); // idempotent
/// assert_eq!(manager.related_queues(&topic).len(), 1);
///
/// manager.unrelate(&topic, &queue);
/// assert!(manager.related_queues(&topic).is_empty());
/// ```
pub struct QueueManager<T> {
    /// Related queues per topic, in relation order, without duplicate ids
    relations: RwLock<HashMap<Topic, Vec<Arc<Queue<T>>>>>,
}

impl<T> QueueManager<T> {
    /// Create a standalone manager, independent of the global instance
    pub fn new() -> Self {
        Self {
            relations: RwLock::new(HashMap::new()),
        }
    }

    /// Relate a topic to a queue; no-op if the edge already exists
    pub fn relate(&self, topic: &Topic, queue: &Arc<Queue<T>>) {
        let mut relations = write_or_recover(&self.relations, "queue manager relations");
        let queues = relations.entry(topic.clone()).or_default();

        if queues.iter().any(|related| related.id() == queue.id()) {
            log::trace!(
                "Topic '{}' already related to queue '{}' ({})",
                topic,
                queue.name(),
                queue.id()
            );
            return;
        }

        queues.push(Arc::clone(queue));
        log::trace!(
            "Related topic '{}' to queue '{}' ({})",
            topic,
            queue.name(),
            queue.id()
        );
    }

    /// Remove the edge between a topic and a queue; no-op if absent
    pub fn unrelate(&self, topic: &Topic, queue: &Arc<Queue<T>>) {
        let mut relations = write_or_recover(&self.relations, "queue manager relations");
        let Some(queues) = relations.get_mut(topic) else {
            return;
        };

        let before = queues.len();
        queues.retain(|related| related.id() != queue.id());
        if queues.len() < before {
            log::trace!(
                "Unrelated topic '{}' from queue '{}' ({})",
                topic,
                queue.name(),
                queue.id()
            );
        }

        if queues.is_empty() {
            relations.remove(topic);
        }
    }

    /// Snapshot of the queues currently related to a topic
    ///
    /// Returned in relation order; empty if the topic has no related queue.
    pub fn related_queues(&self, topic: &Topic) -> Vec<Arc<Queue<T>>> {
        read_or_recover(&self.relations, "queue manager relations")
            .get(topic)
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_related(&self, topic: &Topic, queue: &Queue<T>) -> bool {
        read_or_recover(&self.relations, "queue manager relations")
            .get(topic)
            .is_some_and(|queues| queues.iter().any(|related| related.id() == queue.id()))
    }

    /// Topics that currently have at least one related queue
    pub fn topics(&self) -> Vec<Topic> {
        let mut topics: Vec<Topic> = read_or_recover(&self.relations, "queue manager relations")
            .keys()
            .cloned()
            .collect();
        topics.sort();
        topics
    }

    /// Total number of topic-queue edges
    pub fn relation_count(&self) -> usize {
        read_or_recover(&self.relations, "queue manager relations")
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Remove every relation held by this manager
    ///
    /// Meant for test isolation. Must not race active publish/fetch traffic
    /// for the same message kind.
    pub fn flush(&self) {
        let mut relations = write_or_recover(&self.relations, "queue manager relations");
        log::trace!(
            "Flushing {} topic relations for {}",
            relations.len(),
            type_name::<T>()
        );
        relations.clear();
    }
}

impl<T: Send + 'static> QueueManager<T> {
    /// The process-wide manager for message kind `T`
    ///
    /// Created on first use. Every caller, from any thread, receives a handle
    /// to the same instance.
    pub fn instance() -> Arc<Self> {
        let kind = TypeId::of::<T>();

        {
            let table = read_or_recover(&MANAGERS, "queue manager table");
            if let Some(existing) = table.get(&kind) {
                return Self::downcast(Arc::clone(existing));
            }
        }

        // Another thread may have created it between the two locks
        let mut table = write_or_recover(&MANAGERS, "queue manager table");
        let entry = table.entry(kind).or_insert_with(|| {
            log::trace!("Creating queue manager for {}", type_name::<T>());
            Arc::new(Self::new()) as Arc<dyn Any + Send + Sync>
        });
        Self::downcast(Arc::clone(entry))
    }

    fn downcast(entry: Arc<dyn Any + Send + Sync>) -> Arc<Self> {
        match entry.downcast::<Self>() {
            Ok(manager) => manager,
            Err(_) => unreachable!(
                "queue manager table entry for {} has the wrong type",
                type_name::<T>()
            ),
        }
    }
}

impl<T> Default for QueueManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for QueueManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueManager")
            .field("kind", &type_name::<T>())
            .field("topics", &self.topics())
            .field("relations", &self.relation_count())
            .finish()
    }
}
