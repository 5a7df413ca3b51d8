//! Common test utilities and helpers

use relaymq::queue::{Queue, QueueManager, Topic};
use std::sync::Arc;

/// Relate `count` fresh queues to `topic` and return them in relation order
pub fn related_queues<T: Send + 'static>(
    manager: &QueueManager<T>,
    topic: &Topic,
    count: usize,
) -> Vec<Arc<Queue<T>>> {
    (0..count)
        .map(|i| {
            let queue = Arc::new(Queue::new(format!("{}-{}", topic, i)));
            manager.relate(topic, &queue);
            queue
        })
        .collect()
}
