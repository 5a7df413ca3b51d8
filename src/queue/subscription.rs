//! Ordered topic subscription set shared by producers and consumers

use crate::queue::topic::Topic;

/// Duplicate-free list of subscribed topics, kept in subscription order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Subscriptions {
    topics: Vec<Topic>,
}

impl Subscriptions {
    /// Returns false if the topic was already subscribed
    pub(crate) fn add(&mut self, topic: Topic) -> bool {
        if self.topics.contains(&topic) {
            return false;
        }
        self.topics.push(topic);
        true
    }

    /// Returns false if the topic was not subscribed
    pub(crate) fn remove(&mut self, topic: &Topic) -> bool {
        let before = self.topics.len();
        self.topics.retain(|subscribed| subscribed != topic);
        self.topics.len() < before
    }

    pub(crate) fn contains(&self, topic: &Topic) -> bool {
        self.topics.contains(topic)
    }

    pub(crate) fn as_slice(&self) -> &[Topic] {
        &self.topics
    }
}
