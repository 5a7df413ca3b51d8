//! Message Types
//!
//! A [`Message`] wraps an application payload of any kind. The payload is
//! fixed at creation; readers get shared access through [`Message::content`]
//! and the final owner can take it back with [`Message::into_content`].

use std::time::SystemTime;

/// Immutable content wrapper routed through topics and queues
///
/// # Example
///
/// ```rust
/// use relaymq::queue::{IntMessage, Message};
///
/// let message: IntMessage = Message::new(42);
/// assert_eq!(*message.content(), 42);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Message<T> {
    content: T,
    /// Timestamp when the message was created
    timestamp: SystemTime,
}

impl<T> Message<T> {
    pub fn new(content: T) -> Self {
        Self {
            content,
            timestamp: SystemTime::now(),
        }
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn into_content(self) -> T {
        self.content
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }
}

impl<T> From<T> for Message<T> {
    fn from(content: T) -> Self {
        Self::new(content)
    }
}

/// Message carrying an integer payload
pub type IntMessage = Message<i32>;

/// Message carrying a string payload
pub type StringMessage = Message<String>;

/// Message carrying a floating point payload
pub type FloatMessage = Message<f64>;
