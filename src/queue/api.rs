//! Public API for the queue system
//!
//! External code should import from here rather than from the individual
//! modules. See the module documentation of [`crate::queue`] for the
//! architecture and a complete example.

// Routing handles
pub use crate::queue::consumer::Consumer;
pub use crate::queue::producer::Producer;

// Registry and queues
pub use crate::queue::internal::{Queue, QueueId};
pub use crate::queue::manager::QueueManager;

// Message types and topics
pub use crate::queue::message::{FloatMessage, IntMessage, Message, StringMessage};
pub use crate::queue::topic::Topic;
