//! relaymq - in-process typed publish/subscribe routing
//!
//! Producers publish to [`queue::Topic`]s, topics are related to
//! [`queue::Queue`]s through a per-message-kind [`queue::QueueManager`], and
//! consumers fetch from the queues behind a topic with competing-consumer
//! semantics. Ambient services (logging, settings) live in [`core`].

pub mod core;
pub mod queue;

pub use crate::core::error::{CoreError, CoreResult};
pub use crate::queue::api::*;
