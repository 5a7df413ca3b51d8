//! Topic-Routed Queue Component
//!
//! Typed publish/subscribe routing inside one process. Producers publish to
//! named topics, topics are related many-to-many to queues, and consumers
//! fetch from the queues reachable through a topic.
//!
//! # Overview
//!
//! - **Relation registry**: one [`QueueManager`] per message kind holds the
//!   topic-to-queue edges; every operation is thread-safe and atomic
//! - **Fan-out**: a publish is copied into every queue related to the topic
//! - **Competing consumers**: within a queue, each message goes to exactly
//!   one fetching consumer
//! - **Blocking fetch**: an empty queue parks the fetching thread until a
//!   message arrives (bounded variants are available)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   publish(topic, msg)
//! │  Producer<T> │──────────────┐
//! └──────────────┘              ▼
//!                ┌───────────────────────────────────┐
//!                │   QueueManager<T> (one per T)     │
//!                │   "orders" ──► [ q1 , q2 ]        │
//!                │   "audit"  ──► [ q2 ]             │
//!                └───────────────────────────────────┘
//!                     │ push (copy)       │ push
//!                     ▼                   ▼
//!               ┌──────────┐        ┌──────────┐
//!               │ Queue q1 │        │ Queue q2 │   FIFO, blocking pop
//!               └────┬─────┘        └────┬─────┘
//!                    │ pop               │ pop (competing)
//!               ┌────┴──────┐      ┌─────┴─────┐ ┌───────────┐
//!               │Consumer A │      │Consumer B │ │Consumer C │
//!               └───────────┘      └───────────┘ └───────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use relaymq::queue::{Consumer, Producer, Queue, QueueManager, Topic};
//! use std::sync::Arc;
//!
//! #[derive(Clone)]
//! struct Reading(u32);
//!
//! let topic = Topic::new("sensor/temp");
//! let queue = Arc::new(Queue::new("temp-readings"));
//! QueueManager::<Reading>::instance().relate(&topic, &queue);
//!
//! let producer = Producer::<Reading>::new();
//! producer.publish(&topic, Reading(21).into());
//!
//! let mut consumer = Consumer::<Reading>::new();
//! consumer.subscribe(topic.clone());
//! let fetched = consumer.fetch(&topic);
//! assert_eq!(fetched[0].content().0, 21);
//! ```

pub mod api;
mod consumer;
mod internal;
mod manager;
mod message;
mod producer;
mod subscription;
mod topic;

pub use consumer::Consumer;
pub use internal::{Queue, QueueId};
pub use manager::QueueManager;
pub use message::{FloatMessage, IntMessage, Message, StringMessage};
pub use producer::Producer;
pub use topic::Topic;

#[cfg(test)]
mod tests;
