//! Core services and infrastructure

pub mod error;
pub mod logging;
pub mod settings;
pub mod sync;
