//! Test modules for the queue system
//!
//! Tests are organized by functional area. Tests that touch the global
//! per-kind manager are `#[serial]` and flush it first.

mod concurrent;
