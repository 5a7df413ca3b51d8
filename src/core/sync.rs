//! Synchronization utilities for lock handling
//!
//! The queue and registry contracts say their operations never fail, so a
//! poisoned lock must not surface as an error. These helpers take the inner
//! state back out of a poisoned guard and log that it happened.

use std::sync::{LockResult, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Recover the guard (or guard-carrying value) from a possibly poisoned lock result
///
/// A panic in another thread while it held the lock leaves the protected data
/// in whatever state that thread reached. Every mutation in this crate is a
/// single container operation, so that state is always consistent and safe to
/// keep using.
///
/// # Arguments
/// * `result` - The result of `lock()`, `read()`, `write()` or a `Condvar` wait
/// * `context` - Short description of the lock, used in the warning
pub fn recover<G>(result: LockResult<G>, context: &str) -> G {
    result.unwrap_or_else(|poison_err| {
        log::warn!(
            "Recovered poisoned lock ({}); a thread panicked while holding it",
            context
        );
        poison_err.into_inner()
    })
}

/// Lock a mutex, recovering from poisoning
pub fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    recover(mutex.lock(), context)
}

/// Acquire an RwLock for reading, recovering from poisoning
pub fn read_or_recover<'a, T>(lock: &'a RwLock<T>, context: &str) -> RwLockReadGuard<'a, T> {
    recover(lock.read(), context)
}

/// Acquire an RwLock for writing, recovering from poisoning
pub fn write_or_recover<'a, T>(lock: &'a RwLock<T>, context: &str) -> RwLockWriteGuard<'a, T> {
    recover(lock.write(), context)
}
