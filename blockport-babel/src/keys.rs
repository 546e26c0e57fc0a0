//! Key generation for new portable nodes
//!
//! Every span, block and mark definition created by a conversion needs a `_key`
//! that is unique within the document. Keys come from an injected
//! [`KeyGenerator`] so that tests can swap in a deterministic sequence.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of fresh, opaque keys
pub trait KeyGenerator: Send + Sync {
    fn generate(&self) -> String;
}

impl<F> KeyGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Random UUID v4 keys in their 32 character hex form
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomKeys;

impl KeyGenerator for RandomKeys {
    fn generate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Counter based keys: `k0`, `k1`, ...
///
/// The counter is atomic, so one instance can be shared between threads.
#[derive(Debug)]
pub struct SequentialKeys {
    prefix: String,
    next: AtomicU64,
}

impl SequentialKeys {
    pub fn new() -> Self {
        Self::with_prefix("k")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyGenerator for SequentialKeys {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{n}", self.prefix)
    }
}
