//! Process-wide subscription state.
//!
//! Exactly one subscription state exists per running process. The store
//! is a cloneable handle to a mutex-guarded singleton: reads return an
//! atomic snapshot, writes replace or clear the whole state. Partial
//! updates are not possible.

use crate::subscription::Subscription;
use std::sync::{Arc, Mutex};

/// Snapshot of the last-verified subscription details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionState {
    /// The verified payload, absent until an acknowledgment succeeds.
    pub details: Option<Subscription>,
    /// Trusted timestamp of the last successful check, `0` if never.
    pub last_checked_at: i64,
}

/// Shared handle to the process-wide subscription state.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionStore {
    inner: Arc<Mutex<SubscriptionState>>,
}

impl SubscriptionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state snapshot.
    #[must_use]
    pub fn read(&self) -> SubscriptionState {
        self.inner.lock().unwrap().clone()
    }

    /// Atomically installs new subscription details.
    pub fn write(&self, details: Subscription, checked_at: i64) {
        *self.inner.lock().unwrap() = SubscriptionState {
            details: Some(details),
            last_checked_at: checked_at,
        };
    }

    /// Atomically resets the state to absent.
    pub fn clear(&self) {
        *self.inner.lock().unwrap() = SubscriptionState::default();
    }
}
