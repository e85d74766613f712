//! Per-session mutual exclusion.
//!
//! Concurrent submissions against the same session would interleave
//! load-modify-save cycles and lose answers. Each session gets its own
//! `tokio::sync::Mutex`; different sessions never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;

use crate::domain::foundation::SessionId;

/// Keyed mutex map guarding session write cycles.
///
/// Lock entries are created on first use and kept for the process lifetime;
/// intake sessions are few and short-lived.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<SessionId, Arc<tokio::sync::Mutex<()>>>>,
}

impl SessionLocks {
    /// Creates an empty lock map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for one session, waiting if it is held.
    ///
    /// The returned guard is owned, so it can be held across awaits for the
    /// whole load-advance-save cycle.
    pub async fn acquire(&self, id: &SessionId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap();
            Arc::clone(locks.entry(*id).or_default())
        };
        lock.lock_owned().await
    }
}
