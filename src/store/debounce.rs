//! Per-key trailing-edge debounce.
//!
//! Scheduling a key that already has a pending entry replaces the payload
//! and restarts the delay, so a burst collapses to its last payload.
//! Nothing runs on its own: the owner polls with the current time and
//! performs whatever is due.

use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Pending<T> {
    due_ms: u64,
    payload: T,
}

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: BTreeMap<String, Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: BTreeMap::new(),
        }
    }

    /// Schedule `payload` for `key`. Returns true if it replaced a pending one.
    pub fn schedule(&mut self, key: &str, now_ms: u64, payload: T) -> bool {
        let delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX);
        let due_ms = now_ms.saturating_add(delay_ms);
        self.pending
            .insert(key.to_string(), Pending { due_ms, payload })
            .is_some()
    }

    /// Remove and return every entry whose delay has elapsed.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<(String, T)> {
        let due: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due_ms <= now_ms)
            .map(|(k, _)| k.clone())
            .collect();

        due.into_iter()
            .filter_map(|key| self.pending.remove(&key).map(|p| (key, p.payload)))
            .collect()
    }

    /// Remove and return the pending payload for `key`, due or not.
    pub fn take(&mut self, key: &str) -> Option<T> {
        self.pending.remove(key).map(|p| p.payload)
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains_key(key)
    }
}
