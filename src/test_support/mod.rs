//! Test utilities and mocks for petposter unit tests.
//!
//! This module provides a fault-injecting storage backend so the draft
//! store can be exercised against a backend that fails on any call.
//!
//! # Example
//!
//! ```rust,ignore
//! use petposter::test_support::{MockStorage, sample_record};
//!
//! #[test]
//! fn test_example() {
//!     let storage = MockStorage::new();
//!     storage.fail_next_gets(2, StorageError::Other("flaky".into()));
//!
//!     // Hand a clone to the store, inspect the original afterwards...
//! }
//! ```

pub mod fixtures;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::core::{Record, VersionedEnvelope};
use crate::store::storage::{Storage, StorageError};

// Re-export fixtures for convenience
pub use fixtures::*;

#[derive(Debug, Default)]
struct MockState {
    items: BTreeMap<String, String>,
    writes: Vec<(String, String)>,
    get_calls: usize,
    failing_gets: usize,
    get_error: Option<StorageError>,
    set_error: Option<StorageError>,
    remove_error: Option<StorageError>,
}

/// In-memory storage with programmable failures.
///
/// Clones share state, so a test can keep one handle while the store owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MockStorage {
    state: Rc<RefCell<MockState>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    pub fn new() -> Self {
        MockStorage::default()
    }

    /// Put a raw value in place without recording a write.
    pub fn seed(&self, key: &str, raw: &str) {
        self.state
            .borrow_mut()
            .items
            .insert(key.to_string(), raw.to_string());
    }

    /// Seed a record wrapped in a current-version envelope.
    pub fn write_record(&self, key: &str, record: &Record) {
        let raw = VersionedEnvelope::new(record, 0)
            .to_compact_json()
            .expect("record serializes");
        self.seed(key, &raw);
    }

    /// Current raw value under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.state.borrow().items.get(key).cloned()
    }

    /// Values successfully written to `key`, oldest first.
    pub fn writes_to(&self, key: &str) -> Vec<String> {
        self.state
            .borrow()
            .writes
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Number of `get_item` calls, failed ones included.
    pub fn get_calls(&self) -> usize {
        self.state.borrow().get_calls
    }

    /// Make the next `count` reads fail with `error`.
    pub fn fail_next_gets(&self, count: usize, error: StorageError) {
        let mut state = self.state.borrow_mut();
        state.failing_gets = count;
        state.get_error = Some(error);
    }

    /// Make every write fail with `error` until [`MockStorage::heal`].
    pub fn fail_sets(&self, error: StorageError) {
        self.state.borrow_mut().set_error = Some(error);
    }

    /// Make every removal fail with `error` until [`MockStorage::heal`].
    pub fn fail_removes(&self, error: StorageError) {
        self.state.borrow_mut().remove_error = Some(error);
    }

    /// Stop injecting failures.
    pub fn heal(&self) {
        let mut state = self.state.borrow_mut();
        state.failing_gets = 0;
        state.get_error = None;
        state.set_error = None;
        state.remove_error = None;
    }
}

impl Storage for MockStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut state = self.state.borrow_mut();
        state.get_calls += 1;
        if state.failing_gets > 0 {
            state.failing_gets -= 1;
            if let Some(error) = state.get_error.clone() {
                return Err(error);
            }
        }
        Ok(state.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.set_error.clone() {
            return Err(error);
        }
        state.items.insert(key.to_string(), value.to_string());
        state.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.remove_error.clone() {
            return Err(error);
        }
        state.items.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.remove_error.clone() {
            return Err(error);
        }
        state.items.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let mock = MockStorage::new();
        let mut handle = mock.clone();
        handle.set_item("k", "v").unwrap();
        assert_eq!(mock.raw("k").as_deref(), Some("v"));
        assert_eq!(mock.writes_to("k"), vec!["v".to_string()]);
    }

    #[test]
    fn test_failing_gets_run_out() {
        let mock = MockStorage::new();
        mock.seed("k", "v");
        mock.fail_next_gets(1, StorageError::Other("x".into()));
        assert!(mock.get_item("k").is_err());
        assert_eq!(mock.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(mock.get_calls(), 2);
    }

    #[test]
    fn test_heal() {
        let mut mock = MockStorage::new();
        mock.fail_sets(StorageError::QuotaExceeded);
        assert_eq!(mock.set_item("k", "v"), Err(StorageError::QuotaExceeded));
        mock.heal();
        assert!(mock.set_item("k", "v").is_ok());
    }
}
