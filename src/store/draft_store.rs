//! Versioned, debounced persistence of the draft record.
//!
//! The store wraps a [`Storage`] backend:
//! - `save` debounces writes per key; the last record in a burst wins
//! - `load` falls back to the caller's default on anything unexpected
//! - `load_with_retry` retries storage read errors with a fixed delay
//! - `migrate_if_needed` re-wraps pre-versioning payloads
//!
//! None of these panic or propagate storage failures past the store except
//! through explicit `Result` values.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::{Record, VersionedEnvelope, DATA_VERSION};
use crate::store::debounce::Debouncer;
use crate::store::storage::{Storage, StorageError};
use crate::util::clock::{Clock, SystemClock};
use crate::util::config::StoreConfig;

/// Throwaway key written by the availability check.
pub const AVAILABILITY_KEY: &str = "__storage_test__";

/// Loading gave up after repeated storage read errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to load draft after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: StorageError,
    },
}

/// What a successful read found.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Record),
    /// Nothing stored under the key.
    Missing,
    /// Not JSON, or not shaped like an envelope holding a record.
    Malformed(String),
    /// Stored by a different data version.
    VersionMismatch { stored: String },
}

impl LoadOutcome {
    /// The loaded record, or `default` for every other outcome.
    pub fn into_record(self, default: Record) -> Record {
        match self {
            LoadOutcome::Loaded(record) => record,
            _ => default,
        }
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOutcome::Loaded(_) => write!(f, "loaded"),
            LoadOutcome::Missing => write!(f, "no stored data"),
            LoadOutcome::Malformed(reason) => write!(f, "malformed data: {}", reason),
            LoadOutcome::VersionMismatch { stored } => write!(
                f,
                "data version mismatch (current {}, stored {})",
                DATA_VERSION, stored
            ),
        }
    }
}

/// Persists the draft record to a storage backend.
pub struct DraftStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    config: StoreConfig,
    debouncer: Debouncer<Record>,
}

impl<S: Storage> DraftStore<S, SystemClock> {
    /// Create a store driven by the wall clock.
    pub fn new(storage: S, config: StoreConfig) -> Self {
        DraftStore::with_clock(storage, SystemClock, config)
    }
}

impl<S: Storage, C: Clock> DraftStore<S, C> {
    pub fn with_clock(storage: S, clock: C, config: StoreConfig) -> Self {
        let debouncer = Debouncer::new(config.debounce());
        DraftStore {
            storage,
            clock,
            config,
            debouncer,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn key(&self) -> &str {
        &self.config.storage_key
    }

    /// Check the backend with a throwaway write and delete.
    pub fn is_available(&mut self) -> bool {
        let check = self
            .storage
            .set_item(AVAILABILITY_KEY, "test")
            .and_then(|()| self.storage.remove_item(AVAILABILITY_KEY));

        match check {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("storage is not available: {}", e);
                false
            }
        }
    }

    /// Schedule a debounced write of `record`.
    ///
    /// A pending write for the same key is replaced and its delay restarted.
    /// Call [`DraftStore::poll`] to perform writes that have come due.
    pub fn save(&mut self, record: &Record) {
        let now = self.clock.now_ms();
        let key = self.config.storage_key.clone();
        if self.debouncer.schedule(&key, now, record.clone()) {
            tracing::trace!(key = %key, "debounced pending save");
        }
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.is_pending(self.key())
    }

    /// Perform the pending write if its delay has elapsed.
    ///
    /// Returns `None` when nothing was due.
    pub fn poll(&mut self) -> Option<Result<(), StorageError>> {
        let now = self.clock.now_ms();
        let due = self.debouncer.take_due(now);
        let mut outcome = None;
        for (_, record) in due {
            outcome = Some(self.write_now(&record));
        }
        outcome
    }

    /// Perform the pending write immediately, due or not.
    pub fn flush(&mut self) -> Option<Result<(), StorageError>> {
        let key = self.config.storage_key.clone();
        let record = self.debouncer.take(&key)?;
        Some(self.write_now(&record))
    }

    /// Write `record` immediately, bypassing the debounce.
    pub fn write_now(&mut self, record: &Record) -> Result<(), StorageError> {
        self.write_envelope(record)
    }

    fn write_envelope<T: Serialize>(&mut self, data: &T) -> Result<(), StorageError> {
        let key = self.config.storage_key.clone();
        let envelope = VersionedEnvelope::new(data, self.clock.now_ms());

        let result = envelope
            .to_compact_json()
            .map_err(|e| StorageError::Other(format!("failed to serialize draft: {}", e)))
            .and_then(|raw| self.storage.set_item(&key, &raw));

        match &result {
            Ok(()) => tracing::debug!(key = %key, "draft saved"),
            Err(StorageError::QuotaExceeded) => {
                tracing::error!(key = %key, "storage quota exceeded")
            }
            Err(StorageError::AccessDenied(reason)) => {
                tracing::error!(key = %key, "storage access denied (private mode?): {}", reason)
            }
            Err(e) => tracing::error!(key = %key, "draft save failed: {}", e),
        }

        result
    }

    /// Read and interpret the stored envelope.
    ///
    /// Only storage read failures are errors; every shape problem is an
    /// [`LoadOutcome`].
    pub fn try_load(&self) -> Result<LoadOutcome, StorageError> {
        let Some(raw) = self.storage.get_item(self.key())? else {
            return Ok(LoadOutcome::Missing);
        };
        Ok(parse_envelope(&raw))
    }

    /// Load the stored record, or `default` when storage is unavailable,
    /// empty, malformed, from another version, or failing.
    pub fn load(&mut self, default: Record) -> Record {
        if !self.is_available() {
            return default;
        }

        match self.try_load() {
            Ok(outcome) => self.settle(outcome, default),
            Err(e) => {
                tracing::error!(key = %self.key(), "failed to read draft: {}", e);
                default
            }
        }
    }

    /// Like [`DraftStore::load`], but retries storage read errors.
    ///
    /// Up to `load_attempts` reads are made with `retry_delay_ms` between
    /// them. A clean outcome (including missing or mismatched data) ends the
    /// loop at once. Unavailable storage yields `default` without reading.
    pub fn load_with_retry(&mut self, default: Record) -> Result<Record, LoadError> {
        if !self.is_available() {
            return Ok(default);
        }

        let attempts = self.config.load_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.try_load() {
                Ok(outcome) => return Ok(self.settle(outcome, default)),
                Err(e) if attempt >= attempts => {
                    tracing::error!(attempts, "giving up loading draft: {}", e);
                    return Err(LoadError::RetriesExhausted {
                        attempts,
                        source: e,
                    });
                }
                Err(e) => {
                    tracing::warn!(attempt, attempts, "draft read failed, retrying: {}", e);
                    self.clock.sleep(self.config.retry_delay());
                    attempt += 1;
                }
            }
        }
    }

    fn settle(&self, outcome: LoadOutcome, default: Record) -> Record {
        match &outcome {
            LoadOutcome::Loaded(_) => tracing::debug!(key = %self.key(), "draft loaded"),
            LoadOutcome::Missing => tracing::debug!(key = %self.key(), "no stored draft"),
            other => tracing::warn!(key = %self.key(), "{}, using default", other),
        }
        outcome.into_record(default)
    }

    /// Re-wrap a pre-versioning payload in the current envelope.
    ///
    /// Returns true when a migration was written. Failures are logged and
    /// reported as false.
    pub fn migrate_if_needed(&mut self) -> bool {
        let raw = match self.storage.get_item(self.key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!("failed to read draft for migration: {}", e);
                return false;
            }
        };

        let legacy = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) if !map.contains_key("version") => Value::Object(map),
            Ok(_) => return false,
            Err(e) => {
                tracing::warn!("failed to parse draft for migration: {}", e);
                return false;
            }
        };

        tracing::info!("migrating unversioned draft to version {}", DATA_VERSION);
        self.write_envelope(&legacy).is_ok()
    }

    /// Drop any pending write and remove the stored draft.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        let key = self.config.storage_key.clone();
        self.debouncer.take(&key);

        let result = self.storage.remove_item(&key);
        match &result {
            Ok(()) => tracing::debug!(key = %key, "draft removed"),
            Err(e) => tracing::error!(key = %key, "failed to remove draft: {}", e),
        }
        result
    }

    /// Drop any pending write and remove every key in the backend.
    pub fn clear_all(&mut self) -> Result<(), StorageError> {
        let key = self.config.storage_key.clone();
        self.debouncer.take(&key);

        let result = self.storage.clear();
        match &result {
            Ok(()) => tracing::info!("cleared all stored data"),
            Err(e) => tracing::error!("failed to clear storage: {}", e),
        }
        result
    }
}

/// Interpret a raw stored value.
fn parse_envelope(raw: &str) -> LoadOutcome {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => return LoadOutcome::Malformed(e.to_string()),
    };

    let version = value.get("version").and_then(Value::as_str).unwrap_or_default();
    let data = value.get("data").filter(|d| !d.is_null());
    let Some(data) = data.filter(|_| !version.is_empty()) else {
        return LoadOutcome::Malformed("missing version or data".to_string());
    };

    if version != DATA_VERSION {
        return LoadOutcome::VersionMismatch {
            stored: version.to_string(),
        };
    }

    match serde_json::from_value::<Record>(data.clone()) {
        Ok(record) => LoadOutcome::Loaded(record),
        Err(e) => LoadOutcome::Malformed(e.to_string()),
    }
}
