//! The editing session for one poster draft.
//!
//! [`DraftSession`] is owned by the application root and handed by
//! reference to whatever needs the draft. It owns the current record, the
//! persistence store and the validation tracker, and routes every record
//! mutation through a debounced save.

use std::fmt;

use serde_json::Value;

use crate::core::{CustomField, Record, RecordError, RecordPatch};
use crate::store::{DraftStore, Storage, StorageError};
use crate::util::clock::{Clock, SystemClock};
use crate::validation::{FieldValidation, FormTracker, ValidationResult, Validator};

/// Persistence state surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceStatus {
    /// Not initialized yet.
    Loading,
    Ready,
    /// The last write failed; the in-memory record is still good.
    SaveFailed(StorageError),
    /// Loading gave up after retries. Offer retry or clearing all data.
    LoadFailed(String),
}

impl fmt::Display for PersistenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceStatus::Loading => write!(f, "loading"),
            PersistenceStatus::Ready => write!(f, "ready"),
            PersistenceStatus::SaveFailed(e) => write!(f, "save failed: {}", e),
            PersistenceStatus::LoadFailed(message) => write!(f, "load failed: {}", message),
        }
    }
}

pub struct DraftSession<S, C = SystemClock> {
    store: DraftStore<S, C>,
    tracker: FormTracker,
    record: Record,
    status: PersistenceStatus,
    /// False when the availability check failed; the session then runs in memory.
    persistent: bool,
}

impl<S: Storage, C: Clock> DraftSession<S, C> {
    pub fn new(store: DraftStore<S, C>, validator: Validator) -> Self {
        DraftSession {
            store,
            tracker: FormTracker::new(validator),
            record: Record::default(),
            status: PersistenceStatus::Loading,
            persistent: true,
        }
    }

    /// Sweep legacy data and load the stored draft.
    pub fn initialize(&mut self) -> &PersistenceStatus {
        self.persistent = self.store.is_available();
        if !self.persistent {
            tracing::info!("storage unavailable, drafts will not persist");
            self.record = Record::default();
            self.status = PersistenceStatus::Ready;
            return &self.status;
        }

        self.store.migrate_if_needed();
        self.load()
    }

    /// Run the load sequence again after a failure.
    pub fn retry(&mut self) -> &PersistenceStatus {
        self.status = PersistenceStatus::Loading;
        self.load()
    }

    fn load(&mut self) -> &PersistenceStatus {
        match self.store.load_with_retry(Record::default()) {
            Ok(record) => {
                self.record = record;
                self.status = PersistenceStatus::Ready;
            }
            Err(e) => {
                self.status = PersistenceStatus::LoadFailed(e.to_string());
            }
        }
        &self.status
    }

    pub fn status(&self) -> &PersistenceStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == PersistenceStatus::Loading
    }

    pub fn has_error(&self) -> bool {
        matches!(
            self.status,
            PersistenceStatus::SaveFailed(_) | PersistenceStatus::LoadFailed(_)
        )
    }

    pub fn error_message(&self) -> Option<String> {
        self.has_error().then(|| self.status.to_string())
    }

    /// Dismiss the current error without touching data.
    pub fn clear_error(&mut self) {
        if self.has_error() {
            self.status = PersistenceStatus::Ready;
        }
    }

    /// Wipe every stored key and start over with an empty draft.
    pub fn clear_all_data(&mut self) -> Result<(), StorageError> {
        self.store.clear_all()?;
        self.record = Record::default();
        self.tracker.reset();
        self.status = PersistenceStatus::Ready;
        Ok(())
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn store(&self) -> &DraftStore<S, C> {
        &self.store
    }

    pub fn tracker(&self) -> &FormTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut FormTracker {
        &mut self.tracker
    }

    fn commit(&mut self, record: Record) {
        self.record = record;
        if self.persistent {
            self.store.save(&self.record);
        }
    }

    /// Replace the whole record.
    pub fn replace(&mut self, record: Record) {
        self.commit(record);
    }

    /// Merge the supplied fields into the record.
    pub fn update(&mut self, patch: RecordPatch) {
        let mut next = self.record.clone();
        next.apply(patch);
        self.commit(next);
    }

    /// Set one field by name and validate it.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<FieldValidation, RecordError> {
        let next = self.record.with_field(name, value)?;
        let validation = match next.to_fields().get(name) {
            Some(stored) => self.tracker.validate_field(name, stored),
            None => self.tracker.validate_field(name, &Value::Null),
        };
        self.commit(next);
        Ok(validation)
    }

    pub fn add_photo(&mut self, photo: impl Into<String>) {
        let mut next = self.record.clone();
        next.add_photo(photo);
        self.commit(next);
    }

    pub fn remove_photo(&mut self, index: usize) -> Result<String, RecordError> {
        let mut next = self.record.clone();
        let removed = next.remove_photo(index)?;
        self.commit(next);
        Ok(removed)
    }

    pub fn add_custom_field(&mut self) {
        let mut next = self.record.clone();
        next.add_custom_field();
        self.commit(next);
    }

    pub fn update_custom_field(
        &mut self,
        index: usize,
        field: CustomField,
    ) -> Result<(), RecordError> {
        let mut next = self.record.clone();
        next.update_custom_field(index, field)?;
        self.commit(next);
        Ok(())
    }

    pub fn remove_custom_field(&mut self, index: usize) -> Result<CustomField, RecordError> {
        let mut next = self.record.clone();
        let removed = next.remove_custom_field(index)?;
        self.commit(next);
        Ok(removed)
    }

    /// Back to an empty draft; the stored envelope is purged too.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.record = Record::default();
        self.tracker.reset();
        if self.persistent {
            self.store.clear()?;
        }
        Ok(())
    }

    /// Validate the whole record, e.g. before export.
    pub fn validate_form(&mut self) -> ValidationResult {
        self.tracker.validate_form(&self.record)
    }

    /// Perform a pending save if it is due.
    pub fn poll(&mut self) {
        if let Some(result) = self.store.poll() {
            self.record_save(result);
        }
    }

    /// Perform a pending save now.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        match self.store.flush() {
            Some(result) => {
                self.record_save(result.clone());
                result
            }
            None => Ok(()),
        }
    }

    fn record_save(&mut self, result: Result<(), StorageError>) {
        match result {
            Ok(()) => {
                if matches!(self.status, PersistenceStatus::SaveFailed(_)) {
                    self.status = PersistenceStatus::Ready;
                }
            }
            Err(e) => self.status = PersistenceStatus::SaveFailed(e),
        }
    }
}
