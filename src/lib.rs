//! Petposter - validation and draft persistence for missing-pet posters
//!
//! This crate provides the field validation engine for poster records and
//! a durable, versioned draft store with debounced saves, retrying loads
//! and migration of legacy drafts.

pub mod core;
pub mod ops;
pub mod store;
pub mod util;
pub mod validation;

/// Test utilities and mocks for unit tests.
///
/// Provides an in-memory storage with scriptable failures and record
/// fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{Record, RecordPatch, VersionedEnvelope, DATA_VERSION};
pub use ops::{DraftSession, PersistenceStatus};
pub use store::{DraftStore, FileStorage, MemoryStorage, Storage, StorageError};
pub use util::context::GlobalContext;
pub use validation::{FieldValidation, ValidationResult, Validator};
