//! Core data structures for petposter.
//!
//! This module contains the data model shared by validation and persistence:
//! - The poster draft record and its field names
//! - The versioned envelope written to storage

pub mod envelope;
pub mod record;

pub use envelope::{VersionedEnvelope, DATA_VERSION};
pub use record::{fields, Currency, CustomField, Record, RecordError, RecordPatch, Reward};
