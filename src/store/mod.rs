//! Durable draft persistence.
//!
//! - [`storage`]: the key/value boundary and its backends
//! - [`debounce`]: per-key trailing-edge debounce
//! - [`draft_store`]: versioned save/load on top of both

pub mod debounce;
pub mod draft_store;
pub mod storage;

pub use debounce::Debouncer;
pub use draft_store::{DraftStore, LoadError, LoadOutcome, AVAILABILITY_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
