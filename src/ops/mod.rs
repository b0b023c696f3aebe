//! High-level operations.

pub mod session;

pub use session::{DraftSession, PersistenceStatus};
