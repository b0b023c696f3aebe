//! Shared utilities

pub mod clock;
pub mod config;
pub mod context;
pub mod diagnostic;
pub mod fs;
pub mod hash;
pub mod shell;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, StoreConfig};
pub use context::GlobalContext;
pub use diagnostic::Diagnostic;
pub use shell::Shell;
