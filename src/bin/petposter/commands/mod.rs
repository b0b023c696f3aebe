//! Command implementations

pub mod config;
pub mod field;
pub mod migrate;
pub mod photo;
pub mod reset;
pub mod reward;
pub mod set;
pub mod show;
pub mod validate;

use std::fmt;

use anyhow::Result;

use crate::cli::Cli;
use petposter::ops::{DraftSession, PersistenceStatus};
use petposter::store::{DraftStore, FileStorage};
use petposter::util::diagnostic::Diagnostic;
use petposter::util::shell::{ColorChoice, Shell};
use petposter::util::GlobalContext;
use petposter::validation::{FieldValidation, Validator};

/// The problem was already printed; exit non-zero without another message.
#[derive(Debug)]
pub struct AlreadyReported;

impl fmt::Display for AlreadyReported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "already reported")
    }
}

impl std::error::Error for AlreadyReported {}

/// Flags shared by every command.
pub struct GlobalOpts {
    pub shell: Shell,
    pub data_dir: Option<std::path::PathBuf>,
}

impl GlobalOpts {
    pub fn from_cli(cli: &Cli) -> Self {
        let color = if cli.no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        GlobalOpts {
            shell: Shell::from_flags(cli.quiet, cli.verbose, color),
            data_dir: cli.data_dir.clone(),
        }
    }

    pub fn context(&self) -> Result<GlobalContext> {
        let ctx = GlobalContext::new()?;
        Ok(match &self.data_dir {
            Some(dir) => ctx.with_data_dir(dir.clone()),
            None => ctx,
        })
    }
}

pub type Session = DraftSession<FileStorage>;

/// Open the file-backed store for the configured data directory.
pub fn open_store(ctx: &GlobalContext) -> DraftStore<FileStorage> {
    let store_config = ctx.config().store.clone();
    let storage = FileStorage::new(ctx.data_dir()).with_quota(store_config.quota_bytes);
    DraftStore::new(storage, store_config)
}

/// Open and initialize a session. Load failures are left in the status.
pub fn open_session(opts: &GlobalOpts) -> Result<Session> {
    let ctx = opts.context()?;
    opts.shell
        .note(format!("using data directory {}", ctx.data_dir().display()));

    let mut session = DraftSession::new(open_store(&ctx), Validator::default());
    session.initialize();
    if !session.is_persistent() {
        opts.shell.warn("storage is unavailable; changes will not be saved");
    }
    Ok(session)
}

/// Open a session and require the stored draft to have loaded.
pub fn open_ready_session(opts: &GlobalOpts) -> Result<Session> {
    let session = open_session(opts)?;
    if let PersistenceStatus::LoadFailed(reason) = session.status() {
        opts.shell.diagnostic(&Diagnostic::for_load_failure(reason.as_str()));
        return Err(AlreadyReported.into());
    }
    Ok(session)
}

/// Write any pending change before the process exits.
pub fn finish(mut session: Session, opts: &GlobalOpts) -> Result<()> {
    if let Err(e) = session.flush() {
        opts.shell.diagnostic(&Diagnostic::for_save_error(&e));
        return Err(AlreadyReported.into());
    }
    Ok(())
}

/// Warn about a field that was stored but does not pass validation.
pub fn report_field(opts: &GlobalOpts, name: &str, validation: &FieldValidation) {
    if let Some(message) = &validation.error_message {
        opts.shell.warn(format!("{}: {}", name, message));
    }
}

/// Re-check one field of the current record and warn if it fails.
pub fn revalidate(session: &mut Session, opts: &GlobalOpts, name: &str) {
    let value = session
        .record()
        .to_fields()
        .remove(name)
        .unwrap_or(serde_json::Value::Null);
    let validation = session.tracker_mut().validate_field(name, &value);
    report_field(opts, name, &validation);
}
