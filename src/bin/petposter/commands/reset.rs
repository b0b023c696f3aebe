//! `petposter reset` command

use anyhow::Result;

use super::{finish, open_session, GlobalOpts};
use crate::cli::ResetArgs;
use petposter::util::shell::Status;

/// Works even when the stored draft cannot be loaded.
pub fn execute(args: ResetArgs, opts: &GlobalOpts) -> Result<()> {
    let mut session = open_session(opts)?;

    if args.all {
        session.clear_all_data()?;
        opts.shell.status(Status::Cleared, "all stored data");
    } else {
        session.reset()?;
        opts.shell.status(Status::Cleared, "draft");
    }

    finish(session, opts)
}
