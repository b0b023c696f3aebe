//! `petposter validate` command

use anyhow::Result;

use super::{finish, open_ready_session, AlreadyReported, GlobalOpts};
use crate::cli::ValidateArgs;
use petposter::util::diagnostic::Diagnostic;
use petposter::util::shell::Status;

pub fn execute(args: ValidateArgs, opts: &GlobalOpts) -> Result<()> {
    let mut session = open_ready_session(opts)?;
    let result = session.validate_form();
    finish(session, opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    if result.is_valid {
        opts.shell.status(Status::Info, "draft is ready to export");
        return Ok(());
    }

    if !args.json {
        opts.shell.diagnostic(&Diagnostic::for_validation(&result));
    }
    Err(AlreadyReported.into())
}
