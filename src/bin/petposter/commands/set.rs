//! `petposter set` command

use anyhow::{bail, Context, Result};
use serde_json::Value;

use super::{finish, open_ready_session, report_field, GlobalOpts};
use crate::cli::SetArgs;
use petposter::core::fields;
use petposter::util::shell::Status;

pub fn execute(args: SetArgs, opts: &GlobalOpts) -> Result<()> {
    let value = parse_value(&args.field, &args.value)?;

    let mut session = open_ready_session(opts)?;
    let validation = session.set_field(&args.field, value)?;

    opts.shell.status(Status::Updated, &args.field);
    report_field(opts, &args.field, &validation);

    finish(session, opts)
}

/// Text fields take the argument as-is. Other fields take JSON, and an
/// empty argument resets them.
fn parse_value(field: &str, raw: &str) -> Result<Value> {
    if fields::TEXT.contains(&field) {
        return Ok(Value::String(raw.to_string()));
    }
    if !fields::ALL.contains(&field) {
        bail!("unknown field `{}`", field);
    }
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(raw).with_context(|| format!("value for `{}` must be JSON", field))
}
