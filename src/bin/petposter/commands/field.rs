//! `petposter field` command

use anyhow::Result;

use super::{finish, open_ready_session, revalidate, GlobalOpts};
use crate::cli::{FieldArgs, FieldCommands};
use petposter::core::{fields, CustomField};
use petposter::util::shell::Status;

pub fn execute(args: FieldArgs, opts: &GlobalOpts) -> Result<()> {
    let mut session = open_ready_session(opts)?;

    match args.command {
        FieldCommands::Add { label, value } => {
            session.add_custom_field();
            let index = session.record().custom_fields.len() - 1;
            if !label.is_empty() || !value.is_empty() {
                session.update_custom_field(index, CustomField::new(label, value))?;
            }
            opts.shell
                .status(Status::Updated, format!("added custom field [{}]", index));
        }
        FieldCommands::Set {
            index,
            label,
            value,
        } => {
            session.update_custom_field(index, CustomField::new(label, value))?;
            opts.shell
                .status(Status::Updated, format!("custom field [{}]", index));
        }
        FieldCommands::Remove { index } => {
            let removed = session.remove_custom_field(index)?;
            opts.shell
                .status(Status::Removed, format!("custom field `{}`", removed.label));
        }
    }

    revalidate(&mut session, opts, fields::CUSTOM_FIELDS);
    finish(session, opts)
}
