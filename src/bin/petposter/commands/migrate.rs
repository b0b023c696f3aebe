//! `petposter migrate` command

use anyhow::{bail, Result};

use super::{open_store, GlobalOpts};
use petposter::core::DATA_VERSION;
use petposter::util::shell::Status;

pub fn execute(opts: &GlobalOpts) -> Result<()> {
    let ctx = opts.context()?;
    let mut store = open_store(&ctx);

    if !store.is_available() {
        bail!("storage at {} is unavailable", ctx.data_dir().display());
    }

    if store.migrate_if_needed() {
        opts.shell
            .status(Status::Migrated, format!("draft to version {}", DATA_VERSION));
    } else {
        opts.shell.status(Status::Info, "nothing to migrate");
    }

    Ok(())
}
