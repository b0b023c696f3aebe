//! `petposter config` command

use anyhow::{bail, Context, Result};

use super::GlobalOpts;
use crate::cli::ConfigArgs;
use petposter::util::shell::Status;
use petposter::util::Config;

pub fn execute(args: ConfigArgs, opts: &GlobalOpts) -> Result<()> {
    let ctx = opts.context()?;

    if args.init {
        let path = ctx.project_config_path();
        if path.exists() && !args.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
        Config::default().save(&path)?;
        opts.shell.status(Status::Created, path.display());
        return Ok(());
    }

    if let Some(path) = ctx.global_config_path() {
        opts.shell.note(format!("global config: {}", path.display()));
    }
    opts.shell
        .note(format!("project config: {}", ctx.project_config_path().display()));
    opts.shell
        .note(format!("data directory: {}", ctx.data_dir().display()));

    let rendered = toml::to_string_pretty(ctx.config()).context("failed to render config")?;
    print!("{}", rendered);
    Ok(())
}
