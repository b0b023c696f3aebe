//! `petposter reward` command

use anyhow::Result;

use super::{finish, open_ready_session, revalidate, GlobalOpts};
use crate::cli::{RewardArgs, RewardCommands};
use petposter::core::{fields, Currency, RecordPatch, Reward};
use petposter::util::shell::Status;

pub fn execute(args: RewardArgs, opts: &GlobalOpts) -> Result<()> {
    let mut session = open_ready_session(opts)?;

    match args.command {
        RewardCommands::Set { amount, currency } => {
            let currency: Currency = currency.parse().map_err(anyhow::Error::msg)?;
            let reward = Reward::new(amount, currency)?;
            session.update(RecordPatch {
                reward: Some(Some(reward)),
                ..Default::default()
            });
            opts.shell.status(
                Status::Updated,
                format!("reward {:.2} {}", amount, currency.code()),
            );
            revalidate(&mut session, opts, fields::REWARD);
        }
        RewardCommands::Clear => {
            session.update(RecordPatch {
                reward: Some(None),
                ..Default::default()
            });
            opts.shell.status(Status::Removed, "reward");
        }
    }

    finish(session, opts)
}
