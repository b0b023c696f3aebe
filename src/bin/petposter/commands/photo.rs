//! `petposter photo` command

use anyhow::Result;

use super::{finish, open_ready_session, revalidate, GlobalOpts};
use crate::cli::{PhotoArgs, PhotoCommands};
use petposter::core::fields;
use petposter::util::shell::Status;

pub fn execute(args: PhotoArgs, opts: &GlobalOpts) -> Result<()> {
    let mut session = open_ready_session(opts)?;

    match args.command {
        PhotoCommands::Add { photos } => {
            for photo in photos {
                opts.shell.status(Status::Updated, format!("added photo {}", photo));
                session.add_photo(photo);
            }
        }
        PhotoCommands::Remove { index } => {
            let removed = session.remove_photo(index)?;
            opts.shell
                .status(Status::Removed, format!("photo {}", removed));
        }
    }

    revalidate(&mut session, opts, fields::PHOTOS);
    finish(session, opts)
}
