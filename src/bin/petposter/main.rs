//! Petposter CLI - missing-pet poster drafts from the command line

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{AlreadyReported, GlobalOpts};

fn main() {
    if let Err(e) = run() {
        if e.downcast_ref::<AlreadyReported>().is_none() {
            eprintln!("error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("petposter=debug")
    } else {
        EnvFilter::new("petposter=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let opts = GlobalOpts::from_cli(&cli);

    // Execute command
    match cli.command {
        Commands::Show(args) => commands::show::execute(args, &opts),
        Commands::Set(args) => commands::set::execute(args, &opts),
        Commands::Photo(args) => commands::photo::execute(args, &opts),
        Commands::Field(args) => commands::field::execute(args, &opts),
        Commands::Reward(args) => commands::reward::execute(args, &opts),
        Commands::Validate(args) => commands::validate::execute(args, &opts),
        Commands::Reset(args) => commands::reset::execute(args, &opts),
        Commands::Migrate => commands::migrate::execute(&opts),
        Commands::Config(args) => commands::config::execute(args, &opts),
    }
}
