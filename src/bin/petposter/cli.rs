//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Petposter - build and validate a missing-pet poster draft
#[derive(Parser)]
#[command(name = "petposter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory holding stored drafts
    #[arg(long, global = true, env = "PETPOSTER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the current draft
    Show(ShowArgs),

    /// Set a field of the draft
    Set(SetArgs),

    /// Manage poster photos
    Photo(PhotoArgs),

    /// Manage custom label/value fields
    Field(FieldArgs),

    /// Set or clear the reward
    Reward(RewardArgs),

    /// Check that the draft is ready to export
    Validate(ValidateArgs),

    /// Discard the draft
    Reset(ResetArgs),

    /// Upgrade a draft saved before versioning
    Migrate,

    /// Print the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SetArgs {
    /// Field name (e.g. petName, contactPhone)
    pub field: String,

    /// New value; JSON for list and reward fields. Empty clears the field.
    pub value: String,
}

#[derive(Args)]
pub struct PhotoArgs {
    #[command(subcommand)]
    pub command: PhotoCommands,
}

#[derive(Subcommand)]
pub enum PhotoCommands {
    /// Add one or more photos
    Add {
        /// Photo paths or URLs
        #[arg(required = true)]
        photos: Vec<String>,
    },

    /// Remove the photo at an index
    Remove {
        /// Zero-based index as printed by `show`
        index: usize,
    },
}

#[derive(Args)]
pub struct FieldArgs {
    #[command(subcommand)]
    pub command: FieldCommands,
}

#[derive(Subcommand)]
pub enum FieldCommands {
    /// Append a custom field
    Add {
        /// Field label
        #[arg(long, default_value = "")]
        label: String,

        /// Field value
        #[arg(long, default_value = "")]
        value: String,
    },

    /// Replace the custom field at an index
    Set {
        index: usize,
        label: String,
        value: String,
    },

    /// Remove the custom field at an index
    Remove { index: usize },
}

#[derive(Args)]
pub struct RewardArgs {
    #[command(subcommand)]
    pub command: RewardCommands,
}

#[derive(Subcommand)]
pub enum RewardCommands {
    /// Offer a reward
    Set {
        amount: f64,

        /// Currency code (BRL or USD)
        #[arg(default_value = "BRL")]
        currency: String,
    },

    /// Remove the reward
    Clear,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Print the validation result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ResetArgs {
    /// Remove every stored entry, not just the draft
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the default configuration to .petposter/config.toml
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing project config (with --init)
    #[arg(long, requires = "init")]
    pub force: bool,
}
