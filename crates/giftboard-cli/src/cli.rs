use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use giftboard_core::GiftStatus;

#[derive(Parser)]
#[command(name = "giftboard")]
#[command(about = "Track who still needs a gift from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Quick add: giftboard "Alice, Bob"
    #[arg(trailing_var_arg = true)]
    pub names: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add people (separate names with commas, semicolons or newlines)
    #[command(alias = "new")]
    Add {
        /// Names; read from stdin when omitted
        names: Vec<String>,
    },
    /// Show the board
    #[command(alias = "ls")]
    Board {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move a person to another column
    #[command(name = "move", alias = "mv")]
    Move {
        /// Person ID or unique ID prefix
        id: String,
        /// Destination column
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Delete a person
    #[command(alias = "rm")]
    Delete {
        /// Person ID or unique ID prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Follow the board live until interrupted
    Watch,
    /// Pull changes from the remote database
    Sync,
    /// Inspect or update CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Create or update the configuration file
    Init {
        /// Remote libSQL database URL (token comes from GIFTBOARD_SYNC_TOKEN)
        #[arg(long, value_name = "URL")]
        sync_url: Option<String>,
        /// Seconds between background refreshes while watching
        #[arg(long, value_name = "SECS")]
        refresh_secs: Option<u64>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StatusArg {
    NotSent,
    Preparing,
    Sent,
}

impl From<StatusArg> for GiftStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::NotSent => Self::NotSent,
            StatusArg::Preparing => Self::Preparing,
            StatusArg::Sent => Self::Sent,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
