//! Giftboard CLI - the gift list board from the terminal
//!
//! Add people, move them between columns and follow the board live.

mod cli;
mod commands;
mod config;
mod error;


use clap::{CommandFactory, Parser};
use tracing_subscriber::filter::Directive;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::board::run_board;
use crate::commands::common::resolve_db_path;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::move_person::run_move;
use crate::commands::sync::run_sync;
use crate::commands::watch::run_watch;
use crate::config::CliConfig;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "giftboard=info".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);

    match cli.command {
        Some(Commands::Config { command }) => run_config(command, &db_path)?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Add { names }) => run_add(&names, &db_path, &load_config()?).await?,
        Some(Commands::Board { json }) => run_board(json, &db_path, &load_config()?).await?,
        Some(Commands::Move { id, status }) => {
            run_move(&id, status.into(), &db_path, &load_config()?).await?;
        }
        Some(Commands::Delete { id, yes }) => {
            run_delete(&id, yes, &db_path, &load_config()?).await?;
        }
        Some(Commands::Watch) => run_watch(&db_path, &load_config()?).await?,
        Some(Commands::Sync) => run_sync(&db_path, &load_config()?).await?,
        None => {
            // Quick add: giftboard "Alice, Bob"
            if cli.names.is_empty() {
                Cli::command().print_help().map_err(CliError::Io)?;
                println!();
            } else {
                run_add(&cli.names, &db_path, &load_config()?).await?;
            }
        }
    }

    Ok(())
}

fn load_config() -> Result<CliConfig, CliError> {
    CliConfig::load().map_err(CliError::Config)
}
