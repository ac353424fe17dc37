use std::path::Path;

use crate::commands::common::{open_board, resolve_names_input};
use crate::config::CliConfig;
use crate::error::CliError;

pub async fn run_add(
    name_parts: &[String],
    db_path: &Path,
    config: &CliConfig,
) -> Result<(), CliError> {
    let raw = resolve_names_input(name_parts)?;

    let board = open_board(db_path, config).await?;
    let report = board.add_people(&raw).await?;

    for id in &report.added {
        println!("{id}");
    }
    for (name, error) in &report.failed {
        eprintln!("Could not add '{name}': {error}");
    }

    if report.is_complete() {
        Ok(())
    } else {
        Err(CliError::PartialAdd(report.failed.len()))
    }
}
