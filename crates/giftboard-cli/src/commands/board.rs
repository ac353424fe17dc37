use std::path::Path;

use chrono::Utc;

use crate::commands::common::{board_to_item, format_board_lines, format_stats, open_board};
use crate::config::CliConfig;
use crate::error::CliError;

pub async fn run_board(as_json: bool, db_path: &Path, config: &CliConfig) -> Result<(), CliError> {
    let board = open_board(db_path, config).await?;
    let columns = board.columns();
    let now_ms = Utc::now().timestamp_millis();

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&board_to_item(&columns, now_ms))?
        );
        return Ok(());
    }

    for line in format_board_lines(&columns, now_ms) {
        println!("{line}");
    }
    println!();
    println!("{}", format_stats(&columns.stats()));
    Ok(())
}
