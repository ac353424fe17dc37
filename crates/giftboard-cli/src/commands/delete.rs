use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use giftboard_core::Person;

use crate::commands::common::{normalize_person_identifier, open_board, resolve_person};
use crate::config::CliConfig;
use crate::error::CliError;

pub async fn run_delete(
    id: &str,
    assume_yes: bool,
    db_path: &Path,
    config: &CliConfig,
) -> Result<(), CliError> {
    let normalized_id = normalize_person_identifier(id)?;
    let board = open_board(db_path, config).await?;
    let person = resolve_person(&normalized_id, board.adapter().store()).await?;

    if !assume_yes && !confirm_delete(&person)? {
        println!("Cancelled");
        return Ok(());
    }

    board.delete_person(&person.id).await?;
    println!("{}", person.id);
    Ok(())
}

/// Ask on the terminal before a permanent delete.
fn confirm_delete(person: &Person) -> Result<bool, CliError> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Err(CliError::ConfirmationRequired);
    }

    let mut stderr = io::stderr();
    write!(stderr, "Delete {}? This cannot be undone [y/N] ", person.name)?;
    stderr.flush()?;

    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
