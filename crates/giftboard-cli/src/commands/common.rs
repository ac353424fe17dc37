use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use giftboard_core::board::{categorize, BoardController, BoardStats, Columns};
use giftboard_core::store::LibSqlPersonStore;
use giftboard_core::{GiftStatus, Person, PersonId, SyncAdapter};
use serde::Serialize;

use crate::config::CliConfig;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct PersonItem {
    pub id: String,
    pub name: String,
    pub status: GiftStatus,
    pub created_at: i64,
    pub updated_at: i64,
    pub relative_time: String,
}

#[derive(Debug, Serialize)]
pub struct ColumnItem {
    pub id: GiftStatus,
    pub title: &'static str,
    pub people: Vec<PersonItem>,
}

#[derive(Debug, Serialize)]
pub struct BoardItem {
    pub columns: Vec<ColumnItem>,
    pub stats: BoardStats,
}

pub async fn open_store(
    db_path: &Path,
    config: &CliConfig,
) -> Result<Arc<LibSqlPersonStore>, CliError> {
    let store = LibSqlPersonStore::open_path(db_path, config.sync_config()).await?;
    Ok(Arc::new(store))
}

/// Open the store and prime a controller with the current snapshot.
pub async fn open_board(
    db_path: &Path,
    config: &CliConfig,
) -> Result<BoardController<LibSqlPersonStore>, CliError> {
    let store = open_store(db_path, config).await?;
    let adapter = SyncAdapter::new(store);
    adapter.refresh_latest().await?;
    Ok(BoardController::new(adapter))
}

pub async fn resolve_person(query: &str, store: &LibSqlPersonStore) -> Result<Person, CliError> {
    if let Ok(person_id) = query.parse::<PersonId>() {
        if let Some(person) = store.get(&person_id).await? {
            return Ok(person);
        }
    }

    let matching_ids = store.list_ids_by_prefix(query, 3).await?;

    match matching_ids.len() {
        0 => Err(CliError::PersonNotFound(query.to_string())),
        1 => {
            let resolved_id = matching_ids[0]
                .parse::<PersonId>()
                .map_err(|_| CliError::PersonNotFound(query.to_string()))?;
            store
                .get(&resolved_id)
                .await?
                .ok_or_else(|| CliError::PersonNotFound(query.to_string()))
        }
        _ => {
            let options = matching_ids
                .iter()
                .map(|id| short_id(id))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousPersonId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn format_board_lines(columns: &Columns, now_ms: i64) -> Vec<String> {
    let mut lines = Vec::new();
    for (status, people) in columns.by_status() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("{} ({})", status.title(), people.len()));
        if people.is_empty() {
            lines.push("  -".to_string());
        }
        for person in people {
            lines.push(format!(
                "  {}  {}  {}",
                short_id(&person.id.as_str()),
                person.name_preview(40),
                format_relative_time(person.updated_at, now_ms)
            ));
        }
    }
    lines
}

pub fn format_stats(stats: &BoardStats) -> String {
    let noun = if stats.total == 1 { "person" } else { "people" };
    format!(
        "{} {noun}: {} not sent, {} preparing, {} sent",
        stats.total, stats.not_sent, stats.preparing, stats.sent
    )
}

pub fn render_board(people: &[Person]) -> Vec<String> {
    let columns = categorize(people);
    let mut lines = format_board_lines(&columns, Utc::now().timestamp_millis());
    lines.push(String::new());
    lines.push(format_stats(&columns.stats()));
    lines
}

pub fn board_to_item(columns: &Columns, now_ms: i64) -> BoardItem {
    BoardItem {
        columns: columns
            .by_status()
            .map(|(status, people)| ColumnItem {
                id: status,
                title: status.title(),
                people: people
                    .iter()
                    .map(|person| person_to_item(person, now_ms))
                    .collect(),
            })
            .collect(),
        stats: columns.stats(),
    }
}

pub fn person_to_item(person: &Person, now_ms: i64) -> PersonItem {
    PersonItem {
        id: person.id.to_string(),
        name: person.name.clone(),
        status: person.status,
        created_at: person.created_at,
        updated_at: person.updated_at,
        relative_time: format_relative_time(person.updated_at, now_ms),
    }
}

pub fn short_id(id: &str) -> String {
    id.chars().take(13).collect()
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// Raw name text from arguments, falling back to piped stdin.
///
/// Each argument is kept as its own line so `add "Mary Ann" Bob` yields two
/// names.
pub fn resolve_names_input(name_parts: &[String]) -> Result<String, CliError> {
    if let Some(raw) = normalize_names_text(&name_parts.join("\n")) {
        return Ok(raw);
    }

    if let Some(raw) = read_piped_stdin()? {
        return Ok(raw);
    }

    Err(CliError::EmptyNames)
}

pub fn normalize_names_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_person_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyPersonId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_names_text(&buffer))
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("GIFTBOARD_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("giftboard")
        .join("giftboard.db")
}
