use std::path::Path;

use giftboard_core::board::{Columns, DragLocation, DropEvent, DropOutcome, IgnoreReason};
use giftboard_core::{GiftStatus, PersonId};

use crate::commands::common::{normalize_person_identifier, open_board, resolve_person};
use crate::config::CliConfig;
use crate::error::CliError;

/// Move a person by replaying the drop a board would send for it.
pub async fn run_move(
    id: &str,
    status: GiftStatus,
    db_path: &Path,
    config: &CliConfig,
) -> Result<(), CliError> {
    let normalized_id = normalize_person_identifier(id)?;
    let board = open_board(db_path, config).await?;
    let person = resolve_person(&normalized_id, board.adapter().store()).await?;

    let columns = board.columns();
    let (column, index) = columns
        .locate(&person.id)
        .ok_or_else(|| CliError::PersonNotFound(normalized_id.clone()))?;
    let event = drop_onto_column(person.id, DragLocation { column, index }, status, &columns);

    match board.handle_drop(event).await? {
        DropOutcome::Moved { id, from, to } => println!("{id} {from} -> {to}"),
        DropOutcome::Reordered { id, column } => println!("{id} {column}"),
        DropOutcome::Ignored(IgnoreReason::SamePosition) => {
            println!("{} is already in {}", person.id, status.title());
        }
        DropOutcome::Ignored(IgnoreReason::OutsideColumns) => {}
    }
    Ok(())
}

/// A drop at the end of `status`, or back onto the same slot when the person
/// is already there.
pub fn drop_onto_column(
    id: PersonId,
    source: DragLocation,
    status: GiftStatus,
    columns: &Columns,
) -> DropEvent {
    let index = if source.column == status {
        source.index
    } else {
        columns.get(status).len()
    };
    DropEvent {
        dragged_item_id: id,
        source,
        destination: Some(DragLocation {
            column: status,
            index,
        }),
    }
}
