use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] giftboard_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No names provided")]
    EmptyNames,
    #[error("Person ID cannot be empty")]
    EmptyPersonId,
    #[error("Person not found for id/prefix: {0}")]
    PersonNotFound(String),
    #[error("{0}")]
    AmbiguousPersonId(String),
    #[error("Refusing to delete without confirmation; pass --yes when not running interactively")]
    ConfirmationRequired,
    #[error("Failed to add {0} of the given names")]
    PartialAdd(usize),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "Sync is not configured. Run `giftboard config init --sync-url <URL>` and set GIFTBOARD_SYNC_TOKEN."
    )]
    SyncNotConfigured,
}
