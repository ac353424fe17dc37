use std::path::Path;

use crate::commands::common::open_store;
use crate::config::CliConfig;
use crate::error::CliError;

pub async fn run_sync(db_path: &Path, config: &CliConfig) -> Result<(), CliError> {
    if config.sync_config().is_none() {
        return Err(CliError::SyncNotConfigured);
    }

    let store = open_store(db_path, config).await?;
    if !store.is_sync_enabled().await {
        return Err(CliError::SyncNotConfigured);
    }

    if store.refresh().await? {
        println!("Sync completed (board updated)");
    } else {
        println!("Sync completed");
    }
    Ok(())
}
