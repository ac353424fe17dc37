use std::path::Path;

use giftboard_core::SyncAdapter;

use crate::commands::common::{open_store, render_board};
use crate::config::CliConfig;
use crate::error::CliError;

/// Re-render the board on every snapshot until Ctrl-C.
pub async fn run_watch(db_path: &Path, config: &CliConfig) -> Result<(), CliError> {
    let store = open_store(db_path, config).await?;
    let refresher = store.spawn_refresh(config.refresh_interval());
    let adapter = SyncAdapter::new(store);

    let subscription = adapter
        .subscribe(|snapshot| {
            println!("---");
            for line in render_board(&snapshot) {
                println!("{line}");
            }
        })
        .await?;

    let interrupted = tokio::signal::ctrl_c().await;
    tracing::info!("Stopping board watch");
    subscription.unsubscribe().await;
    refresher.abort();
    interrupted?;
    Ok(())
}
