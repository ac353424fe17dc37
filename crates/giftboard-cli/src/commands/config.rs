use std::path::Path;

use serde::Serialize;

use crate::cli::ConfigCommands;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ConfigView {
    pub config_path: String,
    pub db_path: String,
    pub sync_url: Option<String>,
    pub sync_token: &'static str,
    pub refresh_interval_secs: u64,
    pub sync_enabled: bool,
}

pub fn run_config(command: ConfigCommands, db_path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => {
            let config = CliConfig::load().map_err(CliError::Config)?;
            let view = config_view(&config, &default_config_path(), db_path);
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(())
        }
        ConfigCommands::Init {
            sync_url,
            refresh_secs,
        } => {
            let path = default_config_path();
            let config = CliConfig::load_from_path(&path).map_err(CliError::Config)?;
            let config = apply_init(config, sync_url, refresh_secs);
            config.save_to_path(&path).map_err(CliError::Config)?;
            println!("{}", path.display());
            if config.sync_url.is_some() && std::env::var_os("GIFTBOARD_SYNC_TOKEN").is_none() {
                println!("Set GIFTBOARD_SYNC_TOKEN to enable sync.");
            }
            Ok(())
        }
    }
}

/// Fold `config init` flags into an existing file config.
pub fn apply_init(
    mut config: CliConfig,
    sync_url: Option<String>,
    refresh_secs: Option<u64>,
) -> CliConfig {
    if let Some(url) = sync_url {
        config.sync_url = Some(url);
    }
    if let Some(secs) = refresh_secs {
        config.refresh_interval_secs = secs;
    }
    config
}

pub fn config_view(config: &CliConfig, config_path: &Path, db_path: &Path) -> ConfigView {
    ConfigView {
        config_path: config_path.display().to_string(),
        db_path: db_path.display().to_string(),
        sync_url: config.sync_url.clone(),
        sync_token: if config.sync_token.is_some() {
            "[set]"
        } else {
            "[unset]"
        },
        refresh_interval_secs: config.refresh_interval_secs,
        sync_enabled: config.sync_config().is_some(),
    }
}
