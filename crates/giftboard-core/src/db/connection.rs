//! Database connection management

use crate::error::{Error, Result};
use libsql::{Builder, Connection, Database as LibSqlDatabase};
use std::path::Path;
use std::time::Duration;

use super::migrations;

/// Configuration for syncing the local replica with a remote database
#[derive(Clone, Default)]
pub struct SyncConfig {
    /// Remote database URL (e.g., `libsql://gifts.turso.io`)
    pub url: Option<String>,
    /// Authentication token for remote database
    pub auth_token: Option<String>,
    /// Automatic replica sync interval
    pub sync_interval: Option<Duration>,
}

impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SyncConfig")
            .field("url", &self.url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("sync_interval", &self.sync_interval)
            .finish()
    }
}

impl SyncConfig {
    /// Create a new sync configuration
    pub fn new(url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            auth_token: Some(auth_token.into()),
            sync_interval: Some(Duration::from_secs(5)),
        }
    }

    /// Set the automatic sync interval
    #[must_use]
    pub const fn with_sync_interval(mut self, interval: Duration) -> Self {
        self.sync_interval = Some(interval);
        self
    }
}

/// Database wrapper for libSQL connections
pub struct Database {
    db: LibSqlDatabase,
    conn: Connection,
    sync_config: Option<SyncConfig>,
}

impl Database {
    /// Open a local-only database at the given path, creating it if it doesn't exist
    ///
    /// Runs migrations automatically.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let db = Builder::new_local(&path_str).build().await?;
        Self::finish_open(db, None).await
    }

    /// Open an in-memory database (useful for testing)
    pub async fn open_in_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:").build().await?;
        Self::finish_open(db, None).await
    }

    /// Open an embedded replica that syncs with a remote libSQL database
    ///
    /// Reads are served from the local file, writes go to the remote primary.
    pub async fn open_with_sync(
        local_path: impl AsRef<Path>,
        sync_config: SyncConfig,
    ) -> Result<Self> {
        let path_str = local_path.as_ref().to_string_lossy().to_string();

        let url = sync_config
            .url
            .clone()
            .ok_or_else(|| Error::Validation("Sync URL is required".into()))?;
        let token = sync_config
            .auth_token
            .clone()
            .ok_or_else(|| Error::Validation("Auth token is required".into()))?;

        let mut builder = Builder::new_remote_replica(&path_str, url, token);
        if let Some(interval) = sync_config.sync_interval {
            builder = builder.sync_interval(interval);
            tracing::debug!("Automatic replica sync interval set to {:?}", interval);
        }

        let db = builder
            .build()
            .await
            .map_err(|error| Error::Transport(error.to_string()))?;

        // Pull the remote schema before migrating so we don't race another client
        db.sync()
            .await
            .map_err(|error| Error::Transport(error.to_string()))?;
        tracing::debug!("Initial replica sync complete");

        Self::finish_open(db, Some(sync_config)).await
    }

    async fn finish_open(db: LibSqlDatabase, sync_config: Option<SyncConfig>) -> Result<Self> {
        let conn = db.connect()?;
        let database = Self {
            db,
            conn,
            sync_config,
        };
        database.configure().await?;
        migrations::run(&database.conn).await?;
        Ok(database)
    }

    async fn configure(&self) -> Result<()> {
        // Remote replicas reject some pragmas
        self.conn
            .execute("PRAGMA journal_mode = WAL;", ())
            .await
            .ok();
        self.conn
            .execute("PRAGMA synchronous = NORMAL;", ())
            .await
            .ok();
        Ok(())
    }

    /// Pull changes from the remote database (if configured)
    pub async fn sync(&self) -> Result<()> {
        if self.sync_config.is_some() {
            self.db
                .sync()
                .await
                .map_err(|error| Error::Transport(error.to_string()))?;
            tracing::debug!("Database synced with remote");
        }
        Ok(())
    }

    /// Check if sync is configured
    pub const fn is_sync_enabled(&self) -> bool {
        self.sync_config.is_some()
    }

    /// Get a reference to the underlying connection
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_open_in_memory() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(!db.is_sync_enabled());
        db.sync().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_open_file_creates_database() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("giftboard.db");

        let db = Database::open(&path).await.unwrap();
        let mut rows = db.connection().query("SELECT 1", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
        assert!(path.exists());
    }

    #[test]
    fn test_sync_config_new() {
        let config = SyncConfig::new("libsql://gifts.turso.io", "test-token");
        assert_eq!(config.url.as_deref(), Some("libsql://gifts.turso.io"));
        assert_eq!(config.auth_token.as_deref(), Some("test-token"));
        assert_eq!(config.sync_interval, Some(Duration::from_secs(5)));
        assert_eq!(
            config
                .with_sync_interval(Duration::from_secs(30))
                .sync_interval,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_sync_config_debug_redacts_token() {
        let debug = format!("{:?}", SyncConfig::new("libsql://gifts.turso.io", "secret"));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
