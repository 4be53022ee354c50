/// SQLite connection setup
///
/// Opens the workflow database (creating the file and its directory when
/// missing) and initializes every table the tool reads or writes:
/// - workflows / workflow_versions: workflow definitions
/// - projects: rows written by sample-data loaders

use crate::config::DatabaseConfig;
use crate::project::storage::ProjectStorage;
use crate::workflow::storage::WorkflowStorage;
use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Open a connection pool for the configured database file
///
/// The file is created if missing and the schema is initialized before the
/// pool is returned, so callers can query immediately.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    let db_path = Path::new(&config.path);
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!("Failed to create database directory '{}': {}", parent.display(), e)
        })?;
    }

    tracing::debug!("🗄️ Opening workflow database: {}", db_path.display());

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(options).await?;

    init_schema(&pool).await?;

    tracing::debug!("✅ Workflow database ready: {}", db_path.display());

    Ok(pool)
}

/// Open a private in-memory database with the full schema
///
/// Limited to one connection: every SQLite `:memory:` connection is its own
/// database.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (safe to call repeatedly)
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    WorkflowStorage::new(pool.clone()).init_schema().await?;
    ProjectStorage::init_schema(pool).await?;
    Ok(())
}
