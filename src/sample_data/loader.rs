//! The sample-data loader capability.

use crate::workflow::types::WorkflowVersion;
use async_trait::async_trait;
use sqlx::SqliteConnection;

/// Populates sample data for one workflow version.
///
/// `conn` is the open transaction the loader runs in. All writes must go
/// through it: returning `Err` rolls every one of them back, returning `Ok`
/// commits them.
#[async_trait]
pub trait SampleDataLoader: Send + Sync {
    /// Write sample rows for `version`.
    async fn load(&self, conn: &mut SqliteConnection, version: &WorkflowVersion) -> anyhow::Result<()>;

    /// One-line description shown by `list-workflows`.
    fn description(&self) -> &str {
        ""
    }
}
