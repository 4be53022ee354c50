/// Load sample data for a workflow version
///
/// Resolves workflow → version → declared loader → registered loader, then
/// runs the loader inside one transaction. `run` turns every outcome into a
/// line of text on stdout (success) or stderr (everything else); nothing is
/// propagated to the caller.

use crate::sample_data::error::{Result, SampleDataError};
use crate::sample_data::registry::LoaderRegistry;
use crate::workflow::storage::WorkflowStorage;
use crate::workflow::types::WorkflowVersion;
use sqlx::sqlite::SqlitePool;
use std::io::Write;
use std::sync::Arc;

/// The `load-sample-data` command
#[derive(Debug, Clone)]
pub struct SampleDataLoaderCommand {
    /// Pool the loader transaction is opened on
    pool: SqlitePool,
    /// Workflow and version lookups
    storage: WorkflowStorage,
    /// Loaders registered at startup
    registry: Arc<LoaderRegistry>,
}

impl SampleDataLoaderCommand {
    pub fn new(pool: SqlitePool, registry: Arc<LoaderRegistry>) -> Self {
        Self {
            storage: WorkflowStorage::new(pool.clone()),
            pool,
            registry,
        }
    }

    /// Resolve and run the loader for `workflow_slug`/`version_slug`
    ///
    /// Returns the version whose sample data was committed. On a loader
    /// error the transaction is rolled back before the error is returned.
    pub async fn execute(&self, workflow_slug: &str, version_slug: &str) -> Result<WorkflowVersion> {
        let workflow = self
            .storage
            .find_workflow_by_slug(workflow_slug)
            .await
            .map_err(SampleDataError::Database)?
            .ok_or_else(|| SampleDataError::WorkflowNotFound {
                slug: workflow_slug.to_string(),
            })?;

        let version = self
            .storage
            .find_version_by_slug(&workflow, version_slug)
            .await
            .map_err(SampleDataError::Database)?
            .ok_or_else(|| SampleDataError::VersionNotFound {
                slug: version_slug.to_string(),
            })?;

        let reference = workflow
            .sample_data_loader()
            .cloned()
            .ok_or_else(|| SampleDataError::NoLoaderDeclared {
                workflow_slug: workflow.slug.clone(),
            })?;

        let loader = self
            .registry
            .resolve(&reference)
            .map_err(|source| SampleDataError::LoaderResolution {
                reference: reference.clone(),
                source,
            })?;

        tracing::debug!("🔄 Running sample data loader {} for {}", reference, version);

        let mut tx = self.pool.begin().await?;
        match loader.load(&mut *tx, &version).await {
            Ok(()) => {
                tx.commit().await?;
                tracing::info!("✅ Sample data committed for {}", version);
                Ok(version)
            }
            Err(cause) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!("❌ Rollback failed for {}: {}", version, rollback_err);
                }
                tracing::warn!("↩️ Rolled back sample data for {}: {:#}", version, cause);
                Err(SampleDataError::LoaderExecution { reference, cause })
            }
        }
    }

    /// Run the command and report the outcome as text
    ///
    /// Success goes to `stdout`, every other outcome to `stderr`. Write
    /// failures on either stream are logged, never returned.
    pub async fn run(
        &self,
        workflow_slug: &str,
        version_slug: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) {
        match self.execute(workflow_slug, version_slug).await {
            Ok(version) => {
                report(stdout, format_args!("Successfully loaded sample data for {}", version));
            }
            Err(err) => {
                if err.is_informational() {
                    tracing::info!("ℹ️ {}", err);
                } else {
                    tracing::error!("❌ {}", err);
                }
                report(stderr, format_args!("{}", err));
            }
        }
    }
}

fn report(out: &mut dyn Write, line: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{}", line) {
        tracing::warn!("⚠️ Failed to write command output: {}", e);
    }
}
