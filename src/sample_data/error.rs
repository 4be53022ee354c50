//! Error types for sample-data loading.

use crate::workflow::types::LoaderReference;
use thiserror::Error;

/// Result type for sample-data operations.
pub type Result<T> = std::result::Result<T, SampleDataError>;

/// Why a loader reference could not be turned into a loader.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Nothing is registered under the module.
    #[error("No sample data loaders are registered under module '{0}'")]
    ModuleNotFound(String),

    /// The module exists but has no loader with that name.
    #[error("Module '{module}' has no sample data loader named '{name}'")]
    LoaderNotFound { module: String, name: String },
}

/// Every way loading sample data can stop.
///
/// Display strings are the user-facing diagnostics.
#[derive(Debug, Error)]
pub enum SampleDataError {
    /// Workflow slug not in the database.
    #[error(
        "Workflow {slug} has not been loaded into the database. Please load it before adding sample data."
    )]
    WorkflowNotFound { slug: String },

    /// Version slug not registered for the workflow.
    #[error("Version {slug} does not exist. Not loading sample data.")]
    VersionNotFound { slug: String },

    /// Workflow declares no loader. Expected, not a failure.
    #[error("Workflow {workflow_slug} does not provide sample data. Not loading sample data.")]
    NoLoaderDeclared { workflow_slug: String },

    /// Declared loader is not in the registry.
    #[error("An error occurred while loading sample data: {source}")]
    LoaderResolution {
        reference: LoaderReference,
        #[source]
        source: ResolutionError,
    },

    /// Loader returned an error; its writes were rolled back.
    #[error("An error occurred while loading sample data: {cause:#}")]
    LoaderExecution {
        reference: LoaderReference,
        cause: anyhow::Error,
    },

    /// Lookup or transaction bookkeeping failed.
    #[error("An error occurred while loading sample data: {0:#}")]
    Database(anyhow::Error),
}

impl SampleDataError {
    /// True for outcomes that are reported but are not failures
    pub fn is_informational(&self) -> bool {
        matches!(self, SampleDataError::NoLoaderDeclared { .. })
    }
}

impl From<sqlx::Error> for SampleDataError {
    fn from(err: sqlx::Error) -> Self {
        SampleDataError::Database(err.into())
    }
}
