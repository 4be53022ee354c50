/// Application setup and command dispatch
///
/// Wires together the database, workflow storage, and loader registry, and
/// runs one CLI subcommand against them.

use crate::{
    config::{Config, LoggingConfig},
    database,
    sample_data::{LoaderRegistry, SampleDataLoaderCommand},
    workflow::{storage::WorkflowStorage, types::WorkflowDefinition},
};
use anyhow::{Context, Result};
use clap::Subcommand;
use sqlx::sqlite::SqlitePool;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Subcommands understood by the flowseed binary
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load sample data for a workflow version into the database
    ///
    /// The workflow must declare a sample-data loader registered with
    /// flowseed. Otherwise this command does nothing.
    LoadSampleData {
        /// The unique identifier of the workflow
        workflow_slug: String,
        /// The version of the workflow to load
        version_slug: String,
    },

    /// Import a workflow definition from a JSON file
    LoadWorkflow {
        /// Path to the workflow definition
        path: PathBuf,
    },

    /// List workflows, their versions, and their sample-data loaders
    ListWorkflows,
}

/// Shared application state for one invocation
#[derive(Debug, Clone)]
pub struct App {
    pool: SqlitePool,
    storage: WorkflowStorage,
    registry: Arc<LoaderRegistry>,
}

impl App {
    /// Open the configured database and register the built-in loaders
    pub async fn new(config: &Config) -> Result<Self> {
        tracing::debug!("📁 Using database: {}", config.database.path);
        let pool = database::connect(&config.database)
            .await
            .with_context(|| format!("Failed to open database '{}'", config.database.path))?;

        Ok(Self::from_parts(pool, LoaderRegistry::with_builtin_loaders()))
    }

    /// Build from an existing pool and registry
    pub fn from_parts(pool: SqlitePool, registry: LoaderRegistry) -> Self {
        Self {
            storage: WorkflowStorage::new(pool.clone()),
            pool,
            registry: Arc::new(registry),
        }
    }

    /// Run one subcommand
    ///
    /// `load-sample-data` reports every outcome as text and always returns
    /// `Ok`. The other subcommands propagate their errors.
    pub async fn run(
        &self,
        command: Command,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<()> {
        match command {
            Command::LoadSampleData {
                workflow_slug,
                version_slug,
            } => {
                SampleDataLoaderCommand::new(self.pool.clone(), Arc::clone(&self.registry))
                    .run(&workflow_slug, &version_slug, stdout, stderr)
                    .await;
                Ok(())
            }
            Command::LoadWorkflow { path } => self.load_workflow(&path, stdout).await,
            Command::ListWorkflows => self.list_workflows(stdout).await,
        }
    }

    async fn load_workflow(&self, path: &Path, stdout: &mut dyn Write) -> Result<()> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read workflow definition '{}'", path.display()))?;
        let definition = WorkflowDefinition::from_json(&json)
            .with_context(|| format!("Invalid workflow definition '{}'", path.display()))?;

        let workflow = self.storage.save_definition(&definition).await?;

        if let Some(reference) = workflow.sample_data_loader() {
            if !self.registry.contains(reference) {
                tracing::warn!(
                    "⚠️ Workflow {} declares sample data loader {} which is not registered",
                    workflow.slug,
                    reference
                );
            }
        }

        writeln!(
            stdout,
            "Loaded workflow {} with {} version(s)",
            workflow.slug,
            definition.versions.len()
        )?;

        Ok(())
    }

    async fn list_workflows(&self, stdout: &mut dyn Write) -> Result<()> {
        let workflows = self.storage.list_workflows().await?;
        if workflows.is_empty() {
            writeln!(stdout, "No workflows loaded")?;
            return Ok(());
        }

        for workflow in workflows {
            writeln!(stdout, "{}  {}", workflow.slug, workflow.name)?;

            match workflow.sample_data_loader() {
                Some(reference) => {
                    let status = if self.registry.contains(reference) {
                        "registered"
                    } else {
                        "not registered"
                    };
                    writeln!(stdout, "  sample data: {} ({})", reference, status)?;
                }
                None => writeln!(stdout, "  sample data: none")?,
            }

            let versions = self.storage.list_versions(&workflow).await?;
            let slugs: Vec<&str> = versions.iter().map(|v| v.slug.as_str()).collect();
            writeln!(stdout, "  versions: {}", slugs.join(", "))?;
        }

        Ok(())
    }
}

/// Install the stderr tracing subscriber
///
/// Falls back to "warn" when the configured filter does not parse.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize logging, open the database, and run the subcommand
pub async fn start(config: Config, command: Command) -> Result<()> {
    init_tracing(&config.logging);

    let app = App::new(&config).await?;

    // Unlocked handles: sqlx's worker thread logs to stderr mid-command
    app.run(command, &mut std::io::stdout(), &mut std::io::stderr())
        .await?;

    Ok(())
}
