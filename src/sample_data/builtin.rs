//! Loaders shipped with flowseed.

use crate::project::{NewProject, ProjectStorage};
use crate::sample_data::loader::SampleDataLoader;
use crate::workflow::types::WorkflowVersion;
use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;
use sqlx::SqliteConnection;

/// Module the built-in loaders are registered under
pub const BUILTIN_MODULE: &str = "flowseed.sample_data";

/// Creates a handful of demonstration projects for a version
///
/// Idempotent: projects are keyed by description within the version, so a
/// second run writes nothing.
#[derive(Debug, Clone)]
pub struct ProjectSampleLoader {
    projects: Vec<NewProject>,
}

impl ProjectSampleLoader {
    pub const NAME: &'static str = "projects";

    /// Loader writing a custom project set
    pub fn with_projects(projects: Vec<NewProject>) -> Self {
        Self { projects }
    }
}

impl Default for ProjectSampleLoader {
    fn default() -> Self {
        Self::with_projects(vec![
            NewProject::new(
                "Sample project: onboarding",
                10,
                json!({"topic": "onboarding", "sample": true}),
            ),
            NewProject::new(
                "Sample project: quarterly report",
                5,
                json!({"topic": "reporting", "sample": true}),
            ),
            NewProject::new(
                "Sample project: cleanup",
                0,
                json!({"topic": "maintenance", "sample": true}),
            ),
        ])
    }
}

#[async_trait]
impl SampleDataLoader for ProjectSampleLoader {
    async fn load(&self, conn: &mut SqliteConnection, version: &WorkflowVersion) -> anyhow::Result<()> {
        let mut created = 0;
        for project in &self.projects {
            let inserted = ProjectStorage::insert_if_absent(conn, version, project)
                .await
                .with_context(|| format!("Failed to create project '{}'", project.short_description))?;
            if inserted {
                created += 1;
            }
        }

        tracing::info!(
            "🌱 Created {} of {} sample projects for {}",
            created,
            self.projects.len(),
            version
        );

        Ok(())
    }

    fn description(&self) -> &str {
        "Creates demonstration projects for the version"
    }
}
