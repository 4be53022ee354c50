/// Project persistence
///
/// Writes take a plain `SqliteConnection` so they can run inside the
/// transaction a sample-data loader is handed.

use crate::project::types::{NewProject, Project};
use crate::workflow::types::WorkflowVersion;
use anyhow::Result;
use sqlx::{sqlite::SqlitePool, Row, SqliteConnection};

/// Stateless project table helpers
pub struct ProjectStorage;

impl ProjectStorage {
    /// Create the projects table (safe to call multiple times)
    pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                workflow_version_id TEXT NOT NULL REFERENCES workflow_versions(id) ON DELETE CASCADE,
                short_description TEXT NOT NULL,
                priority INTEGER NOT NULL DEFAULT 0,
                project_data JSON NOT NULL,
                created_at TIMESTAMP NOT NULL,
                UNIQUE (workflow_version_id, short_description)
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_projects_version ON projects(workflow_version_id)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Insert a project unless one with the same description already exists
    ///
    /// Returns true when a row was written.
    pub async fn insert_if_absent(
        conn: &mut SqliteConnection,
        version: &WorkflowVersion,
        project: &NewProject,
    ) -> Result<bool> {
        let project_data = serde_json::to_string(&project.project_data)?;

        let result = sqlx::query(
            r#"
            INSERT INTO projects (id, workflow_version_id, short_description, priority, project_data, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(workflow_version_id, short_description) DO NOTHING
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(&version.id)
        .bind(&project.short_description)
        .bind(project.priority)
        .bind(&project_data)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List the projects of a version, highest priority first
    pub async fn list_for_version(
        conn: &mut SqliteConnection,
        version: &WorkflowVersion,
    ) -> Result<Vec<Project>> {
        let rows = sqlx::query(
            r#"
            SELECT id, workflow_version_id, short_description, priority, project_data, created_at
            FROM projects
            WHERE workflow_version_id = ?
            ORDER BY priority DESC, short_description
            "#,
        )
        .bind(&version.id)
        .fetch_all(&mut *conn)
        .await?;

        let mut projects = Vec::new();
        for row in rows {
            let project_data: String = row.get("project_data");
            projects.push(Project {
                id: row.get("id"),
                workflow_version_id: row.get("workflow_version_id"),
                short_description: row.get("short_description"),
                priority: row.get("priority"),
                project_data: serde_json::from_str(&project_data)?,
                created_at: row.get("created_at"),
            });
        }

        Ok(projects)
    }
}
