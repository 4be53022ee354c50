/// SQLite persistence layer for workflow storage
///
/// Handles workflow and version lookups by slug plus import of workflow
/// definitions. The loader reference is stored as a nullable JSON column.

use crate::workflow::types::{LoaderReference, Workflow, WorkflowDefinition, WorkflowVersion};
use anyhow::Result;
use sqlx::{
    sqlite::{SqlitePool, SqliteRow},
    Row,
};

/// SQLite-based workflow storage manager
#[derive(Debug, Clone)]
pub struct WorkflowStorage {
    /// SQLite connection pool for the workflow database
    pool: SqlitePool,
}

impl WorkflowStorage {
    /// Create new storage instance with database connection
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the workflow storage schema
    ///
    /// Creates the workflows and workflow_versions tables.
    /// Safe to call multiple times (uses IF NOT EXISTS).
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS workflows (
                id TEXT PRIMARY KEY,
                slug TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                sample_data_load_function JSON,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS workflow_versions (
                id TEXT PRIMARY KEY,
                workflow_id TEXT NOT NULL REFERENCES workflows(id) ON DELETE CASCADE,
                slug TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (workflow_id, slug)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieve a workflow by slug
    pub async fn find_workflow_by_slug(&self, slug: &str) -> Result<Option<Workflow>> {
        let row = sqlx::query(
            "SELECT id, slug, name, description, sample_data_load_function FROM workflows WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| workflow_from_row(&row)).transpose()
    }

    /// Retrieve a version by slug, scoped to the given workflow
    pub async fn find_version_by_slug(
        &self,
        workflow: &Workflow,
        slug: &str,
    ) -> Result<Option<WorkflowVersion>> {
        let row = sqlx::query(
            "SELECT id, slug, name, description FROM workflow_versions WHERE workflow_id = ? AND slug = ?",
        )
        .bind(&workflow.id)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| version_from_row(&row, workflow)))
    }

    /// List all workflows ordered by slug
    pub async fn list_workflows(&self) -> Result<Vec<Workflow>> {
        let rows = sqlx::query(
            "SELECT id, slug, name, description, sample_data_load_function FROM workflows ORDER BY slug",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(workflow_from_row).collect()
    }

    /// List the versions of a workflow ordered by slug
    pub async fn list_versions(&self, workflow: &Workflow) -> Result<Vec<WorkflowVersion>> {
        let rows = sqlx::query(
            "SELECT id, slug, name, description FROM workflow_versions WHERE workflow_id = ? ORDER BY slug",
        )
        .bind(&workflow.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|row| version_from_row(row, workflow)).collect())
    }

    /// Store a workflow definition and its versions
    ///
    /// Uses UPSERT keyed on slugs so existing ids survive a re-import.
    /// Everything is written in one transaction. Versions missing from the
    /// definition are left in place.
    pub async fn save_definition(&self, definition: &WorkflowDefinition) -> Result<Workflow> {
        definition.validate()?;

        let loader_json = definition
            .sample_data_load_function
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO workflows (id, slug, name, description, sample_data_load_function, updated_at)
            VALUES (?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(slug) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                sample_data_load_function = excluded.sample_data_load_function,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(&definition.slug)
        .bind(&definition.name)
        .bind(&definition.description)
        .bind(&loader_json)
        .execute(&mut *tx)
        .await?;

        let workflow_id: String = sqlx::query_scalar("SELECT id FROM workflows WHERE slug = ?")
            .bind(&definition.slug)
            .fetch_one(&mut *tx)
            .await?;

        for version in &definition.versions {
            sqlx::query(
                r#"
                INSERT INTO workflow_versions (id, workflow_id, slug, name, description, updated_at)
                VALUES (?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
                ON CONFLICT(workflow_id, slug) DO UPDATE SET
                    name = excluded.name,
                    description = excluded.description,
                    updated_at = CURRENT_TIMESTAMP
                "#,
            )
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(&workflow_id)
            .bind(&version.slug)
            .bind(&version.name)
            .bind(&version.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "📥 Saved workflow {} with {} version(s)",
            definition.slug,
            definition.versions.len()
        );

        Ok(Workflow {
            id: workflow_id,
            slug: definition.slug.clone(),
            name: definition.name.clone(),
            description: definition.description.clone(),
            sample_data_load_function: definition.sample_data_load_function.clone(),
        })
    }
}

fn workflow_from_row(row: &SqliteRow) -> Result<Workflow> {
    let loader_json: Option<String> = row.get("sample_data_load_function");
    let sample_data_load_function = match loader_json {
        Some(json) => serde_json::from_str::<Option<LoaderReference>>(&json)?,
        None => None,
    };

    Ok(Workflow {
        id: row.get("id"),
        slug: row.get("slug"),
        name: row.get("name"),
        description: row.get("description"),
        sample_data_load_function,
    })
}

fn version_from_row(row: &SqliteRow, workflow: &Workflow) -> WorkflowVersion {
    WorkflowVersion {
        id: row.get("id"),
        slug: row.get("slug"),
        workflow_id: workflow.id.clone(),
        workflow_slug: workflow.slug.clone(),
        name: row.get("name"),
        description: row.get("description"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database;
    use crate::workflow::types::VersionDefinition;

    fn definition(slug: &str, versions: &[&str]) -> WorkflowDefinition {
        WorkflowDefinition {
            slug: slug.to_string(),
            name: format!("{} workflow", slug),
            description: String::new(),
            sample_data_load_function: Some(LoaderReference::new("demo", "load")),
            versions: versions
                .iter()
                .map(|v| VersionDefinition {
                    slug: v.to_string(),
                    name: format!("Version {}", v),
                    description: String::new(),
                })
                .collect(),
        }
    }

    async fn storage() -> WorkflowStorage {
        WorkflowStorage::new(database::connect_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_find_workflow_by_slug() {
        let storage = storage().await;
        assert!(storage.find_workflow_by_slug("simple").await.unwrap().is_none());

        let saved = storage.save_definition(&definition("simple", &["v1"])).await.unwrap();
        let found = storage.find_workflow_by_slug("simple").await.unwrap().unwrap();

        assert_eq!(found, saved);
        assert_eq!(
            found.sample_data_load_function,
            Some(LoaderReference::new("demo", "load"))
        );
    }

    #[tokio::test]
    async fn test_version_lookup_is_scoped_to_workflow() {
        let storage = storage().await;
        let first = storage.save_definition(&definition("first", &["v1"])).await.unwrap();
        let second = storage.save_definition(&definition("second", &["v2"])).await.unwrap();

        let version = storage.find_version_by_slug(&first, "v1").await.unwrap().unwrap();
        assert_eq!(version.workflow_id, first.id);
        assert_eq!(version.to_string(), "first - v1");

        assert!(storage.find_version_by_slug(&second, "v1").await.unwrap().is_none());
        assert!(storage.find_version_by_slug(&first, "v2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reimport_keeps_ids_and_updates_fields() {
        let storage = storage().await;
        let original = storage.save_definition(&definition("simple", &["v1"])).await.unwrap();
        let v1 = storage.find_version_by_slug(&original, "v1").await.unwrap().unwrap();

        let mut updated = definition("simple", &["v1", "v2"]);
        updated.name = "Renamed".to_string();
        updated.sample_data_load_function = None;
        let reimported = storage.save_definition(&updated).await.unwrap();

        assert_eq!(reimported.id, original.id);
        let found = storage.find_workflow_by_slug("simple").await.unwrap().unwrap();
        assert_eq!(found.name, "Renamed");
        assert!(found.sample_data_load_function.is_none());

        let versions = storage.list_versions(&found).await.unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].id, v1.id);
    }

    #[tokio::test]
    async fn test_list_workflows_sorted_by_slug() {
        let storage = storage().await;
        storage.save_definition(&definition("zeta", &[])).await.unwrap();
        storage.save_definition(&definition("alpha", &[])).await.unwrap();

        let slugs: Vec<String> = storage
            .list_workflows()
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.slug)
            .collect();
        assert_eq!(slugs, vec!["alpha", "zeta"]);
    }
}
