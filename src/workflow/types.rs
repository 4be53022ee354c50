/// Core workflow type definitions
///
/// Defines workflows, their versions, and the loader reference a workflow
/// may declare for sample data. Definitions are imported from JSON files and
/// persisted in SQLite.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A workflow stored in the database
///
/// Workflows are identified by a unique slug and own zero or more versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique workflow identifier (uuid)
    pub id: String,
    /// Unique, human-chosen workflow slug (e.g., "simple_workflow")
    pub slug: String,
    /// Human-readable workflow name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Optional reference to the loader that populates sample data
    pub sample_data_load_function: Option<LoaderReference>,
}

impl Workflow {
    /// The declared loader reference, treating an empty one as undeclared
    pub fn sample_data_loader(&self) -> Option<&LoaderReference> {
        self.sample_data_load_function
            .as_ref()
            .filter(|reference| !reference.is_empty())
    }
}

/// A specific revision of a workflow
///
/// Version slugs are unique within their parent workflow only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowVersion {
    /// Unique version identifier (uuid)
    pub id: String,
    /// Version slug, unique within the workflow (e.g., "v1")
    pub slug: String,
    /// Owning workflow id
    pub workflow_id: String,
    /// Owning workflow slug, kept for display
    pub workflow_slug: String,
    /// Human-readable version name
    pub name: String,
    /// Free-form description
    pub description: String,
}

impl fmt::Display for WorkflowVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.workflow_slug, self.slug)
    }
}

/// Names a sample-data loader registered in the `LoaderRegistry`
///
/// Stored as JSON: `{"module": "flowseed.sample_data", "name": "projects"}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoaderReference {
    /// Namespace the loader is registered under
    #[serde(default)]
    pub module: String,
    /// Loader name within the namespace
    #[serde(default)]
    pub name: String,
}

impl LoaderReference {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// True for `{}` or a reference with both parts blank
    pub fn is_empty(&self) -> bool {
        self.module.trim().is_empty() && self.name.trim().is_empty()
    }
}

impl fmt::Display for LoaderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

/// Workflow definition as found in an importable JSON file
///
/// Example:
/// ```json
/// {
///   "slug": "simple_workflow",
///   "name": "Simple Workflow",
///   "sample_data_load_function": {"module": "flowseed.sample_data", "name": "projects"},
///   "versions": [{"slug": "v1", "name": "Version 1"}]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sample_data_load_function: Option<LoaderReference>,
    #[serde(default)]
    pub versions: Vec<VersionDefinition>,
}

/// Version entry inside a `WorkflowDefinition`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionDefinition {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl WorkflowDefinition {
    /// Parse a definition from JSON text and validate it
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let definition: WorkflowDefinition = serde_json::from_str(json)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Check slugs are present and version slugs are unique
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.slug.trim().is_empty() {
            return Err(anyhow::anyhow!("Workflow slug must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(anyhow::anyhow!("Workflow {} must have a name", self.slug));
        }

        let mut seen = HashSet::new();
        for version in &self.versions {
            if version.slug.trim().is_empty() {
                return Err(anyhow::anyhow!(
                    "Workflow {} has a version with an empty slug",
                    self.slug
                ));
            }
            if !seen.insert(version.slug.as_str()) {
                return Err(anyhow::anyhow!(
                    "Workflow {} declares version {} more than once",
                    self.slug,
                    version.slug
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_loader_reference_counts_as_undeclared() {
        let mut workflow = Workflow {
            id: "wf-1".to_string(),
            slug: "simple".to_string(),
            name: "Simple".to_string(),
            description: String::new(),
            sample_data_load_function: Some(serde_json::from_str("{}").unwrap()),
        };
        assert!(workflow.sample_data_loader().is_none());

        workflow.sample_data_load_function = Some(LoaderReference::new("demo", "load"));
        assert_eq!(
            workflow.sample_data_loader(),
            Some(&LoaderReference::new("demo", "load"))
        );
    }

    #[test]
    fn test_version_display_names_workflow_and_version() {
        let version = WorkflowVersion {
            id: "v-1".to_string(),
            slug: "v1".to_string(),
            workflow_id: "wf-1".to_string(),
            workflow_slug: "simple".to_string(),
            name: "Version 1".to_string(),
            description: String::new(),
        };
        assert_eq!(version.to_string(), "simple - v1");
    }

    #[test]
    fn test_definition_rejects_duplicate_versions() {
        let json = r#"{
            "slug": "simple",
            "name": "Simple",
            "versions": [{"slug": "v1", "name": "one"}, {"slug": "v1", "name": "again"}]
        }"#;
        let err = WorkflowDefinition::from_json(json).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_definition_defaults_optional_fields() {
        let json = r#"{"slug": "simple", "name": "Simple"}"#;
        let definition = WorkflowDefinition::from_json(json).unwrap();
        assert!(definition.sample_data_load_function.is_none());
        assert!(definition.versions.is_empty());
        assert_eq!(definition.description, "");
    }
}
