/// Project type definitions
///
/// A project is one run of a workflow version. Sample-data loaders create
/// projects so a freshly imported workflow has something to show.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A project bound to a workflow version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier (uuid)
    pub id: String,
    /// Workflow version this project runs
    pub workflow_version_id: String,
    /// Short description, unique within the version
    pub short_description: String,
    /// Scheduling priority (higher first)
    pub priority: i64,
    /// Arbitrary project input data
    pub project_data: Value,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

/// Fields needed to create a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub short_description: String,
    pub priority: i64,
    pub project_data: Value,
}

impl NewProject {
    pub fn new(short_description: impl Into<String>, priority: i64, project_data: Value) -> Self {
        Self {
            short_description: short_description.into(),
            priority,
            project_data,
        }
    }
}
