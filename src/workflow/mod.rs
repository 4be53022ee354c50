/// Workflow Management Layer
///
/// This module handles workflow definitions and their persistence:
/// - Type definitions (Workflow, WorkflowVersion, LoaderReference)
/// - SQLite persistence with sqlx
/// - Import of workflow definitions from JSON files

// Core workflow type definitions
pub mod types;

// SQLite persistence layer for workflows and versions
pub mod storage;

// Re-export commonly used types
pub use storage::WorkflowStorage;
pub use types::{LoaderReference, VersionDefinition, Workflow, WorkflowDefinition, WorkflowVersion};
