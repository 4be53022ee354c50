/// flowseed: sample data for workflow versions
///
/// Resolves a workflow and one of its versions from SQLite, finds the
/// sample-data loader the workflow declares, and runs it inside a
/// transaction.

// Core configuration and setup
pub mod config;

// SQLite connection and schema setup
pub mod database;

// Workflow management layer - definitions, versions, storage
pub mod workflow;

// Projects - the rows sample-data loaders write
pub mod project;

// Loader registry and the load-sample-data command
pub mod sample_data;

// Application wiring and command dispatch
pub mod app;

// Re-export commonly used types for external consumers
pub use app::{App, Command};
pub use sample_data::{LoaderRegistry, SampleDataLoader, SampleDataLoaderCommand};
pub use workflow::{LoaderReference, Workflow, WorkflowVersion};
