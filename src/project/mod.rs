/// Project module
///
/// Projects are the rows sample-data loaders write: each one is a run of a
/// workflow version.

pub mod storage;
pub mod types;

pub use storage::ProjectStorage;
pub use types::{NewProject, Project};
