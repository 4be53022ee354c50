/// Sample Data Layer
///
/// Loads optional sample data for a workflow version:
/// - `SampleDataLoader`: the capability a workflow's loader implements
/// - `LoaderRegistry`: loaders registered at startup, keyed by module + name
/// - `SampleDataLoaderCommand`: resolves and runs a loader in a transaction

// Loader capability trait
pub mod loader;

// Startup-time loader registry
pub mod registry;

// Loaders shipped with flowseed
pub mod builtin;

// Outcome taxonomy and diagnostics
pub mod error;

// The load-sample-data command
pub mod command;

// Re-export main types
pub use builtin::{ProjectSampleLoader, BUILTIN_MODULE};
pub use command::SampleDataLoaderCommand;
pub use error::{ResolutionError, SampleDataError};
pub use loader::SampleDataLoader;
pub use registry::LoaderRegistry;
