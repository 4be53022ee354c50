/// Sample-data loader registry
///
/// Maps a loader reference (module + name) to a statically-typed loader.
/// Loaders are registered once at startup; lookups are plain map reads, so
/// an unknown module and an unknown name are told apart without any
/// runtime symbol resolution.

use crate::sample_data::builtin::{ProjectSampleLoader, BUILTIN_MODULE};
use crate::sample_data::error::ResolutionError;
use crate::sample_data::loader::SampleDataLoader;
use crate::workflow::types::LoaderReference;
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Registry of sample-data loaders
///
/// Key: module, then loader name within the module.
#[derive(Default)]
pub struct LoaderRegistry {
    modules: BTreeMap<String, BTreeMap<String, Arc<dyn SampleDataLoader>>>,
}

impl LoaderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the loaders shipped with flowseed
    pub fn with_builtin_loaders() -> Self {
        let mut registry = Self::new();
        registry.register(
            BUILTIN_MODULE,
            ProjectSampleLoader::NAME,
            Arc::new(ProjectSampleLoader::default()),
        );
        registry
    }

    /// Register a loader under `module.name`
    ///
    /// A second registration for the same pair replaces the first.
    pub fn register(
        &mut self,
        module: impl Into<String>,
        name: impl Into<String>,
        loader: Arc<dyn SampleDataLoader>,
    ) {
        let module = module.into();
        let name = name.into();

        let replaced = self
            .modules
            .entry(module.clone())
            .or_default()
            .insert(name.clone(), loader)
            .is_some();

        if replaced {
            tracing::warn!("⚠️ Replaced sample data loader: {}.{}", module, name);
        } else {
            tracing::debug!("📝 Registered sample data loader: {}.{}", module, name);
        }
    }

    /// Look up the loader a reference points at
    pub fn resolve(
        &self,
        reference: &LoaderReference,
    ) -> Result<Arc<dyn SampleDataLoader>, ResolutionError> {
        let loaders = self
            .modules
            .get(&reference.module)
            .ok_or_else(|| ResolutionError::ModuleNotFound(reference.module.clone()))?;

        loaders
            .get(&reference.name)
            .cloned()
            .ok_or_else(|| ResolutionError::LoaderNotFound {
                module: reference.module.clone(),
                name: reference.name.clone(),
            })
    }

    /// Whether a reference resolves
    pub fn contains(&self, reference: &LoaderReference) -> bool {
        self.resolve(reference).is_ok()
    }

    /// All registered references, sorted by module then name
    pub fn references(&self) -> Vec<LoaderReference> {
        self.modules
            .iter()
            .flat_map(|(module, loaders)| {
                loaders
                    .keys()
                    .map(move |name| LoaderReference::new(module.clone(), name.clone()))
            })
            .collect()
    }

    /// Number of registered loaders
    pub fn len(&self) -> usize {
        self.modules.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("loaders", &self.references())
            .finish()
    }
}
