use crate::ExportConfig;
use crate::json::JsonExportProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tagger_core::environment::{Clock, ExportProvider, ExportProviderFactory};
use tagger_core::error::{Result, ServiceError};
use tagger_core::model::{ExportProviderOptions, Project, ProviderType};

/// Builds an export provider for one project
pub type ProviderConstructor = Arc<
    dyn Fn(&Project, &ExportProviderOptions) -> Result<Box<dyn ExportProvider>> + Send + Sync,
>;

/// Lookup table from provider type to provider constructor.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tagger_core::model::ProviderType;
/// use tagger_export::ExportProviderRegistry;
/// use tagger_testing::MockExportProviderFactory;
/// use tagger_core::environment::ExportProviderFactory;
///
/// let mock = MockExportProviderFactory::new();
/// let mut registry = ExportProviderRegistry::new();
/// registry.register(ProviderType::Csv, move |project, options| {
///     mock.create(&ProviderType::Csv, project, options)
/// });
///
/// assert!(registry.is_registered(ProviderType::Csv));
/// assert!(!registry.is_registered(ProviderType::VottJson));
/// ```
#[derive(Clone, Default)]
pub struct ExportProviderRegistry {
    constructors: HashMap<ProviderType, ProviderConstructor>,
}

impl ExportProviderRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in providers
    ///
    /// Registers [`JsonExportProvider`] for [`ProviderType::VottJson`].
    #[must_use]
    pub fn with_defaults(config: ExportConfig, clock: Arc<dyn Clock>) -> Self {
        let mut registry = Self::new();
        registry.register(ProviderType::VottJson, move |project, options| {
            Ok(Box::new(JsonExportProvider::new(
                project.clone(),
                options.clone(),
                config.export_dir.clone(),
                Arc::clone(&clock),
            )) as Box<dyn ExportProvider>)
        });
        registry
    }

    /// Register (or replace) the constructor for `provider_type`
    pub fn register<F>(&mut self, provider_type: ProviderType, constructor: F) -> &mut Self
    where
        F: Fn(&Project, &ExportProviderOptions) -> Result<Box<dyn ExportProvider>>
            + Send
            + Sync
            + 'static,
    {
        if self
            .constructors
            .insert(provider_type, Arc::new(constructor))
            .is_some()
        {
            tracing::debug!(%provider_type, "Replaced export provider");
        }
        self
    }

    /// Whether a constructor is registered for `provider_type`
    #[must_use]
    pub fn is_registered(&self, provider_type: ProviderType) -> bool {
        self.constructors.contains_key(&provider_type)
    }

    /// Registered provider types, in declaration order
    #[must_use]
    pub fn provider_types(&self) -> Vec<ProviderType> {
        ProviderType::ALL
            .into_iter()
            .filter(|provider_type| self.is_registered(*provider_type))
            .collect()
    }
}

impl std::fmt::Debug for ExportProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportProviderRegistry")
            .field("provider_types", &self.provider_types())
            .finish()
    }
}

impl ExportProviderFactory for ExportProviderRegistry {
    fn create(
        &self,
        provider_type: &ProviderType,
        project: &Project,
        options: &ExportProviderOptions,
    ) -> Result<Box<dyn ExportProvider>> {
        let constructor = self
            .constructors
            .get(provider_type)
            .ok_or(ServiceError::UnknownExportProvider(*provider_type))?;

        constructor(project, options)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use tagger_testing::{MockExportProviderFactory, mock_project, test_clock};

    #[test]
    fn test_unknown_provider_type_fails() {
        let registry = ExportProviderRegistry::new();
        let project = mock_project("TestProject");

        let result = registry.create(
            &ProviderType::TensorflowRecords,
            &project,
            &ExportProviderOptions::default(),
        );

        assert!(matches!(
            result,
            Err(ServiceError::UnknownExportProvider(ProviderType::TensorflowRecords))
        ));
    }

    #[test]
    fn test_defaults_register_json() {
        let registry = ExportProviderRegistry::with_defaults(
            ExportConfig::default(),
            Arc::new(test_clock()),
        );

        assert_eq!(registry.provider_types(), vec![ProviderType::VottJson]);
    }

    #[tokio::test]
    async fn test_lookup_is_keyed_by_provider_type() {
        let csv = MockExportProviderFactory::new();
        let records = MockExportProviderFactory::new();
        let mut registry = ExportProviderRegistry::new();
        {
            let csv = csv.clone();
            registry.register(ProviderType::Csv, move |project, options| {
                csv.create(&ProviderType::Csv, project, options)
            });
        }
        {
            let records = records.clone();
            registry.register(ProviderType::TensorflowRecords, move |project, options| {
                records.create(&ProviderType::TensorflowRecords, project, options)
            });
        }

        let project = mock_project("TestProject");
        let provider = registry
            .create(&ProviderType::Csv, &project, &ExportProviderOptions::default())
            .unwrap();
        provider.export().await.unwrap();

        assert_eq!(csv.export_calls(), 1);
        assert_eq!(records.export_calls(), 0);
        assert_eq!(csv.create_calls()[0].1, project);
    }

    #[test]
    fn test_register_replaces_existing() {
        let first = MockExportProviderFactory::new();
        let second = MockExportProviderFactory::new();
        let mut registry = ExportProviderRegistry::new();
        {
            let first = first.clone();
            registry.register(ProviderType::Csv, move |p, o| first.create(&ProviderType::Csv, p, o));
        }
        {
            let second = second.clone();
            registry.register(ProviderType::Csv, move |p, o| second.create(&ProviderType::Csv, p, o));
        }

        let _ = registry
            .create(&ProviderType::Csv, &mock_project("p"), &ExportProviderOptions::default())
            .unwrap();

        assert!(first.create_calls().is_empty());
        assert_eq!(second.create_calls().len(), 1);
    }
}
