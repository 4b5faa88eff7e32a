//! Mock export provider factory.

use crate::lock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tagger_core::environment::{ExportProvider, ExportProviderFactory, ServiceFuture};
use tagger_core::error::{Result, ServiceError};
use tagger_core::model::{ExportProviderOptions, Project, ProviderType};

/// Arguments of one `create` call
pub type CreateCall = (ProviderType, Project, ExportProviderOptions);

/// Factory handing out [`MockExportProvider`]s.
///
/// Records every `create` call and counts `export` calls across all
/// providers it created.
#[derive(Debug, Clone, Default)]
pub struct MockExportProviderFactory {
    create_calls: Arc<Mutex<Vec<CreateCall>>>,
    export_calls: Arc<AtomicUsize>,
    create_failure: Arc<Mutex<Option<ServiceError>>>,
    export_failure: Arc<Mutex<Option<ServiceError>>>,
}

impl MockExportProviderFactory {
    /// Create a factory whose providers succeed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create` fail with `error`
    pub fn fail_create_with(&self, error: ServiceError) {
        *lock(&self.create_failure) = Some(error);
    }

    /// Make `export` of subsequently created providers fail with `error`
    pub fn fail_export_with(&self, error: ServiceError) {
        *lock(&self.export_failure) = Some(error);
    }

    /// Arguments passed to `create`, in call order
    #[must_use]
    pub fn create_calls(&self) -> Vec<CreateCall> {
        lock(&self.create_calls).clone()
    }

    /// Number of completed or failed `export` calls
    #[must_use]
    pub fn export_calls(&self) -> usize {
        self.export_calls.load(Ordering::SeqCst)
    }
}

impl ExportProviderFactory for MockExportProviderFactory {
    fn create(
        &self,
        provider_type: &ProviderType,
        project: &Project,
        options: &ExportProviderOptions,
    ) -> Result<Box<dyn ExportProvider>> {
        lock(&self.create_calls).push((*provider_type, project.clone(), options.clone()));

        if let Some(error) = lock(&self.create_failure).clone() {
            return Err(error);
        }

        Ok(Box::new(MockExportProvider {
            export_calls: Arc::clone(&self.export_calls),
            failure: lock(&self.export_failure).clone(),
        }))
    }
}

/// Provider created by [`MockExportProviderFactory`]
#[derive(Debug)]
pub struct MockExportProvider {
    export_calls: Arc<AtomicUsize>,
    failure: Option<ServiceError>,
}

impl ExportProvider for MockExportProvider {
    fn export(&self) -> ServiceFuture<'_, ()> {
        Box::pin(async move {
            self.export_calls.fetch_add(1, Ordering::SeqCst);
            self.failure.clone().map_or(Ok(()), Err)
        })
    }
}
