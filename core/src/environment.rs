//! Environment module - Dependency injection traits
//!
//! All external collaborators of the project actions are abstracted behind
//! these traits and injected by the caller. Production code wires real
//! storage; tests wire the in-memory implementations from `tagger-testing`.
//!
//! # Dyn Compatibility
//!
//! The service traits return `Pin<Box<dyn Future>>` instead of using
//! `async fn` so they can be held as `Arc<dyn Trait>` inside an
//! environment and so export providers can be chosen at runtime.

use crate::error::Result;
use crate::model::{Asset, AssetMetadata, ExportProviderOptions, Project, ProviderType};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by service methods
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Clock trait - abstracts time operations for testability
///
/// # Examples
///
/// ```ignore
/// // Production - uses system clock
/// let clock = SystemClock;
/// let exported_at = clock.now();
///
/// // Test - fixed time for deterministic output
/// let clock = FixedClock::new(time);
/// assert_eq!(clock.now(), time);
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Project persistence.
pub trait ProjectService: Send + Sync {
    /// Persist a project.
    ///
    /// # Returns
    ///
    /// The project as stored, which may differ from the input (for example
    /// a refreshed version).
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend rejects the write.
    fn save<'a>(&'a self, project: &'a Project) -> ServiceFuture<'a, Project>;

    /// Remove a project and its stored files.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The project does not exist → `ServiceError::NotFound`
    /// - The storage backend rejects the delete
    fn delete<'a>(&'a self, project: &'a Project) -> ServiceFuture<'a, ()>;
}

/// Asset retrieval and metadata persistence for a project.
pub trait AssetService: Send + Sync {
    /// List the assets available from the project's source connection.
    ///
    /// # Errors
    ///
    /// Returns error if the source connection cannot be read.
    fn get_assets<'a>(&'a self, project: &'a Project) -> ServiceFuture<'a, Vec<Asset>>;

    /// Load the tagging metadata of one asset.
    ///
    /// Assets that were never tagged yield empty metadata rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns error if stored metadata exists but cannot be read.
    fn get_asset_metadata<'a>(
        &'a self,
        project: &'a Project,
        asset: &'a Asset,
    ) -> ServiceFuture<'a, AssetMetadata>;

    /// Persist the tagging metadata of one asset.
    ///
    /// # Errors
    ///
    /// Returns error if the target connection rejects the write.
    fn save<'a>(
        &'a self,
        project: &'a Project,
        metadata: &'a AssetMetadata,
    ) -> ServiceFuture<'a, AssetMetadata>;
}

/// A concrete export strategy bound to one project.
pub trait ExportProvider: Send + Sync {
    /// Write the export output.
    ///
    /// # Errors
    ///
    /// Returns error if the output cannot be produced or written.
    fn export(&self) -> ServiceFuture<'_, ()>;
}

/// Resolves export strategies by provider type.
pub trait ExportProviderFactory: Send + Sync {
    /// Instantiate the export provider registered for `provider_type`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::UnknownExportProvider` if nothing is
    /// registered for the provider type.
    fn create(
        &self,
        provider_type: &ProviderType,
        project: &Project,
        options: &ExportProviderOptions,
    ) -> Result<Box<dyn ExportProvider>>;
}
