//! In-memory project and asset services.
//!
//! Both services log every call and can be switched into a failing mode to
//! exercise error propagation. Clones share state, so a test can keep one
//! handle for assertions and inject another into the environment.

use crate::lock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tagger_core::environment::{AssetService, ProjectService, ServiceFuture};
use tagger_core::error::ServiceError;
use tagger_core::model::{Asset, AssetId, AssetMetadata, Project, ProjectId};

/// In-memory project service.
///
/// Saving returns the project unchanged. Deleting an unknown project
/// succeeds.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectService {
    projects: Arc<Mutex<HashMap<ProjectId, Project>>>,
    save_calls: Arc<Mutex<Vec<Project>>>,
    delete_calls: Arc<Mutex<Vec<Project>>>,
    failure: Arc<Mutex<Option<ServiceError>>>,
}

impl InMemoryProjectService {
    /// Create an empty service
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `error`
    pub fn fail_with(&self, error: ServiceError) {
        *lock(&self.failure) = Some(error);
    }

    /// Stop failing
    pub fn recover(&self) {
        *lock(&self.failure) = None;
    }

    /// Projects passed to `save`, in call order
    #[must_use]
    pub fn save_calls(&self) -> Vec<Project> {
        lock(&self.save_calls).clone()
    }

    /// Projects passed to `delete`, in call order
    #[must_use]
    pub fn delete_calls(&self) -> Vec<Project> {
        lock(&self.delete_calls).clone()
    }

    /// A stored project by ID
    #[must_use]
    pub fn get(&self, id: &ProjectId) -> Option<Project> {
        lock(&self.projects).get(id).cloned()
    }

    /// Number of stored projects
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.projects).len()
    }

    /// Whether no project is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.projects).is_empty()
    }
}

impl ProjectService for InMemoryProjectService {
    fn save<'a>(&'a self, project: &'a Project) -> ServiceFuture<'a, Project> {
        Box::pin(async move {
            lock(&self.save_calls).push(project.clone());

            if let Some(error) = lock(&self.failure).clone() {
                return Err(error);
            }

            lock(&self.projects).insert(project.id.clone(), project.clone());
            Ok(project.clone())
        })
    }

    fn delete<'a>(&'a self, project: &'a Project) -> ServiceFuture<'a, ()> {
        Box::pin(async move {
            lock(&self.delete_calls).push(project.clone());

            if let Some(error) = lock(&self.failure).clone() {
                return Err(error);
            }

            lock(&self.projects).remove(&project.id);
            Ok(())
        })
    }
}

/// In-memory asset service.
///
/// Serves a fixed asset list. Metadata that was never saved is returned
/// empty.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetService {
    assets: Arc<Mutex<Vec<Asset>>>,
    metadata: Arc<Mutex<HashMap<AssetId, AssetMetadata>>>,
    get_assets_calls: Arc<Mutex<Vec<ProjectId>>>,
    metadata_requests: Arc<Mutex<Vec<AssetId>>>,
    save_calls: Arc<Mutex<Vec<AssetMetadata>>>,
    failure: Arc<Mutex<Option<ServiceError>>>,
}

impl InMemoryAssetService {
    /// Create a service serving no assets
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service serving `assets`
    #[must_use]
    pub fn with_assets(assets: Vec<Asset>) -> Self {
        let service = Self::default();
        *lock(&service.assets) = assets;
        service
    }

    /// Pre-populate stored metadata
    pub fn insert_metadata(&self, metadata: AssetMetadata) {
        lock(&self.metadata).insert(metadata.asset.id.clone(), metadata);
    }

    /// Make every subsequent call fail with `error`
    pub fn fail_with(&self, error: ServiceError) {
        *lock(&self.failure) = Some(error);
    }

    /// Stop failing
    pub fn recover(&self) {
        *lock(&self.failure) = None;
    }

    /// Project IDs passed to `get_assets`, in call order
    #[must_use]
    pub fn get_assets_calls(&self) -> Vec<ProjectId> {
        lock(&self.get_assets_calls).clone()
    }

    /// Asset IDs passed to `get_asset_metadata`, in call order
    #[must_use]
    pub fn metadata_requests(&self) -> Vec<AssetId> {
        lock(&self.metadata_requests).clone()
    }

    /// Metadata passed to `save`, in call order
    #[must_use]
    pub fn save_calls(&self) -> Vec<AssetMetadata> {
        lock(&self.save_calls).clone()
    }

    /// Stored metadata of an asset
    #[must_use]
    pub fn stored_metadata(&self, id: &AssetId) -> Option<AssetMetadata> {
        lock(&self.metadata).get(id).cloned()
    }

    fn check_failure(&self) -> Result<(), ServiceError> {
        lock(&self.failure).clone().map_or(Ok(()), Err)
    }
}

impl AssetService for InMemoryAssetService {
    fn get_assets<'a>(&'a self, project: &'a Project) -> ServiceFuture<'a, Vec<Asset>> {
        Box::pin(async move {
            lock(&self.get_assets_calls).push(project.id.clone());
            self.check_failure()?;
            Ok(lock(&self.assets).clone())
        })
    }

    fn get_asset_metadata<'a>(
        &'a self,
        _project: &'a Project,
        asset: &'a Asset,
    ) -> ServiceFuture<'a, AssetMetadata> {
        Box::pin(async move {
            lock(&self.metadata_requests).push(asset.id.clone());
            self.check_failure()?;
            Ok(lock(&self.metadata)
                .get(&asset.id)
                .cloned()
                .unwrap_or_else(|| AssetMetadata::new(asset.clone())))
        })
    }

    fn save<'a>(
        &'a self,
        _project: &'a Project,
        metadata: &'a AssetMetadata,
    ) -> ServiceFuture<'a, AssetMetadata> {
        Box::pin(async move {
            lock(&self.save_calls).push(metadata.clone());
            self.check_failure()?;
            lock(&self.metadata).insert(metadata.asset.id.clone(), metadata.clone());
            Ok(metadata.clone())
        })
    }
}
