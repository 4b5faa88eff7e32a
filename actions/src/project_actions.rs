//! Project action creators.
//!
//! Every operation has the same shape: await at most one service call, then
//! dispatch exactly one success action, then return the service's result.
//! Service errors are returned unchanged and nothing is dispatched.

use crate::reducer::AppState;
use std::sync::Arc;
use tagger_core::action::AppAction;
use tagger_core::dispatch::{Dispatch, GetState};
use tagger_core::environment::{AssetService, ExportProviderFactory, ProjectService};
use tagger_core::error::{Result, ServiceError};
use tagger_core::model::{Asset, AssetMetadata, Project};

/// Services the project actions call
#[derive(Clone)]
pub struct ProjectEnvironment {
    /// Project persistence
    pub project_service: Arc<dyn ProjectService>,
    /// Asset listing and metadata persistence
    pub asset_service: Arc<dyn AssetService>,
    /// Export strategy lookup
    pub export_factory: Arc<dyn ExportProviderFactory>,
}

impl ProjectEnvironment {
    /// Creates a new `ProjectEnvironment`
    #[must_use]
    pub fn new(
        project_service: Arc<dyn ProjectService>,
        asset_service: Arc<dyn AssetService>,
        export_factory: Arc<dyn ExportProviderFactory>,
    ) -> Self {
        Self {
            project_service,
            asset_service,
            export_factory,
        }
    }
}

impl std::fmt::Debug for ProjectEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectEnvironment").finish_non_exhaustive()
    }
}

/// Action creators for projects and their assets
///
/// # Example
///
/// ```ignore
/// let actions = ProjectActions::new(environment);
///
/// let project = actions.load_project(&project, &store).await;
/// let assets = actions.load_assets(&project, &store).await?;
/// actions.save_project(&project, &store, &store).await?;
/// ```
#[derive(Clone, Debug)]
pub struct ProjectActions {
    env: ProjectEnvironment,
}

impl ProjectActions {
    /// Create action creators over `env`
    #[must_use]
    pub const fn new(env: ProjectEnvironment) -> Self {
        Self { env }
    }

    /// Injected services
    #[must_use]
    pub const fn environment(&self) -> &ProjectEnvironment {
        &self.env
    }

    /// Make `project` the current project
    ///
    /// Calls no service. Dispatches `LOAD_PROJECT_SUCCESS` with the project.
    #[tracing::instrument(skip_all, fields(project = %project.name, project_id = %project.id))]
    pub async fn load_project<D>(&self, project: &Project, dispatch: &D) -> Project
    where
        D: Dispatch<AppAction> + ?Sized,
    {
        dispatch.dispatch(AppAction::LoadProjectSuccess(project.clone()));
        project.clone()
    }

    /// Persist `project`
    ///
    /// Dispatches `SAVE_PROJECT_SUCCESS` with the project returned by the
    /// project service and returns it. `get_state` is read before the save
    /// to tag the trace with whether the open project is being saved.
    ///
    /// # Errors
    ///
    /// Returns the project service's error unchanged.
    #[tracing::instrument(skip_all, fields(project = %project.name, project_id = %project.id))]
    pub async fn save_project<D, G>(
        &self,
        project: &Project,
        dispatch: &D,
        get_state: &G,
    ) -> Result<Project>
    where
        D: Dispatch<AppAction> + ?Sized,
        G: GetState<AppState> + ?Sized,
    {
        let is_current = get_state.get_state().is_current(&project.id);
        tracing::debug!(is_current, "Saving project");

        let saved = self
            .env
            .project_service
            .save(project)
            .await
            .inspect_err(log_failure("save_project"))?;

        dispatch.dispatch(AppAction::SaveProjectSuccess(saved.clone()));
        Ok(saved)
    }

    /// Delete `project`
    ///
    /// Dispatches `DELETE_PROJECT_SUCCESS` with the project.
    ///
    /// # Errors
    ///
    /// Returns the project service's error unchanged.
    #[tracing::instrument(skip_all, fields(project = %project.name, project_id = %project.id))]
    pub async fn delete_project<D>(&self, project: &Project, dispatch: &D) -> Result<()>
    where
        D: Dispatch<AppAction> + ?Sized,
    {
        self.env
            .project_service
            .delete(project)
            .await
            .inspect_err(log_failure("delete_project"))?;

        dispatch.dispatch(AppAction::DeleteProjectSuccess(project.clone()));
        Ok(())
    }

    /// Close the current project
    ///
    /// Calls no service. Dispatches `CLOSE_PROJECT_SUCCESS` without payload.
    #[tracing::instrument(skip_all)]
    pub async fn close_project<D>(&self, dispatch: &D)
    where
        D: Dispatch<AppAction> + ?Sized,
    {
        dispatch.dispatch(AppAction::CloseProjectSuccess);
    }

    /// List the assets of `project`
    ///
    /// Dispatches `LOAD_PROJECT_ASSETS_SUCCESS` with the asset list.
    ///
    /// # Errors
    ///
    /// Returns the asset service's error unchanged.
    #[tracing::instrument(skip_all, fields(project = %project.name, project_id = %project.id))]
    pub async fn load_assets<D>(&self, project: &Project, dispatch: &D) -> Result<Vec<Asset>>
    where
        D: Dispatch<AppAction> + ?Sized,
    {
        let assets = self
            .env
            .asset_service
            .get_assets(project)
            .await
            .inspect_err(log_failure("load_assets"))?;

        tracing::debug!(count = assets.len(), "Assets loaded");
        dispatch.dispatch(AppAction::LoadProjectAssetsSuccess(assets.clone()));
        Ok(assets)
    }

    /// Load the tagging metadata of `asset`
    ///
    /// Dispatches `LOAD_ASSET_METADATA_SUCCESS` with the metadata.
    ///
    /// # Errors
    ///
    /// Returns the asset service's error unchanged.
    #[tracing::instrument(skip_all, fields(project_id = %project.id, asset = %asset.name))]
    pub async fn load_asset_metadata<D>(
        &self,
        project: &Project,
        asset: &Asset,
        dispatch: &D,
    ) -> Result<AssetMetadata>
    where
        D: Dispatch<AppAction> + ?Sized,
    {
        let metadata = self
            .env
            .asset_service
            .get_asset_metadata(project, asset)
            .await
            .inspect_err(log_failure("load_asset_metadata"))?;

        dispatch.dispatch(AppAction::LoadAssetMetadataSuccess(metadata.clone()));
        Ok(metadata)
    }

    /// Persist the tagging metadata of one asset
    ///
    /// Dispatches `SAVE_ASSET_METADATA_SUCCESS` with the metadata returned by
    /// the asset service.
    ///
    /// # Errors
    ///
    /// Returns the asset service's error unchanged.
    #[tracing::instrument(
        skip_all,
        fields(project_id = %project.id, asset = %metadata.asset.name, regions = metadata.regions.len())
    )]
    pub async fn save_asset_metadata<D>(
        &self,
        project: &Project,
        metadata: &AssetMetadata,
        dispatch: &D,
    ) -> Result<AssetMetadata>
    where
        D: Dispatch<AppAction> + ?Sized,
    {
        let saved = self
            .env
            .asset_service
            .save(project, metadata)
            .await
            .inspect_err(log_failure("save_asset_metadata"))?;

        dispatch.dispatch(AppAction::SaveAssetMetadataSuccess(saved.clone()));
        Ok(saved)
    }

    /// Export `project` with the provider named by its export format
    ///
    /// Dispatches `EXPORT_PROJECT_SUCCESS` with the project.
    ///
    /// # Errors
    ///
    /// Returns the factory's error (e.g. `UnknownExportProvider`) or the
    /// provider's export error unchanged.
    #[tracing::instrument(
        skip_all,
        fields(project = %project.name, provider = %project.export_format.provider_type)
    )]
    pub async fn export_project<D>(&self, project: &Project, dispatch: &D) -> Result<()>
    where
        D: Dispatch<AppAction> + ?Sized,
    {
        let format = &project.export_format;
        let provider = self
            .env
            .export_factory
            .create(&format.provider_type, project, &format.provider_options)
            .inspect_err(log_failure("export_project"))?;

        provider
            .export()
            .await
            .inspect_err(log_failure("export_project"))?;

        dispatch.dispatch(AppAction::ExportProjectSuccess(project.clone()));
        Ok(())
    }
}

fn log_failure(operation: &'static str) -> impl Fn(&ServiceError) {
    move |error| tracing::warn!(operation, %error, "Service call failed")
}
