//! Reducer logic for the application state.
//!
//! Folds the success actions of the project operations into the state the
//! UI renders: the open project, the recent project list and the asset being
//! edited.

use serde::{Deserialize, Serialize};
use tagger_core::action::AppAction;
use tagger_core::model::{Asset, AssetMetadata, Project, ProjectId};
use tagger_core::reducer::Reducer;

/// Application state
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Project open in the editor
    pub current_project: Option<Project>,
    /// Recently loaded or saved projects, most recent first
    pub recent_projects: Vec<Project>,
    /// Metadata of the asset open in the editor
    pub current_asset: Option<AssetMetadata>,
}

impl AppState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is the open project
    #[must_use]
    pub fn is_current(&self, id: &ProjectId) -> bool {
        self.current_project
            .as_ref()
            .is_some_and(|project| &project.id == id)
    }

    /// A recent project by ID
    #[must_use]
    pub fn recent_project(&self, id: &ProjectId) -> Option<&Project> {
        self.recent_projects.iter().find(|project| &project.id == id)
    }
}

/// Reducer for [`AppState`]
#[derive(Clone, Copy, Debug, Default)]
pub struct AppReducer;

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Moves `project` to the front of the recent list, replacing any entry
    /// with the same ID
    fn upsert_recent(state: &mut AppState, project: &Project) {
        state.recent_projects.retain(|recent| recent.id != project.id);
        state.recent_projects.insert(0, project.clone());
    }

    /// Adds assets the open project does not know yet; known assets keep
    /// their tagging state
    fn merge_assets(state: &mut AppState, assets: &[Asset]) {
        let Some(project) = state.current_project.as_mut() else {
            return;
        };

        for asset in assets {
            project
                .assets
                .entry(asset.id.clone())
                .or_insert_with(|| asset.clone());
        }
    }

    fn store_asset_metadata(state: &mut AppState, metadata: &AssetMetadata) {
        let asset = &metadata.asset;

        if let Some(project) = state.current_project.as_mut() {
            project.assets.insert(asset.id.clone(), asset.clone());
        }

        if state
            .current_asset
            .as_ref()
            .is_some_and(|current| current.asset.id == asset.id)
        {
            state.current_asset = Some(metadata.clone());
        }
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;

    fn reduce(&self, state: &mut AppState, action: &AppAction) {
        match action {
            AppAction::LoadProjectSuccess(project) => {
                Self::upsert_recent(state, project);
                state.current_project = Some(project.clone());
                state.current_asset = None;
            },
            AppAction::SaveProjectSuccess(project) => {
                Self::upsert_recent(state, project);
                if state.is_current(&project.id) {
                    state.current_project = Some(project.clone());
                }
            },
            AppAction::DeleteProjectSuccess(project) => {
                state.recent_projects.retain(|recent| recent.id != project.id);
                if state.is_current(&project.id) {
                    state.current_project = None;
                    state.current_asset = None;
                }
            },
            AppAction::CloseProjectSuccess => {
                state.current_project = None;
                state.current_asset = None;
            },
            AppAction::LoadProjectAssetsSuccess(assets) => {
                Self::merge_assets(state, assets);
            },
            AppAction::LoadAssetMetadataSuccess(metadata) => {
                if let Some(project) = state.current_project.as_mut() {
                    project.last_visited_asset_id = Some(metadata.asset.id.clone());
                }
                state.current_asset = Some(metadata.clone());
            },
            AppAction::SaveAssetMetadataSuccess(metadata) => {
                Self::store_asset_metadata(state, metadata);
            },
            // Export leaves the state untouched
            AppAction::ExportProjectSuccess(_) => {},
        }
    }
}
