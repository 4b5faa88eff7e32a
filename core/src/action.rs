//! Events dispatched into the application store.
//!
//! Every successful project operation produces exactly one [`AppAction`].
//! The serialized form is `{"type": "...", "payload": ...}`, with the payload
//! omitted for actions that carry none.

use crate::model::{Asset, AssetMetadata, Project};
use serde::{Deserialize, Serialize};

/// The fixed set of action tags
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// A project became the current project
    LoadProjectSuccess,
    /// A project was persisted
    SaveProjectSuccess,
    /// A project was removed
    DeleteProjectSuccess,
    /// The current project was closed
    CloseProjectSuccess,
    /// The asset list of a project was retrieved
    LoadProjectAssetsSuccess,
    /// Metadata of one asset was retrieved
    LoadAssetMetadataSuccess,
    /// Metadata of one asset was persisted
    SaveAssetMetadataSuccess,
    /// A project was exported
    ExportProjectSuccess,
}

impl ActionType {
    /// Wire name of the tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoadProjectSuccess => "LOAD_PROJECT_SUCCESS",
            Self::SaveProjectSuccess => "SAVE_PROJECT_SUCCESS",
            Self::DeleteProjectSuccess => "DELETE_PROJECT_SUCCESS",
            Self::CloseProjectSuccess => "CLOSE_PROJECT_SUCCESS",
            Self::LoadProjectAssetsSuccess => "LOAD_PROJECT_ASSETS_SUCCESS",
            Self::LoadAssetMetadataSuccess => "LOAD_ASSET_METADATA_SUCCESS",
            Self::SaveAssetMetadataSuccess => "SAVE_ASSET_METADATA_SUCCESS",
            Self::ExportProjectSuccess => "EXPORT_PROJECT_SUCCESS",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions that can be labelled by a static tag name.
///
/// The store uses the tag for tracing fields and metric labels.
pub trait TaggedAction {
    /// Static name of the action's tag
    fn tag(&self) -> &'static str;
}

/// Application actions
///
/// Each variant is the success event of one project operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppAction {
    /// Payload is the loaded project
    LoadProjectSuccess(Project),
    /// Payload is the project returned by the project service
    SaveProjectSuccess(Project),
    /// Payload is the deleted project
    DeleteProjectSuccess(Project),
    /// No payload
    CloseProjectSuccess,
    /// Payload is the project's asset list
    LoadProjectAssetsSuccess(Vec<Asset>),
    /// Payload is the loaded metadata
    LoadAssetMetadataSuccess(AssetMetadata),
    /// Payload is the saved metadata
    SaveAssetMetadataSuccess(AssetMetadata),
    /// Payload is the exported project
    ExportProjectSuccess(Project),
}

impl AppAction {
    /// Returns the action's tag
    #[must_use]
    pub const fn action_type(&self) -> ActionType {
        match self {
            Self::LoadProjectSuccess(_) => ActionType::LoadProjectSuccess,
            Self::SaveProjectSuccess(_) => ActionType::SaveProjectSuccess,
            Self::DeleteProjectSuccess(_) => ActionType::DeleteProjectSuccess,
            Self::CloseProjectSuccess => ActionType::CloseProjectSuccess,
            Self::LoadProjectAssetsSuccess(_) => ActionType::LoadProjectAssetsSuccess,
            Self::LoadAssetMetadataSuccess(_) => ActionType::LoadAssetMetadataSuccess,
            Self::SaveAssetMetadataSuccess(_) => ActionType::SaveAssetMetadataSuccess,
            Self::ExportProjectSuccess(_) => ActionType::ExportProjectSuccess,
        }
    }

    /// Returns whether the action carries a payload
    #[must_use]
    pub const fn has_payload(&self) -> bool {
        !matches!(self, Self::CloseProjectSuccess)
    }
}

impl TaggedAction for AppAction {
    fn tag(&self) -> &'static str {
        self.action_type().as_str()
    }
}
