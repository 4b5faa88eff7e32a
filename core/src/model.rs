//! Domain types for tagging projects.
//!
//! Projects, assets and asset metadata are owned by the caller and threaded
//! through the action layer unchanged. They carry just enough structure for
//! the store reducer and the export providers to work with them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a project
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a new random `ProjectId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for an asset
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Creates a new random `AssetId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tag that can be applied to regions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Display name, unique within a project
    pub name: String,
    /// Hex color used when drawing the tag
    pub color: String,
}

impl Tag {
    /// Creates a new tag
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// A storage connection a project reads assets from or writes output to
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Connection identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Storage provider name (e.g. `localFileSystemProxy`)
    pub provider_type: String,
    /// Provider specific settings
    #[serde(default)]
    pub provider_options: serde_json::Value,
}

impl Connection {
    /// Creates a connection with empty provider options
    #[must_use]
    pub fn new(name: impl Into<String>, provider_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            name: name.into(),
            provider_type: provider_type.into(),
            provider_options: serde_json::Value::Null,
        }
    }
}

/// Identifies which export strategy a project uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderType {
    /// Native JSON export of the project and its assets
    VottJson,
    /// Comma separated region listing
    Csv,
    /// `TensorFlow` records
    TensorflowRecords,
}

impl ProviderType {
    /// All known provider types
    pub const ALL: [Self; 3] = [Self::VottJson, Self::Csv, Self::TensorflowRecords];

    /// Stable name of the provider type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VottJson => "vottJson",
            Self::Csv => "csv",
            Self::TensorflowRecords => "tensorflowRecords",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown provider type name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown export provider type: {0}")]
pub struct ParseProviderTypeError(pub String);

impl FromStr for ProviderType {
    type Err = ParseProviderTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|provider| provider.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseProviderTypeError(s.to_string()))
    }
}

/// Which assets an export includes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportAssetState {
    /// Every asset known to the project
    #[default]
    All,
    /// Assets that were opened at least once
    Visited,
    /// Assets with at least one tagged region
    Tagged,
}

impl ExportAssetState {
    /// Returns whether an asset passes this filter
    #[must_use]
    pub const fn includes(self, asset: &Asset) -> bool {
        match self {
            Self::All => true,
            Self::Visited => !matches!(asset.state, AssetState::NotVisited),
            Self::Tagged => matches!(asset.state, AssetState::Tagged),
        }
    }
}

/// Options handed to the export provider
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportProviderOptions {
    /// Asset selection
    #[serde(default)]
    pub asset_state: ExportAssetState,
    /// Provider specific keys
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Export configuration of a project
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFormat {
    /// Export strategy to instantiate
    pub provider_type: ProviderType,
    /// Options passed to the strategy
    #[serde(default)]
    pub provider_options: ExportProviderOptions,
}

impl ExportFormat {
    /// Creates an export format with default options
    #[must_use]
    pub fn new(provider_type: ProviderType) -> Self {
        Self {
            provider_type,
            provider_options: ExportProviderOptions::default(),
        }
    }
}

/// A tagging project
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,
    /// Display name
    pub name: String,
    /// Project file format version
    pub version: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags available in this project
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Where assets are read from
    pub source_connection: Connection,
    /// Where project files and exports are written
    pub target_connection: Connection,
    /// Export configuration
    pub export_format: ExportFormat,
    /// Assets known to the project, indexed by ID
    #[serde(default)]
    pub assets: HashMap<AssetId, Asset>,
    /// Last asset opened in the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visited_asset_id: Option<AssetId>,
    /// Whether the editor saves after every change
    #[serde(default)]
    pub auto_save: bool,
}

impl Project {
    /// Creates an empty project with the given connections
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source_connection: Connection,
        target_connection: Connection,
        export_format: ExportFormat,
    ) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: None,
            tags: Vec::new(),
            source_connection,
            target_connection,
            export_format,
            assets: HashMap::new(),
            last_visited_asset_id: None,
            auto_save: true,
        }
    }
}

/// Kind of media an asset holds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetType {
    /// Unrecognized file type
    #[default]
    Unknown,
    /// Still image
    Image,
    /// Video file
    Video,
    /// Single frame extracted from a video
    VideoFrame,
}

impl AssetType {
    /// Guesses the asset type from a file extension
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "tif" | "tiff" => Self::Image,
            "mp4" | "mov" | "avi" | "m4v" | "mpg" | "wmv" => Self::Video,
            _ => Self::Unknown,
        }
    }
}

/// Tagging progress of an asset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetState {
    /// Never opened
    #[default]
    NotVisited,
    /// Opened but no regions tagged
    Visited,
    /// At least one region tagged
    Tagged,
}

/// Pixel dimensions of an asset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// A media file that can be tagged
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Unique identifier
    pub id: AssetId,
    /// File name
    pub name: String,
    /// Location relative to the source connection
    pub path: String,
    /// Media kind
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// Tagging progress
    pub state: AssetState,
    /// Dimensions, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl Asset {
    /// Creates an unvisited asset, deriving its type from the path extension
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        let asset_type = std::path::Path::new(&path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(AssetType::Unknown, AssetType::from_extension);

        Self {
            id: AssetId::new(),
            name: name.into(),
            path,
            asset_type,
            state: AssetState::NotVisited,
            size: None,
        }
    }
}

/// Shape of a tagged region
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionType {
    /// Axis aligned rectangle
    #[default]
    Rectangle,
    /// Closed polygon
    Polygon,
    /// Open polyline
    Polyline,
    /// Single point
    Point,
}

/// A point in asset pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

/// Axis aligned bounds of a region
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

/// A tagged area of an asset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Unique identifier within the asset
    pub id: String,
    /// Shape
    #[serde(rename = "type")]
    pub region_type: RegionType,
    /// Names of the tags applied to the region
    pub tags: Vec<String>,
    /// Bounds
    pub bounding_box: BoundingBox,
    /// Outline points
    #[serde(default)]
    pub points: Vec<Point>,
}

/// Tagging data recorded for one asset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    /// The asset the regions belong to
    pub asset: Asset,
    /// Tagged regions
    pub regions: Vec<Region>,
    /// Metadata format version
    pub version: String,
}

impl AssetMetadata {
    /// Creates empty metadata for an asset
    #[must_use]
    pub fn new(asset: Asset) -> Self {
        Self {
            asset,
            regions: Vec::new(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_parses_stable_names() {
        for provider in ProviderType::ALL {
            assert_eq!(provider.as_str().parse::<ProviderType>(), Ok(provider));
        }
        assert_eq!("VOTTJSON".parse::<ProviderType>(), Ok(ProviderType::VottJson));
        assert!("pascalVoc".parse::<ProviderType>().is_err());
    }

    #[test]
    fn test_provider_type_serializes_as_name() {
        let json = serde_json::to_value(ProviderType::TensorflowRecords).ok();
        assert_eq!(json, Some(serde_json::json!("tensorflowRecords")));
    }

    #[test]
    fn test_asset_type_from_path() {
        assert_eq!(Asset::new("a", "images/a.JPG").asset_type, AssetType::Image);
        assert_eq!(Asset::new("b", "clips/b.mp4").asset_type, AssetType::Video);
        assert_eq!(Asset::new("c", "notes/c").asset_type, AssetType::Unknown);
    }

    #[test]
    fn test_export_asset_state_filter() {
        let mut asset = Asset::new("a", "a.png");
        assert!(ExportAssetState::All.includes(&asset));
        assert!(!ExportAssetState::Visited.includes(&asset));

        asset.state = AssetState::Visited;
        assert!(ExportAssetState::Visited.includes(&asset));
        assert!(!ExportAssetState::Tagged.includes(&asset));

        asset.state = AssetState::Tagged;
        assert!(ExportAssetState::Visited.includes(&asset));
        assert!(ExportAssetState::Tagged.includes(&asset));
    }

    #[test]
    fn test_export_options_keep_provider_keys() {
        let options: ExportProviderOptions = serde_json::from_value(serde_json::json!({
            "assetState": "tagged",
            "includeImages": true
        }))
        .unwrap_or_default();

        assert_eq!(options.asset_state, ExportAssetState::Tagged);
        assert_eq!(
            options.extra.get("includeImages"),
            Some(&serde_json::Value::Bool(true))
        );
    }
}
