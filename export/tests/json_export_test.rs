//! Integration tests for the built-in JSON export.

#![allow(clippy::unwrap_used)] // Test code

use std::sync::Arc;
use tagger_core::environment::ExportProviderFactory;
use tagger_core::model::{AssetState, ExportAssetState, ProviderType};
use tagger_core::{Project, ServiceError};
use tagger_export::json::read_export;
use tagger_export::{ExportConfig, ExportProviderRegistry, JsonExportProvider};
use tagger_testing::{mock_assets, mock_project, test_clock};

fn project_with_assets() -> Project {
    let mut project = mock_project("Export Project");
    let mut assets = mock_assets(3);
    assets[0].state = AssetState::Tagged;
    assets[1].state = AssetState::Visited;
    for asset in assets {
        project.assets.insert(asset.id.clone(), asset);
    }
    project
}

fn registry(dir: &std::path::Path) -> ExportProviderRegistry {
    ExportProviderRegistry::with_defaults(ExportConfig::new(dir), Arc::new(test_clock()))
}

async fn export(project: &Project, dir: &std::path::Path) -> serde_json::Value {
    let format = &project.export_format;
    let provider = registry(dir)
        .create(&format.provider_type, project, &format.provider_options)
        .unwrap();
    provider.export().await.unwrap();

    read_export(&dir.join("Export-Project-export.json")).await.unwrap()
}

#[tokio::test]
async fn test_export_writes_project_document() {
    let dir = tempfile::tempdir().unwrap();
    let project = project_with_assets();

    let document = export(&project, dir.path()).await;

    assert_eq!(document["id"], project.id.as_str());
    assert_eq!(document["name"], "Export Project");
    assert_eq!(document["exportedAt"], "2025-01-01T00:00:00Z");
    assert_eq!(document["tags"].as_array().map(Vec::len), Some(2));
    assert_eq!(document["assets"].as_array().map(Vec::len), Some(3));
    assert_eq!(document["assets"][0]["name"], "Asset 1");
}

#[tokio::test]
async fn test_export_filters_by_asset_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut project = project_with_assets();

    project.export_format.provider_options.asset_state = ExportAssetState::Visited;
    let visited = export(&project, dir.path()).await;
    assert_eq!(visited["assets"].as_array().map(Vec::len), Some(2));

    project.export_format.provider_options.asset_state = ExportAssetState::Tagged;
    let tagged = export(&project, dir.path()).await;
    assert_eq!(tagged["assets"].as_array().map(Vec::len), Some(1));
    assert_eq!(tagged["assets"][0]["state"], "tagged");
}

#[tokio::test]
async fn test_export_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested").join("exports");
    let project = project_with_assets();

    let provider = JsonExportProvider::new(
        project.clone(),
        project.export_format.provider_options.clone(),
        nested.clone(),
        Arc::new(test_clock()),
    );
    provider_export(&provider).await;

    assert!(provider.output_path().starts_with(&nested));
    assert!(tokio::fs::metadata(provider.output_path()).await.is_ok());
}

async fn provider_export(provider: &JsonExportProvider) {
    use tagger_core::environment::ExportProvider;
    provider.export().await.unwrap();
}

#[tokio::test]
async fn test_export_into_file_path_fails_with_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    tokio::fs::write(&blocker, b"not a directory").await.unwrap();
    let project = project_with_assets();

    let provider = registry(&blocker)
        .create(&ProviderType::VottJson, &project, &project.export_format.provider_options)
        .unwrap();

    let result = provider.export().await;
    assert!(matches!(result, Err(ServiceError::Io(_))));
}
