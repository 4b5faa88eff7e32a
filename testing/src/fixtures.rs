//! Test data builders.

use tagger_core::model::{
    Asset, AssetMetadata, BoundingBox, Connection, ExportFormat, Point, Project, ProviderType,
    Region, RegionType, Tag,
};

/// A project named `name` with local connections and the JSON export format
#[must_use]
pub fn mock_project(name: &str) -> Project {
    let mut project = Project::new(
        name,
        Connection::new(format!("{name} Source"), "localFileSystemProxy"),
        Connection::new(format!("{name} Target"), "localFileSystemProxy"),
        ExportFormat::new(ProviderType::VottJson),
    );
    project.description = Some(format!("Description for {name}"));
    project.tags = vec![Tag::new("Tag 1", "#800000"), Tag::new("Tag 2", "#008000")];
    project
}

/// `count` projects named `Project 1` .. `Project {count}`
#[must_use]
pub fn mock_projects(count: usize) -> Vec<Project> {
    (1..=count)
        .map(|i| mock_project(&format!("Project {i}")))
        .collect()
}

/// An unvisited image asset named `name`
#[must_use]
pub fn mock_asset(name: &str) -> Asset {
    Asset::new(name, format!("images/{name}.jpg"))
}

/// `count` image assets named `Asset 1` .. `Asset {count}`
#[must_use]
pub fn mock_assets(count: usize) -> Vec<Asset> {
    (1..=count)
        .map(|i| mock_asset(&format!("Asset {i}")))
        .collect()
}

/// Metadata for `asset` with one rectangle region tagged `Tag 1`
#[must_use]
pub fn mock_asset_metadata(asset: &Asset) -> AssetMetadata {
    let mut metadata = AssetMetadata::new(asset.clone());
    metadata.regions.push(Region {
        id: format!("{}-region-1", asset.id),
        region_type: RegionType::Rectangle,
        tags: vec!["Tag 1".to_string()],
        bounding_box: BoundingBox {
            left: 10.0,
            top: 10.0,
            width: 100.0,
            height: 50.0,
        },
        points: vec![
            Point { x: 10.0, y: 10.0 },
            Point { x: 110.0, y: 10.0 },
            Point { x: 110.0, y: 60.0 },
            Point { x: 10.0, y: 60.0 },
        ],
    });
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_have_distinct_ids() {
        let projects = mock_projects(3);
        assert_eq!(projects.len(), 3);
        assert_ne!(projects[0].id, projects[1].id);
        assert_eq!(projects[2].name, "Project 3");

        let assets = mock_assets(2);
        assert_ne!(assets[0].id, assets[1].id);
        assert_eq!(assets[0].path, "images/Asset 1.jpg");
    }

    #[test]
    fn test_metadata_fixture_is_tagged() {
        let asset = mock_asset("dog");
        let metadata = mock_asset_metadata(&asset);

        assert_eq!(metadata.asset, asset);
        assert_eq!(metadata.regions.len(), 1);
        assert_eq!(metadata.regions[0].tags, vec!["Tag 1".to_string()]);
    }
}
