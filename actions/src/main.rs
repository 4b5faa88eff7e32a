//! Asset tagger walkthrough binary
//!
//! Runs one editing session against in-memory services and prints the
//! actions the store received.

use std::sync::Arc;
use tagger_actions::{AppReducer, AppState, AppStore, Config, ProjectActions, ProjectEnvironment};
use tagger_core::environment::SystemClock;
use tagger_core::model::{AssetState, ExportFormat};
use tagger_export::ExportProviderRegistry;
use tagger_testing::{
    InMemoryAssetService, InMemoryProjectService, mock_asset_metadata, mock_assets, mock_project,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    tagger_runtime::metrics::register_metrics();

    println!("=== Asset Tagger: project actions ===\n");

    let project_service = Arc::new(InMemoryProjectService::new());
    let asset_service = Arc::new(InMemoryAssetService::with_assets(mock_assets(3)));
    let registry =
        ExportProviderRegistry::with_defaults(config.export.clone(), Arc::new(SystemClock));

    let actions = ProjectActions::new(ProjectEnvironment::new(
        project_service.clone(),
        asset_service,
        Arc::new(registry),
    ));
    let store = AppStore::with_config(AppState::default(), AppReducer::new(), config.store);

    let mut project = mock_project("Dogs");
    project.export_format = ExportFormat::new(config.export_provider);
    let project = actions.load_project(&project, &store).await;
    println!("Loaded project {:?}", project.name);

    let assets = actions.load_assets(&project, &store).await?;
    println!("Found {} assets", assets.len());

    let project = store
        .state(|s| s.current_project.clone())
        .unwrap_or(project);

    if let Some(asset) = assets.first() {
        let loaded = actions.load_asset_metadata(&project, asset, &store).await?;
        let mut tagged = mock_asset_metadata(&loaded.asset);
        tagged.asset.state = AssetState::Tagged;
        let saved = actions.save_asset_metadata(&project, &tagged, &store).await?;
        println!("Tagged {:?} with {} region(s)", saved.asset.name, saved.regions.len());
    }

    let project = store
        .state(|s| s.current_project.clone())
        .unwrap_or(project);
    let project = actions.save_project(&project, &store, &store).await?;
    println!("Saved project ({} stored)", project_service.len());

    match actions.export_project(&project, &store).await {
        Ok(()) => println!("Exported to {}", config.export.export_dir.display()),
        Err(error) => println!("Export skipped: {error}"),
    }

    actions.close_project(&store).await;

    println!("\nStore history:");
    for (index, action) in store.history().iter().enumerate() {
        println!("  {}. {}", index + 1, action.action_type());
    }

    let recent = store.state(|s| s.recent_projects.len());
    println!("\nRecent projects: {recent}");

    Ok(())
}
