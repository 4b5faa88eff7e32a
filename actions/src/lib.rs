//! # Asset Tagger Actions
//!
//! Project action creators and the application reducer.
//!
//! Each operation on [`ProjectActions`] performs at most one service call,
//! dispatches exactly one success action on success and returns the
//! service's result. On failure the service error is returned unchanged and
//! nothing is dispatched.
//!
//! The dispatch sink is anything implementing
//! [`Dispatch`](tagger_core::dispatch::Dispatch): a
//! [`Store`](tagger_runtime::Store), an
//! [`ActionRecorder`](tagger_testing::ActionRecorder) or a closure.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tagger_actions::{AppReducer, AppState, ProjectActions, ProjectEnvironment};
//! use tagger_core::environment::SystemClock;
//! use tagger_export::{ExportConfig, ExportProviderRegistry};
//! use tagger_runtime::Store;
//! use tagger_testing::{InMemoryAssetService, InMemoryProjectService, mock_project};
//!
//! # async fn example() -> Result<(), tagger_core::ServiceError> {
//! let actions = ProjectActions::new(ProjectEnvironment::new(
//!     Arc::new(InMemoryProjectService::new()),
//!     Arc::new(InMemoryAssetService::new()),
//!     Arc::new(ExportProviderRegistry::with_defaults(
//!         ExportConfig::default(),
//!         Arc::new(SystemClock),
//!     )),
//! ));
//! let store = Store::new(AppState::default(), AppReducer::new());
//!
//! let project = actions.load_project(&mock_project("Dogs"), &store).await;
//! actions.save_project(&project, &store, &store).await?;
//! # Ok(())
//! # }
//! ```

/// Environment variable configuration
pub mod config;

/// Project action creators
pub mod project_actions;

/// Application state and reducer
pub mod reducer;

pub use config::Config;
pub use project_actions::{ProjectActions, ProjectEnvironment};
pub use reducer::{AppReducer, AppState};

/// Store specialized to the application state
pub type AppStore = tagger_runtime::Store<AppState, tagger_core::AppAction, AppReducer>;
