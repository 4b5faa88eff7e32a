//! # Asset Tagger Core
//!
//! Core traits and types for the asset tagger.
//!
//! This crate provides the vocabulary shared by the store runtime, the
//! project actions and the export providers.
//!
//! ## Core Concepts
//!
//! - **Model**: Projects, assets and asset metadata, owned by the caller
//! - **Action**: Tagged success events dispatched into the store
//! - **Reducer**: Pure function `(State, Action) → State`
//! - **Dispatch**: Explicit, synchronous sink for actions
//! - **Environment**: Injected services (project, asset, export)
//!
//! ## Example
//!
//! ```ignore
//! use tagger_core::*;
//!
//! // Implement the reducer
//! impl Reducer for AppReducer {
//!     type State = AppState;
//!     type Action = AppAction;
//!
//!     fn reduce(&self, state: &mut AppState, action: &AppAction) {
//!         if let AppAction::LoadProjectSuccess(project) = action {
//!             state.current_project = Some(project.clone());
//!         }
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};

/// Tagged success events
pub mod action;

/// Dispatch and state access traits
pub mod dispatch;

/// Service traits and the clock abstraction
pub mod environment;

/// Service error taxonomy
pub mod error;

/// Projects, assets and metadata
pub mod model;

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action) → State`.
/// All I/O happens before an action is dispatched, so a reducer only folds
/// the action into the state.
pub mod reducer {
    /// The Reducer trait - core abstraction for store state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for AppReducer {
    ///     type State = AppState;
    ///     type Action = AppAction;
    ///
    ///     fn reduce(&self, state: &mut AppState, action: &AppAction) {
    ///         match action {
    ///             AppAction::CloseProjectSuccess => state.current_project = None,
    ///             _ => {},
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// Fold an action into the state
        ///
        /// Must be deterministic and must not perform I/O.
        fn reduce(&self, state: &mut Self::State, action: &Self::Action);
    }
}

pub use action::{ActionType, AppAction, TaggedAction};
pub use dispatch::{Dispatch, GetState};
pub use environment::{
    AssetService, Clock, ExportProvider, ExportProviderFactory, ProjectService, ServiceFuture,
    SystemClock,
};
pub use error::ServiceError;
pub use model::{
    Asset, AssetId, AssetMetadata, AssetState, AssetType, BoundingBox, Connection,
    ExportAssetState, ExportFormat, ExportProviderOptions, Point, Project, ProjectId,
    ProviderType, Region, RegionType, Size, Tag,
};
pub use reducer::Reducer;
