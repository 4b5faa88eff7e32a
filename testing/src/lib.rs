//! # Asset Tagger Testing
//!
//! Testing utilities and helpers for the asset tagger.
//!
//! This crate provides:
//! - [`ActionRecorder`]: A `Dispatch` implementation that records actions
//! - In-memory project and asset services with call logs and failure injection
//! - A mock export provider factory
//! - Fixtures for projects, assets and metadata
//! - A Given-When-Then [`ReducerTest`]
//!
//! ## Example
//!
//! ```ignore
//! use tagger_testing::{ActionRecorder, InMemoryProjectService, mock_project};
//!
//! #[tokio::test]
//! async fn test_save_project() {
//!     let projects = Arc::new(InMemoryProjectService::new());
//!     let actions = ProjectActions::new(environment_with(projects.clone()));
//!     let recorder = ActionRecorder::new();
//!     let project = mock_project("TestProject");
//!
//!     actions.save_project(&project, &recorder, &get_state).await?;
//!
//!     assert_eq!(projects.save_calls(), vec![project.clone()]);
//!     assert_eq!(recorder.actions(), vec![AppAction::SaveProjectSuccess(project)]);
//! }
//! ```

use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tagger_core::environment::Clock;

/// Mock export provider factory
pub mod export;

/// Project, asset and metadata fixtures
pub mod fixtures;

/// Recording dispatch sink
pub mod recorder;

/// Given-When-Then reducer tests
pub mod reducer_test;

/// In-memory project and asset services
pub mod services;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making export output reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use tagger_testing::mocks::FixedClock;
    /// use tagger_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Lock a mutex, recovering the data if a panicking test poisoned it
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// Re-export commonly used items
pub use export::{MockExportProvider, MockExportProviderFactory};
pub use fixtures::{mock_asset, mock_asset_metadata, mock_assets, mock_project, mock_projects};
pub use mocks::{FixedClock, test_clock};
pub use recorder::{ActionRecorder, assertions};
pub use reducer_test::ReducerTest;
pub use services::{InMemoryAssetService, InMemoryProjectService};
