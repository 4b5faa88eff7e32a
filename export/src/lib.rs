//! # Asset Tagger Export
//!
//! Export strategies are selected by the project's
//! [`ProviderType`](tagger_core::model::ProviderType). The
//! [`ExportProviderRegistry`] is the lookup table from provider type to a
//! constructor; it implements
//! [`ExportProviderFactory`](tagger_core::environment::ExportProviderFactory)
//! so it can be injected wherever project actions expect a factory.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tagger_core::environment::{ExportProviderFactory, SystemClock};
//! use tagger_export::{ExportConfig, ExportProviderRegistry};
//!
//! # async fn example(project: tagger_core::model::Project) -> Result<(), tagger_core::ServiceError> {
//! let registry = ExportProviderRegistry::with_defaults(ExportConfig::default(), Arc::new(SystemClock));
//!
//! let format = &project.export_format;
//! let provider = registry.create(&format.provider_type, &project, &format.provider_options)?;
//! provider.export().await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

/// Built-in JSON export
pub mod json;

/// Provider type → constructor lookup table
pub mod registry;

pub use json::JsonExportProvider;
pub use registry::{ExportProviderRegistry, ProviderConstructor};

/// Default output directory of file based exporters
pub const DEFAULT_EXPORT_DIR: &str = "./exports";

/// Settings shared by the built-in exporters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Directory export files are written to (created on demand)
    pub export_dir: PathBuf,
}

impl ExportConfig {
    /// Create a config writing to `export_dir`
    #[must_use]
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EXPORT_DIR)
    }
}
