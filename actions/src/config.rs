//! Configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `TAGGER_LOG` | `tagger=info,tagger_actions=debug,tagger_runtime=debug` |
//! | `TAGGER_EXPORT_DIR` | `./exports` |
//! | `TAGGER_HISTORY_CAPACITY` | `100` |
//! | `TAGGER_BROADCAST_CAPACITY` | `16` (at most `4096`) |
//! | `TAGGER_EXPORT_PROVIDER` | `vottJson` |
//!
//! Unparseable values fall back to their defaults.

use std::str::FromStr;
use tagger_core::model::ProviderType;
use tagger_export::ExportConfig;
use tagger_runtime::{MAX_BROADCAST_CAPACITY, StoreConfig};

/// Log filter used when `TAGGER_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "tagger=info,tagger_actions=debug,tagger_runtime=debug";

const LOG_VAR: &str = "TAGGER_LOG";
const EXPORT_DIR_VAR: &str = "TAGGER_EXPORT_DIR";
const HISTORY_CAPACITY_VAR: &str = "TAGGER_HISTORY_CAPACITY";
const BROADCAST_CAPACITY_VAR: &str = "TAGGER_BROADCAST_CAPACITY";
const EXPORT_PROVIDER_VAR: &str = "TAGGER_EXPORT_PROVIDER";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default `tracing` filter directives
    pub log_filter: String,
    /// Built-in exporter settings
    pub export: ExportConfig,
    /// Store settings
    pub store: StoreConfig,
    /// Provider type given to new projects
    pub export_provider: ProviderType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            export: ExportConfig::default(),
            store: StoreConfig::default(),
            export_provider: ProviderType::VottJson,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from `lookup`, which maps a variable name to its
    /// value
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(filter) = lookup(LOG_VAR).filter(|value| !value.trim().is_empty()) {
            config.log_filter = filter;
        }

        if let Some(dir) = lookup(EXPORT_DIR_VAR) {
            let dir = dir.trim();
            if !dir.is_empty() {
                config.export = ExportConfig::new(dir);
            }
        }

        config.export_provider = parse_or(&lookup, EXPORT_PROVIDER_VAR, config.export_provider);

        config.store = config
            .store
            .with_history_capacity(parse_or(
                &lookup,
                HISTORY_CAPACITY_VAR,
                config.store.history_capacity,
            ))
            .with_broadcast_capacity(parse_or(
                &lookup,
                BROADCAST_CAPACITY_VAR,
                config.store.broadcast_capacity,
            ));

        if config.store.broadcast_capacity > MAX_BROADCAST_CAPACITY {
            tracing::warn!(
                key = BROADCAST_CAPACITY_VAR,
                value = config.store.broadcast_capacity,
                max = MAX_BROADCAST_CAPACITY,
                "Value too large, using maximum"
            );
            config.store = config.store.with_broadcast_capacity(MAX_BROADCAST_CAPACITY);
        }

        config
    }
}

impl From<&Config> for StoreConfig {
    fn from(config: &Config) -> Self {
        config.store
    }
}

impl From<&Config> for ExportConfig {
    fn from(config: &Config) -> Self {
        config.export.clone()
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(key, value = %raw, %default, "Invalid value, using default");
        default
    })
}
