//! Configuration management for the marketplace.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Binaries call `dotenvy::dotenv()` first so a local `.env` file works too.

use crate::error::ConfigError;
use eventhive_runtime::StoreConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default `tracing` filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,eventhive=debug,eventhive_runtime=debug";

/// Default currency symbol for displayed prices
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Environment variable naming a catalog override file
pub const CATALOG_PATH_VAR: &str = "EVENTHIVE_CATALOG_PATH";

/// Environment variable naming a listing override file
pub const EVENTS_PATH_VAR: &str = "EVENTHIVE_EVENTS_PATH";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `tracing-subscriber` filter directive
    pub log_filter: String,
    /// Ticket catalog file to use instead of the bundled fixture
    pub catalog_path: Option<PathBuf>,
    /// Event listing file to use instead of the bundled fixture
    pub events_path: Option<PathBuf>,
    /// Symbol prefixed to displayed prices
    pub currency_symbol: String,
    /// Bound on effect feedback generations per `Store::send`
    pub max_feedback_depth: usize,
}

impl Config {
    /// Loads configuration from the process environment
    ///
    /// Unset or unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            catalog_path: lookup(CATALOG_PATH_VAR)
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            events_path: lookup(EVENTS_PATH_VAR)
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            currency_symbol: lookup("EVENTHIVE_CURRENCY_SYMBOL")
                .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
            max_feedback_depth: lookup("EVENTHIVE_MAX_FEEDBACK_DEPTH")
                .and_then(|s| s.parse().ok())
                .unwrap_or(StoreConfig::DEFAULT_MAX_FEEDBACK_DEPTH),
        }
    }

    /// Runtime settings for stores built from this configuration
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.max_feedback_depth)
    }

    /// Checks values that parsed but cannot be used
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a zero feedback depth, an empty currency
    /// symbol, or an override path that does not exist.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_feedback_depth == 0 {
            return Err(ConfigError::ZeroFeedbackDepth);
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(ConfigError::EmptyCurrencySymbol);
        }

        let overrides = [
            (CATALOG_PATH_VAR, &self.catalog_path),
            (EVENTS_PATH_VAR, &self.events_path),
        ];
        for (variable, path) in overrides {
            if let Some(path) = path.as_ref().filter(|p| !p.exists()) {
                return Err(ConfigError::MissingFile {
                    variable,
                    path: path.clone(),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.max_feedback_depth, 32);
        assert!(config.catalog_path.is_none());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("RUST_LOG", "warn"),
            ("EVENTHIVE_CURRENCY_SYMBOL", "$"),
            ("EVENTHIVE_MAX_FEEDBACK_DEPTH", "4"),
            ("EVENTHIVE_CATALOG_PATH", "/tmp/tiers.json"),
        ]));

        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.store_config().max_feedback_depth, 4);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/tiers.json")));
    }

    #[test]
    fn test_unparseable_depth_falls_back() {
        let config = Config::from_lookup(lookup_from(&[("EVENTHIVE_MAX_FEEDBACK_DEPTH", "lots")]));
        assert_eq!(config.max_feedback_depth, StoreConfig::DEFAULT_MAX_FEEDBACK_DEPTH);
    }

    #[test]
    fn test_blank_override_path_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[("EVENTHIVE_EVENTS_PATH", "  ")]));
        assert!(config.events_path.is_none());
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let zero_depth = Config {
            max_feedback_depth: 0,
            ..Config::default()
        };
        assert_eq!(zero_depth.validate(), Err(ConfigError::ZeroFeedbackDepth));

        let no_symbol = Config {
            currency_symbol: " ".to_string(),
            ..Config::default()
        };
        assert_eq!(no_symbol.validate(), Err(ConfigError::EmptyCurrencySymbol));

        let missing = Config {
            events_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..Config::default()
        };
        assert!(matches!(
            missing.validate(),
            Err(ConfigError::MissingFile {
                variable: EVENTS_PATH_VAR,
                ..
            })
        ));
    }
}
