//! Engine configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! root = "1:1"
//! flag_geometry_only_triggers = true
//! log_filter = "scenario_engine=debug,info"
//! ```

use std::path::{Path, PathBuf};

use scenario_config::{NormalizeOptions, ScenarioKey};
use serde::{Deserialize, Serialize};

/// Configuration loading failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for [`EngineConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Entry scenario for reachability checks; smallest key when unset
    #[serde(with = "key_string")]
    pub root: Option<ScenarioKey>,
    /// Warn on grid trigger tiles that lead nowhere
    pub flag_geometry_only_triggers: bool,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl EngineConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With validation root
    #[inline]
    #[must_use]
    pub fn with_root(mut self, root: ScenarioKey) -> Self {
        self.root = Some(root);
        self
    }

    /// With geometry-only trigger flagging on or off
    #[inline]
    #[must_use]
    pub fn with_geometry_trigger_flag(mut self, enabled: bool) -> Self {
        self.flag_geometry_only_triggers = enabled;
        self
    }

    /// With fallback log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Options handed to the normalizer
    #[inline]
    #[must_use]
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions::new().with_geometry_trigger_flag(self.flag_geometry_only_triggers)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            root: None,
            flag_geometry_only_triggers: true,
            log_filter: "info".to_string(),
        }
    }
}

impl From<&EngineConfig> for NormalizeOptions {
    fn from(config: &EngineConfig) -> Self {
        config.normalize_options()
    }
}

/// `Option<ScenarioKey>` as `"scene:subscene"`
mod key_string {
    use scenario_config::ScenarioKey;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(key: &Option<ScenarioKey>, serializer: S) -> Result<S::Ok, S::Error> {
        match key {
            Some(key) => serializer.collect_str(key),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ScenarioKey>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| s.parse::<ScenarioKey>().map_err(D::Error::custom))
            .transpose()
    }
}
