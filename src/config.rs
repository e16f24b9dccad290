//! Graph configuration
//!
//! Loaded from YAML. Every field has a default, so an empty mapping (`{}`) is a
//! valid configuration.
//!
//! ```yaml
//! legacy:
//!   prefix: "legacy."
//!   reindex: evict   # or: retain
//! ```

use crate::graph::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// What happens to the old reverse entry when a legacy id or internal key is
/// re-indexed to a different partner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReindexPolicy {
    /// Remove the stale reverse entry so the mapping stays one-to-one
    #[default]
    Evict,
    /// Keep every entry ever written; stale reverse entries remain readable
    Retain,
}

/// Legacy index settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyConfig {
    /// Prefix marking encoded legacy ids; internal keys must not start with it
    pub prefix: String,
    pub reindex: ReindexPolicy,
}

impl Default for LegacyConfig {
    fn default() -> Self {
        Self {
            prefix: "legacy.".to_string(),
            reindex: ReindexPolicy::Evict,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub legacy: LegacyConfig,
}

impl GraphConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> GraphResult<Self> {
        let config: GraphConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        info!("Loaded graph config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> GraphResult<()> {
        if self.legacy.prefix.is_empty() {
            return Err(GraphError::InvalidConfig(
                "legacy.prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
