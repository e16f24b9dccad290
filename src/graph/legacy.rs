//! Bidirectional legacy key index
//!
//! Reconciles identifiers assigned by an external system with the graph's own
//! node and edge keys. Each namespace (nodes, edges) is one flat persistent map
//! holding both directions:
//!
//! - `"<prefix><legacy id>"` -> internal key
//! - internal key -> `"<prefix><legacy id>"`
//!
//! The prefix keeps the two directions from colliding, which is why internal
//! keys may never start with it.

use super::store::{GraphError, GraphResult};
use crate::config::{LegacyConfig, ReindexPolicy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};

/// Prefix and re-index policy shared by both namespaces of an index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacySettings {
    prefix: Arc<str>,
    reindex: ReindexPolicy,
}

impl LegacySettings {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn reindex(&self) -> ReindexPolicy {
        self.reindex
    }

    fn encode(&self, legacy_id: &str) -> String {
        format!("{}{}", self.prefix, legacy_id)
    }
}

impl Default for LegacySettings {
    fn default() -> Self {
        LegacySettings::from(&LegacyConfig::default())
    }
}

impl From<&LegacyConfig> for LegacySettings {
    fn from(config: &LegacyConfig) -> Self {
        LegacySettings {
            prefix: Arc::from(config.prefix.as_str()),
            reindex: config.reindex,
        }
    }
}

/// One namespace of the legacy index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegacyMapping {
    entries: im::HashMap<String, String>,
}

impl LegacyMapping {
    /// Number of stored entries, counting both directions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw entry lookup, by encoded legacy key or by internal key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn find(&self, settings: &LegacySettings, legacy_id: &str) -> Option<&str> {
        self.get(&settings.encode(legacy_id))
    }

    fn reverse<'a>(&'a self, settings: &LegacySettings, internal: &str) -> Option<&'a str> {
        self.get(internal)?.strip_prefix(settings.prefix())
    }

    fn pair(&mut self, settings: &LegacySettings, legacy_id: &str, internal: &str) -> GraphResult<()> {
        if internal.starts_with(settings.prefix()) {
            return Err(GraphError::ReservedLegacyPrefix {
                key: internal.to_string(),
                prefix: settings.prefix().to_string(),
            });
        }

        let encoded = settings.encode(legacy_id);

        if settings.reindex == ReindexPolicy::Evict {
            // Drop reverse entries left behind by an earlier pairing of either side
            if let Some(previous) = self.entries.get(&encoded).cloned() {
                if previous != internal && self.get(&previous) == Some(encoded.as_str()) {
                    trace!("Evicting stale entry {} -> {}", previous, encoded);
                    self.entries.remove(&previous);
                }
            }
            if let Some(previous) = self.entries.get(internal).cloned() {
                if previous != encoded && self.get(&previous) == Some(internal) {
                    trace!("Evicting stale entry {} -> {}", previous, internal);
                    self.entries.remove(&previous);
                }
            }
        }

        self.entries.insert(encoded.clone(), internal.to_string());
        self.entries.insert(internal.to_string(), encoded);
        Ok(())
    }

    /// Remove both directions for `legacy_id`, returning the internal key it
    /// mapped to
    fn unpair(&mut self, settings: &LegacySettings, legacy_id: &str) -> Option<String> {
        let encoded = settings.encode(legacy_id);
        let internal = self.entries.remove(&encoded)?;

        // Under `Retain` the reverse entry may already point at a newer legacy
        // id. It is dropped anyway.
        let points_back = self.get(&internal) == Some(encoded.as_str());
        if points_back || settings.reindex == ReindexPolicy::Retain {
            self.entries.remove(&internal);
        }
        Some(internal)
    }
}

/// Node and edge legacy namespaces plus their settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyIndex {
    nodes: LegacyMapping,
    edges: LegacyMapping,
    #[serde(skip)]
    settings: LegacySettings,
}

impl LegacyIndex {
    pub fn new(settings: LegacySettings) -> Self {
        LegacyIndex {
            nodes: LegacyMapping::default(),
            edges: LegacyMapping::default(),
            settings,
        }
    }

    pub fn settings(&self) -> &LegacySettings {
        &self.settings
    }

    pub fn nodes(&self) -> &LegacyMapping {
        &self.nodes
    }

    pub fn edges(&self) -> &LegacyMapping {
        &self.edges
    }

    pub(crate) fn set_settings(&mut self, settings: LegacySettings) {
        self.settings = settings;
    }

    pub fn add_node(&mut self, legacy_id: &str, node_key: &str) -> GraphResult<()> {
        self.nodes.pair(&self.settings, legacy_id, node_key)?;
        debug!("Indexed legacy node {} as {}", legacy_id, node_key);
        Ok(())
    }

    pub fn add_edge(&mut self, legacy_id: &str, edge_key: &str) -> GraphResult<()> {
        self.edges.pair(&self.settings, legacy_id, edge_key)?;
        debug!("Indexed legacy edge {} as {}", legacy_id, edge_key);
        Ok(())
    }

    pub fn find_node(&self, legacy_id: &str) -> Option<&str> {
        self.nodes.find(&self.settings, legacy_id)
    }

    pub fn find_edge(&self, legacy_id: &str) -> Option<&str> {
        self.edges.find(&self.settings, legacy_id)
    }

    /// Legacy id recorded for an internal node key
    pub fn node_legacy_id(&self, node_key: &str) -> Option<&str> {
        self.nodes.reverse(&self.settings, node_key)
    }

    /// Legacy id recorded for an internal edge key
    pub fn edge_legacy_id(&self, edge_key: &str) -> Option<&str> {
        self.edges.reverse(&self.settings, edge_key)
    }

    pub fn remove_node(&mut self, legacy_id: &str) -> Option<String> {
        self.nodes.unpair(&self.settings, legacy_id)
    }

    pub fn remove_edge(&mut self, legacy_id: &str) -> Option<String> {
        self.edges.unpair(&self.settings, legacy_id)
    }
}
