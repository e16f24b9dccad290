//! Plain-object projection
//!
//! The serialization boundary other subsystems consume:
//!
//! ```json
//! {
//!   "nodes": { "<key>": { "key": .., "props": {..}, "out": {"<edge>": "<label>"}, "in": {..} } },
//!   "edges": { "<key>": { "key": .., "label": .., "start": .., "end": .., "props": {..} } },
//!   "legacyIndex": { "nodes": { "<prefix><id>": "<key>", "<key>": "<prefix><id>" }, "edges": {..} }
//! }
//! ```
//!
//! Legacy settings are configuration, not state, and are not part of the form.

use super::legacy::LegacySettings;
use super::store::{Graph, GraphResult};
use crate::config::GraphConfig;

impl Graph {
    /// Project the whole graph to plain JSON
    pub fn to_plain(&self) -> GraphResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild a graph from its plain projection, with default settings
    pub fn from_plain(value: serde_json::Value) -> GraphResult<Graph> {
        Ok(serde_json::from_value(value)?)
    }

    /// Rebuild a graph from its plain projection, honoring `config`
    pub fn from_plain_with_config(value: serde_json::Value, config: &GraphConfig) -> GraphResult<Graph> {
        config.validate()?;
        let mut graph = Self::from_plain(value)?;
        graph.set_legacy_settings(LegacySettings::from(&config.legacy));
        Ok(graph)
    }
}
