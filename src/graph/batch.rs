//! Bulk upserts
//!
//! Input shape, as produced by ingestion jobs:
//!
//! ```json
//! {
//!   "nodes": { "<key>": { "props": { ... } } },
//!   "edges": { "<key>": { "props": { ... }, "label": "L", "start": "A", "end": "B" } }
//! }
//! ```
//!
//! Both sections are maps, so keys are unique by construction.

use super::property::PropertyMap;
use super::store::{Graph, GraphError, GraphResult};
use super::types::{EdgeKey, EdgeLabel, NodeKey};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One node upsert
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeUpsert {
    #[serde(default)]
    pub props: PropertyMap,
}

/// One edge upsert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeUpsert {
    #[serde(default)]
    pub props: PropertyMap,
    pub label: EdgeLabel,
    pub start: NodeKey,
    pub end: NodeKey,
}

/// A batch of node and edge upserts, applied nodes first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeBatch {
    #[serde(default)]
    pub nodes: IndexMap<NodeKey, NodeUpsert>,
    #[serde(default)]
    pub edges: IndexMap<EdgeKey, EdgeUpsert>,
}

impl MergeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a node upsert
    pub fn with_node(mut self, key: impl Into<NodeKey>, props: PropertyMap) -> Self {
        self.nodes.insert(key.into(), NodeUpsert { props });
        self
    }

    /// Add (or replace) an edge upsert
    pub fn with_edge(
        mut self,
        key: impl Into<EdgeKey>,
        props: PropertyMap,
        label: impl Into<EdgeLabel>,
        start: impl Into<NodeKey>,
        end: impl Into<NodeKey>,
    ) -> Self {
        self.edges.insert(
            key.into(),
            EdgeUpsert {
                props,
                label: label.into(),
                start: start.into(),
                end: end.into(),
            },
        );
        self
    }

    /// Decode a batch from its JSON text form
    pub fn from_json_str(json: &str) -> GraphResult<Self> {
        serde_json::from_str(json).map_err(|e| GraphError::InvalidBatch(e.to_string()))
    }

    /// Decode a batch from an already parsed JSON value
    pub fn from_json_value(value: serde_json::Value) -> GraphResult<Self> {
        serde_json::from_value(value).map_err(|e| GraphError::InvalidBatch(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

impl Graph {
    /// Apply a batch of upserts.
    ///
    /// Every node upsert runs before any edge upsert, so node properties from
    /// the batch are in place before edges autovivify missing endpoints.
    pub fn merge(&self, batch: &MergeBatch) -> Graph {
        let mut next = self.clone();

        for (key, node) in &batch.nodes {
            next.upsert_node(key.clone(), node.props.clone());
        }

        for (key, edge) in &batch.edges {
            next.upsert_edge(
                key.clone(),
                edge.props.clone(),
                edge.label.clone(),
                edge.start.clone(),
                edge.end.clone(),
            );
        }

        debug!(
            "Merged batch of {} nodes and {} edges",
            batch.nodes.len(),
            batch.edges.len()
        );
        next
    }
}
