//! Persistent graph value
//!
//! A `Graph` is an immutable value. Every write returns a new `Graph` and leaves
//! the receiver untouched. Nodes and edges live in hash array mapped tries
//! (`im::HashMap`) behind `Arc`, so a new version copies only the trie path and
//! the entities it actually changed; every other node and edge is shared by
//! pointer with the previous version.
//!
//! Deletion is lazy. Removing a node or edge never rewrites the adjacency of
//! other nodes, and edges may keep pointing at deleted nodes. Read paths filter
//! stale references instead (see `traversal.rs`).

use super::edge::Edge;
use super::legacy::{LegacyIndex, LegacySettings};
use super::node::Node;
use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeKey, EdgeLabel, NodeKey};
use crate::config::GraphConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Errors that can occur at the graph's fallible boundaries
///
/// Lookups and deletes never fail; a missing key is reported as `None` or
/// treated as a no-op.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Invalid merge batch: {0}")]
    InvalidBatch(String),

    #[error("Key {key} starts with the reserved legacy prefix {prefix:?}")]
    ReservedLegacyPrefix { key: String, prefix: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Persistent property graph
///
/// Cloning is O(1) and yields an independent version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// node key -> node
    pub(crate) nodes: im::HashMap<NodeKey, Arc<Node>>,

    /// edge key -> edge
    pub(crate) edges: im::HashMap<EdgeKey, Arc<Edge>>,

    /// legacy id <-> internal key, for nodes and edges
    #[serde(rename = "legacyIndex")]
    pub(crate) legacy_index: LegacyIndex,
}

impl Graph {
    /// Create a new empty graph with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty graph honoring `config`
    ///
    /// Fails when `config` does not pass [`GraphConfig::validate`].
    pub fn with_config(config: &GraphConfig) -> GraphResult<Self> {
        config.validate()?;
        Ok(Graph {
            nodes: im::HashMap::new(),
            edges: im::HashMap::new(),
            legacy_index: LegacyIndex::new(LegacySettings::from(&config.legacy)),
        })
    }

    // ---------------------------------------------------------------------
    // Nodes
    // ---------------------------------------------------------------------

    pub fn has_node(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn get_node(&self, key: &str) -> Option<&Node> {
        self.nodes.get(key).map(Arc::as_ref)
    }

    pub fn get_node_prop(&self, key: &str, prop: &str) -> Option<&PropertyValue> {
        self.get_node(key)?.get_property(prop)
    }

    /// Upsert a node.
    ///
    /// An existing node gets `props` deep-merged into its properties; a missing
    /// one is created with empty adjacency. Merging the same props twice is
    /// the same as merging them once.
    pub fn merge_node(&self, key: impl Into<NodeKey>, props: PropertyMap) -> Graph {
        let mut next = self.clone();
        next.upsert_node(key.into(), props);
        next
    }

    /// Remove a node entry. Edges and adjacency referencing it are left as is.
    pub fn delete_node(&self, key: &str) -> Graph {
        let mut next = self.clone();
        next.remove_node(key);
        next
    }

    // ---------------------------------------------------------------------
    // Edges
    // ---------------------------------------------------------------------

    pub fn has_edge(&self, key: &str) -> bool {
        self.edges.contains_key(key)
    }

    pub fn get_edge(&self, key: &str) -> Option<&Edge> {
        self.edges.get(key).map(Arc::as_ref)
    }

    pub fn get_edge_prop(&self, key: &str, prop: &str) -> Option<&PropertyValue> {
        self.get_edge(key)?.get_property(prop)
    }

    /// Upsert an edge and refresh the adjacency of both endpoints.
    ///
    /// The edge record takes label and endpoints from the arguments only when
    /// it is created; a re-merge deep-merges `props` and keeps the stored ones.
    /// Adjacency is always written from the arguments: `start.out[key]` and
    /// `end.in[key]` become `label`. Either argument node is created with empty
    /// properties if it is missing.
    pub fn merge_edge(
        &self,
        key: impl Into<EdgeKey>,
        props: PropertyMap,
        label: impl Into<EdgeLabel>,
        start: impl Into<NodeKey>,
        end: impl Into<NodeKey>,
    ) -> Graph {
        let mut next = self.clone();
        next.upsert_edge(key.into(), props, label.into(), start.into(), end.into());
        next
    }

    /// Remove an edge entry. Endpoint adjacency is left stale.
    pub fn delete_edge(&self, key: &str) -> Graph {
        let mut next = self.clone();
        next.remove_edge(key);
        next
    }

    // ---------------------------------------------------------------------
    // Legacy index
    // ---------------------------------------------------------------------

    pub fn legacy_index(&self) -> &LegacyIndex {
        &self.legacy_index
    }

    pub fn add_node_legacy_index(&self, legacy_id: &str, node_key: &str) -> GraphResult<Graph> {
        let mut next = self.clone();
        next.legacy_index.add_node(legacy_id, node_key).map_err(|e| {
            warn!("Rejected legacy node index {} -> {}: {}", legacy_id, node_key, e);
            e
        })?;
        Ok(next)
    }

    pub fn add_edge_legacy_index(&self, legacy_id: &str, edge_key: &str) -> GraphResult<Graph> {
        let mut next = self.clone();
        next.legacy_index.add_edge(legacy_id, edge_key).map_err(|e| {
            warn!("Rejected legacy edge index {} -> {}: {}", legacy_id, edge_key, e);
            e
        })?;
        Ok(next)
    }

    pub fn find_node_legacy_index(&self, legacy_id: &str) -> Option<NodeKey> {
        self.legacy_index.find_node(legacy_id).map(NodeKey::from)
    }

    pub fn find_edge_legacy_index(&self, legacy_id: &str) -> Option<EdgeKey> {
        self.legacy_index.find_edge(legacy_id).map(EdgeKey::from)
    }

    /// Legacy id recorded for a node key, if any
    pub fn node_legacy_id(&self, node_key: &str) -> Option<&str> {
        self.legacy_index.node_legacy_id(node_key)
    }

    /// Legacy id recorded for an edge key, if any
    pub fn edge_legacy_id(&self, edge_key: &str) -> Option<&str> {
        self.legacy_index.edge_legacy_id(edge_key)
    }

    /// Drop the legacy mapping for `legacy_id` and delete the node it named.
    ///
    /// Unknown legacy ids leave the graph unchanged.
    pub fn delete_node_legacy_index(&self, legacy_id: &str) -> Graph {
        let mut next = self.clone();
        match next.legacy_index.remove_node(legacy_id) {
            Some(node_key) => next.remove_node(&node_key),
            None => debug!("No legacy node index for {}", legacy_id),
        }
        next
    }

    /// Drop the legacy mapping for `legacy_id` and delete the edge it named.
    ///
    /// Unknown legacy ids leave the graph unchanged.
    pub fn delete_edge_legacy_index(&self, legacy_id: &str) -> Graph {
        let mut next = self.clone();
        match next.legacy_index.remove_edge(legacy_id) {
            Some(edge_key) => next.remove_edge(&edge_key),
            None => debug!("No legacy edge index for {}", legacy_id),
        }
        next
    }

    // ---------------------------------------------------------------------
    // Statistics / iteration
    // ---------------------------------------------------------------------

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// All nodes, in no particular order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values().map(Arc::as_ref)
    }

    /// All edges, in no particular order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values().map(Arc::as_ref)
    }

    // ---------------------------------------------------------------------
    // In-place steps, only ever applied to a freshly cloned version
    // ---------------------------------------------------------------------

    pub(crate) fn upsert_node(&mut self, key: NodeKey, props: PropertyMap) {
        if let Some(node) = self.nodes.get_mut(&key) {
            trace!("Merging properties into node {}", key);
            Arc::make_mut(node).merge_props(&props);
            return;
        }
        debug!("Created node {}", key);
        self.nodes.insert(key.clone(), Arc::new(Node::new(key, props)));
    }

    pub(crate) fn upsert_edge(
        &mut self,
        key: EdgeKey,
        props: PropertyMap,
        label: EdgeLabel,
        start: NodeKey,
        end: NodeKey,
    ) {
        match self.edges.get_mut(&key) {
            Some(edge) => {
                let edge = Arc::make_mut(edge);
                if edge.label != label || edge.start != start || edge.end != end {
                    debug!(
                        "Edge {} keeps {} {} -> {}; linking adjacency as {} {} -> {}",
                        key, edge.label, edge.start, edge.end, label, start, end
                    );
                }
                edge.merge_props(&props);
            }
            None => {
                debug!("Created edge {} ({} -[{}]-> {})", key, start, label, end);
                let edge = Edge::new(key.clone(), label.clone(), start.clone(), end.clone(), props);
                self.edges.insert(key.clone(), Arc::new(edge));
            }
        }

        // Adjacency always follows the arguments, even when the record does not
        trace!("Linking {} out of {} and into {}", key, start, end);
        Arc::make_mut(self.node_entry(start)).link_out(key.clone(), label.clone());
        Arc::make_mut(self.node_entry(end)).link_in(key, label);
    }

    pub(crate) fn remove_node(&mut self, key: &str) {
        if self.nodes.remove(key).is_some() {
            debug!("Deleted node {}", key);
        }
    }

    pub(crate) fn remove_edge(&mut self, key: &str) {
        if self.edges.remove(key).is_some() {
            debug!("Deleted edge {}", key);
        }
    }

    pub(crate) fn set_legacy_settings(&mut self, settings: LegacySettings) {
        self.legacy_index.set_settings(settings);
    }

    /// Node slot for `key`, created with empty properties when missing
    fn node_entry(&mut self, key: NodeKey) -> &mut Arc<Node> {
        self.nodes
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Node::new(key, PropertyMap::new())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(entries: &[(&str, PropertyValue)]) -> PropertyMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_merge_and_get_node() {
        let graph = Graph::new().merge_node("n1", props(&[("name", PropertyValue::from("Alice"))]));

        assert_eq!(graph.node_count(), 1);
        assert!(graph.has_node("n1"));
        let node = graph.get_node("n1").unwrap();
        assert_eq!(node.key, NodeKey::new("n1"));
        assert_eq!(
            graph.get_node_prop("n1", "name").unwrap().as_string(),
            Some("Alice")
        );
        assert!(graph.get_node_prop("n1", "missing").is_none());
        assert!(graph.get_node_prop("n2", "name").is_none());
        assert!(graph.get_node("n2").is_none());
    }

    #[test]
    fn test_merge_node_deep_merges() {
        let graph = Graph::new()
            .merge_node("k", props(&[("a", PropertyValue::Integer(1))]))
            .merge_node("k", props(&[("b", PropertyValue::Integer(2))]));

        let node = graph.get_node("k").unwrap();
        assert_eq!(node.props, props(&[("a", PropertyValue::Integer(1)), ("b", PropertyValue::Integer(2))]));
    }

    #[test]
    fn test_merge_node_is_idempotent() {
        let p = props(&[("a", PropertyValue::Integer(1))]);
        let once = Graph::new().merge_node("k", p.clone());
        let twice = once.merge_node("k", p);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mutation_leaves_receiver_untouched() {
        let v1 = Graph::new().merge_node("a", props(&[("x", PropertyValue::Integer(1))]));
        let v2 = v1.merge_node("a", props(&[("x", PropertyValue::Integer(2))]));
        let v3 = v2.delete_node("a");

        assert_eq!(v1.get_node_prop("a", "x"), Some(&PropertyValue::Integer(1)));
        assert_eq!(v2.get_node_prop("a", "x"), Some(&PropertyValue::Integer(2)));
        assert!(!v3.has_node("a"));
    }

    #[test]
    fn test_merge_edge_creates_endpoints_and_adjacency() {
        let graph = Graph::new().merge_edge("e", PropertyMap::new(), "LBL", "A", "B");

        assert!(graph.has_edge("e"));
        let a = graph.get_node("A").unwrap();
        let b = graph.get_node("B").unwrap();
        assert!(a.props.is_empty());
        assert_eq!(a.out.get("e"), Some(&EdgeLabel::new("LBL")));
        assert_eq!(b.in_.get("e"), Some(&EdgeLabel::new("LBL")));
        assert!(a.in_.is_empty());
        assert!(b.out.is_empty());
    }

    #[test]
    fn test_remerge_edge_keeps_record_but_links_arguments() {
        let graph = Graph::new()
            .merge_edge("e", props(&[("w", PropertyValue::Integer(1))]), "L", "A", "B")
            .merge_edge("e", props(&[("v", PropertyValue::Integer(2))]), "OTHER", "C", "D");

        let edge = graph.get_edge("e").unwrap();
        assert_eq!(edge.label.as_str(), "L");
        assert_eq!(edge.start, NodeKey::new("A"));
        assert_eq!(edge.end, NodeKey::new("B"));
        assert_eq!(edge.props.len(), 2);

        let c = graph.get_node("C").unwrap();
        let d = graph.get_node("D").unwrap();
        assert!(c.props.is_empty());
        assert_eq!(c.out.get("e"), Some(&EdgeLabel::new("OTHER")));
        assert_eq!(d.in_.get("e"), Some(&EdgeLabel::new("OTHER")));

        // earlier adjacency is left in place
        assert_eq!(graph.get_node("A").unwrap().out.get("e"), Some(&EdgeLabel::new("L")));
        assert_eq!(graph.out_e("C", "OTHER").len(), 1);
    }

    #[test]
    fn test_merge_edge_refreshes_adjacency_of_existing_edge() {
        let graph = Graph::new()
            .merge_edge("e", PropertyMap::new(), "L", "A", "B")
            .delete_node("A")
            .merge_edge("e", PropertyMap::new(), "L", "A", "B");

        let a = graph.get_node("A").unwrap();
        assert_eq!(a.out.get("e"), Some(&EdgeLabel::new("L")));
    }

    #[test]
    fn test_merge_edge_preserves_endpoint_props() {
        let graph = Graph::new()
            .merge_node("A", props(&[("x", PropertyValue::Integer(1))]))
            .merge_edge("e", PropertyMap::new(), "L", "A", "B");

        assert_eq!(graph.get_node_prop("A", "x"), Some(&PropertyValue::Integer(1)));
    }

    #[test]
    fn test_delete_node_is_lazy() {
        let graph = Graph::new()
            .merge_edge("e", PropertyMap::new(), "L", "A", "B")
            .delete_node("A");

        assert!(!graph.has_node("A"));
        assert!(graph.has_edge("e"));
        assert!(graph.get_node("B").unwrap().in_.contains_key("e"));
    }

    #[test]
    fn test_delete_edge_is_lazy() {
        let graph = Graph::new()
            .merge_edge("e", PropertyMap::new(), "L", "A", "B")
            .delete_edge("e");

        assert!(!graph.has_edge("e"));
        assert!(graph.get_node("A").unwrap().out.contains_key("e"));
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let graph = Graph::new().merge_node("a", PropertyMap::new());
        assert_eq!(graph.delete_node("zzz"), graph);
        assert_eq!(graph.delete_edge("zzz"), graph);
    }

    #[test]
    fn test_legacy_round_trip_and_cascade() {
        let graph = Graph::new()
            .merge_node("n1", PropertyMap::new())
            .add_node_legacy_index("ext1", "n1")
            .unwrap();

        assert_eq!(graph.find_node_legacy_index("ext1"), Some(NodeKey::new("n1")));
        assert_eq!(graph.node_legacy_id("n1"), Some("ext1"));

        let graph = graph.delete_node_legacy_index("ext1");
        assert!(!graph.has_node("n1"));
        assert_eq!(graph.find_node_legacy_index("ext1"), None);
        assert!(graph.legacy_index().nodes().is_empty());
    }

    #[test]
    fn test_delete_unknown_legacy_is_noop() {
        let graph = Graph::new().merge_node("n1", PropertyMap::new());
        assert_eq!(graph.delete_node_legacy_index("nope"), graph);
        assert_eq!(graph.delete_edge_legacy_index("nope"), graph);
    }

    #[test]
    fn test_reserved_prefix_leaves_graph_unchanged() {
        let graph = Graph::new();
        let result = graph.add_edge_legacy_index("ext", "legacy.e1");
        assert!(matches!(result, Err(GraphError::ReservedLegacyPrefix { .. })));
        assert!(graph.legacy_index().edges().is_empty());
    }

    #[test]
    fn test_with_config_prefix() {
        let mut config = GraphConfig::default();
        config.legacy.prefix = "ext:".to_string();

        let graph = Graph::with_config(&config)
            .unwrap()
            .add_node_legacy_index("42", "n42")
            .unwrap();

        assert_eq!(graph.legacy_index().nodes().get("ext:42"), Some("n42"));
        assert_eq!(graph.find_node_legacy_index("42"), Some(NodeKey::new("n42")));
    }

    #[test]
    fn test_with_config_rejects_empty_prefix() {
        let mut config = GraphConfig::default();
        config.legacy.prefix = String::new();

        let err = Graph::with_config(&config).unwrap_err();
        assert!(matches!(err, GraphError::InvalidConfig(_)));
    }

    #[test]
    fn test_counts_and_iteration() {
        let graph = Graph::new()
            .merge_edge("e1", PropertyMap::new(), "L", "A", "B")
            .merge_edge("e2", PropertyMap::new(), "L", "B", "C");

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(!graph.is_empty());
        assert!(Graph::new().is_empty());

        let mut keys: Vec<&str> = graph.nodes().map(|n| n.key.as_str()).collect();
        keys.sort();
        assert_eq!(keys, vec!["A", "B", "C"]);
        assert_eq!(graph.edges().count(), 2);
    }
}
