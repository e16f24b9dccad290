//! Node implementation for the property graph

use super::property::{deep_merge, PropertyMap, PropertyValue};
use super::types::{EdgeKey, EdgeLabel, NodeKey};
use serde::{Deserialize, Serialize};

/// Adjacency mapping: edge key -> that edge's label
///
/// Entries are candidates only. An edge referenced here may have been deleted
/// since the entry was written, so every read must check the edge still exists.
pub type Adjacency = im::HashMap<EdgeKey, EdgeLabel>;

/// A node in the property graph
///
/// Nodes have:
/// - A key, unique within a graph version
/// - Properties (opaque key-value pairs)
/// - Outgoing and incoming adjacency hints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub key: NodeKey,

    /// Properties associated with this node
    pub props: PropertyMap,

    /// Edges whose start is this node
    pub out: Adjacency,

    /// Edges whose end is this node
    #[serde(rename = "in")]
    pub in_: Adjacency,
}

impl Node {
    /// Create a node with empty adjacency
    pub fn new(key: impl Into<NodeKey>, props: PropertyMap) -> Self {
        Node {
            key: key.into(),
            props,
            out: Adjacency::new(),
            in_: Adjacency::new(),
        }
    }

    /// Deep-merge `props` into this node's properties
    pub fn merge_props(&mut self, props: &PropertyMap) {
        deep_merge(&mut self.props, props);
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.props.get(key)
    }

    /// Check if property exists
    pub fn has_property(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    /// Get number of properties
    pub fn property_count(&self) -> usize {
        self.props.len()
    }

    /// Record an outgoing edge, overwriting any previous entry for `edge`
    pub(crate) fn link_out(&mut self, edge: EdgeKey, label: EdgeLabel) {
        self.out.insert(edge, label);
    }

    /// Record an incoming edge, overwriting any previous entry for `edge`
    pub(crate) fn link_in(&mut self, edge: EdgeKey, label: EdgeLabel) {
        self.in_.insert(edge, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_node() {
        let node = Node::new("n1", PropertyMap::new());
        assert_eq!(node.key, NodeKey::new("n1"));
        assert_eq!(node.property_count(), 0);
        assert!(node.out.is_empty());
        assert!(node.in_.is_empty());
    }

    #[test]
    fn test_node_properties() {
        let mut props = PropertyMap::new();
        props.insert("name".to_string(), "Alice".into());
        props.insert("age".to_string(), 30i64.into());

        let node = Node::new("n2", props);

        assert_eq!(node.get_property("name").unwrap().as_string(), Some("Alice"));
        assert_eq!(node.get_property("age").unwrap().as_integer(), Some(30));
        assert!(node.has_property("age"));
        assert!(!node.has_property("missing"));
        assert_eq!(node.property_count(), 2);
    }

    #[test]
    fn test_merge_props_keeps_existing_keys() {
        let mut props = PropertyMap::new();
        props.insert("a".to_string(), 1i64.into());
        let mut node = Node::new("n3", props);

        let mut update = PropertyMap::new();
        update.insert("b".to_string(), 2i64.into());
        node.merge_props(&update);

        assert_eq!(node.get_property("a").unwrap().as_integer(), Some(1));
        assert_eq!(node.get_property("b").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn test_adjacency_overwrite() {
        let mut node = Node::new("n4", PropertyMap::new());
        node.link_out(EdgeKey::new("e1"), EdgeLabel::new("KNOWS"));
        node.link_out(EdgeKey::new("e1"), EdgeLabel::new("LIKES"));
        node.link_in(EdgeKey::new("e2"), EdgeLabel::new("KNOWS"));

        assert_eq!(node.out.len(), 1);
        assert_eq!(node.out.get("e1"), Some(&EdgeLabel::new("LIKES")));
        assert_eq!(node.in_.get("e2"), Some(&EdgeLabel::new("KNOWS")));
    }

    #[test]
    fn test_node_equality_is_structural() {
        let node1 = Node::new("n5", PropertyMap::new());
        let mut node2 = Node::new("n5", PropertyMap::new());
        assert_eq!(node1, node2);

        node2.link_in(EdgeKey::new("e"), EdgeLabel::new("L"));
        assert_ne!(node1, node2);
    }
}
