//! Edge implementation for the property graph

use super::property::{deep_merge, PropertyMap, PropertyValue};
use super::types::{EdgeKey, EdgeLabel, NodeKey};
use serde::{Deserialize, Serialize};

/// A directed edge in the property graph
///
/// Label and endpoints are fixed when the edge is created. Only the property
/// map changes across later merges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub key: EdgeKey,

    /// Relationship label (e.g., "KNOWS", "WORKS_AT")
    pub label: EdgeLabel,

    /// Node the edge goes FROM
    pub start: NodeKey,

    /// Node the edge goes TO
    pub end: NodeKey,

    /// Properties associated with this edge
    pub props: PropertyMap,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(
        key: impl Into<EdgeKey>,
        label: impl Into<EdgeLabel>,
        start: impl Into<NodeKey>,
        end: impl Into<NodeKey>,
        props: PropertyMap,
    ) -> Self {
        Edge {
            key: key.into(),
            label: label.into(),
            start: start.into(),
            end: end.into(),
            props,
        }
    }

    /// Deep-merge `props` into this edge's properties
    pub fn merge_props(&mut self, props: &PropertyMap) {
        deep_merge(&mut self.props, props);
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.props.get(key)
    }

    /// Check if this edge goes FROM a specific node
    pub fn starts_from(&self, node: &str) -> bool {
        self.start.as_str() == node
    }

    /// Check if this edge goes TO a specific node
    pub fn ends_at(&self, node: &str) -> bool {
        self.end.as_str() == node
    }

    /// The endpoint opposite to `node`, or `None` if `node` is not an endpoint.
    ///
    /// The start side is checked first, so a self-loop hops back to itself.
    pub fn other_end(&self, node: &str) -> Option<&NodeKey> {
        if self.starts_from(node) {
            Some(&self.end)
        } else if self.ends_at(node) {
            Some(&self.start)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_edge() {
        let edge = Edge::new("e1", "KNOWS", "a", "b", PropertyMap::new());

        assert_eq!(edge.key, EdgeKey::new("e1"));
        assert_eq!(edge.start, NodeKey::new("a"));
        assert_eq!(edge.end, NodeKey::new("b"));
        assert_eq!(edge.label.as_str(), "KNOWS");
    }

    #[test]
    fn test_edge_direction() {
        let edge = Edge::new("e2", "FOLLOWS", "x", "y", PropertyMap::new());

        assert!(edge.starts_from("x"));
        assert!(edge.ends_at("y"));
        assert!(!edge.starts_from("y"));
        assert!(!edge.ends_at("x"));
    }

    #[test]
    fn test_other_end() {
        let edge = Edge::new("e3", "LINKS", "x", "y", PropertyMap::new());
        assert_eq!(edge.other_end("x"), Some(&NodeKey::new("y")));
        assert_eq!(edge.other_end("y"), Some(&NodeKey::new("x")));
        assert_eq!(edge.other_end("z"), None);

        let self_loop = Edge::new("e4", "SELF", "x", "x", PropertyMap::new());
        assert_eq!(self_loop.other_end("x"), Some(&NodeKey::new("x")));
    }

    #[test]
    fn test_edge_merge_props() {
        let mut props = PropertyMap::new();
        props.insert("since".to_string(), 2020i64.into());
        let mut edge = Edge::new("e5", "KNOWS", "a", "b", props);

        let mut update = PropertyMap::new();
        update.insert("strength".to_string(), 0.5.into());
        edge.merge_props(&update);

        assert_eq!(edge.get_property("since").unwrap().as_integer(), Some(2020));
        assert_eq!(edge.get_property("strength").unwrap().as_float(), Some(0.5));
    }
}
