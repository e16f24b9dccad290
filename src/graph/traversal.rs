//! Traversal primitives
//!
//! Adjacency maps on nodes are hints: an entry can outlive the edge it names
//! because edge deletion is lazy. Every function here checks edge existence
//! before returning anything derived from an adjacency entry.

use super::edge::Edge;
use super::node::{Adjacency, Node};
use super::store::Graph;
use super::types::{EdgeKey, EdgeLabel, NodeKey};
use std::collections::BTreeMap;

/// Live adjacency entries with a given label, edge key -> label
pub type EdgeKeys<'a> = BTreeMap<&'a EdgeKey, &'a EdgeLabel>;

/// Live incident edges with a given label, edge key -> edge
pub type Edges<'a> = BTreeMap<&'a EdgeKey, &'a Edge>;

impl Graph {
    /// Incoming edge keys of `node_key` labelled `label` whose edge still exists
    pub fn in_e_keys(&self, node_key: &str, label: &str) -> EdgeKeys<'_> {
        self.live_keys(self.get_node(node_key).map(|n| &n.in_), label)
    }

    /// Outgoing edge keys of `node_key` labelled `label` whose edge still exists
    pub fn out_e_keys(&self, node_key: &str, label: &str) -> EdgeKeys<'_> {
        self.live_keys(self.get_node(node_key).map(|n| &n.out), label)
    }

    /// Incoming edges of `node_key` labelled `label`
    pub fn in_e(&self, node_key: &str, label: &str) -> Edges<'_> {
        self.resolve(self.in_e_keys(node_key, label))
    }

    /// Outgoing edges of `node_key` labelled `label`
    pub fn out_e(&self, node_key: &str, label: &str) -> Edges<'_> {
        self.resolve(self.out_e_keys(node_key, label))
    }

    /// Given an edge and one of its endpoints, the key of the other endpoint.
    ///
    /// `None` when the edge does not exist or `node_key` is not one of its
    /// endpoints.
    pub fn hop_key(&self, edge_key: &str, node_key: &str) -> Option<&NodeKey> {
        self.get_edge(edge_key)?.other_end(node_key)
    }

    /// Like [`Graph::hop_key`], resolved to the node itself
    pub fn hop(&self, edge_key: &str, node_key: &str) -> Option<&Node> {
        let other = self.hop_key(edge_key, node_key)?;
        self.get_node(other.as_str())
    }

    /// The node an edge starts from
    pub fn start_n(&self, edge_key: &str) -> Option<&Node> {
        let edge = self.get_edge(edge_key)?;
        self.get_node(edge.start.as_str())
    }

    /// The node an edge ends at
    pub fn end_n(&self, edge_key: &str) -> Option<&Node> {
        let edge = self.get_edge(edge_key)?;
        self.get_node(edge.end.as_str())
    }

    fn live_keys<'a>(&'a self, adjacency: Option<&'a Adjacency>, label: &str) -> EdgeKeys<'a> {
        adjacency
            .into_iter()
            .flat_map(|adj| adj.iter())
            .filter(|(edge_key, edge_label)| {
                edge_label.as_str() == label && self.has_edge(edge_key.as_str())
            })
            .collect()
    }

    fn resolve<'a>(&'a self, keys: EdgeKeys<'a>) -> Edges<'a> {
        keys.into_keys()
            .filter_map(|key| self.get_edge(key.as_str()).map(|edge| (key, edge)))
            .collect()
    }
}
