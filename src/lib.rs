//! imgraph
//!
//! A persistent, versioned property graph. Every write returns a new graph
//! value and leaves the old one intact; versions share every node and edge they
//! did not change, so keeping history costs only the delta and any number of
//! threads can read any version without locking.
//!
//! # Model
//!
//! - Nodes: key, opaque properties, outgoing and incoming adjacency
//! - Edges: key, label, start, end, opaque properties
//! - Legacy index: external ids <-> internal keys, per nodes and edges
//!
//! ## Example Usage
//!
//! ```rust
//! use imgraph::graph::{Graph, MergeBatch, PropertyMap};
//! use serde_json::json;
//!
//! let batch = MergeBatch::from_json_value(json!({
//!     "nodes": {"alice": {"props": {"name": "Alice"}}},
//!     "edges": {"e1": {"label": "KNOWS", "start": "alice", "end": "bob"}}
//! }))
//! .unwrap();
//!
//! let v1 = Graph::new().merge(&batch);
//! let v2 = v1.delete_edge("e1");
//!
//! // v1 is untouched by the delete
//! assert_eq!(v1.out_e("alice", "KNOWS").len(), 1);
//! // stale adjacency on alice is filtered at read time
//! assert!(v2.out_e("alice", "KNOWS").is_empty());
//! assert!(v2.has_node("bob"));
//!
//! let v3 = v2
//!     .merge_node("carol", PropertyMap::new())
//!     .add_node_legacy_index("crm-17", "carol")
//!     .unwrap();
//! assert_eq!(v3.find_node_legacy_index("crm-17").unwrap().as_str(), "carol");
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod graph;

// Re-export main types for convenience
pub use config::{GraphConfig, LegacyConfig, ReindexPolicy};
pub use graph::{
    Edge, EdgeKey, EdgeLabel, Graph, GraphError, GraphResult, MergeBatch, Node, NodeKey,
    PropertyMap, PropertyValue,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate version string
pub fn version() -> &'static str {
    VERSION
}
