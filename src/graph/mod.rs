//! Persistent property graph
//!
//! This module implements the property graph data model with:
//! - Nodes and directed, labelled edges carrying opaque properties
//! - Upsert ("merge") semantics with deep property merge
//! - Immutable versions sharing unchanged entities with their predecessors
//! - Lazy deletion, compensated by existence checks on every traversal
//! - A bidirectional index reconciling legacy ids with internal keys

pub mod batch;
pub mod edge;
pub mod legacy;
pub mod node;
pub mod projection;
pub mod property;
pub mod store;
pub mod traversal;
pub mod types;

// Re-export main types
pub use batch::{EdgeUpsert, MergeBatch, NodeUpsert};
pub use edge::Edge;
pub use legacy::{LegacyIndex, LegacyMapping, LegacySettings};
pub use node::{Adjacency, Node};
pub use property::{deep_merge, props_from_json, PropertyMap, PropertyValue};
pub use store::{Graph, GraphError, GraphResult};
pub use traversal::{EdgeKeys, Edges};
pub use types::{EdgeKey, EdgeLabel, NodeKey};
