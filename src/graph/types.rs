//! Core type definitions for the graph
//!
//! Keys and labels are opaque strings. They are wrapped in newtypes so a node
//! key can never be passed where an edge key is expected.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for a node within one graph version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(key: impl Into<String>) -> Self {
        NodeKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeKey {
    fn from(s: String) -> Self {
        NodeKey(s)
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        NodeKey(s.to_string())
    }
}

impl From<&NodeKey> for NodeKey {
    fn from(k: &NodeKey) -> Self {
        k.clone()
    }
}

impl Borrow<str> for NodeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for an edge within one graph version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EdgeKey(String);

impl EdgeKey {
    pub fn new(key: impl Into<String>) -> Self {
        EdgeKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EdgeKey {
    fn from(s: String) -> Self {
        EdgeKey(s)
    }
}

impl From<&str> for EdgeKey {
    fn from(s: &str) -> Self {
        EdgeKey(s.to_string())
    }
}

impl From<&EdgeKey> for EdgeKey {
    fn from(k: &EdgeKey) -> Self {
        k.clone()
    }
}

impl Borrow<str> for EdgeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Edge label (relationship classification, e.g. "KNOWS", "WORKS_AT")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EdgeLabel(String);

impl EdgeLabel {
    pub fn new(label: impl Into<String>) -> Self {
        EdgeLabel(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EdgeLabel {
    fn from(s: String) -> Self {
        EdgeLabel(s)
    }
}

impl From<&str> for EdgeLabel {
    fn from(s: &str) -> Self {
        EdgeLabel(s.to_string())
    }
}

impl From<&EdgeLabel> for EdgeLabel {
    fn from(l: &EdgeLabel) -> Self {
        l.clone()
    }
}

impl PartialEq<str> for EdgeLabel {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EdgeLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
