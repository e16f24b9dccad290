//! Property value types for graph nodes and edges
//!
//! Property payloads are opaque to the graph: any tree of primitives, arrays and
//! nested maps. Maps are persistent (`im::HashMap`) so that a node's properties
//! can be shared between graph versions and only copied along the merged path.

use super::store::GraphResult;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Property value type supporting multiple data types
///
/// Serialized untagged, so the plain JSON form of a property tree is exactly the
/// payload callers supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(#[serde(deserialize_with = "float_only")] f64),
    String(String),
    Array(Vec<PropertyValue>),
    Map(PropertyMap),
}

/// Property map for storing node and edge properties
pub type PropertyMap = im::HashMap<String, PropertyValue>;

/// Accepts only numbers that are floats on the wire.
///
/// Integers are tried first as `Integer`, so anything integral reaching this
/// point is out of `i64` range and is rejected rather than rounded.
fn float_only<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    match number.as_f64() {
        Some(f) if number.is_f64() => Ok(f),
        _ => Err(D::Error::custom(format!("integer {} does not fit in i64", number))),
    }
}

impl PropertyValue {
    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get map value if this is a map
    pub fn as_map(&self) -> Option<&PropertyMap> {
        match self {
            PropertyValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Plain JSON form of this value
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Deep-merge `incoming` into `base`.
///
/// Keys of `incoming` overwrite keys of `base`, except where both sides hold a
/// map, in which case the two maps are merged recursively. Keys only present in
/// `base` are kept. Arrays are replaced, not concatenated.
pub fn deep_merge(base: &mut PropertyMap, incoming: &PropertyMap) {
    for (key, value) in incoming.iter() {
        if let (Some(PropertyValue::Map(existing)), PropertyValue::Map(nested)) =
            (base.get_mut(key), value)
        {
            deep_merge(existing, nested);
            continue;
        }
        base.insert(key.clone(), value.clone());
    }
}

/// Build a property map from a plain JSON object
pub fn props_from_json(value: serde_json::Value) -> GraphResult<PropertyMap> {
    Ok(serde_json::from_value(value)?)
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "\"{}\"", s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Array(arr) => {
                write!(f, "[")?;
                for (i, val) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
            PropertyValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, val)?;
                }
                write!(f, "}}")
            }
            PropertyValue::Null => write!(f, "null"),
        }
    }
}

// Convenience conversions
impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(arr: Vec<PropertyValue>) -> Self {
        PropertyValue::Array(arr)
    }
}

impl From<PropertyMap> for PropertyValue {
    fn from(map: PropertyMap) -> Self {
        PropertyValue::Map(map)
    }
}

impl TryFrom<serde_json::Value> for PropertyValue {
    type Error = serde_json::Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}
