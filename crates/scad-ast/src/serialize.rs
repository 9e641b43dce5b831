// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Deterministic plain-data form of the tree.
//!
//! Every node serializes as a map: the `type` tag first, then its fields in
//! declaration order, then `start` and `end` when set. Whole numbers are
//! written as integers so golden output does not depend on float formatting.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::fields::Field;
use crate::node::Node;
use crate::value::Value;

/// Largest magnitude below which every whole f64 is an exact integer.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.get_fields();
        let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
        map.serialize_entry("type", self.node_type().as_str())?;
        for (name, field) in fields.iter() {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(value) => value.serialize(serializer),
            Field::Node(node) => node.as_ref().serialize(serializer),
            Field::Nodes(nodes) => serializer.collect_seq(nodes.iter().map(|n| n.as_ref())),
            Field::Position(position) => position.serialize(serializer),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => serializer.collect_seq(items),
        }
    }
}

/// The ordered plain-data form of `node`.
pub fn to_value(node: &Node) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(node)
}

/// Compact JSON, stable across runs.
pub fn to_json(node: &Node) -> serde_json::Result<String> {
    serde_json::to_string(node)
}

/// Indented JSON, stable across runs.
pub fn to_json_pretty(node: &Node) -> serde_json::Result<String> {
    serde_json::to_string_pretty(node)
}
