// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Property bags used to construct and clone nodes by name.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{Result, ValidationError};
use crate::node::{Node, NodeType};
use crate::position::Position;
use crate::value::Value;

/// A single field of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Value(Value),
    Node(Arc<Node>),
    Nodes(Vec<Arc<Node>>),
    Position(Position),
}

impl Field {
    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Field::Value(v) => v.type_name().to_string(),
            Field::Node(n) => format!("a {} node", n.node_type()),
            Field::Nodes(nodes) => format!("a list of {} node(s)", nodes.len()),
            Field::Position(_) => "a position".to_string(),
        }
    }
}

impl From<Value> for Field {
    fn from(v: Value) -> Self {
        Field::Value(v)
    }
}

impl From<Arc<Node>> for Field {
    fn from(n: Arc<Node>) -> Self {
        Field::Node(n)
    }
}

impl From<&Arc<Node>> for Field {
    fn from(n: &Arc<Node>) -> Self {
        Field::Node(Arc::clone(n))
    }
}

impl From<Node> for Field {
    fn from(n: Node) -> Self {
        Field::Node(Arc::new(n))
    }
}

impl From<Vec<Arc<Node>>> for Field {
    fn from(nodes: Vec<Arc<Node>>) -> Self {
        Field::Nodes(nodes)
    }
}

impl From<Position> for Field {
    fn from(p: Position) -> Self {
        Field::Position(p)
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Value(Value::from(s))
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::Value(Value::String(s))
    }
}

impl From<f64> for Field {
    fn from(n: f64) -> Self {
        Field::Value(Value::Number(n))
    }
}

impl From<bool> for Field {
    fn from(b: bool) -> Self {
        Field::Value(Value::Bool(b))
    }
}

/// An ordered bag of write-once fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: IndexMap<String, Field>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a field. Fails if `name` is already attached.
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<Field>) -> Result<()> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(ValidationError::already_set(name));
        }
        self.entries.insert(name, value.into());
        Ok(())
    }

    /// Chaining form of [`Fields::add_field`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Field>) -> Result<Self> {
        self.add_field(name, value)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Insert into a bag being assembled from a node; names never repeat there.
    pub(crate) fn push(&mut self, name: &str, value: impl Into<Field>) {
        self.entries.insert(name.to_string(), value.into());
    }

    /// Replace or append, keeping the original slot of a replaced field.
    pub(crate) fn overwrite(&mut self, name: String, value: Field) {
        self.entries.insert(name, value);
    }

    pub(crate) fn take(&mut self, name: &str) -> Option<Field> {
        self.entries.shift_remove(name)
    }
}

impl IntoIterator for Fields {
    type Item = (String, Field);
    type IntoIter = indexmap::map::IntoIter<String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Reads the structural fields of one variant out of a bag.
///
/// Each accessor consumes its field; `finish` rejects whatever is left.
pub(crate) struct Properties {
    node: NodeType,
    fields: Fields,
}

impl Properties {
    pub(crate) fn new(node: NodeType, fields: Fields) -> Self {
        Properties { node, fields }
    }

    fn missing(&self, field: &str) -> ValidationError {
        ValidationError::MissingField {
            node: self.node.as_str(),
            field: field.to_string(),
        }
    }

    fn wrong(&self, field: &str, expected: &'static str, found: &Field) -> ValidationError {
        ValidationError::WrongFieldKind {
            node: self.node.as_str(),
            field: field.to_string(),
            expected,
            found: found.describe(),
        }
    }

    pub(crate) fn node(&mut self, field: &str) -> Result<Arc<Node>> {
        self.optional_node(field)?.ok_or_else(|| self.missing(field))
    }

    /// An optional child. Absence and an explicit null both mean "not set".
    pub(crate) fn optional_node(&mut self, field: &str) -> Result<Option<Arc<Node>>> {
        match self.fields.take(field) {
            None | Some(Field::Value(Value::Null)) => Ok(None),
            Some(Field::Node(node)) => Ok(Some(node)),
            Some(other) => Err(self.wrong(field, "a node", &other)),
        }
    }

    /// A node sequence; a single node becomes a one-element sequence.
    pub(crate) fn nodes(&mut self, field: &str) -> Result<Vec<Arc<Node>>> {
        match self.fields.take(field) {
            None => Err(self.missing(field)),
            Some(Field::Nodes(nodes)) => Ok(nodes),
            Some(Field::Node(node)) => Ok(vec![node]),
            Some(other) => Err(self.wrong(field, "a list of nodes", &other)),
        }
    }

    pub(crate) fn value(&mut self, field: &str) -> Result<Value> {
        match self.fields.take(field) {
            None => Err(self.missing(field)),
            Some(Field::Value(value)) => Ok(value),
            Some(other) => Err(self.wrong(field, "a value", &other)),
        }
    }

    /// A plain value; absence reads as null.
    pub(crate) fn value_or_null(&mut self, field: &str) -> Result<Value> {
        match self.fields.take(field) {
            None => Ok(Value::Null),
            Some(Field::Value(value)) => Ok(value),
            Some(other) => Err(self.wrong(field, "a value", &other)),
        }
    }

    /// An operator symbol parsed into its typed form.
    pub(crate) fn operator<T>(&mut self, field: &str) -> Result<T>
    where
        T: std::str::FromStr<Err = ValidationError>,
    {
        match self.fields.take(field) {
            None => Err(self.missing(field)),
            Some(Field::Value(Value::String(symbol))) => symbol.parse(),
            Some(other) => Err(self.wrong(field, "an operator symbol", &other)),
        }
    }

    pub(crate) fn position(&mut self, field: &str) -> Result<Option<Position>> {
        match self.fields.take(field) {
            None => Ok(None),
            Some(Field::Position(p)) => Ok(Some(p)),
            Some(other) => Err(self.wrong(field, "a position", &other)),
        }
    }

    pub(crate) fn finish(self) -> Result<()> {
        match self.fields.names().next() {
            Some(extra) => Err(ValidationError::UnknownField {
                node: self.node.as_str(),
                field: extra.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_write_once() {
        let mut fields = Fields::new();
        fields.add_field("value", "a").unwrap();
        assert_eq!(
            fields.add_field("value", "b"),
            Err(ValidationError::FieldAlreadySet { field: "value".to_string() })
        );
        assert_eq!(fields.get("value"), Some(&Field::from("a")));
    }

    #[test]
    fn fields_keep_insertion_order() {
        let fields = Fields::new()
            .with("left", 1.0)
            .unwrap()
            .with("operator", "+")
            .unwrap()
            .with("right", 2.0)
            .unwrap();
        assert_eq!(fields.names().collect::<Vec<_>>(), ["left", "operator", "right"]);
    }

    #[test]
    fn properties_reject_leftovers() {
        let fields = Fields::new().with("colour", "red").unwrap();
        let props = Properties::new(NodeType::Noop, fields);
        assert_eq!(
            props.finish(),
            Err(ValidationError::UnknownField { node: "Noop", field: "colour".to_string() })
        );
    }

    #[test]
    fn properties_wrap_single_node_into_sequence() {
        let node = Arc::new(Node::number(1.0).unwrap());
        let fields = Fields::new().with("statements", Arc::clone(&node)).unwrap();
        let mut props = Properties::new(NodeType::Block, fields);
        assert_eq!(props.nodes("statements").unwrap(), vec![node]);
    }
}
