// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The node model shared by every variant.
//!
//! A [`Node`] is a tagged, immutable record. Its structural fields are fixed
//! when it is constructed; its span (`start`/`end`) is filled in once by the
//! builder that created it. Anything else goes through [`Node::clone_with`],
//! which validates the merged fields and returns a fresh node.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use crate::composite::Composite;
use crate::error::{Result, ValidationError};
use crate::fields::{Field, Fields, Properties};
use crate::group::Group;
use crate::literal::Literal;
use crate::position::Position;
use crate::span::{Span, SpanSource};
use crate::value::Value;

/// Every concrete node variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    // Literals
    Number,
    String,
    Path,
    Identifier,
    Boolean,
    Undefined,
    Comment,
    // Groups
    Block,
    Package,
    // Composites
    UnaryOperator,
    BinaryOperator,
    TernaryOperator,
    Assignment,
    Range,
    FunctionCall,
    ModuleCall,
    OperatorCall,
    Function,
    Module,
    ForStatement,
    IfStatement,
    MemberLookup,
    ArrayLookup,
    Lookup,
    Include,
    Use,
    Noop,
}

/// The family a variant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Literal,
    Group,
    Composite,
}

impl NodeType {
    pub const ALL: [NodeType; 27] = [
        NodeType::Number,
        NodeType::String,
        NodeType::Path,
        NodeType::Identifier,
        NodeType::Boolean,
        NodeType::Undefined,
        NodeType::Comment,
        NodeType::Block,
        NodeType::Package,
        NodeType::UnaryOperator,
        NodeType::BinaryOperator,
        NodeType::TernaryOperator,
        NodeType::Assignment,
        NodeType::Range,
        NodeType::FunctionCall,
        NodeType::ModuleCall,
        NodeType::OperatorCall,
        NodeType::Function,
        NodeType::Module,
        NodeType::ForStatement,
        NodeType::IfStatement,
        NodeType::MemberLookup,
        NodeType::ArrayLookup,
        NodeType::Lookup,
        NodeType::Include,
        NodeType::Use,
        NodeType::Noop,
    ];

    /// The type tag, as written in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Number => "Number",
            NodeType::String => "String",
            NodeType::Path => "Path",
            NodeType::Identifier => "Identifier",
            NodeType::Boolean => "Boolean",
            NodeType::Undefined => "Undefined",
            NodeType::Comment => "Comment",
            NodeType::Block => "Block",
            NodeType::Package => "Package",
            NodeType::UnaryOperator => "UnaryOperator",
            NodeType::BinaryOperator => "BinaryOperator",
            NodeType::TernaryOperator => "TernaryOperator",
            NodeType::Assignment => "Assignment",
            NodeType::Range => "Range",
            NodeType::FunctionCall => "FunctionCall",
            NodeType::ModuleCall => "ModuleCall",
            NodeType::OperatorCall => "OperatorCall",
            NodeType::Function => "Function",
            NodeType::Module => "Module",
            NodeType::ForStatement => "ForStatement",
            NodeType::IfStatement => "IfStatement",
            NodeType::MemberLookup => "MemberLookup",
            NodeType::ArrayLookup => "ArrayLookup",
            NodeType::Lookup => "Lookup",
            NodeType::Include => "Include",
            NodeType::Use => "Use",
            NodeType::Noop => "Noop",
        }
    }

    pub fn family(self) -> Family {
        match self {
            NodeType::Number
            | NodeType::String
            | NodeType::Path
            | NodeType::Identifier
            | NodeType::Boolean
            | NodeType::Undefined
            | NodeType::Comment => Family::Literal,
            NodeType::Block | NodeType::Package => Family::Group,
            _ => Family::Composite,
        }
    }
}

impl Family {
    pub fn as_str(self) -> &'static str {
        match self {
            Family::Literal => "Literal",
            Family::Group => "Group",
            Family::Composite => "Composite",
        }
    }
}

impl FromStr for NodeType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        NodeType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownType(s.to_string()))
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What [`Node::is`] can test a node against.
pub trait NodeQuery {
    fn matches(&self, node: &Node) -> bool;
}

impl NodeQuery for NodeType {
    fn matches(&self, node: &Node) -> bool {
        node.node_type() == *self
    }
}

impl NodeQuery for Family {
    fn matches(&self, node: &Node) -> bool {
        node.family() == *self
    }
}

/// A variant or family name. Every node is a `Node` and a `Fragment`.
impl NodeQuery for &str {
    fn matches(&self, node: &Node) -> bool {
        matches!(*self, "Node" | "Fragment")
            || node.node_type().as_str() == *self
            || node.family().as_str() == *self
    }
}

/// The variant-specific payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Literal(Literal),
    Group(Group),
    Composite(Composite),
}

/// An AST node with a write-once source span.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    start: OnceLock<Position>,
    end: OnceLock<Position>,
}

impl Node {
    /// Wrap a payload after checking its structural fields.
    pub fn from_kind(kind: NodeKind) -> Result<Self> {
        if let NodeKind::Composite(composite) = &kind {
            composite.validate()?;
        }
        Ok(Node::bare(kind))
    }

    /// Wrap a payload whose fields are valid by construction.
    pub(crate) fn bare(kind: NodeKind) -> Self {
        Node {
            kind,
            start: OnceLock::new(),
            end: OnceLock::new(),
        }
    }

    /// Construct a variant from a property bag.
    ///
    /// A `type` entry in the bag is ignored; `start`/`end` entries set the span.
    pub fn new(node_type: NodeType, mut fields: Fields) -> Result<Self> {
        fields.take("type");
        let mut props = Properties::new(node_type, fields);
        let start = props.position("start")?;
        let end = props.position("end")?;
        let kind = match node_type.family() {
            Family::Literal => NodeKind::Literal(Literal::map_properties(node_type, &mut props)?),
            Family::Group => NodeKind::Group(Group::map_properties(node_type, &mut props)?),
            Family::Composite => {
                NodeKind::Composite(Composite::map_properties(node_type, &mut props)?)
            }
        };
        props.finish()?;

        let node = Node::from_kind(kind)?;
        if let Some(start) = start {
            node.start_at(start)?;
        }
        if let Some(end) = end {
            node.end_at(end)?;
        }
        Ok(node)
    }

    /// Construct from a bag that carries its own `type` entry.
    pub fn from_fields(mut fields: Fields) -> Result<Self> {
        let node_type = match fields.take("type") {
            None => return Err(ValidationError::MissingType),
            Some(Field::Value(Value::String(name))) => name.parse()?,
            Some(other) => {
                return Err(ValidationError::InvalidType {
                    found: other.describe(),
                })
            }
        };
        Node::new(node_type, fields)
    }

    /// Construct a variant by its type name.
    pub fn construct(type_name: &str, fields: Fields) -> Result<Self> {
        Node::new(type_name.parse()?, fields)
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        match &self.kind {
            NodeKind::Literal(lit) => lit.node_type(),
            NodeKind::Group(group) => group.node_type(),
            NodeKind::Composite(composite) => composite.node_type(),
        }
    }

    pub fn family(&self) -> Family {
        self.node_type().family()
    }

    /// Whether this node is the given variant, family, or named type.
    pub fn is(&self, query: impl NodeQuery) -> bool {
        query.matches(self)
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match &self.kind {
            NodeKind::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match &self.kind {
            NodeKind::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match &self.kind {
            NodeKind::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    pub fn start(&self) -> Option<Position> {
        self.start.get().copied()
    }

    pub fn end(&self) -> Option<Position> {
        self.end.get().copied()
    }

    /// The full span, once both ends are set.
    pub fn span(&self) -> Option<Span> {
        Some(Span::new(self.start()?, self.end()?))
    }

    /// Set where this node starts. Fails if the start is already set.
    pub fn start_at(&self, source: impl SpanSource) -> Result<&Self> {
        let position = source.start_position()?;
        self.start
            .set(position)
            .map_err(|_| ValidationError::already_set("start"))?;
        Ok(self)
    }

    /// Set where this node ends. Fails if the end is already set.
    pub fn end_at(&self, source: impl SpanSource) -> Result<&Self> {
        let position = source.end_position()?;
        self.end
            .set(position)
            .map_err(|_| ValidationError::already_set("end"))?;
        Ok(self)
    }

    /// Span this node from the start of `first` to the end of `last`.
    pub fn positioned(self, first: impl SpanSource, last: impl SpanSource) -> Result<Self> {
        self.start_at(first)?;
        self.end_at(last)?;
        Ok(self)
    }

    /// All fields except the type tag: structural fields in declaration
    /// order, then `start` and `end` when set.
    pub fn get_fields(&self) -> Fields {
        let mut fields = Fields::new();
        match &self.kind {
            NodeKind::Literal(lit) => lit.fields(&mut fields),
            NodeKind::Group(group) => group.fields(&mut fields),
            NodeKind::Composite(composite) => composite.fields(&mut fields),
        }
        if let Some(start) = self.start() {
            fields.push("start", start);
        }
        if let Some(end) = self.end() {
            fields.push("end", end);
        }
        fields
    }

    /// A new node of the same variant with `overrides` merged over the
    /// current fields. A `type` override is ignored.
    pub fn clone_with(&self, overrides: Fields) -> Result<Node> {
        let mut merged = self.get_fields();
        for (name, field) in overrides {
            if name != "type" {
                merged.overwrite(name, field);
            }
        }
        Node::new(self.node_type(), merged)
    }

    /// Direct children in field order.
    pub fn children(&self) -> Vec<&Arc<Node>> {
        match &self.kind {
            NodeKind::Literal(_) => Vec::new(),
            NodeKind::Group(group) => group.statements.iter().collect(),
            NodeKind::Composite(composite) => composite.children(),
        }
    }

    /// The name this node spells, when it is an Identifier.
    pub fn identifier_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Literal(Literal::Identifier(name)) => Some(name),
            _ => None,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.start() == other.start() && self.end() == other.end()
    }
}
