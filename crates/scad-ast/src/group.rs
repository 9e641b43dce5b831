// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement groups: blocks and packages.

use std::sync::Arc;

use crate::error::{Result, ValidationError};
use crate::fields::{Fields, Properties};
use crate::node::{Family, Node, NodeKind, NodeType};

/// Which kind of group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// `{ ... }` inside a module, statement or expression
    Block,
    /// The statements of a whole source file
    Package,
}

/// An ordered sequence of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub kind: GroupKind,
    pub statements: Vec<Arc<Node>>,
}

impl Group {
    pub fn node_type(&self) -> NodeType {
        match self.kind {
            GroupKind::Block => NodeType::Block,
            GroupKind::Package => NodeType::Package,
        }
    }

    pub(crate) fn map_properties(node_type: NodeType, props: &mut Properties) -> Result<Self> {
        let kind = match node_type {
            NodeType::Package => GroupKind::Package,
            _ => GroupKind::Block,
        };
        Ok(Group {
            kind,
            statements: props.nodes("statements")?,
        })
    }

    pub(crate) fn fields(&self, fields: &mut Fields) {
        fields.push("statements", self.statements.clone());
    }
}

impl Node {
    pub fn block(statements: Vec<Arc<Node>>) -> Node {
        Node::bare(NodeKind::Group(Group { kind: GroupKind::Block, statements }))
    }

    pub fn package(statements: Vec<Arc<Node>>) -> Node {
        Node::bare(NodeKind::Group(Group { kind: GroupKind::Package, statements }))
    }

    /// A group of the given variant; `node_type` must be Block or Package.
    pub fn group(node_type: NodeType, statements: Vec<Arc<Node>>) -> Result<Node> {
        if node_type.family() != Family::Group {
            return Err(ValidationError::UnsupportedVariant {
                builder: "group",
                variant: node_type.as_str(),
            });
        }
        let mut fields = Fields::new();
        fields.push("statements", statements);
        Node::new(node_type, fields)
    }
}
