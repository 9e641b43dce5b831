// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Composite nodes: operators, calls, definitions and statements.

use std::sync::Arc;

use crate::error::{Result, ValidationError};
use crate::fields::{Fields, Properties};
use crate::node::{Node, NodeKind, NodeType};
use crate::ops::{BinaryOp, UnaryOp};
use crate::value::Value;

/// A call: `name(params...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Always an Identifier
    pub identifier: Arc<Node>,
    pub parameters: Vec<Arc<Node>>,
}

/// A `function` or `module` definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    /// Always an Identifier
    pub identifier: Arc<Node>,
    pub parameters: Vec<Arc<Node>>,
    pub body: Arc<Node>,
}

/// The composite node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Composite {
    /// `-x`, `!x`
    UnaryOperator { operator: UnaryOp, value: Arc<Node> },
    /// `a + b`
    BinaryOperator {
        left: Arc<Node>,
        operator: BinaryOp,
        right: Arc<Node>,
    },
    /// `c ? a : b`
    TernaryOperator {
        condition: Arc<Node>,
        consequent: Arc<Node>,
        alternative: Arc<Node>,
    },
    /// `name = value`; `identifier` is always an Identifier
    Assignment { identifier: Arc<Node>, value: Arc<Node> },
    /// `[first : last]` or `[first : step : last]`
    Range {
        first: Arc<Node>,
        step: Option<Arc<Node>>,
        last: Arc<Node>,
    },
    FunctionCall(Call),
    ModuleCall(Call),
    OperatorCall(Call),
    Function(Definition),
    Module(Definition),
    /// `for (init; condition; increment) body`
    ForStatement {
        init: Arc<Node>,
        condition: Arc<Node>,
        increment: Arc<Node>,
        body: Arc<Node>,
    },
    /// `if (condition) consequent else alternative`
    IfStatement {
        condition: Arc<Node>,
        consequent: Arc<Node>,
        alternative: Option<Arc<Node>>,
    },
    /// `expr.member`; `member` is always an Identifier
    MemberLookup { expr: Arc<Node>, member: Arc<Node> },
    /// `array[index]`
    ArrayLookup { array: Arc<Node>, index: Arc<Node> },
    /// A variable reference; `name` is always an Identifier
    Lookup { name: Arc<Node> },
    /// `include <path>`; `path` is always a Path
    Include { path: Arc<Node> },
    /// `use <path>`; `path` is always a Path
    Use { path: Arc<Node> },
    /// An empty statement
    Noop,
}

impl Call {
    fn read(props: &mut Properties) -> Result<Self> {
        Ok(Call {
            identifier: props.node("identifier")?,
            parameters: props.nodes("parameters")?,
        })
    }

    fn fields(&self, fields: &mut Fields) {
        fields.push("identifier", &self.identifier);
        fields.push("parameters", self.parameters.clone());
    }
}

impl Definition {
    fn read(props: &mut Properties) -> Result<Self> {
        Ok(Definition {
            identifier: props.node("identifier")?,
            parameters: props.nodes("parameters")?,
            body: props.node("body")?,
        })
    }

    fn fields(&self, fields: &mut Fields) {
        fields.push("identifier", &self.identifier);
        fields.push("parameters", self.parameters.clone());
        fields.push("body", &self.body);
    }
}

impl Composite {
    pub fn node_type(&self) -> NodeType {
        match self {
            Composite::UnaryOperator { .. } => NodeType::UnaryOperator,
            Composite::BinaryOperator { .. } => NodeType::BinaryOperator,
            Composite::TernaryOperator { .. } => NodeType::TernaryOperator,
            Composite::Assignment { .. } => NodeType::Assignment,
            Composite::Range { .. } => NodeType::Range,
            Composite::FunctionCall(_) => NodeType::FunctionCall,
            Composite::ModuleCall(_) => NodeType::ModuleCall,
            Composite::OperatorCall(_) => NodeType::OperatorCall,
            Composite::Function(_) => NodeType::Function,
            Composite::Module(_) => NodeType::Module,
            Composite::ForStatement { .. } => NodeType::ForStatement,
            Composite::IfStatement { .. } => NodeType::IfStatement,
            Composite::MemberLookup { .. } => NodeType::MemberLookup,
            Composite::ArrayLookup { .. } => NodeType::ArrayLookup,
            Composite::Lookup { .. } => NodeType::Lookup,
            Composite::Include { .. } => NodeType::Include,
            Composite::Use { .. } => NodeType::Use,
            Composite::Noop => NodeType::Noop,
        }
    }

    /// Wrap a call in the requested call variant.
    pub fn call(node_type: NodeType, call: Call) -> Result<Self> {
        match node_type {
            NodeType::FunctionCall => Ok(Composite::FunctionCall(call)),
            NodeType::ModuleCall => Ok(Composite::ModuleCall(call)),
            NodeType::OperatorCall => Ok(Composite::OperatorCall(call)),
            other => Err(unsupported("call", other)),
        }
    }

    /// Wrap a definition in the requested definition variant.
    pub fn definition(node_type: NodeType, definition: Definition) -> Result<Self> {
        match node_type {
            NodeType::Function => Ok(Composite::Function(definition)),
            NodeType::Module => Ok(Composite::Module(definition)),
            other => Err(unsupported("definition", other)),
        }
    }

    /// An `include` or `use` of `path`.
    pub fn file_import(node_type: NodeType, path: Arc<Node>) -> Result<Self> {
        match node_type {
            NodeType::Include => Ok(Composite::Include { path }),
            NodeType::Use => Ok(Composite::Use { path }),
            other => Err(unsupported("command", other)),
        }
    }

    pub(crate) fn map_properties(node_type: NodeType, props: &mut Properties) -> Result<Self> {
        let composite = match node_type {
            NodeType::UnaryOperator => Composite::UnaryOperator {
                operator: props.operator("operator")?,
                value: props.node("value")?,
            },
            NodeType::BinaryOperator => Composite::BinaryOperator {
                left: props.node("left")?,
                operator: props.operator("operator")?,
                right: props.node("right")?,
            },
            NodeType::TernaryOperator => Composite::TernaryOperator {
                condition: props.node("condition")?,
                consequent: props.node("consequent")?,
                alternative: props.node("alternative")?,
            },
            NodeType::Assignment => Composite::Assignment {
                identifier: props.node("identifier")?,
                value: props.node("value")?,
            },
            NodeType::Range => Composite::Range {
                first: props.node("first")?,
                step: props.optional_node("step")?,
                last: props.node("last")?,
            },
            NodeType::FunctionCall | NodeType::ModuleCall | NodeType::OperatorCall => {
                Composite::call(node_type, Call::read(props)?)?
            }
            NodeType::Function | NodeType::Module => {
                Composite::definition(node_type, Definition::read(props)?)?
            }
            NodeType::ForStatement => Composite::ForStatement {
                init: props.node("init")?,
                condition: props.node("condition")?,
                increment: props.node("increment")?,
                body: props.node("body")?,
            },
            NodeType::IfStatement => Composite::IfStatement {
                condition: props.node("condition")?,
                consequent: props.node("consequent")?,
                alternative: props.optional_node("alternative")?,
            },
            NodeType::MemberLookup => Composite::MemberLookup {
                expr: props.node("expr")?,
                member: props.node("member")?,
            },
            NodeType::ArrayLookup => Composite::ArrayLookup {
                array: props.node("array")?,
                index: props.node("index")?,
            },
            NodeType::Lookup => Composite::Lookup { name: props.node("name")? },
            NodeType::Include | NodeType::Use => {
                Composite::file_import(node_type, props.node("path")?)?
            }
            NodeType::Noop => Composite::Noop,
            other => return Err(unsupported("composite", other)),
        };
        Ok(composite)
    }

    /// Check the fields that must hold a particular literal variant.
    pub(crate) fn validate(&self) -> Result<()> {
        let node = self.node_type();
        match self {
            Composite::Assignment { identifier, .. } => expect_identifier(node, "identifier", identifier),
            Composite::FunctionCall(call) | Composite::ModuleCall(call) | Composite::OperatorCall(call) => {
                expect_identifier(node, "identifier", &call.identifier)
            }
            Composite::Function(def) | Composite::Module(def) => {
                expect_identifier(node, "identifier", &def.identifier)
            }
            Composite::MemberLookup { member, .. } => expect_identifier(node, "member", member),
            Composite::Lookup { name } => expect_identifier(node, "name", name),
            Composite::Include { path } | Composite::Use { path } => {
                expect_variant(node, "path", path, NodeType::Path, "a Path")
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn fields(&self, fields: &mut Fields) {
        match self {
            Composite::UnaryOperator { operator, value } => {
                fields.push("operator", Value::from(operator.symbol()));
                fields.push("value", value);
            }
            Composite::BinaryOperator { left, operator, right } => {
                fields.push("left", left);
                fields.push("operator", Value::from(operator.symbol()));
                fields.push("right", right);
            }
            Composite::TernaryOperator { condition, consequent, alternative } => {
                fields.push("condition", condition);
                fields.push("consequent", consequent);
                fields.push("alternative", alternative);
            }
            Composite::Assignment { identifier, value } => {
                fields.push("identifier", identifier);
                fields.push("value", value);
            }
            Composite::Range { first, step, last } => {
                fields.push("first", first);
                if let Some(step) = step {
                    fields.push("step", step);
                }
                fields.push("last", last);
            }
            Composite::FunctionCall(call) | Composite::ModuleCall(call) | Composite::OperatorCall(call) => {
                call.fields(fields)
            }
            Composite::Function(def) | Composite::Module(def) => def.fields(fields),
            Composite::ForStatement { init, condition, increment, body } => {
                fields.push("init", init);
                fields.push("condition", condition);
                fields.push("increment", increment);
                fields.push("body", body);
            }
            Composite::IfStatement { condition, consequent, alternative } => {
                fields.push("condition", condition);
                fields.push("consequent", consequent);
                if let Some(alternative) = alternative {
                    fields.push("alternative", alternative);
                }
            }
            Composite::MemberLookup { expr, member } => {
                fields.push("expr", expr);
                fields.push("member", member);
            }
            Composite::ArrayLookup { array, index } => {
                fields.push("array", array);
                fields.push("index", index);
            }
            Composite::Lookup { name } => fields.push("name", name),
            Composite::Include { path } | Composite::Use { path } => fields.push("path", path),
            Composite::Noop => {}
        }
    }

    pub(crate) fn children(&self) -> Vec<&Arc<Node>> {
        match self {
            Composite::UnaryOperator { value, .. } => vec![value],
            Composite::BinaryOperator { left, right, .. } => vec![left, right],
            Composite::TernaryOperator { condition, consequent, alternative } => {
                vec![condition, consequent, alternative]
            }
            Composite::Assignment { identifier, value } => vec![identifier, value],
            Composite::Range { first, step, last } => {
                let mut children = vec![first];
                children.extend(step);
                children.push(last);
                children
            }
            Composite::FunctionCall(call) | Composite::ModuleCall(call) | Composite::OperatorCall(call) => {
                std::iter::once(&call.identifier).chain(&call.parameters).collect()
            }
            Composite::Function(def) | Composite::Module(def) => std::iter::once(&def.identifier)
                .chain(&def.parameters)
                .chain(std::iter::once(&def.body))
                .collect(),
            Composite::ForStatement { init, condition, increment, body } => {
                vec![init, condition, increment, body]
            }
            Composite::IfStatement { condition, consequent, alternative } => {
                let mut children = vec![condition, consequent];
                children.extend(alternative);
                children
            }
            Composite::MemberLookup { expr, member } => vec![expr, member],
            Composite::ArrayLookup { array, index } => vec![array, index],
            Composite::Lookup { name } => vec![name],
            Composite::Include { path } | Composite::Use { path } => vec![path],
            Composite::Noop => Vec::new(),
        }
    }
}

fn unsupported(builder: &'static str, variant: NodeType) -> ValidationError {
    ValidationError::UnsupportedVariant {
        builder,
        variant: variant.as_str(),
    }
}

fn expect_identifier(node: NodeType, field: &str, child: &Node) -> Result<()> {
    expect_variant(node, field, child, NodeType::Identifier, "an Identifier")
}

fn expect_variant(
    node: NodeType,
    field: &str,
    child: &Node,
    expected: NodeType,
    expected_name: &'static str,
) -> Result<()> {
    if child.is(expected) {
        return Ok(());
    }
    Err(ValidationError::WrongFieldKind {
        node: node.as_str(),
        field: field.to_string(),
        expected: expected_name,
        found: format!("a {} node", child.node_type()),
    })
}

impl Node {
    pub fn composite(composite: Composite) -> Result<Node> {
        Node::from_kind(NodeKind::Composite(composite))
    }

    pub fn unary_operator(operator: UnaryOp, value: Arc<Node>) -> Node {
        Node::bare(NodeKind::Composite(Composite::UnaryOperator { operator, value }))
    }

    pub fn binary_operator(left: Arc<Node>, operator: BinaryOp, right: Arc<Node>) -> Node {
        Node::bare(NodeKind::Composite(Composite::BinaryOperator { left, operator, right }))
    }

    pub fn ternary_operator(condition: Arc<Node>, consequent: Arc<Node>, alternative: Arc<Node>) -> Node {
        Node::bare(NodeKind::Composite(Composite::TernaryOperator {
            condition,
            consequent,
            alternative,
        }))
    }

    pub fn assignment(identifier: Arc<Node>, value: Arc<Node>) -> Result<Node> {
        Node::composite(Composite::Assignment { identifier, value })
    }

    pub fn range(first: Arc<Node>, step: Option<Arc<Node>>, last: Arc<Node>) -> Node {
        Node::bare(NodeKind::Composite(Composite::Range { first, step, last }))
    }

    pub fn call(node_type: NodeType, identifier: Arc<Node>, parameters: Vec<Arc<Node>>) -> Result<Node> {
        Node::composite(Composite::call(node_type, Call { identifier, parameters })?)
    }

    pub fn definition(
        node_type: NodeType,
        identifier: Arc<Node>,
        parameters: Vec<Arc<Node>>,
        body: Arc<Node>,
    ) -> Result<Node> {
        Node::composite(Composite::definition(
            node_type,
            Definition { identifier, parameters, body },
        )?)
    }

    pub fn for_statement(init: Arc<Node>, condition: Arc<Node>, increment: Arc<Node>, body: Arc<Node>) -> Node {
        Node::bare(NodeKind::Composite(Composite::ForStatement {
            init,
            condition,
            increment,
            body,
        }))
    }

    pub fn if_statement(condition: Arc<Node>, consequent: Arc<Node>, alternative: Option<Arc<Node>>) -> Node {
        Node::bare(NodeKind::Composite(Composite::IfStatement {
            condition,
            consequent,
            alternative,
        }))
    }

    pub fn member_lookup(expr: Arc<Node>, member: Arc<Node>) -> Result<Node> {
        Node::composite(Composite::MemberLookup { expr, member })
    }

    pub fn array_lookup(array: Arc<Node>, index: Arc<Node>) -> Node {
        Node::bare(NodeKind::Composite(Composite::ArrayLookup { array, index }))
    }

    pub fn lookup(name: Arc<Node>) -> Result<Node> {
        Node::composite(Composite::Lookup { name })
    }

    /// An `include` or `use` statement.
    pub fn file_import(node_type: NodeType, path: Arc<Node>) -> Result<Node> {
        Node::composite(Composite::file_import(node_type, path)?)
    }

    pub fn noop() -> Node {
        Node::bare(NodeKind::Composite(Composite::Noop))
    }
}
