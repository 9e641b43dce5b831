// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Literal leaf nodes.

use crate::error::{Result, ValidationError};
use crate::fields::{Fields, Properties};
use crate::node::{Family, Node, NodeKind, NodeType};
use crate::value::{format_number, Value};

/// The text of a comment: one line, or the lines of a block comment.
#[derive(Debug, Clone, PartialEq)]
pub enum CommentText {
    Line(String),
    Block(Vec<String>),
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Numeric literal
    Number(f64),
    /// String literal
    String(String),
    /// Path of an `include`/`use` statement
    Path(String),
    /// Identifier
    Identifier(String),
    /// `true` or `false`
    Boolean(bool),
    /// `undef`
    Undefined,
    /// Line or block comment
    Comment(CommentText),
}

impl Literal {
    /// Cast a raw value into the literal variant `node_type`.
    pub fn cast(node_type: NodeType, value: &Value) -> Result<Literal> {
        let invalid = || ValidationError::InvalidValue {
            node: node_type.as_str(),
            found: value.to_string(),
        };
        let literal = match node_type {
            NodeType::Number => Literal::Number(cast_number(value).ok_or_else(invalid)?),
            NodeType::String => Literal::String(cast_text(value).ok_or_else(invalid)?),
            NodeType::Path => Literal::Path(cast_text(value).ok_or_else(invalid)?),
            NodeType::Identifier => Literal::Identifier(cast_text(value).ok_or_else(invalid)?),
            NodeType::Boolean => match value {
                Value::Bool(b) => Literal::Boolean(*b),
                Value::String(s) if s == "true" => Literal::Boolean(true),
                Value::String(s) if s == "false" => Literal::Boolean(false),
                _ => return Err(invalid()),
            },
            NodeType::Undefined => Literal::Undefined,
            NodeType::Comment => match value {
                Value::List(lines) => Literal::Comment(CommentText::Block(
                    lines
                        .iter()
                        .map(|line| line.as_str().map(str::to_string))
                        .collect::<Option<_>>()
                        .ok_or_else(invalid)?,
                )),
                other => Literal::Comment(CommentText::Line(cast_text(other).ok_or_else(invalid)?)),
            },
            other => {
                return Err(ValidationError::UnsupportedVariant {
                    builder: "literal cast",
                    variant: other.as_str(),
                })
            }
        };
        Ok(literal)
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Literal::Number(_) => NodeType::Number,
            Literal::String(_) => NodeType::String,
            Literal::Path(_) => NodeType::Path,
            Literal::Identifier(_) => NodeType::Identifier,
            Literal::Boolean(_) => NodeType::Boolean,
            Literal::Undefined => NodeType::Undefined,
            Literal::Comment(_) => NodeType::Comment,
        }
    }

    /// The semantic value, in the form `cast` accepts back.
    pub fn value(&self) -> Value {
        match self {
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) | Literal::Path(s) | Literal::Identifier(s) => Value::String(s.clone()),
            Literal::Boolean(b) => Value::Bool(*b),
            Literal::Undefined => Value::Null,
            Literal::Comment(CommentText::Line(line)) => Value::String(line.clone()),
            Literal::Comment(CommentText::Block(lines)) => {
                Value::List(lines.iter().cloned().map(Value::String).collect())
            }
        }
    }

    pub(crate) fn map_properties(node_type: NodeType, props: &mut Properties) -> Result<Self> {
        let value = match node_type {
            NodeType::Undefined => props.value_or_null("value")?,
            _ => props.value("value")?,
        };
        Literal::cast(node_type, &value)
    }

    pub(crate) fn fields(&self, fields: &mut Fields) {
        fields.push("value", self.value());
    }
}

fn cast_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => *n,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn cast_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(format_number(*n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::List(_) => None,
    }
}

impl Node {
    /// A literal node, not yet positioned. Numbers must be finite.
    pub fn literal(literal: Literal) -> Result<Node> {
        if let Literal::Number(n) = literal {
            if !n.is_finite() {
                return Err(ValidationError::InvalidValue {
                    node: "Number",
                    found: n.to_string(),
                });
            }
        }
        Ok(Node::bare(NodeKind::Literal(literal)))
    }

    /// Cast `value` into the literal variant `node_type`.
    pub fn cast_literal(node_type: NodeType, value: &Value) -> Result<Node> {
        if node_type.family() != Family::Literal {
            return Err(ValidationError::UnsupportedVariant {
                builder: "literal cast",
                variant: node_type.as_str(),
            });
        }
        Node::literal(Literal::cast(node_type, value)?)
    }

    pub fn number(n: f64) -> Result<Node> {
        Node::literal(Literal::Number(n))
    }

    pub fn string(s: impl Into<String>) -> Node {
        Node::bare(NodeKind::Literal(Literal::String(s.into())))
    }

    pub fn path(s: impl Into<String>) -> Node {
        Node::bare(NodeKind::Literal(Literal::Path(s.into())))
    }

    pub fn identifier(name: impl Into<String>) -> Node {
        Node::bare(NodeKind::Literal(Literal::Identifier(name.into())))
    }

    pub fn boolean(b: bool) -> Node {
        Node::bare(NodeKind::Literal(Literal::Boolean(b)))
    }

    pub fn undefined() -> Node {
        Node::bare(NodeKind::Literal(Literal::Undefined))
    }

    pub fn comment(text: CommentText) -> Node {
        Node::bare(NodeKind::Literal(Literal::Comment(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_accepts_numbers_and_numeric_text() {
        assert_eq!(Literal::cast(NodeType::Number, &Value::Number(1.5)), Ok(Literal::Number(1.5)));
        assert_eq!(Literal::cast(NodeType::Number, &Value::from("1e3")), Ok(Literal::Number(1000.0)));
        assert_eq!(Literal::cast(NodeType::Number, &Value::from(" 42 ")), Ok(Literal::Number(42.0)));
    }

    #[test]
    fn number_rejects_non_numeric_input() {
        for value in [Value::from("abc"), Value::from(""), Value::Bool(true), Value::Null, Value::Number(f64::NAN)] {
            assert!(
                matches!(
                    Literal::cast(NodeType::Number, &value),
                    Err(ValidationError::InvalidValue { node: "Number", .. })
                ),
                "{value} should not cast to a Number"
            );
        }
    }

    #[test]
    fn text_variants_coerce_scalars() {
        assert_eq!(Literal::cast(NodeType::String, &Value::from("hi")), Ok(Literal::String("hi".into())));
        assert_eq!(Literal::cast(NodeType::Identifier, &Value::Number(3.0)), Ok(Literal::Identifier("3".into())));
        assert_eq!(Literal::cast(NodeType::Path, &Value::Bool(false)), Ok(Literal::Path("false".into())));
        assert!(Literal::cast(NodeType::String, &Value::Null).is_err());
        assert!(Literal::cast(NodeType::Identifier, &Value::from(vec!["a"])).is_err());
    }

    #[test]
    fn boolean_accepts_exact_spellings_only() {
        assert_eq!(Literal::cast(NodeType::Boolean, &Value::Bool(true)), Ok(Literal::Boolean(true)));
        assert_eq!(Literal::cast(NodeType::Boolean, &Value::from("false")), Ok(Literal::Boolean(false)));
        assert!(Literal::cast(NodeType::Boolean, &Value::from("True")).is_err());
        assert!(Literal::cast(NodeType::Boolean, &Value::Number(1.0)).is_err());
    }

    #[test]
    fn undefined_discards_input() {
        assert_eq!(Literal::cast(NodeType::Undefined, &Value::from("anything")), Ok(Literal::Undefined));
        assert_eq!(Literal::Undefined.value(), Value::Null);
    }

    #[test]
    fn comment_keeps_line_or_block_shape() {
        assert_eq!(
            Literal::cast(NodeType::Comment, &Value::from("// hi")),
            Ok(Literal::Comment(CommentText::Line("// hi".into())))
        );
        assert_eq!(
            Literal::cast(NodeType::Comment, &Value::from(vec!["/* a", " b */"])),
            Ok(Literal::Comment(CommentText::Block(vec!["/* a".into(), " b */".into()])))
        );
        assert!(Literal::cast(NodeType::Comment, &Value::List(vec![Value::Number(1.0)])).is_err());
    }

    #[test]
    fn values_read_back() {
        for value in [Value::Number(2.5), Value::from("s"), Value::Bool(true)] {
            let ty = match value {
                Value::Number(_) => NodeType::Number,
                Value::Bool(_) => NodeType::Boolean,
                _ => NodeType::String,
            };
            assert_eq!(Literal::cast(ty, &value).unwrap().value(), value);
        }
        let block = Value::from(vec!["a", "b"]);
        assert_eq!(Literal::cast(NodeType::Comment, &block).unwrap().value(), block);
    }

    #[test]
    fn non_finite_numbers_never_become_nodes() {
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                Node::number(n),
                Err(ValidationError::InvalidValue { node: "Number", .. })
            ));
            assert!(Node::literal(Literal::Number(n)).is_err());
        }
        let node = Node::number(2.5).unwrap();
        assert_eq!(node, node.clone_with(Fields::new()).unwrap());
    }

    #[test]
    fn only_undefined_may_omit_its_value() {
        assert_eq!(
            Node::new(NodeType::Number, Fields::new()),
            Err(ValidationError::MissingField {
                node: "Number",
                field: "value".to_string(),
            })
        );
        assert!(matches!(
            Node::new(NodeType::Comment, Fields::new()),
            Err(ValidationError::MissingField { node: "Comment", .. })
        ));
        assert!(Node::new(NodeType::Undefined, Fields::new()).unwrap().is(NodeType::Undefined));
    }

    #[test]
    fn non_literal_variants_cannot_be_cast() {
        assert!(matches!(
            Node::cast_literal(NodeType::Block, &Value::Null),
            Err(ValidationError::UnsupportedVariant { variant: "Block", .. })
        ));
    }
}
