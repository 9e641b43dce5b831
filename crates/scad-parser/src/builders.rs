// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Builders invoked by the grammar engine when a production matches.
//!
//! Every builder flattens its raw data first and then matches the result
//! against fixed slot shapes. A shape it does not recognise is forwarded
//! when it is a single element and rejected otherwise, so wrapper rules
//! such as `expr -> term` cost nothing.

use std::sync::Arc;

use log::debug;
use scad_ast::{Node, NodeType, Result, Token, ValidationError};

use crate::infer::{self, positioned};
use crate::parse_result::{Item, ParseResult};

/// What every builder returns. `None` only comes from an empty list.
pub type Built = Result<Option<Arc<Node>>>;

/// The literal leaf for `token`, spanning its text.
///
/// The variant is `literal` when given, otherwise whatever the token kind
/// implies; keywords, operators and punctuation imply none.
pub(crate) fn leaf(token: &Token, literal: Option<NodeType>) -> Result<Node> {
    let node_type = literal.or_else(|| token.kind.literal_type()).ok_or_else(|| {
        ValidationError::UnresolvedVariant {
            found: format!("{} `{}`", token.kind.display_name(), token.text),
        }
    })?;
    Node::cast_literal(node_type, &token.value)?.positioned(token, token)
}

/// The variant to build: the requested one, or the builder's default,
/// provided the builder can produce it.
fn target(
    builder: &'static str,
    requested: Option<NodeType>,
    default: NodeType,
    produces: &[NodeType],
) -> Result<NodeType> {
    let node_type = requested.unwrap_or(default);
    if produces.contains(&node_type) {
        Ok(node_type)
    } else {
        debug!("{}: refusing variant {}", builder, node_type);
        Err(ValidationError::UnsupportedVariant {
            builder,
            variant: node_type.as_str(),
        })
    }
}

fn built(node: Node, first: &Item, last: &Item) -> Built {
    positioned(node, first, last).map(Some)
}

fn forwarded(items: &[Item], builder: &'static str) -> Built {
    infer::forward(items, builder).map(Some)
}

/// Resolve an element in name position: a name token, an Identifier, or a
/// Lookup of one.
fn identifier(item: &Item) -> Result<Arc<Node>> {
    if let Some(lookup) = item.as_node().filter(|node| node.is(NodeType::Lookup)) {
        if let Some(name) = lookup.children().first() {
            return Ok(Arc::clone(name));
        }
    }
    item.to_node_as(Some(NodeType::Identifier))
}

fn nodes<'a>(items: impl IntoIterator<Item = &'a Item>) -> Result<Vec<Arc<Node>>> {
    items.into_iter().map(Item::to_node).collect()
}

/// A leaf from a single token, or an existing node passed through.
pub fn terminal(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [Item::Token(token)] => Ok(Some(Arc::new(leaf(token, variant)?))),
        [Item::Node(node)] => match variant {
            Some(node_type) if !node.is(node_type) => {
                debug!("terminal: expected {}, got {}", node_type, node.node_type());
                Err(ValidationError::UnexpectedNode {
                    builder: "terminal",
                    expected: node_type.as_str(),
                    found: node.node_type().as_str(),
                })
            }
            _ => Ok(Some(Arc::clone(node))),
        },
        _ => forwarded(&items, "terminal"),
    }
}

pub fn forward(data: ParseResult, _variant: Option<NodeType>) -> Built {
    forwarded(&data.flatten(), "forward")
}

pub fn surround(data: ParseResult, _variant: Option<NodeType>) -> Built {
    infer::surround(&data.flatten()).map(Some)
}

pub fn head(data: ParseResult, _variant: Option<NodeType>) -> Built {
    infer::head(&data.flatten()).map(Some)
}

pub fn tail(data: ParseResult, _variant: Option<NodeType>) -> Built {
    infer::tail(&data.flatten()).map(Some)
}

/// `op operand`
pub fn unary_operator(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [op @ Item::Token(token), operand] => {
            target("unaryOperator", variant, NodeType::UnaryOperator, &[NodeType::UnaryOperator])?;
            let node = Node::unary_operator(token.symbol().parse()?, operand.to_node()?);
            built(node, op, operand)
        }
        _ => forwarded(&items, "unaryOperator"),
    }
}

/// `left op right`
pub fn binary_operator(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [left, Item::Token(op), right] => {
            target("binaryOperator", variant, NodeType::BinaryOperator, &[NodeType::BinaryOperator])?;
            let node = Node::binary_operator(left.to_node()?, op.symbol().parse()?, right.to_node()?);
            built(node, left, right)
        }
        _ => forwarded(&items, "binaryOperator"),
    }
}

/// `cond ? cons : alt`
pub fn ternary_operator(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [condition, Item::Token(_), consequent, Item::Token(_), alternative] => {
            target("ternaryOperator", variant, NodeType::TernaryOperator, &[NodeType::TernaryOperator])?;
            let node = Node::ternary_operator(
                condition.to_node()?,
                consequent.to_node()?,
                alternative.to_node()?,
            );
            built(node, condition, alternative)
        }
        _ => forwarded(&items, "ternaryOperator"),
    }
}

/// `name = value`
pub fn assignment(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [name, Item::Token(_), value] => {
            target("assignment", variant, NodeType::Assignment, &[NodeType::Assignment])?;
            built(Node::assignment(identifier(name)?, value.to_node()?)?, name, value)
        }
        _ => forwarded(&items, "assignment"),
    }
}

/// `include <path>` or `use <path>`; the keyword picks the variant unless
/// one is requested.
pub fn command(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [keyword @ Item::Token(token), argument] => {
            let node_type = match variant {
                Some(node_type) => node_type,
                None => match token.symbol() {
                    "include" => NodeType::Include,
                    "use" => NodeType::Use,
                    other => {
                        return Err(ValidationError::UnresolvedVariant {
                            found: format!("command `{}`", other),
                        })
                    }
                },
            };
            let node_type = target("command", Some(node_type), node_type, &[NodeType::Include, NodeType::Use])?;
            let path = argument.to_node_as(Some(NodeType::Path))?;
            built(Node::file_import(node_type, path)?, keyword, argument)
        }
        _ => forwarded(&items, "command"),
    }
}

/// `{ statements }`, spanning both braces.
pub fn block(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [left @ Item::Token(_), statements @ .., right @ Item::Token(_)] => {
            let node_type = target("block", variant, NodeType::Block, &[NodeType::Block, NodeType::Package])?;
            built(Node::group(node_type, nodes(statements)?)?, left, right)
        }
        _ => forwarded(&items, "block"),
    }
}

/// Any number of statements. Nothing yields `None`, and a lone statement
/// that already is the target group comes back as is.
pub fn list(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return Ok(None);
    };
    let node_type = target("list", variant, NodeType::Package, &[NodeType::Block, NodeType::Package])?;
    if let [Item::Node(only)] = items.as_slice() {
        if only.is(node_type) {
            return Ok(Some(Arc::clone(only)));
        }
    }
    built(Node::group(node_type, nodes(&items)?)?, first, last)
}

/// An empty statement, spanning whatever the production matched. Nothing
/// matched leaves no span to give it.
pub fn noop(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    if let [Item::Node(node)] = items.as_slice() {
        if node.is(NodeType::Noop) {
            return Ok(Some(Arc::clone(node)));
        }
    }
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return Err(ValidationError::arity("noop", 0));
    };
    target("noop", variant, NodeType::Noop, &[NodeType::Noop])?;
    built(Node::noop(), first, last)
}

/// A bare name used as a value.
pub fn lookup(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [Item::Node(node)] if node.is(NodeType::Lookup) => Ok(Some(Arc::clone(node))),
        [name] => {
            target("lookup", variant, NodeType::Lookup, &[NodeType::Lookup])?;
            built(Node::lookup(identifier(name)?)?, name, name)
        }
        _ => forwarded(&items, "lookup"),
    }
}

/// `expr . member`
pub fn member_lookup(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [expr, Item::Token(_), member] => {
            target("memberLookup", variant, NodeType::MemberLookup, &[NodeType::MemberLookup])?;
            built(Node::member_lookup(expr.to_node()?, identifier(member)?)?, expr, member)
        }
        _ => forwarded(&items, "memberLookup"),
    }
}

/// `array [ index ]`
pub fn array_lookup(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [array, Item::Token(_), index, close @ Item::Token(_)] => {
            target("arrayLookup", variant, NodeType::ArrayLookup, &[NodeType::ArrayLookup])?;
            built(Node::array_lookup(array.to_node()?, index.to_node()?), array, close)
        }
        _ => forwarded(&items, "arrayLookup"),
    }
}

/// `[first : last]` or `[first : step : last]`
pub fn range(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [open @ Item::Token(_), first, Item::Token(_), last, close @ Item::Token(_)] => {
            target("range", variant, NodeType::Range, &[NodeType::Range])?;
            built(Node::range(first.to_node()?, None, last.to_node()?), open, close)
        }
        [open @ Item::Token(_), first, Item::Token(_), step, Item::Token(_), last, close @ Item::Token(_)] => {
            target("range", variant, NodeType::Range, &[NodeType::Range])?;
            let node = Node::range(first.to_node()?, Some(step.to_node()?), last.to_node()?);
            built(node, open, close)
        }
        _ => forwarded(&items, "range"),
    }
}

/// `name ( parameters )`, dropping the separators between parameters.
pub fn call(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [name, Item::Token(_), parameters @ .., close @ Item::Token(_)] => {
            let node_type = target(
                "call",
                variant,
                NodeType::FunctionCall,
                &[NodeType::FunctionCall, NodeType::ModuleCall, NodeType::OperatorCall],
            )?;
            let parameters = nodes(parameters.iter().filter(|item| !item.is_separator()))?;
            built(Node::call(node_type, identifier(name)?, parameters)?, name, close)
        }
        _ => forwarded(&items, "call"),
    }
}

fn is_symbol(item: &Item, symbol: &str) -> bool {
    item.as_token().is_some_and(|token| token.symbol() == symbol)
}

/// `function name ( parameters ) = body ;` or `module name ( parameters ) body`
pub fn definition(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    let [keyword @ Item::Token(token), name, Item::Token(_), rest @ ..] = items.as_slice() else {
        return forwarded(&items, "definition");
    };
    let Some(close) = rest.iter().position(|item| is_symbol(item, ")")) else {
        return forwarded(&items, "definition");
    };
    let (parameters, after) = rest.split_at(close);

    let node_type = match (variant, token.symbol()) {
        (Some(node_type), _) => node_type,
        (None, "function") => NodeType::Function,
        (None, "module") => NodeType::Module,
        (None, other) => {
            return Err(ValidationError::UnresolvedVariant {
                found: format!("definition keyword `{}`", other),
            })
        }
    };
    let node_type = target("definition", Some(node_type), node_type, &[NodeType::Function, NodeType::Module])?;

    let (body, last) = match (node_type, after) {
        (NodeType::Function, [_, Item::Token(_), body]) => (body, body),
        (NodeType::Function, [_, Item::Token(_), body, semicolon @ Item::Token(_)]) => (body, semicolon),
        (NodeType::Module, [_, body]) => (body, body),
        _ => return forwarded(&items, "definition"),
    };
    let parameters = nodes(parameters.iter().filter(|item| !item.is_separator()))?;
    let node = Node::definition(node_type, identifier(name)?, parameters, body.to_node()?)?;
    built(node, keyword, last)
}

/// `if ( cond ) cons` with an optional `else alt`.
pub fn if_statement(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [keyword @ Item::Token(_), Item::Token(_), condition, Item::Token(_), consequent] => {
            target("ifStatement", variant, NodeType::IfStatement, &[NodeType::IfStatement])?;
            let node = Node::if_statement(condition.to_node()?, consequent.to_node()?, None);
            built(node, keyword, consequent)
        }
        [keyword @ Item::Token(_), Item::Token(_), condition, Item::Token(_), consequent, Item::Token(_), alternative] => {
            target("ifStatement", variant, NodeType::IfStatement, &[NodeType::IfStatement])?;
            let node = Node::if_statement(
                condition.to_node()?,
                consequent.to_node()?,
                Some(alternative.to_node()?),
            );
            built(node, keyword, alternative)
        }
        _ => forwarded(&items, "ifStatement"),
    }
}

/// `for ( init ; cond ; incr ) body`
pub fn for_statement(data: ParseResult, variant: Option<NodeType>) -> Built {
    let items = data.flatten();
    match items.as_slice() {
        [keyword @ Item::Token(_), Item::Token(_), init, Item::Token(_), condition, Item::Token(_), increment, Item::Token(_), body] => {
            target("forStatement", variant, NodeType::ForStatement, &[NodeType::ForStatement])?;
            let node = Node::for_statement(
                init.to_node()?,
                condition.to_node()?,
                increment.to_node()?,
                body.to_node()?,
            );
            built(node, keyword, body)
        }
        _ => forwarded(&items, "forStatement"),
    }
}
