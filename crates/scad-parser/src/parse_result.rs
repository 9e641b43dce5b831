// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Raw production results handed to the builders.

use std::sync::Arc;

use scad_ast::{Node, NodeType, Position, Result, SpanSource, Token, ValidationError};

use crate::builders::leaf;

/// What a grammar production yields: a token, an already-built node, a
/// sequence of either (optional / repeated / sequenced productions), or
/// nothing (an optional production that did not match).
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    Null,
    Token(Token),
    Node(Arc<Node>),
    Seq(Vec<ParseResult>),
}

/// One element of a flattened production result.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Token(Token),
    Node(Arc<Node>),
}

impl ParseResult {
    /// Collapse nested sequences into one ordered list, dropping `Null`.
    pub fn flatten(self) -> Vec<Item> {
        let mut items = Vec::new();
        self.flatten_into(&mut items);
        items
    }

    fn flatten_into(self, items: &mut Vec<Item>) {
        match self {
            ParseResult::Null => {}
            ParseResult::Token(token) => items.push(Item::Token(token)),
            ParseResult::Node(node) => items.push(Item::Node(node)),
            ParseResult::Seq(children) => {
                for child in children {
                    child.flatten_into(items);
                }
            }
        }
    }

    /// A sequence of anything convertible to a result.
    pub fn seq<T: Into<ParseResult>>(items: impl IntoIterator<Item = T>) -> Self {
        ParseResult::Seq(items.into_iter().map(Into::into).collect())
    }

    pub fn describe(&self) -> String {
        match self {
            ParseResult::Null => "nothing".to_string(),
            ParseResult::Token(token) => Item::describe_token(token),
            ParseResult::Node(node) => format!("a {} node", node.node_type()),
            ParseResult::Seq(items) => format!("a sequence of {} result(s)", items.len()),
        }
    }
}

impl Item {
    fn describe_token(token: &Token) -> String {
        format!("{} `{}`", token.kind.display_name(), token.text)
    }

    pub fn describe(&self) -> String {
        match self {
            Item::Token(token) => Item::describe_token(token),
            Item::Node(node) => format!("a {} node", node.node_type()),
        }
    }

    pub fn as_node(&self) -> Option<&Arc<Node>> {
        match self {
            Item::Node(node) => Some(node),
            Item::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Item::Token(token) => Some(token),
            Item::Node(_) => None,
        }
    }

    /// Punctuation between elements, such as the commas of a parameter list.
    pub fn is_separator(&self) -> bool {
        matches!(self, Item::Token(token) if token.kind == scad_ast::TokenKind::Punctuation)
    }

    /// This element as a node; a token becomes the literal its kind implies,
    /// spanning the token.
    pub fn to_node(&self) -> Result<Arc<Node>> {
        self.to_node_as(None)
    }

    /// Like [`Item::to_node`], but a token becomes a `literal` leaf.
    pub fn to_node_as(&self, literal: Option<NodeType>) -> Result<Arc<Node>> {
        match self {
            Item::Node(node) => Ok(Arc::clone(node)),
            Item::Token(token) => Ok(Arc::new(leaf(token, literal)?)),
        }
    }
}

impl SpanSource for Item {
    fn start_position(&self) -> Result<Position> {
        match self {
            Item::Token(token) => token.start_position(),
            Item::Node(node) => node.start_position(),
        }
    }

    fn end_position(&self) -> Result<Position> {
        match self {
            Item::Token(token) => token.end_position(),
            Item::Node(node) => node.end_position(),
        }
    }
}

impl SpanSource for ParseResult {
    fn start_position(&self) -> Result<Position> {
        match self {
            ParseResult::Token(token) => token.start_position(),
            ParseResult::Node(node) => node.start_position(),
            other => Err(ValidationError::NoSpanSource {
                edge: "start",
                from: other.describe(),
            }),
        }
    }

    fn end_position(&self) -> Result<Position> {
        match self {
            ParseResult::Token(token) => token.end_position(),
            ParseResult::Node(node) => node.end_position(),
            other => Err(ValidationError::NoSpanSource {
                edge: "end",
                from: other.describe(),
            }),
        }
    }
}

impl From<Token> for ParseResult {
    fn from(token: Token) -> Self {
        ParseResult::Token(token)
    }
}

impl From<Arc<Node>> for ParseResult {
    fn from(node: Arc<Node>) -> Self {
        ParseResult::Node(node)
    }
}

impl From<Node> for ParseResult {
    fn from(node: Node) -> Self {
        ParseResult::Node(Arc::new(node))
    }
}

/// A builder's output fed back in as raw data.
impl From<Option<Arc<Node>>> for ParseResult {
    fn from(node: Option<Arc<Node>>) -> Self {
        node.map_or(ParseResult::Null, ParseResult::Node)
    }
}

impl From<Vec<ParseResult>> for ParseResult {
    fn from(items: Vec<ParseResult>) -> Self {
        ParseResult::Seq(items)
    }
}

impl From<Item> for ParseResult {
    fn from(item: Item) -> Self {
        match item {
            Item::Token(token) => ParseResult::Token(token),
            Item::Node(node) => ParseResult::Node(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scad_ast::TokenKind;

    fn tok(text: &str) -> Token {
        Token::new(TokenKind::Punctuation, text, 1, 1, 0)
    }

    #[test]
    fn flatten_non_sequence_is_single_item() {
        assert_eq!(ParseResult::from(tok("{")).flatten(), vec![Item::Token(tok("{"))]);
    }

    #[test]
    fn flatten_preserves_order_across_nesting() {
        let nested = ParseResult::seq([
            ParseResult::from(tok("a")),
            ParseResult::seq([ParseResult::seq([tok("b")]), ParseResult::Null]),
            ParseResult::Seq(Vec::new()),
            ParseResult::from(tok("c")),
        ]);
        let texts: Vec<String> = nested
            .flatten()
            .into_iter()
            .filter_map(|item| item.as_token().map(|t| t.text.clone()))
            .collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn flatten_drops_nulls() {
        assert!(ParseResult::seq([ParseResult::Null, ParseResult::Null]).flatten().is_empty());
        assert!(ParseResult::from(None).flatten().is_empty());
    }

    #[test]
    fn sequences_have_no_span() {
        assert!(ParseResult::Seq(Vec::new()).start_position().is_err());
        assert!(ParseResult::Null.end_position().is_err());
    }
}
