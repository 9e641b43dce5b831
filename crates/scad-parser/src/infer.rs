// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Position inference over flattened production results.
//!
//! These helpers decide which span a built or forwarded node reports, so
//! that a node always covers the full text its production matched.

use std::sync::Arc;

use log::{debug, trace};
use scad_ast::{Fields, Node, Position, Result, SpanSource, ValidationError};

use crate::parse_result::Item;

/// Where `source` starts: a token's own coordinates, a node's stored start.
pub fn derive_start(source: &impl SpanSource) -> Result<Position> {
    source.start_position()
}

/// Where `source` ends: past a token's text, a node's stored end.
pub fn derive_end(source: &impl SpanSource) -> Result<Position> {
    source.end_position()
}

/// Position a freshly built node from the start of `first` to the end of `last`.
pub fn positioned(node: Node, first: impl SpanSource, last: impl SpanSource) -> Result<Arc<Node>> {
    Ok(Arc::new(node.positioned(first, last)?))
}

/// A copy of `node` spanning from the start of `first` to the end of `last`.
pub fn respan(node: &Node, first: impl SpanSource, last: impl SpanSource) -> Result<Arc<Node>> {
    let overrides = Fields::new()
        .with("start", first.start_position()?)?
        .with("end", last.end_position()?)?;
    Ok(Arc::new(node.clone_with(overrides)?))
}

/// Pass a lone element through unchanged.
pub fn forward(items: &[Item], builder: &'static str) -> Result<Arc<Node>> {
    match items {
        [item] => {
            trace!("{}: forwarding {}", builder, item.describe());
            item.to_node()
        }
        _ => {
            debug!("{}: cannot forward {} elements", builder, items.len());
            Err(ValidationError::arity(builder, items.len()))
        }
    }
}

/// `[left, inner, right]` becomes `inner` spanning both boundaries.
pub fn surround(items: &[Item]) -> Result<Arc<Node>> {
    match items {
        [left, Item::Node(inner), right] => respan(inner, left, right),
        _ => forward(items, "surround"),
    }
}

/// The first element, stretched to end where the last discarded one ends.
pub fn head(items: &[Item]) -> Result<Arc<Node>> {
    match items {
        [] | [_] => forward(items, "head"),
        [first, .., last] => {
            let node = first.to_node()?;
            respan(&node, &*node, last)
        }
    }
}

/// The last element, stretched to start where the first discarded one starts.
pub fn tail(items: &[Item]) -> Result<Arc<Node>> {
    match items {
        [] | [_] => forward(items, "tail"),
        [first, .., last] => {
            let node = last.to_node()?;
            respan(&node, first, &*node)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scad_ast::{Token, TokenKind};

    fn pos(line: usize, column: usize, offset: usize) -> Position {
        Position::new(line, column, offset).unwrap()
    }

    fn punct(text: &str, col: usize) -> Item {
        Item::Token(Token::new(TokenKind::Punctuation, text, 1, col, col - 1))
    }

    fn number_at(n: f64, col: usize) -> Item {
        let node = Node::number(n).unwrap().positioned(pos(1, col, col - 1), pos(1, col + 1, col)).unwrap();
        Item::Node(Arc::new(node))
    }

    #[test]
    fn derive_end_of_token_and_node() {
        let token = Token::new(TokenKind::String, "foo", 2, 7, 12);
        assert_eq!(derive_start(&token).unwrap(), pos(2, 7, 12));
        assert_eq!(derive_end(&token).unwrap(), pos(2, 10, 15));
        let Item::Node(node) = number_at(1.0, 3) else { unreachable!() };
        assert_eq!(derive_end(&node).unwrap(), pos(1, 4, 3));
    }

    #[test]
    fn surround_spans_boundaries() {
        let items = [punct("(", 1), number_at(7.0, 2), punct(")", 3)];
        let node = surround(&items).unwrap();
        assert_eq!(node.start(), Some(pos(1, 1, 0)));
        assert_eq!(node.end(), Some(pos(1, 4, 3)));
        // the original keeps its span
        assert_eq!(items[1].as_node().unwrap().start(), Some(pos(1, 2, 1)));
    }

    #[test]
    fn surround_forwards_other_shapes() {
        let single = [number_at(7.0, 2)];
        assert!(Arc::ptr_eq(&surround(&single).unwrap(), single[0].as_node().unwrap()));
        assert!(matches!(
            surround(&[punct("(", 1), punct(")", 2)]),
            Err(ValidationError::Arity { builder: "surround", found: 2 })
        ));
    }

    #[test]
    fn head_extends_end_over_discarded() {
        let items = [number_at(1.0, 1), punct(";", 2)];
        let node = head(&items).unwrap();
        assert_eq!(node.span().map(|s| (s.start, s.end)), Some((pos(1, 1, 0), pos(1, 3, 2))));
    }

    #[test]
    fn tail_extends_start_over_discarded() {
        let items = [punct("=", 1), number_at(1.0, 2)];
        let node = tail(&items).unwrap();
        assert_eq!(node.start(), Some(pos(1, 1, 0)));
        assert_eq!(node.end(), Some(pos(1, 3, 2)));
    }

    #[test]
    fn head_of_single_element_is_unchanged() {
        let items = [number_at(1.0, 1)];
        assert!(Arc::ptr_eq(&head(&items).unwrap(), items[0].as_node().unwrap()));
        assert!(head(&[]).is_err());
    }
}
