// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source location tracking.

use std::sync::Arc;

use crate::error::{Result, ValidationError};
use crate::node::Node;
use crate::position::{Coordinate, Position};
use crate::token::Token;

/// The source text a fragment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Something a fragment can take its start or end position from.
///
/// A position is its own start and end; a token starts where its text
/// starts and ends past its text; a node lends its stored span.
pub trait SpanSource {
    fn start_position(&self) -> Result<Position>;
    fn end_position(&self) -> Result<Position>;
}

impl SpanSource for Position {
    fn start_position(&self) -> Result<Position> {
        Ok(*self)
    }

    fn end_position(&self) -> Result<Position> {
        Ok(*self)
    }
}

impl<L: Coordinate, C: Coordinate, O: Coordinate> SpanSource for (L, C, O) {
    fn start_position(&self) -> Result<Position> {
        Position::new(&self.0, &self.1, &self.2)
    }

    fn end_position(&self) -> Result<Position> {
        Position::new(&self.0, &self.1, &self.2)
    }
}

impl SpanSource for Token {
    fn start_position(&self) -> Result<Position> {
        self.start()
    }

    fn end_position(&self) -> Result<Position> {
        self.end()
    }
}

impl SpanSource for Node {
    fn start_position(&self) -> Result<Position> {
        self.start().ok_or_else(|| ValidationError::NoSpanSource {
            edge: "start",
            from: format!("an unpositioned {}", self.node_type()),
        })
    }

    fn end_position(&self) -> Result<Position> {
        self.end().ok_or_else(|| ValidationError::NoSpanSource {
            edge: "end",
            from: format!("an unpositioned {}", self.node_type()),
        })
    }
}

impl<T: SpanSource + ?Sized> SpanSource for &T {
    fn start_position(&self) -> Result<Position> {
        (**self).start_position()
    }

    fn end_position(&self) -> Result<Position> {
        (**self).end_position()
    }
}

impl<T: SpanSource + ?Sized> SpanSource for Arc<T> {
    fn start_position(&self) -> Result<Position> {
        (**self).start_position()
    }

    fn end_position(&self) -> Result<Position> {
        (**self).end_position()
    }
}
