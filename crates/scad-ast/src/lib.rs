// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the modeling language.
//!
//! This crate defines the validated, immutable node model shared between the
//! tokenizer, the grammar builders and any later pass. Nodes are grouped in
//! three closed families ([`Literal`], [`Group`], [`Composite`]) behind one
//! [`Node`] type that carries a write-once source span.

pub mod composite;
pub mod error;
pub mod fields;
pub mod group;
pub mod literal;
pub mod node;
pub mod ops;
pub mod position;
#[cfg(feature = "serde")]
pub mod serialize;
pub mod span;
pub mod token;
pub mod value;

pub use composite::{Call, Composite, Definition};
pub use error::{Result, ValidationError};
pub use fields::{Field, Fields};
pub use group::{Group, GroupKind};
pub use literal::{CommentText, Literal};
pub use node::{Family, Node, NodeKind, NodeQuery, NodeType};
pub use ops::{BinaryOp, UnaryOp};
pub use position::{Coordinate, Position};
pub use span::{Span, SpanSource};
pub use token::{Token, TokenKind};
pub use value::Value;
