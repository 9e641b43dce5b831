// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Validation errors.
//!
//! Every failure in node construction, cloning, span assignment and building
//! is a [`ValidationError`]. Nothing is produced when one is returned.

use thiserror::Error;

/// Result alias used throughout the tree and builder crates.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Why a node, position or build could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A position coordinate could not be read as an integer.
    #[error("position {coordinate} is not a number: `{found}`")]
    NonNumericCoordinate {
        coordinate: &'static str,
        found: String,
    },

    /// A position coordinate is below its minimum.
    #[error("position {coordinate} must be at least {min}, got {found}")]
    CoordinateOutOfRange {
        coordinate: &'static str,
        min: i64,
        found: i64,
    },

    /// A property bag has no `type` entry.
    #[error("node type is missing")]
    MissingType,

    /// A property bag's `type` entry is not a string.
    #[error("node type must be a string, found {found}")]
    InvalidType { found: String },

    /// The type tag names no known variant.
    #[error("unknown node type `{0}`")]
    UnknownType(String),

    /// A write-once field was assigned twice.
    #[error("field `{field}` is already set")]
    FieldAlreadySet { field: String },

    /// A required field was not supplied.
    #[error("{node} requires field `{field}`")]
    MissingField { node: &'static str, field: String },

    /// A field holds something of the wrong shape or variant.
    #[error("field `{field}` of {node} must be {expected}, found {found}")]
    WrongFieldKind {
        node: &'static str,
        field: String,
        expected: &'static str,
        found: String,
    },

    /// A field the variant does not declare.
    #[error("{node} has no field `{field}`")]
    UnknownField { node: &'static str, field: String },

    /// A literal value incompatible with its variant.
    #[error("cannot cast {found} to {node}")]
    InvalidValue { node: &'static str, found: String },

    /// An operator symbol outside the language's operator set.
    #[error("unknown {kind} operator `{symbol}`")]
    UnknownOperator { kind: &'static str, symbol: String },

    /// A builder received a shape none of its patterns accept and the
    /// result could not be forwarded either.
    #[error("{builder} cannot build from {found} element(s)")]
    Arity { builder: &'static str, found: usize },

    /// A builder was asked for a variant it does not produce.
    #[error("{builder} cannot produce a {variant} node")]
    UnsupportedVariant {
        builder: &'static str,
        variant: &'static str,
    },

    /// A builder received a node of the wrong variant.
    #[error("{builder} expected {expected}, found a {found} node")]
    UnexpectedNode {
        builder: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// No variant was requested and none follows from the input.
    #[error("cannot resolve a node variant for {found}")]
    UnresolvedVariant { found: String },

    /// A span was taken from something with no such position.
    #[error("cannot take a {edge} position from {from}")]
    NoSpanSource { edge: &'static str, from: String },

    /// No builder is registered under this name.
    #[error("unknown builder `{0}`")]
    UnknownBuilder(String),
}

impl ValidationError {
    pub fn arity(builder: &'static str, found: usize) -> Self {
        ValidationError::Arity { builder, found }
    }

    pub fn already_set(field: impl Into<String>) -> Self {
        ValidationError::FieldAlreadySet { field: field.into() }
    }
}
