// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Name-keyed builder lookup for the grammar engine.

use std::collections::HashMap;

use log::trace;
use once_cell::sync::Lazy;
use scad_ast::{NodeType, ValidationError};

use crate::builders::{self, Built};
use crate::parse_result::ParseResult;

/// Signature shared by every builder.
pub type BuilderFn = fn(ParseResult, Option<NodeType>) -> Built;

/// The builders a grammar can name, keyed by their grammar-facing names.
#[derive(Debug, Clone, Default)]
pub struct BuilderRegistry {
    builders: HashMap<&'static str, BuilderFn>,
}

/// Process-wide registry of the standard builders, created on first use.
pub static BUILDERS: Lazy<BuilderRegistry> = Lazy::new(BuilderRegistry::standard);

impl BuilderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every builder the grammar uses.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("terminal", builders::terminal);
        registry.register("literal", builders::terminal);
        registry.register("unaryOperator", builders::unary_operator);
        registry.register("binaryOperator", builders::binary_operator);
        registry.register("ternaryOperator", builders::ternary_operator);
        registry.register("assignment", builders::assignment);
        registry.register("command", builders::command);
        registry.register("block", builders::block);
        registry.register("list", builders::list);
        registry.register("noop", builders::noop);
        registry.register("forward", builders::forward);
        registry.register("surround", builders::surround);
        registry.register("head", builders::head);
        registry.register("tail", builders::tail);
        registry.register("lookup", builders::lookup);
        registry.register("memberLookup", builders::member_lookup);
        registry.register("arrayLookup", builders::array_lookup);
        registry.register("range", builders::range);
        registry.register("call", builders::call);
        registry.register("definition", builders::definition);
        registry.register("ifStatement", builders::if_statement);
        registry.register("forStatement", builders::for_statement);
        registry
    }

    /// Add or replace the builder registered under `name`.
    pub fn register(&mut self, name: &'static str, builder: BuilderFn) {
        self.builders.insert(name, builder);
    }

    pub fn get(&self, name: &str) -> Option<BuilderFn> {
        self.builders.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.builders.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Run the builder registered under `name`, with the variant given by
    /// its type name.
    pub fn build(&self, name: &str, data: ParseResult, variant: Option<&str>) -> Built {
        let builder = self
            .get(name)
            .ok_or_else(|| ValidationError::UnknownBuilder(name.to_string()))?;
        let variant = variant.map(str::parse::<NodeType>).transpose()?;
        trace!("dispatching {} (variant {:?})", name, variant);
        builder(data, variant)
    }
}

/// Run a standard builder by name.
pub fn build(name: &str, data: ParseResult, variant: Option<&str>) -> Built {
    BUILDERS.build(name, data, variant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scad_ast::{Token, TokenKind};

    #[test]
    fn standard_registry_knows_grammar_names() {
        for name in ["terminal", "literal", "binaryOperator", "block", "list", "noop", "forStatement"] {
            assert!(BUILDERS.contains(name), "missing {name}");
        }
        assert_eq!(BUILDERS.names().len(), 22);
    }

    #[test]
    fn unknown_builder_fails() {
        assert_eq!(
            build("bogus", ParseResult::Null, None),
            Err(ValidationError::UnknownBuilder("bogus".to_string()))
        );
    }

    #[test]
    fn unknown_variant_name_fails() {
        assert!(matches!(
            build("terminal", ParseResult::Null, Some("Widget")),
            Err(ValidationError::UnknownType(_))
        ));
    }

    #[test]
    fn variant_by_name() {
        let token = Token::new(TokenKind::Identifier, "x", 1, 1, 0);
        let node = build("literal", token.into(), Some("String")).unwrap().unwrap();
        assert!(node.is(NodeType::String));
    }

    #[test]
    fn custom_registration_replaces() {
        fn nothing(_: ParseResult, _: Option<NodeType>) -> Built {
            Ok(None)
        }
        let mut registry = BuilderRegistry::standard();
        registry.register("list", nothing);
        let token = Token::new(TokenKind::Number, "1", 1, 1, 0);
        assert_eq!(registry.build("list", token.into(), None), Ok(None));
        assert!(BuilderRegistry::new().get("list").is_none());
    }
}
