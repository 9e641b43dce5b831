// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions shared with the tokenizer.

use crate::error::Result;
use crate::node::NodeType;
use crate::position::Position;
use crate::value::Value;

/// A token produced by the tokenizer.
///
/// Discarded token types never reach the tree builders, and `value` has
/// already been refined (numbers parsed, string quotes stripped, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Value,
    /// The raw source text, used to compute where the token ends.
    pub text: String,
    pub offset: usize,
    pub line: usize,
    pub col: usize,
    /// Line breaks inside `text`, as counted by the tokenizer. The end
    /// line is `line + line_breaks`.
    pub line_breaks: usize,
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Number,
    String,
    Path,
    True,
    False,
    Undef,
    Comment,

    // Identifier
    Identifier,

    // Keywords: include, use, module, function, if, else, for
    Keyword,

    // Operators and delimiters
    Operator,
    Punctuation,
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Number => "a number",
            TokenKind::String => "a string",
            TokenKind::Path => "a path",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Undef => "'undef'",
            TokenKind::Comment => "a comment",
            TokenKind::Identifier => "a name",
            TokenKind::Keyword => "a keyword",
            TokenKind::Operator => "an operator",
            TokenKind::Punctuation => "punctuation",
        }
    }

    /// The literal variant a token of this kind becomes by default.
    pub fn literal_type(&self) -> Option<NodeType> {
        match self {
            TokenKind::Number => Some(NodeType::Number),
            TokenKind::String => Some(NodeType::String),
            TokenKind::Path => Some(NodeType::Path),
            TokenKind::True | TokenKind::False => Some(NodeType::Boolean),
            TokenKind::Undef => Some(NodeType::Undefined),
            TokenKind::Comment => Some(NodeType::Comment),
            TokenKind::Identifier => Some(NodeType::Identifier),
            TokenKind::Keyword | TokenKind::Operator | TokenKind::Punctuation => None,
        }
    }
}

impl Token {
    /// A token whose value is its own text.
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, col: usize, offset: usize) -> Self {
        let text = text.into();
        Token {
            kind,
            value: Value::String(text.clone()),
            line_breaks: text.matches('\n').count(),
            text,
            offset,
            line,
            col,
        }
    }

    /// Replace the refined value.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Where the token's text begins.
    pub fn start(&self) -> Result<Position> {
        Position::new(self.line, self.col, self.offset)
    }

    /// Where the token's text ends, accounting for embedded line breaks.
    pub fn end(&self) -> Result<Position> {
        let end = self.start()?.advance(&self.text);
        Position::new(self.line + self.line_breaks, end.column(), end.offset())
    }

    /// The operator or keyword this token spells.
    pub fn symbol(&self) -> &str {
        self.value.as_str().unwrap_or(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_token_span() {
        let tok = Token::new(TokenKind::String, "foo", 2, 7, 12);
        assert_eq!(tok.start().unwrap(), Position::new(2, 7, 12).unwrap());
        assert_eq!(tok.end().unwrap(), Position::new(2, 10, 15).unwrap());
        assert_eq!(tok.line_breaks, 0);
    }

    #[test]
    fn multi_line_token_span() {
        let tok = Token::new(TokenKind::Comment, "\nfoo\nbar", 2, 7, 12);
        assert_eq!(tok.line_breaks, 2);
        assert_eq!(tok.end().unwrap(), Position::new(4, 4, 20).unwrap());
    }

    #[test]
    fn end_line_follows_reported_line_breaks() {
        let mut tok = Token::new(TokenKind::Comment, "/*\n*/", 3, 1, 40);
        assert_eq!(tok.line_breaks, 1);
        assert_eq!(tok.end().unwrap(), Position::new(4, 3, 45).unwrap());
        tok.line_breaks = 2;
        assert_eq!(tok.end().unwrap().line(), 5);
    }

    #[test]
    fn invalid_token_coordinates_fail() {
        let tok = Token::new(TokenKind::Number, "1", 0, 1, 0);
        assert!(tok.start().is_err());
        assert!(tok.end().is_err());
    }

    #[test]
    fn literal_kinds_resolve_to_variants() {
        assert_eq!(TokenKind::True.literal_type(), Some(NodeType::Boolean));
        assert_eq!(TokenKind::Path.literal_type(), Some(NodeType::Path));
        assert_eq!(TokenKind::Punctuation.literal_type(), None);
    }
}
