//! Token types - the classified text fragments all parsers produce
//!
//! Every parser reduces its format to the same closed set of token
//! categories, so the knowledge graph and the output layer never see
//! format-specific logic.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Semantic category of an extracted token.
///
/// The string forms returned by [`TokenKind::as_str`] are part of the
/// persisted schema (the `token_type` column and the dump's token index)
/// and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Plain unquoted string content
    String,
    /// String enclosed in single or double quotes
    QuotedString,
    /// Key-value assignment (shell exports, ENV/ARG directives)
    Assignment,
    /// Fenced code block body
    CodeBlock,
    /// Inline code span
    InlineCode,
    /// Generic word from the fallback tokenizer
    Word,
    /// Absolute web URL
    Url,
    /// Filesystem-path-shaped substring
    Path,
    /// Variable reference (`$VAR` / `${VAR}`)
    Variable,
    /// Section header, level recorded in `context`
    Header,
    /// Bulleted list item
    ListItem,
    /// Mapping key in a structured format
    Key,
    /// Scalar value in a structured format
    Value,
    /// Comment text
    Comment,
    /// Module import
    Import,
    /// Cross-file reference (markdown link target, base image)
    Reference,
}

impl TokenKind {
    /// Get the string representation of the token kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::String => "string",
            TokenKind::QuotedString => "quoted_string",
            TokenKind::Assignment => "assignment",
            TokenKind::CodeBlock => "code_block",
            TokenKind::InlineCode => "inline_code",
            TokenKind::Word => "word",
            TokenKind::Url => "url",
            TokenKind::Path => "path",
            TokenKind::Variable => "variable",
            TokenKind::Header => "header",
            TokenKind::ListItem => "list_item",
            TokenKind::Key => "key",
            TokenKind::Value => "value",
            TokenKind::Comment => "comment",
            TokenKind::Import => "import",
            TokenKind::Reference => "reference",
        }
    }

    /// Get all token kinds
    pub fn all() -> &'static [TokenKind] {
        &[
            TokenKind::String,
            TokenKind::QuotedString,
            TokenKind::Assignment,
            TokenKind::CodeBlock,
            TokenKind::InlineCode,
            TokenKind::Word,
            TokenKind::Url,
            TokenKind::Path,
            TokenKind::Variable,
            TokenKind::Header,
            TokenKind::ListItem,
            TokenKind::Key,
            TokenKind::Value,
            TokenKind::Comment,
            TokenKind::Import,
            TokenKind::Reference,
        ]
    }

    /// Whether tokens of this kind can point at another file
    pub fn is_reference_like(&self) -> bool {
        matches!(self, TokenKind::Reference | TokenKind::Url)
    }
}

impl FromStr for TokenKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" | "str" => Ok(TokenKind::String),
            "quoted_string" | "quoted" => Ok(TokenKind::QuotedString),
            "assignment" | "assign" => Ok(TokenKind::Assignment),
            "code_block" | "code" => Ok(TokenKind::CodeBlock),
            "inline_code" => Ok(TokenKind::InlineCode),
            "word" => Ok(TokenKind::Word),
            "url" | "link" => Ok(TokenKind::Url),
            "path" | "file" => Ok(TokenKind::Path),
            "variable" | "var" => Ok(TokenKind::Variable),
            "header" | "heading" => Ok(TokenKind::Header),
            "list_item" | "item" => Ok(TokenKind::ListItem),
            "key" => Ok(TokenKind::Key),
            "value" | "val" => Ok(TokenKind::Value),
            "comment" => Ok(TokenKind::Comment),
            "import" => Ok(TokenKind::Import),
            "reference" | "ref" => Ok(TokenKind::Reference),
            _ => Err(Error::UnknownKind(format!("Unknown token kind: {}", s))),
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified fragment of a file's text.
///
/// Tokens are immutable once created and carry no identity beyond
/// equality of their fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Semantic category
    pub kind: TokenKind,
    /// Normalized/extracted content (header text without markers, link target)
    pub value: String,
    /// The original matched substring, kept for diagnostics
    pub raw: String,
    /// Relative path of the owning document
    pub source_file: String,
    /// 1-based line, absent for tree-parsed formats
    pub line: Option<u32>,
    /// 1-based column, absent for tree-parsed formats
    pub column: Option<u32>,
    /// Disambiguating context (header level, code language, dotted key path)
    pub context: Option<String>,
    /// Reserved for future fuzzy extraction
    pub confidence: f32,
}

impl Token {
    /// Create a new token with full confidence and no location
    pub fn new(
        kind: TokenKind,
        value: impl Into<String>,
        raw: impl Into<String>,
        source_file: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            raw: raw.into(),
            source_file: source_file.into(),
            line: None,
            column: None,
            context: None,
            confidence: 1.0,
        }
    }

    /// Set the 1-based line number
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the 1-based line and column
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Set the disambiguating context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_roundtrip() {
        for kind in TokenKind::all() {
            let s = kind.as_str();
            let parsed: TokenKind = s.parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_token_kind_aliases() {
        assert_eq!(TokenKind::from_str("ref").unwrap(), TokenKind::Reference);
        assert_eq!(TokenKind::from_str("var").unwrap(), TokenKind::Variable);
        assert_eq!(TokenKind::from_str("heading").unwrap(), TokenKind::Header);
        assert_eq!(TokenKind::from_str("code").unwrap(), TokenKind::CodeBlock);
    }

    #[test]
    fn test_token_creation() {
        let token = Token::new(TokenKind::Header, "Title", "# Title", "docs/readme.md")
            .with_context("level_1");

        assert_eq!(token.kind, TokenKind::Header);
        assert_eq!(token.value, "Title");
        assert_eq!(token.source_file, "docs/readme.md");
        assert_eq!(token.context.as_deref(), Some("level_1"));
        assert_eq!(token.line, None);
        assert_eq!(token.confidence, 1.0);
    }

    #[test]
    fn test_token_location() {
        let token = Token::new(TokenKind::Variable, "HOME", "$HOME", "run.sh").at(3, 12);
        assert_eq!(token.line, Some(3));
        assert_eq!(token.column, Some(12));
    }

    #[test]
    fn test_reference_like() {
        assert!(TokenKind::Reference.is_reference_like());
        assert!(TokenKind::Url.is_reference_like());
        assert!(!TokenKind::Header.is_reference_like());
    }
}
