//! Core parser framework
//!
//! Defines the trait all format tokenizers implement and the registry
//! that selects exactly one parser per file.

use crate::token::Token;
use std::path::Path;

/// Trait for format-specific tokenizers.
///
/// Implementations must never panic on malformed content: a failed
/// structured parse degrades to an empty token sequence with a logged
/// warning, and the run continues.
pub trait FormatParser: Send + Sync {
    /// Format name (for display and capability listings)
    fn format_name(&self) -> &str;

    /// File extensions this parser handles (lowercase, without the dot)
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Exact filenames this parser handles (lowercase), matched before
    /// extensions so conventionally-named files without an extension
    /// (e.g. a containerfile) land here
    fn file_names(&self) -> &[&str] {
        &[]
    }

    /// Tokenize one file's raw text. `file` is the document's relative
    /// path and is stamped on every produced token.
    fn parse(&self, file: &str, content: &str) -> Vec<Token>;
}

/// Registry of format parsers with a generic fallback.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn FormatParser>>,
    fallback: Box<dyn FormatParser>,
}

impl ParserRegistry {
    /// Create a registry with the given fallback tokenizer
    pub fn new(fallback: impl FormatParser + 'static) -> Self {
        Self {
            parsers: Vec::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Register a parser
    pub fn register(&mut self, parser: impl FormatParser + 'static) {
        self.parsers.push(Box::new(parser));
    }

    /// All registered parsers (fallback excluded)
    pub fn parsers(&self) -> &[Box<dyn FormatParser>] {
        &self.parsers
    }

    /// Select the parser for a file: exact filename match first, then
    /// extension match, then the generic fallback.
    pub fn find_parser(&self, path: &Path) -> &dyn FormatParser {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if let Some(p) = self
            .parsers
            .iter()
            .find(|p| p.file_names().contains(&name.as_str()))
        {
            return p.as_ref();
        }

        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if let Some(p) = self
            .parsers
            .iter()
            .find(|p| p.file_extensions().contains(&ext.as_str()))
        {
            return p.as_ref();
        }

        self.fallback.as_ref()
    }

    /// Whether some registered parser (not the fallback) claims this file
    pub fn handles(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        self.parsers.iter().any(|p| {
            p.file_names().contains(&name.as_str()) || p.file_extensions().contains(&ext.as_str())
        })
    }

    /// Tokenize one file with the selected parser
    pub fn parse_file(&self, relative_path: &str, content: &str) -> Vec<Token> {
        let parser = self.find_parser(Path::new(relative_path));
        parser.parse(relative_path, content)
    }
}

/// Create a registry with all built-in format parsers
pub fn default_registry() -> ParserRegistry {
    let mut registry = ParserRegistry::new(super::text::TextParser::new());
    registry.register(super::markdown::MarkdownParser::new());
    registry.register(super::structured::YamlParser::new());
    registry.register(super::structured::JsonParser::new());
    registry.register(super::structured::TomlParser::new());
    registry.register(super::hcl::HclParser::new());
    registry.register(super::shell::ShellParser::new());
    registry.register(super::dockerfile::DockerfileParser::new());
    // Plain text routes through the fallback tokenizer, but registering
    // the extensions keeps .txt/.env in the ingestion allow-list.
    registry.register(super::text::TextParser::new());
    registry
}
