//! Markdown tokenizer
//!
//! Extracts document structure (headers, list items), code (fenced blocks,
//! inline spans), and references (links, bare URLs) via literal scanning.

use crate::token::{Token, TokenKind};
use regex::Regex;
use super::framework::FormatParser;

pub struct MarkdownParser {
    header: Regex,
    code_block: Regex,
    inline_code: Regex,
    link: Regex,
    url: Regex,
    list_item: Regex,
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self {
            header: Regex::new(r"(?m)^(#{1,6})\s+(.+)$").expect("valid regex"),
            code_block: Regex::new(r"(?s)```(\w*)\n(.*?)```").expect("valid regex"),
            inline_code: Regex::new(r"`([^`]+)`").expect("valid regex"),
            link: Regex::new(r"\[([^\]]+)\]\(([^\)]+)\)").expect("valid regex"),
            url: Regex::new(r"https?://[^\s\)]+").expect("valid regex"),
            list_item: Regex::new(r"(?m)^[ \t]*[-*+]\s+(.+)$").expect("valid regex"),
        }
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatParser for MarkdownParser {
    fn format_name(&self) -> &str {
        "markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn parse(&self, file: &str, content: &str) -> Vec<Token> {
        let mut tokens = Vec::new();

        // Headers carry the document structure; nesting level goes in context
        for m in self.header.captures_iter(content) {
            let level = m[1].len();
            let text = m[2].trim();
            tokens.push(
                Token::new(TokenKind::Header, text, &m[0], file)
                    .with_context(format!("level_{}", level)),
            );
        }

        for m in self.code_block.captures_iter(content) {
            let lang = if m[1].is_empty() { "text" } else { &m[1] };
            let code = m[2].trim();
            tokens.push(Token::new(TokenKind::CodeBlock, code, &m[0], file).with_context(lang));
        }

        for m in self.inline_code.captures_iter(content) {
            tokens.push(Token::new(TokenKind::InlineCode, &m[1], &m[0], file));
        }

        // Link target becomes the value, displayed text the context
        for m in self.link.captures_iter(content) {
            tokens.push(Token::new(TokenKind::Reference, &m[2], &m[0], file).with_context(&m[1]));
        }

        for m in self.url.find_iter(content) {
            tokens.push(Token::new(TokenKind::Url, m.as_str(), m.as_str(), file));
        }

        for m in self.list_item.captures_iter(content) {
            tokens.push(Token::new(TokenKind::ListItem, m[1].trim(), &m[0], file));
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<Token> {
        MarkdownParser::new().parse("doc.md", content)
    }

    #[test]
    fn test_header_code_and_link() {
        let content = "# Title\n\n```python\nprint('hi')\n```\n\nSee [x](other.md)\n";
        let tokens = parse(content);

        let headers: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::Header).collect();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].value, "Title");
        assert_eq!(headers[0].context.as_deref(), Some("level_1"));

        let blocks: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::CodeBlock).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].context.as_deref(), Some("python"));

        let refs: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::Reference).collect();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].value, "other.md");
        assert_eq!(refs[0].context.as_deref(), Some("x"));
    }

    #[test]
    fn test_header_levels() {
        let tokens = parse("## Two\n### Three\n");
        assert_eq!(tokens[0].context.as_deref(), Some("level_2"));
        assert_eq!(tokens[1].context.as_deref(), Some("level_3"));
    }

    #[test]
    fn test_untagged_code_block_defaults_to_text() {
        let tokens = parse("```\nplain\n```\n");
        let block = tokens.iter().find(|t| t.kind == TokenKind::CodeBlock).unwrap();
        assert_eq!(block.context.as_deref(), Some("text"));
        assert_eq!(block.value, "plain");
    }

    #[test]
    fn test_bare_url_and_list_items() {
        let tokens = parse("- first\n* second\nVisit https://example.com/docs now\n");
        let items: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::ListItem).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].value, "first");

        let urls: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::Url).collect();
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].value, "https://example.com/docs");
    }

    #[test]
    fn test_reparse_is_stable() {
        let content = "# A\n`x`\n[t](b.md)\n";
        assert_eq!(parse(content), parse(content));
    }
}
