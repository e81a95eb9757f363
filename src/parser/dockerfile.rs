//! Container build file tokenizer
//!
//! Directive-specific extraction: the base image becomes a REFERENCE
//! token, ENV/ARG become ASSIGNMENT tokens keyed by variable name, and
//! LABEL keys become KEY tokens. Matched by filename, so extensionless
//! `Dockerfile`/`Containerfile` land here.

use crate::token::{Token, TokenKind};
use regex::Regex;
use super::framework::FormatParser;

pub struct DockerfileParser {
    from: Regex,
    env: Regex,
    arg: Regex,
    label: Regex,
}

impl DockerfileParser {
    pub fn new() -> Self {
        Self {
            from: Regex::new(r"(?mi)^FROM\s+(\S+)").expect("valid regex"),
            env: Regex::new(r"(?mi)^ENV\s+([A-Z_][A-Z0-9_]*)\s*=?\s*(.+)$").expect("valid regex"),
            arg: Regex::new(r"(?mi)^ARG\s+([A-Z_][A-Z0-9_]*)\s*=?\s*(.*)$").expect("valid regex"),
            label: Regex::new(r#"(?mi)^LABEL\s+([^\s=]+)="?([^"]*)"?"#).expect("valid regex"),
        }
    }
}

impl Default for DockerfileParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatParser for DockerfileParser {
    fn format_name(&self) -> &str {
        "dockerfile"
    }

    fn file_names(&self) -> &[&str] {
        &["dockerfile", "containerfile"]
    }

    fn parse(&self, file: &str, content: &str) -> Vec<Token> {
        let mut tokens = Vec::new();

        for m in self.from.captures_iter(content) {
            tokens.push(
                Token::new(TokenKind::Reference, &m[1], &m[0], file).with_context("base_image"),
            );
        }

        for m in self.env.captures_iter(content) {
            tokens.push(
                Token::new(TokenKind::Assignment, m[2].trim(), &m[0], file).with_context(&m[1]),
            );
        }

        for m in self.arg.captures_iter(content) {
            tokens.push(
                Token::new(TokenKind::Assignment, m[2].trim(), &m[0], file)
                    .with_context(format!("arg:{}", &m[1])),
            );
        }

        for m in self.label.captures_iter(content) {
            tokens.push(Token::new(TokenKind::Key, &m[1], &m[0], file).with_context("label"));
        }

        tokens
    }
}
