//! Shell script tokenizer
//!
//! Line-oriented: quoted strings, upper-case variable assignments,
//! variable references, and comment lines, all with 1-based positions.

use crate::token::{Token, TokenKind};
use regex::Regex;
use super::framework::FormatParser;

pub struct ShellParser {
    quoted: Regex,
    assignment: Regex,
    variable: Regex,
    comment: Regex,
}

impl ShellParser {
    pub fn new() -> Self {
        Self {
            quoted: Regex::new(r#""([^"]*)"|'([^']*)'"#).expect("valid regex"),
            assignment: Regex::new(r#"^\s*([A-Z_][A-Z0-9_]*)=(?:"([^"]*)"|'([^']*)'|([^\s#]+))"#)
                .expect("valid regex"),
            variable: Regex::new(r"\$\{?([A-Za-z_][A-Za-z0-9_]*)\}?").expect("valid regex"),
            comment: Regex::new(r"^\s*#\s*(.+)$").expect("valid regex"),
        }
    }
}

impl Default for ShellParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatParser for ShellParser {
    fn format_name(&self) -> &str {
        "shell"
    }

    fn file_extensions(&self) -> &[&str] {
        &["sh", "bash", "zsh"]
    }

    fn parse(&self, file: &str, content: &str) -> Vec<Token> {
        let mut tokens = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let lineno = (idx + 1) as u32;

            for m in self.quoted.captures_iter(line) {
                let whole = m.get(0).expect("whole match");
                let value = m.get(1).or_else(|| m.get(2)).map(|g| g.as_str()).unwrap_or("");
                tokens.push(
                    Token::new(TokenKind::QuotedString, value, whole.as_str(), file)
                        .at(lineno, whole.start() as u32 + 1),
                );
            }

            if let Some(m) = self.assignment.captures(line) {
                let value = m
                    .get(2)
                    .or_else(|| m.get(3))
                    .or_else(|| m.get(4))
                    .map(|g| g.as_str())
                    .unwrap_or("");
                tokens.push(
                    Token::new(TokenKind::Assignment, value, &m[0], file)
                        .at_line(lineno)
                        .with_context(&m[1]),
                );
            }

            for m in self.variable.captures_iter(line) {
                let whole = m.get(0).expect("whole match");
                tokens.push(
                    Token::new(TokenKind::Variable, &m[1], whole.as_str(), file)
                        .at(lineno, whole.start() as u32 + 1),
                );
            }

            if let Some(m) = self.comment.captures(line) {
                tokens.push(Token::new(TokenKind::Comment, m[1].trim_end(), &m[0], file).at_line(lineno));
            }
        }

        tokens
    }
}
