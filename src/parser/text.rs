//! Generic fallback tokenizer
//!
//! Three passes over the content: URLs first, then filesystem-path-shaped
//! substrings, then generic words. A word is suppressed only when its
//! match span lies inside an already-captured URL/path span, so the same
//! text fragment is never classified twice while identical words at other
//! positions still produce tokens.

use crate::token::{Token, TokenKind};
use regex::Regex;
use super::framework::FormatParser;

pub struct TextParser {
    url: Regex,
    path: Regex,
    word: Regex,
}

impl TextParser {
    pub fn new() -> Self {
        Self {
            url: Regex::new(r"https?://[^\s]+").expect("valid regex"),
            path: Regex::new(r"(?:/[A-Za-z0-9_.-]+)+/?").expect("valid regex"),
            word: Regex::new(r"\b[A-Za-z0-9_\-./:]{3,}\b").expect("valid regex"),
        }
    }
}

impl Default for TextParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_covered(spans: &[(usize, usize)], start: usize, end: usize) -> bool {
    spans.iter().any(|&(s, e)| start >= s && end <= e)
}

impl FormatParser for TextParser {
    fn format_name(&self) -> &str {
        "text"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt", "env"]
    }

    fn parse(&self, file: &str, content: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut covered: Vec<(usize, usize)> = Vec::new();

        for m in self.url.find_iter(content) {
            covered.push((m.start(), m.end()));
            tokens.push(Token::new(TokenKind::Url, m.as_str(), m.as_str(), file));
        }

        for m in self.path.find_iter(content) {
            if is_covered(&covered, m.start(), m.end()) {
                continue;
            }
            covered.push((m.start(), m.end()));
            tokens.push(Token::new(TokenKind::Path, m.as_str(), m.as_str(), file));
        }

        let mut offset = 0usize;
        for (idx, line) in content.split('\n').enumerate() {
            let lineno = (idx + 1) as u32;
            for m in self.word.find_iter(line) {
                let start = offset + m.start();
                let end = offset + m.end();
                if !is_covered(&covered, start, end) {
                    tokens.push(
                        Token::new(TokenKind::Word, m.as_str(), m.as_str(), file)
                            .at(lineno, m.start() as u32 + 1),
                    );
                }
            }
            offset += line.len() + 1;
        }

        tokens
    }
}
