//! Structured key-value tokenizers (YAML, JSON, TOML)
//!
//! Each parser loads the whole document into its format's value tree and
//! walks it recursively: mapping keys become KEY tokens annotated with the
//! parent dotted path, scalar strings become VALUE tokens annotated with
//! their full path, and sequences index children as `[i]` segments.
//!
//! Tree-parsed tokens carry no line/column. A parse failure yields zero
//! tokens and a warning, never an error.

use crate::token::{Token, TokenKind};
use super::framework::FormatParser;

fn join_path(path: &[String]) -> Option<String> {
    if path.is_empty() {
        None
    } else {
        Some(path.join("."))
    }
}

fn key_token(file: &str, key: &str, parent: &[String]) -> Token {
    let token = Token::new(TokenKind::Key, key, key, file);
    match join_path(parent) {
        Some(ctx) => token.with_context(ctx),
        None => token,
    }
}

fn value_token(file: &str, value: &str, path: &[String]) -> Token {
    let token = Token::new(TokenKind::Value, value, value, file);
    match join_path(path) {
        Some(ctx) => token.with_context(ctx),
        None => token,
    }
}

/// YAML tokenizer, tolerant of comments and anchors.
pub struct YamlParser;

impl YamlParser {
    pub fn new() -> Self {
        Self
    }

    fn walk(&self, file: &str, node: &serde_yaml::Value, path: &mut Vec<String>, tokens: &mut Vec<Token>) {
        match node {
            serde_yaml::Value::String(s) => {
                tokens.push(value_token(file, s, path));
            }
            serde_yaml::Value::Mapping(map) => {
                for (k, v) in map {
                    let Some(key) = yaml_key(k) else { continue };
                    tokens.push(key_token(file, &key, path));
                    path.push(key);
                    self.walk(file, v, path, tokens);
                    path.pop();
                }
            }
            serde_yaml::Value::Sequence(seq) => {
                for (idx, v) in seq.iter().enumerate() {
                    path.push(format!("[{}]", idx));
                    self.walk(file, v, path, tokens);
                    path.pop();
                }
            }
            serde_yaml::Value::Tagged(tagged) => {
                self.walk(file, &tagged.value, path, tokens);
            }
            _ => {}
        }
    }
}

impl Default for YamlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatParser for YamlParser {
    fn format_name(&self) -> &str {
        "yaml"
    }

    fn file_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn parse(&self, file: &str, content: &str) -> Vec<Token> {
        match serde_yaml::from_str::<serde_yaml::Value>(content) {
            Ok(root) => {
                let mut tokens = Vec::new();
                self.walk(file, &root, &mut Vec::new(), &mut tokens);
                tokens
            }
            Err(e) => {
                tracing::warn!("YAML parse error in {}: {}", file, e);
                Vec::new()
            }
        }
    }
}

/// Mapping keys are usually strings; scalar non-string keys are
/// stringified, complex keys skipped.
fn yaml_key(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Strict JSON tokenizer.
pub struct JsonParser;

impl JsonParser {
    pub fn new() -> Self {
        Self
    }

    fn walk(&self, file: &str, node: &serde_json::Value, path: &mut Vec<String>, tokens: &mut Vec<Token>) {
        match node {
            serde_json::Value::String(s) => {
                tokens.push(value_token(file, s, path));
            }
            serde_json::Value::Object(map) => {
                for (k, v) in map {
                    tokens.push(key_token(file, k, path));
                    path.push(k.clone());
                    self.walk(file, v, path, tokens);
                    path.pop();
                }
            }
            serde_json::Value::Array(seq) => {
                for (idx, v) in seq.iter().enumerate() {
                    path.push(format!("[{}]", idx));
                    self.walk(file, v, path, tokens);
                    path.pop();
                }
            }
            _ => {}
        }
    }
}

impl Default for JsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatParser for JsonParser {
    fn format_name(&self) -> &str {
        "json"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn parse(&self, file: &str, content: &str) -> Vec<Token> {
        match serde_json::from_str::<serde_json::Value>(content) {
            Ok(root) => {
                let mut tokens = Vec::new();
                self.walk(file, &root, &mut Vec::new(), &mut tokens);
                tokens
            }
            Err(e) => {
                tracing::warn!("JSON parse error in {}: {}", file, e);
                Vec::new()
            }
        }
    }
}

/// TOML tokenizer, same walk over `toml::Value`.
pub struct TomlParser;

impl TomlParser {
    pub fn new() -> Self {
        Self
    }

    fn walk(&self, file: &str, node: &toml::Value, path: &mut Vec<String>, tokens: &mut Vec<Token>) {
        match node {
            toml::Value::String(s) => {
                tokens.push(value_token(file, s, path));
            }
            toml::Value::Table(table) => {
                for (k, v) in table {
                    tokens.push(key_token(file, k, path));
                    path.push(k.clone());
                    self.walk(file, v, path, tokens);
                    path.pop();
                }
            }
            toml::Value::Array(seq) => {
                for (idx, v) in seq.iter().enumerate() {
                    path.push(format!("[{}]", idx));
                    self.walk(file, v, path, tokens);
                    path.pop();
                }
            }
            _ => {}
        }
    }
}

impl Default for TomlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatParser for TomlParser {
    fn format_name(&self) -> &str {
        "toml"
    }

    fn file_extensions(&self) -> &[&str] {
        &["toml"]
    }

    fn parse(&self, file: &str, content: &str) -> Vec<Token> {
        match content.parse::<toml::Value>() {
            Ok(root) => {
                let mut tokens = Vec::new();
                self.walk(file, &root, &mut Vec::new(), &mut tokens);
                tokens
            }
            Err(e) => {
                tracing::warn!("TOML parse error in {}: {}", file, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_nested_mapping_paths() {
        let tokens = YamlParser::new().parse("c.yaml", "a:\n  b: \"hi\"\n");

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::Key);
        assert_eq!(tokens[0].value, "a");
        assert_eq!(tokens[0].context, None);

        assert_eq!(tokens[1].kind, TokenKind::Key);
        assert_eq!(tokens[1].value, "b");
        assert_eq!(tokens[1].context.as_deref(), Some("a"));

        assert_eq!(tokens[2].kind, TokenKind::Value);
        assert_eq!(tokens[2].value, "hi");
        assert_eq!(tokens[2].context.as_deref(), Some("a.b"));
    }

    #[test]
    fn test_yaml_sequence_index_segments() {
        let tokens = YamlParser::new().parse("c.yaml", "items:\n  - one\n  - two\n");
        let values: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::Value).collect();
        assert_eq!(values[0].context.as_deref(), Some("items.[0]"));
        assert_eq!(values[1].context.as_deref(), Some("items.[1]"));
    }

    #[test]
    fn test_yaml_parse_failure_yields_no_tokens() {
        let tokens = YamlParser::new().parse("bad.yaml", "a: [unclosed\n  b: {");
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_yaml_tolerates_comments_and_anchors() {
        let content = "# comment\nbase: &anchor shared\ncopy: *anchor\n";
        let tokens = YamlParser::new().parse("c.yaml", content);
        let values: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Value)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(values, vec!["shared", "shared"]);
    }

    #[test]
    fn test_json_object_walk() {
        let tokens = JsonParser::new().parse("c.json", r#"{"svc": {"image": "nginx"}}"#);
        let value = tokens.iter().find(|t| t.kind == TokenKind::Value).unwrap();
        assert_eq!(value.value, "nginx");
        assert_eq!(value.context.as_deref(), Some("svc.image"));
        // Tree-parsed formats carry no positions
        assert!(tokens.iter().all(|t| t.line.is_none()));
    }

    #[test]
    fn test_json_non_string_scalars_are_not_tokenized() {
        let tokens = JsonParser::new().parse("c.json", r#"{"n": 3, "b": true, "s": "yes"}"#);
        let values: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::Value).collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].value, "yes");
    }

    #[test]
    fn test_toml_table_walk() {
        let tokens = TomlParser::new().parse("c.toml", "[package]\nname = \"demo\"\n");
        let value = tokens.iter().find(|t| t.kind == TokenKind::Value).unwrap();
        assert_eq!(value.value, "demo");
        assert_eq!(value.context.as_deref(), Some("package.name"));
    }
}
