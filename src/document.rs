//! Document model - the parsed representation of one input file
//!
//! A `Document` is assembled once per ingestion pass from raw file content
//! and never mutated afterwards. The content hash is kept for a future
//! incremental mode.

use crate::token::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Compute the content hash of a file's raw bytes.
///
/// Pure function of the input: identical bytes always yield the identical
/// hex digest, across runs and processes.
pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_string()
}

/// One processed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Absolute path on disk
    pub absolute_path: String,
    /// Path relative to the scan root - the unique key within a run
    pub relative_path: String,
    /// Normalized extension without the dot, or `none`
    pub format: String,
    /// Size of the raw file content in bytes
    pub byte_size: u64,
    /// Hex digest of the raw bytes
    pub content_hash: String,
    /// Modification time as unix seconds
    pub modified_time: f64,
    /// Tokens in the order the parser's extraction rules visited matches
    pub tokens: Vec<Token>,
    /// Reference-like token values that look like same-tree targets
    pub outgoing_links: BTreeSet<String>,
    /// Header token values in document order
    pub headers: Vec<String>,
}

impl Document {
    /// Assemble a document from parsed tokens and file metadata.
    ///
    /// Links and headers are projected from the token sequence here, so
    /// they are consistent with `tokens` by construction.
    pub fn assemble(
        absolute_path: impl Into<String>,
        relative_path: impl Into<String>,
        format: impl Into<String>,
        byte_size: u64,
        content_hash: String,
        modified_time: f64,
        tokens: Vec<Token>,
    ) -> Self {
        let outgoing_links = extract_links(&tokens);
        let headers = extract_headers(&tokens);
        Self {
            absolute_path: absolute_path.into(),
            relative_path: relative_path.into(),
            format: format.into(),
            byte_size,
            content_hash,
            modified_time,
            tokens,
            outgoing_links,
            headers,
        }
    }

    /// Number of tokens in this document
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Summary view for the full dump (token list elided)
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            path: self.absolute_path.clone(),
            relative_path: self.relative_path.clone(),
            format: self.format.clone(),
            byte_size: self.byte_size,
            content_hash: self.content_hash.clone(),
            modified_time: self.modified_time,
            token_count: self.tokens.len(),
            links: self.outgoing_links.iter().cloned().collect(),
            headers: self.headers.clone(),
        }
    }
}

/// Per-document summary embedded in the full dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub path: String,
    pub relative_path: String,
    pub format: String,
    pub byte_size: u64,
    pub content_hash: String,
    pub modified_time: f64,
    pub token_count: usize,
    pub links: Vec<String>,
    pub headers: Vec<String>,
}

/// Collect same-tree reference candidates from reference-like tokens.
///
/// Anything not starting with a web scheme is treated as a candidate;
/// absolute web URLs point outside the tree and are dropped.
fn extract_links(tokens: &[Token]) -> BTreeSet<String> {
    let mut links = BTreeSet::new();
    for token in tokens {
        if token.kind.is_reference_like() {
            let link = token.value.trim();
            if !link.is_empty() && !link.starts_with("http://") && !link.starts_with("https://") {
                links.insert(link.to_string());
            }
        }
    }
    links
}

/// Header token values, preserving document order.
fn extract_headers(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Header)
        .map(|t| t.value.clone())
        .collect()
}
