//! # Docgraph - Documentation Tree Knowledge Graph
//!
//! Builds a queryable knowledge model from a heterogeneous tree of text
//! artifacts (markdown, YAML/JSON/TOML, HCL, shell scripts, Dockerfiles).
//!
//! Docgraph provides:
//! - Format-specific tokenizers with a generic fallback
//! - A document/token data model with per-file content hashing
//! - Parallel ingestion with a deterministic merge order
//! - An in-memory knowledge graph (token index + reference map)
//! - Persistence to JSON, SQLite, CSV, GraphML, and a markdown summary

pub mod token;
pub mod document;
pub mod parser;
pub mod walk;
pub mod progress;
pub mod pipeline;
pub mod graph;
#[cfg(feature = "graph")]
pub mod refgraph;
pub mod config;
pub mod output;

// Re-exports for convenient access
pub use token::{Token, TokenKind};
pub use document::Document;
pub use graph::KnowledgeGraph;
pub use parser::{FormatParser, ParserRegistry, default_registry};
pub use pipeline::{RunMetrics, ingest_tree};

/// Result type alias for Docgraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Docgraph operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "graph")]
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown kind: {0}")]
    UnknownKind(String),
}
