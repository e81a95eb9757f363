//! Full JSON dump of the knowledge graph
//!
//! One artifact with run statistics, per-document summaries (token lists
//! elided), the complete token index, and the relationship map.

use crate::Result;
use crate::document::DocumentSummary;
use crate::graph::{GraphStatistics, KnowledgeGraph};
use crate::token::Token;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct FullDump<'a> {
    generated: String,
    statistics: GraphStatistics,
    documents: BTreeMap<&'a str, DocumentSummary>,
    token_index: &'a BTreeMap<String, Vec<Token>>,
    relationships: &'a BTreeMap<String, BTreeSet<String>>,
}

/// Write `knowledge_graph.json` into the output directory.
pub fn write_dump(graph: &KnowledgeGraph, output_dir: &Path) -> Result<PathBuf> {
    let documents: BTreeMap<&str, DocumentSummary> = graph
        .documents()
        .iter()
        .map(|(path, doc)| (path.as_str(), doc.summary()))
        .collect();

    let dump = FullDump {
        generated: chrono::Utc::now().to_rfc3339(),
        statistics: graph.statistics(),
        documents,
        token_index: graph.token_index(),
        relationships: graph.relationships(),
    };

    let path = output_dir.join("knowledge_graph.json");
    let json = serde_json::to_string_pretty(&dump)?;
    std::fs::write(&path, json)?;
    Ok(path)
}
