//! Knowledge Graph - in-memory aggregate over all documents in one run
//!
//! Three indices are maintained together: the document map, the token
//! value index, and the file relationship map. When the graph engine is
//! compiled in, an explicit directed reference graph is kept alongside
//! them for traversal queries; without it, relationship queries fall back
//! to direct outgoing lookups.

use crate::document::Document;
use crate::token::Token;
#[cfg(feature = "graph")]
use crate::refgraph::ReferenceGraph;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default)]
pub struct KnowledgeGraph {
    /// Documents keyed by relative path, unique within a run
    documents: BTreeMap<String, Document>,
    /// Token value -> occurrences across all documents, in merge order
    token_index: BTreeMap<String, Vec<Token>>,
    /// Source relative path -> link targets (targets may not exist as
    /// documents; those are the broken references surfaced downstream)
    relationships: BTreeMap<String, BTreeSet<String>>,
    #[cfg(feature = "graph")]
    refgraph: ReferenceGraph,
}

impl KnowledgeGraph {
    /// Create a new empty knowledge graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one document into all indices.
    ///
    /// Last write wins for the document map; token and relationship
    /// entries are not retracted on replacement, so callers are expected
    /// to add each relative path once per run.
    pub fn add_document(&mut self, doc: Document) {
        for token in &doc.tokens {
            if token.value.is_empty() {
                continue;
            }
            self.token_index
                .entry(token.value.clone())
                .or_default()
                .push(token.clone());
        }

        for link in &doc.outgoing_links {
            self.relationships
                .entry(doc.relative_path.clone())
                .or_default()
                .insert(link.clone());
            #[cfg(feature = "graph")]
            self.refgraph.add_reference(&doc.relative_path, link);
        }

        self.documents.insert(doc.relative_path.clone(), doc);
    }

    /// Documents keyed by relative path
    pub fn documents(&self) -> &BTreeMap<String, Document> {
        &self.documents
    }

    /// Token value index
    pub fn token_index(&self) -> &BTreeMap<String, Vec<Token>> {
        &self.token_index
    }

    /// Relationship map (source -> targets)
    pub fn relationships(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.relationships
    }

    /// The explicit directed reference graph
    #[cfg(feature = "graph")]
    pub fn reference_graph(&self) -> &ReferenceGraph {
        &self.refgraph
    }

    /// Documents connected to `path` by directed paths of up to `depth`
    /// hops, following edges in both directions.
    ///
    /// Without the graph engine this degrades to the document's direct
    /// outgoing targets only; callers must not assume the richer
    /// traversal silently applies.
    #[cfg(feature = "graph")]
    pub fn related(&self, path: &str, depth: usize) -> BTreeSet<String> {
        self.refgraph.related(path, depth)
    }

    #[cfg(not(feature = "graph"))]
    pub fn related(&self, path: &str, _depth: usize) -> BTreeSet<String> {
        self.relationships.get(path).cloned().unwrap_or_default()
    }

    /// Distinct indexed token values whose edit similarity to `value` is
    /// at or above `threshold`, excluding an exact match.
    ///
    /// Pairwise over all distinct values; intended for exploratory use,
    /// not bulk analysis.
    pub fn find_similar(&self, value: &str, threshold: f64) -> Vec<String> {
        self.token_index
            .keys()
            .filter(|candidate| {
                candidate.as_str() != value && similarity_ratio(value, candidate) >= threshold
            })
            .cloned()
            .collect()
    }

    /// Compute aggregate statistics over the graph
    pub fn statistics(&self) -> GraphStatistics {
        let total_tokens = self.documents.values().map(|d| d.tokens.len()).sum();

        let mut token_kinds: BTreeMap<String, usize> = BTreeMap::new();
        let mut file_formats: BTreeMap<String, usize> = BTreeMap::new();
        for doc in self.documents.values() {
            *file_formats.entry(doc.format.clone()).or_default() += 1;
            for token in &doc.tokens {
                *token_kinds.entry(token.kind.as_str().to_string()).or_default() += 1;
            }
        }

        #[cfg(feature = "graph")]
        let (graph_nodes, graph_edges) = (
            Some(self.refgraph.node_count()),
            Some(self.refgraph.edge_count()),
        );
        #[cfg(not(feature = "graph"))]
        let (graph_nodes, graph_edges) = (None, None);

        GraphStatistics {
            total_documents: self.documents.len(),
            total_tokens,
            unique_tokens: self.token_index.len(),
            total_relationships: self.relationships.values().map(|t| t.len()).sum(),
            token_kinds,
            file_formats,
            graph_nodes,
            graph_edges,
        }
    }
}

/// Normalized edit similarity between two strings, case-insensitive.
///
/// 1.0 for equal strings, 0.0 for fully dissimilar; defined as
/// `1 - levenshtein(a, b) / max(len)`.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    let distance = prev[b.len()];

    1.0 - distance as f64 / a.len().max(b.len()) as f64
}

/// Aggregate statistics over one run's knowledge graph
#[derive(Debug, Clone, Serialize)]
pub struct GraphStatistics {
    pub total_documents: usize,
    pub total_tokens: usize,
    pub unique_tokens: usize,
    pub total_relationships: usize,
    pub token_kinds: BTreeMap<String, usize>,
    pub file_formats: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_nodes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_edges: Option<usize>,
}

impl std::fmt::Display for GraphStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Knowledge Graph Statistics:")?;
        writeln!(f, "  Documents: {}", self.total_documents)?;
        writeln!(
            f,
            "  Tokens: {} ({} unique)",
            self.total_tokens, self.unique_tokens
        )?;
        write!(f, "  Relationships: {}", self.total_relationships)?;
        if let (Some(nodes), Some(edges)) = (self.graph_nodes, self.graph_edges) {
            write!(f, "\n  Graph: {} nodes, {} edges", nodes, edges)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::content_hash;
    use crate::token::TokenKind;

    fn doc_with_tokens(path: &str, tokens: Vec<Token>) -> Document {
        Document::assemble(
            format!("/tree/{}", path),
            path,
            "md",
            10,
            content_hash(path.as_bytes()),
            0.0,
            tokens,
        )
    }

    fn linking_doc(path: &str, target: &str) -> Document {
        doc_with_tokens(
            path,
            vec![Token::new(TokenKind::Reference, target, target, path)],
        )
    }

    #[test]
    fn test_relationship_from_link() {
        let mut graph = KnowledgeGraph::new();
        graph.add_document(linking_doc("a.md", "b.md"));
        graph.add_document(doc_with_tokens("b.md", vec![]));

        let targets = graph.relationships().get("a.md").unwrap();
        assert_eq!(targets.iter().collect::<Vec<_>>(), vec!["b.md"]);
        assert!(!graph.relationships().contains_key("b.md"));
    }

    #[test]
    fn test_broken_reference_is_kept_as_target_only() {
        let mut graph = KnowledgeGraph::new();
        graph.add_document(linking_doc("a.md", "missing.md"));

        assert!(graph.relationships()["a.md"].contains("missing.md"));
        assert!(!graph.documents().contains_key("missing.md"));
    }

    #[test]
    fn test_last_write_wins_per_path() {
        let mut graph = KnowledgeGraph::new();
        graph.add_document(doc_with_tokens(
            "a.md",
            vec![Token::new(TokenKind::Word, "first", "first", "a.md")],
        ));
        graph.add_document(doc_with_tokens(
            "a.md",
            vec![Token::new(TokenKind::Word, "second", "second", "a.md")],
        ));

        assert_eq!(graph.documents().len(), 1);
        assert_eq!(graph.documents()["a.md"].tokens[0].value, "second");
    }

    #[test]
    fn test_empty_token_values_are_not_indexed() {
        let mut graph = KnowledgeGraph::new();
        graph.add_document(doc_with_tokens(
            "a.md",
            vec![
                Token::new(TokenKind::Word, "", "``", "a.md"),
                Token::new(TokenKind::Word, "real", "real", "a.md"),
            ],
        ));

        assert!(!graph.token_index().contains_key(""));
        assert!(graph.token_index().contains_key("real"));
    }

    #[test]
    fn test_related_includes_direct_targets() {
        let mut graph = KnowledgeGraph::new();
        graph.add_document(linking_doc("a.md", "b.md"));
        graph.add_document(doc_with_tokens("b.md", vec![]));

        let related = graph.related("a.md", 1);
        assert!(related.contains("b.md"));
    }

    #[cfg(feature = "graph")]
    #[test]
    fn test_related_traverses_incoming_edges() {
        let mut graph = KnowledgeGraph::new();
        graph.add_document(linking_doc("a.md", "b.md"));
        graph.add_document(doc_with_tokens("b.md", vec![]));

        // With the engine, b sees a through the incoming edge
        let related = graph.related("b.md", 1);
        assert!(related.contains("a.md"));
    }

    #[test]
    fn test_find_similar() {
        let mut graph = KnowledgeGraph::new();
        graph.add_document(doc_with_tokens(
            "a.md",
            vec![
                Token::new(TokenKind::Word, "deployment", "deployment", "a.md"),
                Token::new(TokenKind::Word, "deployments", "deployments", "a.md"),
                Token::new(TokenKind::Word, "unrelated", "unrelated", "a.md"),
            ],
        ));

        let similar = graph.find_similar("deployment", 0.8);
        assert_eq!(similar, vec!["deployments"]);
    }

    #[test]
    fn test_similarity_ratio_bounds() {
        assert_eq!(similarity_ratio("same", "same"), 1.0);
        assert_eq!(similarity_ratio("SAME", "same"), 1.0);
        assert_eq!(similarity_ratio("", ""), 1.0);
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
        let partial = similarity_ratio("kitten", "sitting");
        assert!(partial > 0.5 && partial < 1.0);
    }

    #[test]
    fn test_statistics() {
        let mut graph = KnowledgeGraph::new();
        graph.add_document(linking_doc("a.md", "b.md"));
        graph.add_document(doc_with_tokens(
            "b.md",
            vec![Token::new(TokenKind::Word, "word", "word", "b.md")],
        ));

        let stats = graph.statistics();
        assert_eq!(stats.total_documents, 2);
        assert_eq!(stats.total_tokens, 2);
        assert_eq!(stats.total_relationships, 1);
        assert_eq!(stats.token_kinds["reference"], 1);
        assert_eq!(stats.file_formats["md"], 2);
    }
}
