//! Directed reference graph backed by petgraph
//!
//! Keeps an explicit edge set alongside the adjacency maps so traversal
//! queries (related documents across both edge directions) and density
//! are available. Node identity is the document relative path; targets
//! that never resolve to a document still get nodes, which is what makes
//! broken references visible in the export.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Relation label carried by every edge
pub const RELATION: &str = "references";

#[derive(Debug, Default)]
pub struct ReferenceGraph {
    graph: DiGraph<String, &'static str>,
    indices: HashMap<String, NodeIndex>,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.indices.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.indices.insert(id.to_string(), idx);
        idx
    }

    /// Add a `source references target` edge, creating nodes as needed.
    /// Duplicate edges are collapsed.
    pub fn add_reference(&mut self, source: &str, target: &str) {
        let from = self.intern(source);
        let to = self.intern(target);
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, RELATION);
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Edge density of the directed graph, 0.0 for graphs with fewer
    /// than two nodes
    pub fn density(&self) -> f64 {
        let n = self.graph.node_count();
        if n < 2 {
            return 0.0;
        }
        self.graph.edge_count() as f64 / (n * (n - 1)) as f64
    }

    /// Nodes connected to `path` within `depth` hops, following edges in
    /// both directions. The start node itself is excluded; an unknown
    /// path yields the empty set.
    pub fn related(&self, path: &str, depth: usize) -> BTreeSet<String> {
        let mut related = BTreeSet::new();
        let Some(&start) = self.indices.get(path) else {
            return related;
        };

        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();
        visited.insert(start);
        queue.push_back((start, 0));

        while let Some((node, hops)) = queue.pop_front() {
            if hops >= depth {
                continue;
            }
            for direction in [Direction::Outgoing, Direction::Incoming] {
                for neighbor in self.graph.neighbors_directed(node, direction) {
                    if visited.insert(neighbor) {
                        related.insert(self.graph[neighbor].clone());
                        queue.push_back((neighbor, hops + 1));
                    }
                }
            }
        }

        related
    }

    /// All node identifiers
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|w| w.as_str())
    }

    /// All edges as (source, target) pairs
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].as_str(),
                self.graph[e.target()].as_str(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> ReferenceGraph {
        // a -> b -> c
        let mut graph = ReferenceGraph::new();
        graph.add_reference("a.md", "b.md");
        graph.add_reference("b.md", "c.md");
        graph
    }

    #[test]
    fn test_counts_and_dedup() {
        let mut graph = chain();
        graph.add_reference("a.md", "b.md");

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_related_honors_depth() {
        let graph = chain();

        let one = graph.related("a.md", 1);
        assert_eq!(one.iter().collect::<Vec<_>>(), vec!["b.md"]);

        let two = graph.related("a.md", 2);
        assert!(two.contains("b.md") && two.contains("c.md"));
    }

    #[test]
    fn test_related_follows_both_directions() {
        let graph = chain();

        let around_b = graph.related("b.md", 1);
        assert!(around_b.contains("a.md"));
        assert!(around_b.contains("c.md"));
    }

    #[test]
    fn test_unknown_node_yields_empty_set() {
        let graph = chain();
        assert!(graph.related("missing.md", 3).is_empty());
    }

    #[test]
    fn test_density() {
        let graph = chain();
        // 2 edges over 3*2 possible
        assert!((graph.density() - 2.0 / 6.0).abs() < 1e-9);
        assert_eq!(ReferenceGraph::new().density(), 0.0);
    }
}
