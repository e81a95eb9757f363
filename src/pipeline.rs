//! Ingestion pipeline - parallel parse, deterministic merge
//!
//! Each eligible file is an independent unit of work: read, hash, parse,
//! assemble a Document. Work is distributed over a fixed-size worker pool;
//! workers complete in arbitrary order, so results are buffered by their
//! enumeration index and merged into the knowledge graph in canonical
//! order. The graph is only ever touched by the coordinating thread.

use crate::config::RunConfig;
use crate::document::{Document, content_hash};
use crate::graph::KnowledgeGraph;
use crate::parser::ParserRegistry;
use crate::progress::ScanProgress;
use crate::walk::{ExclusionFilter, enumerate_files};
use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Per-run counters, created at run start and reported at run end.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunMetrics {
    /// Eligible files discovered under the root
    pub files_found: usize,
    /// Files that produced a Document
    pub files_parsed: usize,
    /// Files skipped on read failure
    pub files_skipped: usize,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Display for RunMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Processed {}/{} files ({} skipped)",
            self.files_parsed, self.files_found, self.files_skipped
        )
    }
}

/// Process a single file into a Document.
///
/// Read failures are logged and yield `None`; they never abort the run.
pub fn process_file(root: &Path, path: &Path, registry: &ParserRegistry) -> Option<Document> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Cannot read {}: {}", path.display(), e);
            return None;
        }
    };

    let content = String::from_utf8_lossy(&bytes);
    let relative_path = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();
    let format = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "none".to_string());
    let modified_time = std::fs::metadata(path)
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);

    let tokens = registry.parse_file(&relative_path, &content);

    Some(Document::assemble(
        path.to_string_lossy(),
        relative_path,
        format,
        bytes.len() as u64,
        content_hash(&bytes),
        modified_time,
        tokens,
    ))
}

/// Walk the configured root and build the knowledge graph.
///
/// Returns the graph together with the run's metrics context. Only a
/// nonexistent or unreadable root is fatal.
pub fn ingest_tree(
    config: &RunConfig,
    registry: &ParserRegistry,
) -> Result<(KnowledgeGraph, RunMetrics)> {
    let root = config
        .root
        .canonicalize()
        .map_err(|e| Error::Config(format!("root {} is not readable: {}", config.root.display(), e)))?;

    let filter = ExclusionFilter::new(&config.excludes);
    let files = enumerate_files(&root, registry, &filter, &config.extra_extensions)?;

    let mut metrics = RunMetrics::new();
    metrics.files_found = files.len();
    tracing::info!("found {} eligible files under {}", files.len(), root.display());

    let progress = ScanProgress::new(files.len());
    let workers = config.workers.max(1);

    let mut slots: Vec<Option<Document>> = Vec::new();
    slots.resize_with(files.len(), || None);

    let (job_tx, job_rx) = crossbeam::channel::bounded::<(usize, PathBuf)>(workers * 2);
    let (result_tx, result_rx) = crossbeam::channel::unbounded::<(usize, Option<Document>)>();

    crossbeam::scope(|s| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let root = &root;
            s.spawn(move |_| {
                for (idx, path) in job_rx.iter() {
                    let doc = process_file(root, &path, registry);
                    let _ = result_tx.send((idx, doc));
                }
            });
        }
        drop(job_rx);
        drop(result_tx);

        for (idx, path) in files.iter().enumerate() {
            let _ = job_tx.send((idx, path.clone()));
        }
        drop(job_tx);

        for (idx, doc) in result_rx.iter() {
            progress.tick(&files[idx].to_string_lossy());
            slots[idx] = doc;
        }
    })
    .map_err(|_| Error::Parse("ingestion worker panicked".to_string()))?;

    progress.finish();

    // Merge in enumeration order so identical trees produce identical graphs
    let mut graph = KnowledgeGraph::new();
    for doc in slots.into_iter().flatten() {
        metrics.files_parsed += 1;
        graph.add_document(doc);
    }
    metrics.files_skipped = metrics.files_found - metrics.files_parsed;

    Ok((graph, metrics))
}
