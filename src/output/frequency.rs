//! Token frequency table
//!
//! One CSV row per distinct token value meeting the minimum occurrence
//! threshold, sorted by descending frequency (ties broken by value so the
//! file is reproducible).

use crate::Result;
use crate::graph::KnowledgeGraph;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Write `token_frequency.csv` into the output directory.
pub fn write_frequency(
    graph: &KnowledgeGraph,
    output_dir: &Path,
    min_frequency: usize,
) -> Result<PathBuf> {
    let path = output_dir.join("token_frequency.csv");
    let mut writer = csv::Writer::from_path(&path)?;

    writer.write_record([
        "value",
        "count",
        "distinct_files",
        "token_types",
        "example_file",
        "example_line",
    ])?;

    let mut rows: Vec<_> = graph.token_index().iter().collect();
    rows.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));

    for (value, tokens) in rows {
        if tokens.len() < min_frequency {
            continue;
        }

        let files: BTreeSet<&str> = tokens.iter().map(|t| t.source_file.as_str()).collect();
        let kinds: BTreeSet<&str> = tokens.iter().map(|t| t.kind.as_str()).collect();
        let example = &tokens[0];

        let record = [
            value.clone(),
            tokens.len().to_string(),
            files.len().to_string(),
            kinds.into_iter().collect::<Vec<_>>().join("|"),
            example.source_file.clone(),
            example.line.map(|l| l.to_string()).unwrap_or_default(),
        ];
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(path)
}
