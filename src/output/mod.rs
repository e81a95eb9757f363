//! Output Layer - persistence fan-out
//!
//! Five independent writers, all consuming only the knowledge graph's
//! public data. A failing writer is skipped with a notice; the others
//! still run.

pub mod schema;
pub mod sqlite;
pub mod json;
pub mod frequency;
pub mod graphml;
pub mod summary;

pub use sqlite::RelationalStore;

use crate::config::RunConfig;
use crate::graph::KnowledgeGraph;
use crate::{Error, Result};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Selectable output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputFormat {
    /// Full dump (`knowledge_graph.json`)
    Json,
    /// Relational store (`documents.db`)
    Sqlite,
    /// Frequency table (`token_frequency.csv`)
    Csv,
    /// Graph exchange (`relationships.graphml`)
    Graphml,
    /// Human-readable report (`SUMMARY.md`)
    Summary,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Sqlite => "sqlite",
            OutputFormat::Csv => "csv",
            OutputFormat::Graphml => "graphml",
            OutputFormat::Summary => "summary",
        }
    }

    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Json,
            OutputFormat::Sqlite,
            OutputFormat::Csv,
            OutputFormat::Graphml,
            OutputFormat::Summary,
        ]
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" | "dump" => Ok(OutputFormat::Json),
            "sqlite" | "db" => Ok(OutputFormat::Sqlite),
            "csv" | "frequency" => Ok(OutputFormat::Csv),
            "graphml" | "graph" => Ok(OutputFormat::Graphml),
            "summary" | "report" => Ok(OutputFormat::Summary),
            other => Err(Error::Config(format!("unknown output format: {}", other))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse format specs ("all", or comma-separated lists, possibly split
/// across several flags) into the set of formats to produce.
pub fn parse_formats(specs: &[String]) -> Result<BTreeSet<OutputFormat>> {
    let mut formats = BTreeSet::new();
    for spec in specs {
        for part in spec.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if part.eq_ignore_ascii_case("all") {
                formats.extend(OutputFormat::all().iter().copied());
            } else {
                formats.insert(part.parse()?);
            }
        }
    }
    if formats.is_empty() {
        formats.extend(OutputFormat::all().iter().copied());
    }
    Ok(formats)
}

/// Run every selected writer against the graph.
///
/// Writer failures (including GraphML without the graph engine) are
/// logged and skipped. Only an unwritable output directory is fatal.
pub fn write_all(graph: &KnowledgeGraph, config: &RunConfig) -> Result<()> {
    std::fs::create_dir_all(&config.output_dir)?;

    for format in &config.formats {
        let result = match format {
            OutputFormat::Json => json::write_dump(graph, &config.output_dir),
            OutputFormat::Sqlite => sqlite::write_store(graph, &config.output_dir),
            OutputFormat::Csv => {
                frequency::write_frequency(graph, &config.output_dir, config.min_frequency)
            }
            OutputFormat::Graphml => graphml::write_graphml(graph, &config.output_dir),
            OutputFormat::Summary => summary::write_summary(graph, &config.output_dir),
        };
        match result {
            Ok(path) => tracing::info!("wrote {}", path.display()),
            Err(e) => tracing::warn!("skipping {} writer: {}", format.as_str(), e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_roundtrip() {
        for format in OutputFormat::all() {
            let parsed: OutputFormat = format.as_str().parse().unwrap();
            assert_eq!(*format, parsed);
        }
    }

    #[test]
    fn test_parse_formats_all() {
        let formats = parse_formats(&["all".to_string()]).unwrap();
        assert_eq!(formats.len(), OutputFormat::all().len());
    }

    #[test]
    fn test_parse_formats_comma_list() {
        let formats = parse_formats(&["json,csv".to_string(), "summary".to_string()]).unwrap();
        assert_eq!(formats.len(), 3);
        assert!(formats.contains(&OutputFormat::Json));
        assert!(formats.contains(&OutputFormat::Csv));
        assert!(formats.contains(&OutputFormat::Summary));
    }

    #[test]
    fn test_parse_formats_rejects_unknown() {
        assert!(parse_formats(&["yaml".to_string()]).is_err());
    }

    #[test]
    fn test_empty_spec_defaults_to_all() {
        let formats = parse_formats(&[]).unwrap();
        assert_eq!(formats.len(), OutputFormat::all().len());
    }
}
