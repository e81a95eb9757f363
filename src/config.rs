use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Fully-resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root directory to scan
    pub root: PathBuf,
    /// Directory the output writers produce into
    pub output_dir: PathBuf,
    /// Worker pool size
    pub workers: usize,
    /// Minimum occurrence count for the frequency table
    pub min_frequency: usize,
    /// Output formats to produce
    pub formats: BTreeSet<OutputFormat>,
    /// Path substrings to exclude (on top of the defaults)
    pub excludes: Vec<String>,
    /// Extra file extensions routed to the generic tokenizer
    pub extra_extensions: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output_dir: PathBuf::from("./docgraph"),
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(8),
            min_frequency: 2,
            formats: OutputFormat::all().iter().copied().collect(),
            excludes: Vec::new(),
            extra_extensions: Vec::new(),
        }
    }
}

/// Optional on-disk overrides, loaded from `docgraph.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub output: Option<PathBuf>,
    pub workers: Option<usize>,
    pub min_frequency: Option<usize>,
    pub formats: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub include_ext: Option<Vec<String>>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("docgraph.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<FileConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: FileConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &FileConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
