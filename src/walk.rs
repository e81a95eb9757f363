//! File enumeration and exclusion filtering
//!
//! Enumeration is recursive over all regular files under the root and the
//! result is sorted, giving every run the same canonical file order.
//! Exclusion is by plain substring containment on the path, the contract
//! downstream tooling configures against.

use crate::parser::ParserRegistry;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Version-control, build-cache, and dependency directories skipped by default
pub const DEFAULT_EXCLUDES: &[&str] = &[".git", "__pycache__", "node_modules", ".venv", "target"];

/// Substring-based path exclusion filter.
pub struct ExclusionFilter {
    patterns: Vec<String>,
}

impl ExclusionFilter {
    /// Build a filter from the defaults plus user-supplied substrings
    pub fn new(extra_excludes: &[String]) -> Self {
        let mut patterns: Vec<String> = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect();
        patterns.extend(extra_excludes.iter().cloned());
        Self { patterns }
    }

    /// Whether any exclusion substring occurs in the path
    pub fn is_excluded(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.patterns.iter().any(|p| text.contains(p.as_str()))
    }
}

/// Enumerate all eligible files under `root` in canonical (sorted) order.
///
/// A file is eligible when no exclusion matches and either a registered
/// parser claims it or its extension is in `extra_extensions` (those route
/// to the generic tokenizer). Unreadable subtrees are skipped; only a
/// missing root is an error.
pub fn enumerate_files(
    root: &Path,
    registry: &ParserRegistry,
    filter: &ExclusionFilter,
    extra_extensions: &[String],
) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::Config(format!(
            "root directory {} does not exist or is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if filter.is_excluded(path) {
            continue;
        }

        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let extra = extra_extensions
            .iter()
            .any(|x| x.trim_start_matches('.').eq_ignore_ascii_case(&ext));

        if registry.handles(path) || extra {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::default_registry;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "content").unwrap();
    }

    #[test]
    fn test_enumeration_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("b.md"));
        touch(&root.join("a.yaml"));
        touch(&root.join("image.png"));
        touch(&root.join("node_modules/dep.md"));
        touch(&root.join("sub/c.sh"));

        let registry = default_registry();
        let filter = ExclusionFilter::new(&[]);
        let files = enumerate_files(root, &registry, &filter, &[]).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.md", "sub/c.sh"]);
    }

    #[test]
    fn test_user_excludes_are_substrings() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("keep.md"));
        touch(&root.join("drafts/skip.md"));

        let registry = default_registry();
        let filter = ExclusionFilter::new(&["drafts".to_string()]);
        let files = enumerate_files(root, &registry, &filter, &[]).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep.md"));
    }

    #[test]
    fn test_extra_extensions_are_included() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("notes.log"));

        let registry = default_registry();
        let filter = ExclusionFilter::new(&[]);

        let without = enumerate_files(root, &registry, &filter, &[]).unwrap();
        assert!(without.is_empty());

        let with = enumerate_files(root, &registry, &filter, &["log".to_string()]).unwrap();
        assert_eq!(with.len(), 1);
        // Dotted spellings work too
        let dotted = enumerate_files(root, &registry, &filter, &[".log".to_string()]).unwrap();
        assert_eq!(dotted.len(), 1);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let registry = default_registry();
        let filter = ExclusionFilter::new(&[]);
        let result = enumerate_files(Path::new("/nonexistent/docgraph-test"), &registry, &filter, &[]);
        assert!(result.is_err());
    }
}
