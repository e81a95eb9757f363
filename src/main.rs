//! Docgraph CLI - scan a documentation tree into a knowledge graph

use clap::{Parser, Subcommand};
use docgraph::config::{self, RunConfig};
use docgraph::output;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "docgraph")]
#[command(version)]
#[command(about = "Knowledge-graph builder for documentation and config trees")]
#[command(long_about = r#"
Docgraph tokenizes every recognized file under a root directory, links
documents through their cross-file references, and persists the result
for downstream analysis:
  • knowledge_graph.json  - full dump
  • documents.db          - relational store (documents/tokens/relationships)
  • token_frequency.csv   - frequency table
  • relationships.graphml - reference graph export
  • SUMMARY.md            - human-readable report

Example usage:
  docgraph scan ./docs --output ./analysis --workers 12
  docgraph scan . --formats json,sqlite --exclude drafts
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a tree and persist the knowledge graph
    Scan {
        /// Root directory to scan
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Output directory for persisted artifacts
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of parallel workers (default: CPU count)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Minimum token frequency for the CSV table
        #[arg(short, long)]
        min_freq: Option<usize>,

        /// Output formats: json,sqlite,csv,graphml,summary or "all"
        #[arg(short, long)]
        formats: Option<String>,

        /// Path substrings to exclude (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Additional file extensions to include (repeatable)
        #[arg(long)]
        include_ext: Vec<String>,

        /// Path to a docgraph.toml config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List registered format parsers and compiled capabilities
    Formats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Scan {
            root,
            output,
            workers,
            min_freq,
            formats,
            exclude,
            include_ext,
            config: config_path,
        } => {
            let file_config = config::load_config(config_path.as_deref())?.unwrap_or_default();
            let defaults = RunConfig::default();

            let format_specs: Vec<String> = formats
                .map(|f| vec![f])
                .or(file_config.formats)
                .unwrap_or_default();

            let mut excludes = file_config.exclude.unwrap_or_default();
            excludes.extend(exclude);
            let mut extra_extensions = file_config.include_ext.unwrap_or_default();
            extra_extensions.extend(include_ext);

            let run_config = RunConfig {
                root,
                output_dir: output.or(file_config.output).unwrap_or(defaults.output_dir),
                workers: workers.or(file_config.workers).unwrap_or(defaults.workers),
                min_frequency: min_freq
                    .or(file_config.min_frequency)
                    .unwrap_or(defaults.min_frequency),
                formats: output::parse_formats(&format_specs)?,
                excludes,
                extra_extensions,
            };

            println!("🚀 Scanning {}", run_config.root.display());
            println!("🗄️  Output: {}", run_config.output_dir.display());

            let registry = docgraph::default_registry();
            let started = std::time::Instant::now();
            let (graph, metrics) = docgraph::ingest_tree(&run_config, &registry)?;
            println!("✅ {} in {:.1?}", metrics, started.elapsed());

            output::write_all(&graph, &run_config)?;

            println!("\n📊 {}", graph.statistics());
            println!("\n✅ Complete! Results in {}", run_config.output_dir.display());
        }

        Commands::Formats => {
            let registry = docgraph::default_registry();
            println!("Registered format parsers:");
            for parser in registry.parsers() {
                let mut claims: Vec<String> = parser
                    .file_names()
                    .iter()
                    .map(|n| n.to_string())
                    .collect();
                claims.extend(parser.file_extensions().iter().map(|e| format!(".{}", e)));
                println!("  {:<12} {}", parser.format_name(), claims.join(", "));
            }
            println!("\nCapabilities:");
            println!(
                "  structured HCL parsing: {}",
                if cfg!(feature = "hcl") { "enabled" } else { "disabled (regex fallback)" }
            );
            println!(
                "  reference graph engine: {}",
                if cfg!(feature = "graph") { "enabled" } else { "disabled (adjacency fallback)" }
            );
        }
    }

    Ok(())
}
