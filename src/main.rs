//! shutterdex - local photo-library indexer with splat companions.
//!
//! Usage:
//!   sdx scan [PATH]                Index a folder tree and print the records
//!   sdx splat <ALBUM> <IMAGE>      Resolve a photo's 3D-scan companion
//!   sdx dump <SPLAT> [-o FILE]     Validated raw-byte retrieval of a splat
//!   sdx --help                     Show help

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};

use shutterdex_index::{MediaScanner, PersistedItem, ScanConfig, ScanOutcome};
use shutterdex_splat::{PlyHeader, read_splat_bytes, resolve_splat};

#[derive(Parser)]
#[command(
    name = "shutterdex",
    version,
    about = "Local photo-library indexer with preview generation",
    long_about = "shutterdex indexes a folder tree of photographic media, \
                  generates embeddable previews, extracts capture metadata, \
                  and resolves companion 3D-scan (splat) files."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index a folder tree of media files
    Scan {
        /// Folder to index
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Cap on the total number of records
        #[arg(short = 'n', long)]
        max_results: Option<usize>,

        /// Maximum directory depth below the root
        #[arg(short = 'd', long)]
        max_depth: Option<u32>,

        /// Folder to receive the metadata snapshot sidecar
        #[arg(short, long)]
        metadata_dir: Option<PathBuf>,

        /// Include hidden files and directories
        #[arg(long)]
        include_hidden: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Resolve the 3D-scan companion of a photo
    Splat {
        /// Album folder containing the photo
        album: PathBuf,

        /// Photo file name (directory components are ignored)
        image: String,
    },

    /// Retrieve validated raw bytes of a splat file
    Dump {
        /// Path to the splat file
        path: PathBuf,

        /// Write the bytes here instead of reporting the count
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            path,
            max_results,
            max_depth,
            metadata_dir,
            include_hidden,
            format,
        } => {
            run_scan(path, max_results, max_depth, metadata_dir, include_hidden, format).await?;
        }
        Command::Splat { album, image } => {
            run_splat(&album, &image).await?;
        }
        Command::Dump { path, output } => {
            run_dump(&path, output).await?;
        }
    }

    Ok(())
}

/// Index a folder and print the result.
async fn run_scan(
    path: PathBuf,
    max_results: Option<usize>,
    max_depth: Option<u32>,
    metadata_dir: Option<PathBuf>,
    include_hidden: bool,
    format: OutputFormat,
) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;

    let mut builder = ScanConfig::builder();
    builder
        .root(&path)
        .metadata_dir(metadata_dir)
        .include_hidden(include_hidden);
    if let Some(n) = max_results {
        builder.max_results(n);
    }
    if let Some(d) = max_depth {
        builder.max_depth(d);
    }
    let config = builder.build().map_err(|e| eyre!(e.to_string()))?;

    eprintln!("Indexing {}...", path.display());
    let outcome = MediaScanner::new(config).scan().await;

    match format {
        OutputFormat::Text => print_outcome(&outcome),
        OutputFormat::Json => {
            let items: Vec<PersistedItem> =
                outcome.records.iter().map(PersistedItem::from).collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }

    if !outcome.warnings.is_empty() {
        eprintln!("{} warning(s) during scan", outcome.warnings.len());
    }

    Ok(())
}

/// Print a scan outcome as a table.
fn print_outcome(outcome: &ScanOutcome) {
    println!();
    println!("{}", "─".repeat(72));
    println!(
        " {} - {} media file(s) in {:.2}s",
        outcome.root_path.display(),
        outcome.len(),
        outcome.scan_duration.as_secs_f64()
    );
    println!("{}", "─".repeat(72));

    for record in &outcome.records {
        let captured = record.captured_at.as_deref().unwrap_or("-");
        let location = record.location.as_deref().unwrap_or("-");
        println!(
            " {:<32} {:<6} {:<26} {}",
            truncate(&record.name, 32),
            record.extension,
            truncate(captured, 26),
            location
        );
    }
}

/// Resolve and describe a photo's splat companion.
async fn run_splat(album: &PathBuf, image: &str) -> Result<()> {
    let Some(record) = resolve_splat(album, image).await else {
        println!("No splat companion for {image}");
        return Ok(());
    };

    println!("{}", record.path.display());
    println!(
        " format: {}",
        if record.is_binary { "binary" } else { "text" }
    );

    if record.path.extension().and_then(|e| e.to_str()) == Some("ply") {
        if let Some(bytes) = read_splat_bytes(&record.path).await {
            if let Some(header) = PlyHeader::parse(&bytes) {
                println!(" vertices: {}", header.vertex_count);
                println!(" properties: {}", header.properties.len());
                if let Some(stride) = header.vertex_stride() {
                    println!(" stride: {stride} bytes/vertex");
                }
            }
        }
    }

    if let Some(preview) = &record.preview {
        println!();
        for line in preview.lines() {
            println!(" | {line}");
        }
    }

    Ok(())
}

/// Retrieve validated splat bytes.
async fn run_dump(path: &PathBuf, output: Option<PathBuf>) -> Result<()> {
    let Some(bytes) = read_splat_bytes(path).await else {
        return Err(eyre!(
            "Rejected: {} (unrecognized extension, too large, or unreadable)",
            path.display()
        ));
    };

    match output {
        Some(out) => {
            std::fs::write(&out, &bytes)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            eprintln!("Wrote {} bytes to {}", bytes.len(), out.display());
        }
        None => {
            println!("{} bytes", bytes.len());
        }
    }

    Ok(())
}

/// Truncate a string to max length.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}…", &s[..max_len - 1])
    }
}
