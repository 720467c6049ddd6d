use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Build the reference index from a directory of regulatory documents.
#[derive(Parser)]
#[command(name = "lexcheck-indexer", version)]
struct Args {
    /// Reference corpus directory (defaults to `paths.reference_dir`).
    reference_dir: Option<PathBuf>,
    /// Directory holding config.toml.
    #[arg(long)]
    config_dir: Option<PathBuf>,
    /// Hide the progress bar.
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    lexcheck_cli::init();
    let args = Args::parse();
    let settings = lexcheck_cli::load_settings(args.config_dir.as_deref())?;
    let reference_dir = args.reference_dir.unwrap_or_else(|| settings.paths.reference_dir());

    let embedder = lexcheck_cli::embedder(&settings, None)?;
    let report = lexcheck_cli::index_builder(&settings, embedder, !args.quiet).build(&reference_dir)?;

    println!(
        "Indexed {} chunks from {} of {} files (dimension {}, model {})",
        report.chunks, report.files_indexed, report.files_scanned, report.dimension, report.model
    );
    Ok(())
}
