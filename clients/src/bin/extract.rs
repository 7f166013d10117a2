//! `rico-extract` — Extracts the normalized RiC-O snapshot from the source
//! RDF document.
//!
//! **Output:** `public/rico-data.json`, the artifact the query layer loads
//! at runtime.
//!
//! **Usage:**
//! ```text
//! rico-extract [INPUT] [--out <path>]
//! ```
//!
//! A missing input file is the one fatal condition: the process exits with
//! status 1 and a diagnostic on stderr. Malformed declaration blocks inside
//! an existing document are skipped silently and never fail the run.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

/// Extract the RiC-O ontology snapshot from an RDF document.
#[derive(Parser)]
#[command(name = "rico-extract", about = "Extract the RiC-O ontology snapshot")]
struct Args {
    /// Input RDF document.
    #[arg(default_value = "data/RiC-O_1-1.rdf")]
    input: PathBuf,

    /// Output path for the snapshot artifact.
    #[arg(long, default_value = "public/rico-data.json")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.input.exists() {
        bail!("input RDF file not found: {}", args.input.display());
    }

    let document = std::fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;

    let snapshot = rico_ontology::build(&document, &args.input.display().to_string());
    let json = snapshot.to_json_pretty()?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory: {}", parent.display()))?;
    }
    std::fs::write(&args.out, json)
        .with_context(|| format!("cannot write {}", args.out.display()))?;

    println!("Generated {}", args.out.display());
    println!("  Source: {}", args.input.display());
    println!(
        "  Classes: {}, Properties: {}",
        snapshot.classes.len(),
        snapshot.properties.len()
    );

    Ok(())
}
