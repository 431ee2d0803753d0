//! cosmetics-dump: Dump the cosmetics catalog into per-type JSON files
//!
//! Usage:
//!   # Writes ./dump/<backendValue>.json for every cosmetic type
//!   cosmetics-dump
//!
//!   # Show request and per-file diagnostics on stderr
//!   RUST_LOG=cosmetics_dump=debug cosmetics-dump

use anyhow::{Context, Result};
use clap::Parser;
use cosmetics_dump::DumpConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cosmetics-dump", version)]
#[command(about = "Dump the cosmetics catalog into per-type JSON files", long_about = None)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();
    init_tracing()?;

    let config = DumpConfig::default();
    let summary = cosmetics_dump::dump(&config).context("Failed to dump cosmetics")?;

    println!("Found {} cosmetics", summary.cosmetics);

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}
