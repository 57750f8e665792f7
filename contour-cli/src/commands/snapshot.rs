//! Snapshot command: scan a tree and print its structural snapshot.

use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use contour_core::{exporter, snapshot_directory, ScanOptions};
use tracing::info;

use crate::write_output;

pub fn run(path: &str, options: &ScanOptions, pretty: bool, output: Option<&str>) -> anyhow::Result<()> {
    let (snapshot, stats) = snapshot_directory(Path::new(path), options)
        .with_context(|| format!("failed to snapshot {}", path))?;

    info!(
        files = snapshot.len(),
        skipped = stats.skipped,
        errors = stats.errors,
        "snapshot complete"
    );

    let json = exporter::json::export(&snapshot, pretty)?;
    write_output(&json, output)?;

    eprintln!(
        "{} {} files captured ({} skipped, {} errors)",
        "snapshot:".cyan().bold(),
        snapshot.len(),
        stats.skipped,
        stats.errors
    );
    Ok(())
}
