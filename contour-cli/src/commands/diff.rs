//! Diff command: snapshot two tree states and report semantic changes.

use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use contour_core::{classify_changes, diff, exporter, snapshot_directory, ScanOptions};
use serde::Serialize;
use tracing::info;

use crate::write_output;

#[derive(Serialize)]
struct DiffReport<'a> {
    #[serde(flatten)]
    result: &'a contour_core::DiffResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    semantic_groups: Option<contour_core::ChangeGroups>,
}

pub fn run(
    old_path: &str,
    new_path: &str,
    options: &ScanOptions,
    categorize: bool,
    pretty: bool,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let (old, _) = snapshot_directory(Path::new(old_path), options)
        .with_context(|| format!("failed to snapshot {}", old_path))?;
    let (new, _) = snapshot_directory(Path::new(new_path), options)
        .with_context(|| format!("failed to snapshot {}", new_path))?;

    info!(old_files = old.len(), new_files = new.len(), "snapshots ready");

    let result = diff(&old, &new);
    let semantic_groups = categorize.then(|| classify_changes(&result));

    let report = DiffReport {
        result: &result,
        semantic_groups,
    };
    let json = exporter::json::export(&report, pretty)?;
    write_output(&json, output)?;

    if result.is_empty() {
        eprintln!("{} no changes", "diff:".cyan().bold());
    } else {
        eprintln!("{}", "diff:".cyan().bold());
        for line in result.summary.text().lines() {
            eprintln!("  {}", line);
        }
    }
    Ok(())
}
