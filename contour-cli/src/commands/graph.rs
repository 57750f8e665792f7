//! Graph command: resolve imports into a file dependency graph.

use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use contour_core::{exporter, snapshot_directory, DependencyGraph, ScanOptions};
use tracing::info;

use crate::write_output;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphFormat {
    Json,
    Dot,
}

pub fn run(
    path: &str,
    options: &ScanOptions,
    format: GraphFormat,
    pretty: bool,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let (snapshot, _) = snapshot_directory(Path::new(path), options)
        .with_context(|| format!("failed to snapshot {}", path))?;

    let graph = DependencyGraph::resolve(&snapshot);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph resolved"
    );

    let export = graph.export();
    let rendered = match format {
        GraphFormat::Json => exporter::json::export(&export, pretty)?,
        GraphFormat::Dot => exporter::dot::export(&export),
    };
    write_output(&rendered, output)?;

    let cycles = graph.cycles();
    eprintln!(
        "{} {} nodes, {} edges, {} cycles",
        "graph:".cyan().bold(),
        graph.node_count(),
        graph.edge_count(),
        cycles.len()
    );
    Ok(())
}
