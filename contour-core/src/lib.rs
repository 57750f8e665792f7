//! Contour core: pattern-based structural extraction and semantic diff.
//!
//! The pipeline takes a source tree, extracts an approximate structural
//! snapshot (functions, classes, methods, imports, call sites) using
//! per-language pattern tables, and compares snapshots to report
//! entity-level changes plus a heuristic dependency graph.
//!
//! - **Multi-language**: Python, JavaScript, TypeScript, C, C++, Java, C#
//! - **No ASTs**: anchored regular expressions over raw text, with the
//!   documented imprecision that implies
//! - **Deterministic output**: source order everywhere, parallel builds
//!   included
//!
//! The entry points are [`snapshot_directory`] for the full scan and
//! extract path, [`differ::diff`] for comparison, and
//! [`graph::DependencyGraph::resolve`] for import resolution.

use std::path::Path;

pub mod differ;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod graph;
pub mod language;
pub mod scanner;
pub mod snapshot;
pub mod types;

pub use differ::{classify_changes, diff, ChangeGroups, DiffResult};
pub use error::{Error, Result};
pub use graph::DependencyGraph;
pub use language::Language;
pub use scanner::{ScanOptions, ScanStats};
pub use types::{Entity, EntityKind, FileRecord, Import, ImportKind, Snapshot, SourceFile};

/// Scan a directory and build its snapshot, extracting files in parallel.
pub fn snapshot_directory(root: &Path, options: &ScanOptions) -> Result<(Snapshot, ScanStats)> {
    let (files, stats) = scanner::scan(root, options)?;
    Ok((snapshot::build_parallel(&files), stats))
}

/// Build a snapshot from already-read sources, sequentially.
pub fn snapshot_sources(files: &[SourceFile]) -> Snapshot {
    snapshot::build(files)
}
