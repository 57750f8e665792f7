//! Gitignore-aware source discovery using the `ignore` crate.
//!
//! The scanner is the input boundary: it walks a tree, classifies each
//! file by extension, applies the size ceiling and a binary probe, and
//! hands `(relative_path, language, text)` tuples to extraction. Files
//! with an unknown extension are skipped silently; unreadable or binary
//! files are counted but never abort the walk.

use std::fs;
use std::path::Path;

use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::language::Language;
use crate::types::SourceFile;

const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;
const BINARY_PROBE_LEN: usize = 1024;

/// Scan configuration.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Files larger than this many bytes are skipped before extraction.
    pub max_file_size: u64,

    /// Extra glob patterns to exclude, beyond .gitignore.
    pub ignore_patterns: Vec<String>,

    pub follow_symlinks: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            ignore_patterns: Vec::new(),
            follow_symlinks: false,
        }
    }
}

/// Counters from one scan.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// Files skipped: unknown language, oversize, or binary.
    pub skipped: usize,

    /// Files that could not be read.
    pub errors: usize,
}

/// Walk `root` and read every classifiable source file.
///
/// Paths in the result are relative to `root` with `/` separators, and
/// the list is sorted so snapshot order is stable across platforms and
/// walk order.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<(Vec<SourceFile>, ScanStats)> {
    if !root.is_dir() {
        return Err(Error::InvalidRoot(root.to_path_buf()));
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(true)
        .git_ignore(true)
        .git_exclude(true)
        .follow_links(options.follow_symlinks);

    if !options.ignore_patterns.is_empty() {
        let mut overrides = ignore::overrides::OverrideBuilder::new(root);
        for pattern in &options.ignore_patterns {
            if let Err(e) = overrides.add(&format!("!{}", pattern)) {
                warn!(pattern = %pattern, error = %e, "invalid ignore pattern");
            }
        }
        if let Ok(overrides) = overrides.build() {
            builder.overrides(overrides);
        }
    }

    let mut stats = ScanStats::default();
    let mut files = Vec::new();

    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "walk error");
                stats.errors += 1;
                continue;
            }
        };
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        let path = entry.path();
        let Some(language) = Language::from_path(path) else {
            stats.skipped += 1;
            continue;
        };

        match entry.metadata() {
            Ok(meta) if meta.len() > options.max_file_size => {
                debug!(path = %path.display(), size = meta.len(), "file exceeds size ceiling");
                stats.skipped += 1;
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(path = %path.display(), error = %e, "metadata read failed");
                stats.errors += 1;
                continue;
            }
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "file read failed");
                stats.errors += 1;
                continue;
            }
        };

        if is_binary(&bytes) {
            debug!(path = %path.display(), "binary content skipped");
            stats.skipped += 1;
            continue;
        }

        let relative = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        let source = String::from_utf8_lossy(&bytes).into_owned();
        files.push(SourceFile::new(relative, language, source));
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(
        files = files.len(),
        skipped = stats.skipped,
        errors = stats.errors,
        "scan complete"
    );
    Ok((files, stats))
}

/// NUL byte in the first kilobyte means binary.
fn is_binary(bytes: &[u8]) -> bool {
    bytes[..bytes.len().min(BINARY_PROBE_LEN)].contains(&0)
}
