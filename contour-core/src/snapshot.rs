//! Snapshot construction.
//!
//! A snapshot is the extraction result for one tree state. Files that
//! yield zero entities and no error are dropped; errored files stay as
//! annotation records. Output order follows input order in both the
//! sequential and parallel builds.

use rayon::prelude::*;
use tracing::debug;

use crate::extractor;
use crate::types::{FileRecord, Snapshot, SourceFile};

/// Build a snapshot sequentially.
pub fn build(files: &[SourceFile]) -> Snapshot {
    finish(files.iter().map(extractor::extract_file).collect())
}

/// Build a snapshot with one rayon task per file.
///
/// `par_iter().map().collect()` keeps input order, so the parallel build
/// produces byte-identical output to the sequential one.
pub fn build_parallel(files: &[SourceFile]) -> Snapshot {
    finish(files.par_iter().map(extractor::extract_file).collect())
}

fn finish(records: Vec<FileRecord>) -> Snapshot {
    let total = records.len();
    let files: Vec<FileRecord> = records
        .into_iter()
        .filter(|r| r.has_entities() || r.error.is_some())
        .collect();
    debug!(
        scanned = total,
        kept = files.len(),
        "snapshot built"
    );
    Snapshot { files }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn source_file(path: &str, language: Language, source: &str) -> SourceFile {
        SourceFile::new(path, language, source)
    }

    #[test]
    fn test_zero_entity_file_omitted() {
        let files = vec![
            source_file("constants.py", Language::Python, "MAX = 10\nMIN = 1\n"),
            source_file("lib.py", Language::Python, "def f():\n    pass\n"),
        ];
        let snapshot = build(&files);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.files[0].path, "lib.py");
    }

    #[test]
    fn test_order_follows_input() {
        let files = vec![
            source_file("b.py", Language::Python, "def b():\n    pass\n"),
            source_file("a.py", Language::Python, "def a():\n    pass\n"),
        ];
        let snapshot = build(&files);
        let paths: Vec<&str> = snapshot.paths().collect();
        assert_eq!(paths, vec!["b.py", "a.py"]);
    }

    #[test]
    fn test_parallel_build_matches_sequential() {
        let files: Vec<SourceFile> = (0..32)
            .map(|i| {
                source_file(
                    &format!("mod_{i}.py"),
                    Language::Python,
                    &format!("def handler_{i}(x):\n    return x + {i}\n"),
                )
            })
            .collect();
        let sequential = build(&files);
        let parallel = build_parallel(&files);
        let a: Vec<&str> = sequential.paths().collect();
        let b: Vec<&str> = parallel.paths().collect();
        assert_eq!(a, b);
    }
}
