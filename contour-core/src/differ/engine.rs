//! Snapshot comparison.
//!
//! Pure and deterministic: file-level set difference by path, then per-file
//! name-set difference within each entity category. Identity is the exact
//! name (owner-qualified for methods); a rename is one removal plus one
//! addition, never a modification. Output preserves extraction order, which
//! is source order.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::types::{Entity, FileRecord, Snapshot};

use super::changes::{
    CategoryChanges, DiffResult, EntityDiff, EntityRef, FileChanges, FileDiff, ModifiedPair,
};

/// Compare two snapshots.
pub fn diff(old: &Snapshot, new: &Snapshot) -> DiffResult {
    let old_by_path: HashMap<&str, &FileRecord> =
        old.files.iter().map(|f| (f.path.as_str(), f)).collect();
    let new_by_path: HashMap<&str, &FileRecord> =
        new.files.iter().map(|f| (f.path.as_str(), f)).collect();

    let mut result = DiffResult::default();

    // New-snapshot order drives added and candidate-modified files.
    for record in &new.files {
        if !old_by_path.contains_key(record.path.as_str()) {
            result.added_files.push(record.path.clone());
        }
    }
    for record in &old.files {
        if !new_by_path.contains_key(record.path.as_str()) {
            result.removed_files.push(record.path.clone());
        }
    }

    for record in &new.files {
        let Some(old_record) = old_by_path.get(record.path.as_str()) else {
            continue;
        };

        let changes = FileChanges {
            functions: diff_category(
                &record.path,
                &old_record.functions,
                &record.functions,
                &mut result.function_changes,
            ),
            classes: diff_category(
                &record.path,
                &old_record.classes,
                &record.classes,
                &mut result.class_changes,
            ),
            methods: diff_category(
                &record.path,
                &old_record.methods,
                &record.methods,
                &mut result.method_changes,
            ),
        };

        // Files with zero entity-level changes never appear, even though
        // they exist in both snapshots.
        if !changes.is_empty() {
            result.modified_files.push(FileDiff {
                file: record.path.clone(),
                changes,
            });
        }
    }

    result.summary = summarize(&result);
    debug!(
        added = result.added_files.len(),
        removed = result.removed_files.len(),
        modified = result.modified_files.len(),
        "snapshots compared"
    );
    result
}

/// Name-set difference for one category of one file, feeding both the
/// per-file detail and the global `(file, name)` aggregate.
fn diff_category(
    file: &str,
    old: &[Entity],
    new: &[Entity],
    aggregate: &mut CategoryChanges,
) -> EntityDiff {
    let old_by_name: HashMap<&str, &Entity> = old.iter().map(|e| (e.name.as_str(), e)).collect();
    let new_names: HashSet<&str> = new.iter().map(|e| e.name.as_str()).collect();

    let mut diff = EntityDiff::default();

    for entity in new {
        match old_by_name.get(entity.name.as_str()) {
            None => {
                diff.added.push(entity.clone());
                aggregate.added.push(EntityRef::new(file, &entity.name));
            }
            Some(previous) if entity.differs_from(previous) => {
                diff.modified.push(ModifiedPair {
                    name: entity.name.clone(),
                    old: (*previous).clone(),
                    new: entity.clone(),
                });
                aggregate.modified.push(EntityRef::new(file, &entity.name));
            }
            Some(_) => {}
        }
    }

    for entity in old {
        if !new_names.contains(entity.name.as_str()) {
            diff.removed.push(entity.clone());
            aggregate.removed.push(EntityRef::new(file, &entity.name));
        }
    }

    diff
}

fn summarize(result: &DiffResult) -> super::changes::DiffSummary {
    super::changes::DiffSummary {
        added_files: result.added_files.len() as u32,
        removed_files: result.removed_files.len() as u32,
        modified_files: result.modified_files.len() as u32,
        added_functions: result.function_changes.added.len() as u32,
        removed_functions: result.function_changes.removed.len() as u32,
        modified_functions: result.function_changes.modified.len() as u32,
        added_classes: result.class_changes.added.len() as u32,
        removed_classes: result.class_changes.removed.len() as u32,
        modified_classes: result.class_changes.modified.len() as u32,
        added_methods: result.method_changes.added.len() as u32,
        removed_methods: result.method_changes.removed.len() as u32,
        modified_methods: result.method_changes.modified.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use crate::types::{EntityKind, FileRecord, Signature};

    fn entity(kind: EntityKind, name: &str, body: &str) -> Entity {
        Entity {
            kind,
            name: name.to_string(),
            signature: Signature::default(),
            body: body.to_string(),
            doc: None,
        }
    }

    fn record(path: &str, functions: Vec<Entity>) -> FileRecord {
        let mut record = FileRecord::empty(path, Language::Python);
        record.functions = functions;
        record
    }

    fn snapshot(files: Vec<FileRecord>) -> Snapshot {
        Snapshot { files }
    }

    #[test]
    fn test_diff_with_self_is_empty() {
        let snap = snapshot(vec![record(
            "a.py",
            vec![entity(EntityKind::Function, "f", "return 1")],
        )]);
        let result = diff(&snap, &snap);
        assert!(result.is_empty());
    }

    #[test]
    fn test_added_and_removed_files_swap_under_reversal() {
        let old = snapshot(vec![record(
            "a.py",
            vec![entity(EntityKind::Function, "f", "pass")],
        )]);
        let new = snapshot(vec![record(
            "b.py",
            vec![entity(EntityKind::Function, "g", "pass")],
        )]);
        let forward = diff(&old, &new);
        let backward = diff(&new, &old);
        assert_eq!(forward.added_files, backward.removed_files);
        assert_eq!(forward.removed_files, backward.added_files);
    }

    #[test]
    fn test_rename_is_removal_plus_addition() {
        let old = snapshot(vec![record(
            "a.py",
            vec![entity(EntityKind::Function, "old_name", "return 1")],
        )]);
        let new = snapshot(vec![record(
            "a.py",
            vec![entity(EntityKind::Function, "new_name", "return 1")],
        )]);
        let result = diff(&old, &new);
        assert_eq!(result.function_changes.added.len(), 1);
        assert_eq!(result.function_changes.removed.len(), 1);
        assert!(result.function_changes.modified.is_empty());
    }

    #[test]
    fn test_whitespace_only_body_change_is_modified() {
        let old = snapshot(vec![record(
            "a.py",
            vec![entity(EntityKind::Function, "f", "return  1")],
        )]);
        let new = snapshot(vec![record(
            "a.py",
            vec![entity(EntityKind::Function, "f", "return 1")],
        )]);
        let result = diff(&old, &new);
        assert_eq!(result.function_changes.modified.len(), 1);
        assert_eq!(result.modified_files[0].changes.functions.modified[0].name, "f");
    }

    #[test]
    fn test_signature_change_without_body_change_is_modified() {
        let mut changed = entity(EntityKind::Function, "f", "return a");
        changed.signature = Signature {
            params: "a, b".to_string(),
            return_type: None,
            bases: None,
        };
        let old = snapshot(vec![record(
            "a.py",
            vec![entity(EntityKind::Function, "f", "return a")],
        )]);
        let new = snapshot(vec![record("a.py", vec![changed])]);
        let result = diff(&old, &new);
        assert_eq!(result.function_changes.modified.len(), 1);
    }

    #[test]
    fn test_unchanged_common_file_excluded_from_modified_files() {
        let shared = record("a.py", vec![entity(EntityKind::Function, "f", "pass")]);
        let old = snapshot(vec![
            shared.clone(),
            record("b.py", vec![entity(EntityKind::Function, "g", "pass")]),
        ]);
        let new = snapshot(vec![
            shared,
            record("b.py", vec![entity(EntityKind::Function, "g", "changed")]),
        ]);
        let result = diff(&old, &new);
        let files: Vec<&str> = result.modified_files.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(files, vec!["b.py"]);
    }

    #[test]
    fn test_output_preserves_source_order() {
        let old = snapshot(vec![record("a.py", vec![])]);
        let new = snapshot(vec![record(
            "a.py",
            vec![
                entity(EntityKind::Function, "zeta", "pass"),
                entity(EntityKind::Function, "alpha", "pass"),
            ],
        )]);
        let result = diff(&old, &new);
        let names: Vec<&str> = result.modified_files[0]
            .changes
            .functions
            .added
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_summary_counts() {
        let old = snapshot(vec![record(
            "a.py",
            vec![entity(EntityKind::Function, "f", "pass")],
        )]);
        let new = snapshot(vec![
            record("a.py", vec![entity(EntityKind::Function, "f", "changed")]),
            record("b.py", vec![entity(EntityKind::Function, "g", "pass")]),
        ]);
        let result = diff(&old, &new);
        assert_eq!(result.summary.added_files, 1);
        assert_eq!(result.summary.modified_files, 1);
        assert_eq!(result.summary.modified_functions, 1);
        // Entities inside a wholly added file are file-level news, not
        // entity-level changes.
        assert_eq!(result.summary.added_functions, 0);
    }
}
