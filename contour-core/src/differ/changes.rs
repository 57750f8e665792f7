//! Result structures for the snapshot diff.

use serde::{Deserialize, Serialize};

use crate::types::Entity;

/// A `(file, name)` reference into a snapshot, used by the global
/// aggregate lists and the change classifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub file: String,
    pub name: String,
}

impl EntityRef {
    pub fn new(file: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            name: name.into(),
        }
    }
}

/// An entity present under the same name in both snapshots whose stored
/// content differs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModifiedPair {
    pub name: String,
    pub old: Entity,
    pub new: Entity,
}

/// Per-category entity changes within one file. Added entries carry the
/// new payload, removed entries the old one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityDiff {
    pub added: Vec<Entity>,
    pub removed: Vec<Entity>,
    pub modified: Vec<ModifiedPair>,
}

impl EntityDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Entity-level changes for one file, split by category.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FileChanges {
    pub functions: EntityDiff,
    pub classes: EntityDiff,
    pub methods: EntityDiff,
}

impl FileChanges {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty() && self.methods.is_empty()
    }
}

/// One entry in `DiffResult::modified_files`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileDiff {
    pub file: String,
    pub changes: FileChanges,
}

/// Global aggregate for one entity category: `(file, name)` references
/// only, full payloads live in the per-file detail.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CategoryChanges {
    pub added: Vec<EntityRef>,
    pub removed: Vec<EntityRef>,
    pub modified: Vec<EntityRef>,
}

impl CategoryChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

/// Complete diff between two snapshots.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DiffResult {
    pub added_files: Vec<String>,
    pub removed_files: Vec<String>,
    pub modified_files: Vec<FileDiff>,

    pub function_changes: CategoryChanges,
    pub class_changes: CategoryChanges,
    pub method_changes: CategoryChanges,

    pub summary: DiffSummary,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.added_files.is_empty()
            && self.removed_files.is_empty()
            && self.modified_files.is_empty()
            && self.function_changes.is_empty()
            && self.class_changes.is_empty()
            && self.method_changes.is_empty()
    }
}

/// Summary counts for a diff.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added_files: u32,
    pub removed_files: u32,
    pub modified_files: u32,

    pub added_functions: u32,
    pub removed_functions: u32,
    pub modified_functions: u32,

    pub added_classes: u32,
    pub removed_classes: u32,
    pub modified_classes: u32,

    pub added_methods: u32,
    pub removed_methods: u32,
    pub modified_methods: u32,
}

impl DiffSummary {
    /// Human-readable one-line-per-category summary.
    pub fn text(&self) -> String {
        let mut lines = Vec::new();
        let mut push = |label: &str, added: u32, removed: u32, modified: u32| {
            if added == 0 && removed == 0 && modified == 0 {
                return;
            }
            let mut parts = Vec::new();
            if added > 0 {
                parts.push(format!("{} added", added));
            }
            if removed > 0 {
                parts.push(format!("{} removed", removed));
            }
            if modified > 0 {
                parts.push(format!("{} modified", modified));
            }
            lines.push(format!("{}: {}", label, parts.join(", ")));
        };

        push(
            "files",
            self.added_files,
            self.removed_files,
            self.modified_files,
        );
        push(
            "functions",
            self.added_functions,
            self.removed_functions,
            self.modified_functions,
        );
        push(
            "classes",
            self.added_classes,
            self.removed_classes,
            self.modified_classes,
        );
        push(
            "methods",
            self.added_methods,
            self.removed_methods,
            self.modified_methods,
        );

        if lines.is_empty() {
            "no changes".to_string()
        } else {
            lines.join("\n")
        }
    }
}
