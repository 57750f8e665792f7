//! Data model for extracted code structure.
//!
//! These types capture the approximate, pattern-matched shape of a source
//! tree: per-file entity collections plus imports and call sites. All
//! fields are raw text fragments — nothing here is resolved or type-checked.
//! Entities and FileRecords are created once during extraction and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// The kind of extracted construct.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Function,
    Method,
    Class,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Function => "function",
            EntityKind::Method => "method",
            EntityKind::Class => "class",
        }
    }
}

/// Unparsed signature fragments for an entity.
///
/// `params` is the raw parameter list text; `return_type` and `bases` are
/// kept as written in the source when present. None means the construct has
/// no such fragment, never an empty capture.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub params: String,
    pub return_type: Option<String>,
    pub bases: Option<String>,
}

/// One extracted function, method, or class.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,

    /// Identifier. Methods are keyed `"Owner.name"` when the enclosing
    /// class is known. Unique within (file, kind) after deduplication,
    /// not globally.
    pub name: String,

    pub signature: Signature,

    /// Verbatim body text span. Used only for equality comparison during
    /// diffing, never interpreted. Not normalized beyond leading/trailing
    /// trim, so formatting-only edits inside a body register as changes.
    pub body: String,

    /// Associated leading comment and/or doc comment, when one is adjacent.
    pub doc: Option<String>,
}

impl Entity {
    /// Whether this entity should be reported as modified relative to an
    /// older version under the same name: body text differs, or the
    /// signature fragment relevant to its kind differs.
    pub fn differs_from(&self, old: &Entity) -> bool {
        if self.body != old.body {
            return true;
        }
        match self.kind {
            EntityKind::Function | EntityKind::Method => {
                self.signature.params != old.signature.params
                    || self.signature.return_type != old.signature.return_type
            }
            EntityKind::Class => self.signature.bases != old.signature.bases,
        }
    }
}

/// How an import was written in the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// `import module` (Python), `import pkg.Class;` (Java), `using Ns;` (C#)
    Plain,
    /// `from module import names` (Python)
    From,
    /// `import name from 'module'` (ES6)
    Default,
    /// `import * as name from 'module'` (ES6)
    Namespace,
    /// `import { a, b } from 'module'` (ES6)
    Destructure,
    /// `const x = require('module')` (CommonJS)
    Require,
    /// `#include <header>`
    SystemInclude,
    /// `#include "header"`
    LocalInclude,
    /// `using namespace ns;`
    UsingNamespace,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Plain => "import",
            ImportKind::From => "from_import",
            ImportKind::Default => "import_default",
            ImportKind::Namespace => "import_namespace",
            ImportKind::Destructure => "import_destructure",
            ImportKind::Require => "require",
            ImportKind::SystemInclude => "system_include",
            ImportKind::LocalInclude => "local_include",
            ImportKind::UsingNamespace => "namespace",
        }
    }
}

/// One import/include statement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Import {
    /// Declared module string as written: `"utils.helpers"`, `"./auth"`,
    /// `"vector"`.
    pub module: String,

    pub kind: ImportKind,

    /// Imported names for destructured/from-style imports; empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
}

impl Import {
    pub fn new(module: impl Into<String>, kind: ImportKind) -> Self {
        Self {
            module: module.into(),
            kind,
            names: Vec::new(),
        }
    }

    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = names;
        self
    }
}

/// Per-file extraction result: language tag plus categorized entities.
///
/// Collections keep source order (insertion order from extraction), which
/// the differ preserves in its output.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the analyzed root.
    pub path: String,

    pub language: Language,

    pub functions: Vec<Entity>,
    pub classes: Vec<Entity>,
    pub methods: Vec<Entity>,

    /// Import statements, in source order. Consumed by the dependency
    /// resolver.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<Import>,

    /// Call-site names, first occurrence only. Summary data; never diffed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<String>,

    /// Number of same-(kind, name) matches dropped during deduplication.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub duplicates_dropped: u32,

    /// Set when extraction failed for this file. The record then carries
    /// no entities but stays in the snapshot as an annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl FileRecord {
    pub fn empty(path: impl Into<String>, language: Language) -> Self {
        Self {
            path: path.into(),
            language,
            functions: Vec::new(),
            classes: Vec::new(),
            methods: Vec::new(),
            imports: Vec::new(),
            calls: Vec::new(),
            duplicates_dropped: 0,
            error: None,
        }
    }

    /// Whether any function, class, or method was extracted.
    pub fn has_entities(&self) -> bool {
        !self.functions.is_empty() || !self.classes.is_empty() || !self.methods.is_empty()
    }

    pub fn entity_count(&self) -> usize {
        self.functions.len() + self.classes.len() + self.methods.len()
    }
}

/// The complete set of FileRecords for one analyzed tree state.
///
/// Immutable after construction. Files that yielded zero entities (and no
/// extraction error) are omitted entirely — they never appear as empty
/// records.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub files: Vec<FileRecord>,
}

impl Snapshot {
    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A file handed to extraction by the tree-walking collaborator.
#[derive(Clone, Debug)]
pub struct SourceFile {
    /// Path relative to the analyzed root.
    pub path: String,
    pub language: Language,
    pub source: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, language: Language, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            language,
            source: source.into(),
        }
    }
}
