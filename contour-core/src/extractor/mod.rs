//! Pattern-based structural extraction.
//!
//! Each language module turns source text into a flat declaration list;
//! the shared helpers assign body spans, docs, owners, and dedup. No
//! parsing or AST construction happens anywhere — everything is anchored
//! regular expressions over raw text, with the imprecision that implies.

use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::language::Language;
use crate::types::{FileRecord, SourceFile};

pub(crate) mod calls;
pub(crate) mod cfamily;
pub(crate) mod doc;
pub(crate) mod helpers;
pub(crate) mod imports;
pub(crate) mod javascript;
pub(crate) mod jvm;
pub(crate) mod python;

/// Extract entities, imports, and call sites from one source text.
pub fn extract(path: &str, language: Language, source: &str) -> FileRecord {
    let decls = match language {
        Language::Python => python::declarations(source),
        Language::Javascript | Language::Typescript => javascript::declarations(source),
        Language::C | Language::Cpp => cfamily::declarations(source, language),
        Language::Java | Language::Csharp => jvm::declarations(source),
    };

    let finalized = helpers::finalize(source, language, decls);

    let mut record = FileRecord::empty(path, language);
    record.functions = finalized.functions;
    record.classes = finalized.classes;
    record.methods = finalized.methods;
    record.duplicates_dropped = finalized.duplicates_dropped;
    record.imports = imports::extract(source, language);
    record.calls = calls::extract(source, language);
    record
}

/// Extract one file behind a panic boundary.
///
/// A failure here must never abort the surrounding snapshot build: the
/// file's record survives with an `error` annotation and no entities, and
/// the rest of the tree proceeds.
pub fn extract_file(file: &SourceFile) -> FileRecord {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        extract(&file.path, file.language, &file.source)
    }));

    match result {
        Ok(record) => record,
        Err(cause) => {
            let message = cause
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| cause.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "extraction failed".to_string());
            warn!(path = %file.path, error = %message, "file extraction failed");
            let mut record = FileRecord::empty(&file.path, file.language);
            record.error = Some(message);
            record
        }
    }
}
