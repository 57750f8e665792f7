//! Language classification from file extensions.
//!
//! Classification is a pure function of the extension (case-insensitive).
//! Unrecognized extensions yield `None` and the file is silently excluded
//! from extraction; that is a skip condition, not an error.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A recognized source language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Typescript,
    C,
    Cpp,
    Java,
    Csharp,
}

impl Language {
    /// Classify a path by its extension. Returns `None` for anything
    /// contour does not know how to extract.
    pub fn from_path(path: &Path) -> Option<Language> {
        let ext = path.extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Classify a bare extension (without the leading dot).
    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext.to_lowercase().as_str() {
            "py" | "pyw" => Some(Language::Python),
            "js" | "jsx" | "mjs" => Some(Language::Javascript),
            "ts" | "tsx" => Some(Language::Typescript),
            "c" | "h" => Some(Language::C),
            "cpp" | "cc" | "hpp" => Some(Language::Cpp),
            "java" => Some(Language::Java),
            "cs" => Some(Language::Csharp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Csharp => "csharp",
        }
    }

    /// Single-line comment marker used for doc association.
    pub fn line_comment(&self) -> &'static str {
        match self {
            Language::Python => "#",
            _ => "//",
        }
    }

    /// Whether the language attaches docs as string literals after the
    /// declaration (Python docstrings) rather than block comments.
    pub fn uses_docstrings(&self) -> bool {
        matches!(self, Language::Python)
    }

    /// Control-flow keywords that generic call/paren patterns mistake for
    /// declarations. Matches with these names are discarded as false
    /// positives.
    pub fn reserved_keywords(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &["if", "for", "while", "with", "elif", "else", "try", "except"],
            Language::Javascript | Language::Typescript => {
                &["if", "for", "while", "switch", "catch", "return", "do", "else"]
            }
            Language::C | Language::Cpp => {
                &["if", "for", "while", "switch", "catch", "return", "sizeof", "do"]
            }
            Language::Java | Language::Csharp => {
                &["if", "for", "while", "switch", "catch", "return", "do", "else", "new"]
            }
        }
    }

    /// Whether a keyword is reserved for this language.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_keywords().contains(&name)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
