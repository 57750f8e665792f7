//! Import and include extraction.
//!
//! Each language contributes a small set of line-anchored patterns; the
//! resulting `Import` list keeps source order and feeds the dependency
//! resolver. Aliases are kept inside the raw `names` strings, never
//! normalized away.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::language::Language;
use crate::types::{Import, ImportKind};

static PY_IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*import[ \t]+([\w.]+)(?:[ \t]+as[ \t]+(\w+))?").unwrap());

static PY_FROM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*from[ \t]+([\w.]+)[ \t]+import[ \t]+(.+)").unwrap());

static JS_DEFAULT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import[ \t]+(\w+)[ \t]+from[ \t]+['"]([^'"]*)['"]"#).unwrap());

static JS_DESTRUCTURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import[ \t]+\{[ \t]*([^}]*?)[ \t]*\}[ \t]+from[ \t]+['"]([^'"]*)['"]"#).unwrap()
});

static JS_NAMESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import[ \t]+\*[ \t]+as[ \t]+(\w+)[ \t]+from[ \t]+['"]([^'"]*)['"]"#).unwrap()
});

static JS_REQUIRE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:const|let|var)[ \t]+(\w+|\{[^}]*\})[ \t]*=[ \t]*require\(['"]([^'"]*)['"]\)"#)
        .unwrap()
});

static SYSTEM_INCLUDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[ \t]*include[ \t]*<([^>]*)>").unwrap());

static LOCAL_INCLUDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"#[ \t]*include[ \t]*"([^"]*)""#).unwrap());

static USING_NAMESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*using[ \t]+namespace[ \t]+([\w:]+)").unwrap());

static JAVA_IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*import[ \t]+(?:static[ \t]+)?([\w.*]+)[ \t]*;").unwrap());

static CSHARP_USING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*using[ \t]+([\w.]+)[ \t]*;").unwrap());

pub(crate) fn extract(source: &str, language: Language) -> Vec<Import> {
    match language {
        Language::Python => python(source),
        Language::Javascript | Language::Typescript => javascript(source),
        Language::C | Language::Cpp => cfamily(source),
        Language::Java => java(source),
        Language::Csharp => csharp(source),
    }
}

fn python(source: &str) -> Vec<Import> {
    let mut imports = Vec::new();

    for caps in PY_IMPORT_RE.captures_iter(source) {
        let mut import = Import::new(&caps[1], ImportKind::Plain);
        if let Some(alias) = caps.get(2) {
            import.names.push(format!("as {}", alias.as_str()));
        }
        imports.push(import);
    }

    for caps in PY_FROM_RE.captures_iter(source) {
        let items = caps[2].replace(['(', ')'], "");
        let names: Vec<String> = items
            .split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        imports.push(Import::new(&caps[1], ImportKind::From).with_names(names));
    }

    imports
}

fn javascript(source: &str) -> Vec<Import> {
    let mut imports = Vec::new();

    // Destructure and namespace forms first so the plain-default pattern
    // cannot shadow them.
    for caps in JS_DESTRUCTURE_RE.captures_iter(source) {
        let names: Vec<String> = caps[1]
            .split(',')
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        imports.push(Import::new(&caps[2], ImportKind::Destructure).with_names(names));
    }

    for caps in JS_NAMESPACE_RE.captures_iter(source) {
        imports.push(
            Import::new(&caps[2], ImportKind::Namespace).with_names(vec![caps[1].to_string()]),
        );
    }

    for caps in JS_DEFAULT_RE.captures_iter(source) {
        imports.push(
            Import::new(&caps[2], ImportKind::Default).with_names(vec![caps[1].to_string()]),
        );
    }

    for caps in JS_REQUIRE_RE.captures_iter(source) {
        imports.push(
            Import::new(&caps[2], ImportKind::Require).with_names(vec![caps[1].to_string()]),
        );
    }

    imports
}

fn cfamily(source: &str) -> Vec<Import> {
    let mut imports = Vec::new();

    for caps in SYSTEM_INCLUDE_RE.captures_iter(source) {
        imports.push(Import::new(&caps[1], ImportKind::SystemInclude));
    }
    for caps in LOCAL_INCLUDE_RE.captures_iter(source) {
        imports.push(Import::new(&caps[1], ImportKind::LocalInclude));
    }
    for caps in USING_NAMESPACE_RE.captures_iter(source) {
        imports.push(Import::new(&caps[1], ImportKind::UsingNamespace));
    }

    imports
}

fn java(source: &str) -> Vec<Import> {
    JAVA_IMPORT_RE
        .captures_iter(source)
        .map(|caps| Import::new(&caps[1], ImportKind::Plain))
        .collect()
}

fn csharp(source: &str) -> Vec<Import> {
    CSHARP_USING_RE
        .captures_iter(source)
        .map(|caps| Import::new(&caps[1], ImportKind::Plain))
        .collect()
}
