//! C / C++ declaration patterns.
//!
//! Functions are matched by a return-type-then-name shape at the start of a
//! line; `class` declarations (C++ only) capture the raw inheritance clause.
//! Definitions indented inside a class span are classified as methods.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::language::Language;
use crate::types::EntityKind;

use super::helpers::{sibling_end, Decl};

static FUNCTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^((?:[\w:*&]+(?:[ \t]*<[^<>\n]*>)?[ \t]+)+)([A-Za-z_]\w*)[ \t]*\(([^)]*)\)[ \t]*(?:const[ \t]*)?\{",
    )
    .unwrap()
});

static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*class[ \t]+([A-Za-z_]\w*)[ \t]*(?::[ \t]*([^{\n]+?))?[ \t]*\{").unwrap()
});

static METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]+(?:(?:static|virtual|inline|explicit|constexpr)[ \t]+)*(?:([\w:<>*&]+)[ \t]+)?([A-Za-z_~]\w*)[ \t]*\(([^)]*)\)[ \t]*(?:const[ \t]*)?(?::[^{\n]*)?\{",
    )
    .unwrap()
});

pub(crate) fn declarations(source: &str, language: Language) -> Vec<Decl> {
    let mut decls = Vec::new();

    for caps in FUNCTION_RE.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        decls.push(
            Decl::new(EntityKind::Function, &caps[2], whole.start(), whole.end())
                .with_params(caps.get(3).map(|m| m.as_str()).unwrap_or(""))
                .with_return_type(caps.get(1).map(|m| m.as_str())),
        );
    }

    // Plain C has no classes; headers mapped to C skip this entirely.
    if language != Language::Cpp {
        return decls;
    }

    let mut class_decls = Vec::new();
    for caps in CLASS_RE.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        class_decls.push(
            Decl::new(EntityKind::Class, &caps[1], whole.start(), whole.end())
                .with_bases(caps.get(2).map(|m| m.as_str())),
        );
    }

    let mut top_starts: Vec<usize> = decls
        .iter()
        .chain(class_decls.iter())
        .map(|d| d.start)
        .collect();
    top_starts.sort_unstable();

    for class in &class_decls {
        let span_end = sibling_end(&top_starts, class.start, source.len());
        let span = &source[class.sig_end..span_end];
        for caps in METHOD_RE.captures_iter(span) {
            let name = &caps[2];
            // Constructors/destructors share the class name; skip them.
            if name.trim_start_matches('~') == class.name {
                continue;
            }
            let whole = caps.get(0).unwrap();
            decls.push(
                Decl::new(
                    EntityKind::Method,
                    name,
                    class.sig_end + whole.start(),
                    class.sig_end + whole.end(),
                )
                .with_params(caps.get(3).map(|m| m.as_str()).unwrap_or(""))
                .with_return_type(caps.get(1).map(|m| m.as_str()))
                .with_depth(1),
            );
        }
    }

    decls.extend(class_decls);
    decls
}
