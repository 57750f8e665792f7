//! JavaScript / TypeScript declaration patterns.
//!
//! Covers `function` declarations, arrow functions bound with
//! `const`/`let`/`var`, `class` declarations with their `extends` clause,
//! and methods found inside an approximate class span. TypeScript return
//! annotations are captured when present.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::EntityKind;

use super::helpers::{sibling_end, Decl};

static FUNCTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^([ \t]*)(?:export[ \t]+)?(?:async[ \t]+)?function[ \t]+([A-Za-z_$][\w$]*)[ \t]*\(([^)]*)\)(?:[ \t]*:[ \t]*([^{\n]+?))?[ \t]*\{",
    )
    .unwrap()
});

static ARROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^([ \t]*)(?:export[ \t]+)?(?:const|let|var)[ \t]+([A-Za-z_$][\w$]*)[ \t]*=[ \t]*(?:async[ \t]*)?\(([^)]*)\)(?:[ \t]*:[ \t]*([^=\n]+?))?[ \t]*=>",
    )
    .unwrap()
});

static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:export[ \t]+)?(?:abstract[ \t]+)?class[ \t]+([A-Za-z_$][\w$]*)(?:[ \t]+(?:extends|implements)[ \t]+([^{\n]+?))?[ \t]*\{",
    )
    .unwrap()
});

static METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]+(?:async[ \t]+)?(?:static[ \t]+)?([A-Za-z_$][\w$]*)[ \t]*\(([^)]*)\)(?:[ \t]*:[ \t]*([^{\n]+?))?[ \t]*\{",
    )
    .unwrap()
});

pub(crate) fn declarations(source: &str) -> Vec<Decl> {
    let mut decls = Vec::new();

    // A declaration at zero indentation is a top-level Function; anything
    // indented is nested and keyed by its enclosing scope, like an
    // indented `def` in Python.
    for caps in FUNCTION_RE.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        let indent = caps.get(1).map(|m| m.len()).unwrap_or(0);
        let kind = if indent == 0 {
            EntityKind::Function
        } else {
            EntityKind::Method
        };
        decls.push(
            Decl::new(kind, &caps[2], whole.start(), whole.end())
                .with_params(caps.get(3).map(|m| m.as_str()).unwrap_or(""))
                .with_return_type(caps.get(4).map(|m| m.as_str()))
                .with_depth(indent),
        );
    }

    for caps in ARROW_RE.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        let indent = caps.get(1).map(|m| m.len()).unwrap_or(0);
        let kind = if indent == 0 {
            EntityKind::Function
        } else {
            EntityKind::Method
        };
        decls.push(
            Decl::new(kind, &caps[2], whole.start(), whole.end())
                .with_params(caps.get(3).map(|m| m.as_str()).unwrap_or(""))
                .with_return_type(caps.get(4).map(|m| m.as_str()))
                .with_depth(indent),
        );
    }

    let mut class_decls = Vec::new();
    for caps in CLASS_RE.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        class_decls.push(
            Decl::new(EntityKind::Class, &caps[1], whole.start(), whole.end())
                .with_bases(caps.get(2).map(|m| m.as_str())),
        );
    }

    // Approximate class spans end at the next top-level declaration; scan
    // those spans for methods.
    let mut top_starts: Vec<usize> = decls
        .iter()
        .filter(|d| d.depth == 0)
        .chain(class_decls.iter())
        .map(|d| d.start)
        .collect();
    top_starts.sort_unstable();

    for class in &class_decls {
        let span_end = sibling_end(&top_starts, class.start, source.len());
        let span = &source[class.sig_end..span_end];
        for caps in METHOD_RE.captures_iter(span) {
            let name = &caps[1];
            if name == "constructor" {
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
                .with_params(caps.get(2).map(|m| m.as_str()).unwrap_or(""))
                .with_return_type(caps.get(3).map(|m| m.as_str()))
                .with_depth(1),
            );
        }
    }

    decls.extend(class_decls);
    decls
}
