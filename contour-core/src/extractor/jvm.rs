//! Java / C# declaration patterns.
//!
//! Both languages put essentially everything inside a class, so top-level
//! functions are rare; the interesting matches are class declarations with
//! their inheritance clause and the modifier-prefixed methods inside them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::EntityKind;

use super::helpers::{sibling_end, Decl};

static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:(?:public|private|protected|internal|abstract|final|sealed|static|partial)[ \t]+)*(?:class|interface)[ \t]+([A-Za-z_]\w*)(?:[ \t]*(?:extends|implements|:)[ \t]*([^{\n]+?))?[ \t]*\{",
    )
    .unwrap()
});

static METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]+(?:(?:public|private|protected|internal|static|final|abstract|virtual|override|async|synchronized)[ \t]+)*([\w<>\[\],. ]+?)[ \t]+([A-Za-z_]\w*)[ \t]*\(([^)]*)\)[ \t]*(?:throws[ \t][\w,. \t]+)?\{",
    )
    .unwrap()
});

pub(crate) fn declarations(source: &str) -> Vec<Decl> {
    let mut decls = Vec::new();

    let mut class_decls = Vec::new();
    for caps in CLASS_RE.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        class_decls.push(
            Decl::new(EntityKind::Class, &caps[1], whole.start(), whole.end())
                .with_bases(caps.get(2).map(|m| m.as_str())),
        );
    }

    let mut top_starts: Vec<usize> = class_decls.iter().map(|d| d.start).collect();
    top_starts.sort_unstable();

    for class in &class_decls {
        let span_end = sibling_end(&top_starts, class.start, source.len());
        let span = &source[class.sig_end..span_end];
        for caps in METHOD_RE.captures_iter(span) {
            let name = &caps[2];
            // Constructors carry the class name and no return type slot we
            // can trust; skip them.
            if name == class.name {
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
