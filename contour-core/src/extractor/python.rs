//! Python declaration patterns.
//!
//! `def` at zero indentation is a function; an indented `def` is a method
//! owned by the nearest enclosing `class` (keyed `Class.name`), or kept
//! under its bare name when no class encloses it. Depth is the indentation
//! width of the declaration line.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::EntityKind;

use super::helpers::Decl;

static DEF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^([ \t]*)(?:async[ \t]+)?def[ \t]+([A-Za-z_][A-Za-z0-9_]*)[ \t]*\(([^)]*)\)[ \t]*(?:->[ \t]*([^:\n]+))?:",
    )
    .unwrap()
});

static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*)class[ \t]+([A-Za-z_][A-Za-z0-9_]*)[ \t]*(?:\(([^)]*)\))?[ \t]*:")
        .unwrap()
});

pub(crate) fn declarations(source: &str) -> Vec<Decl> {
    let mut decls = Vec::new();

    for caps in DEF_RE.captures_iter(source) {
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

    for caps in CLASS_RE.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        let indent = caps.get(1).map(|m| m.len()).unwrap_or(0);
        decls.push(
            Decl::new(EntityKind::Class, &caps[2], whole.start(), whole.end())
                .with_bases(caps.get(3).map(|m| m.as_str()))
                .with_depth(indent),
        );
    }

    decls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::helpers::finalize;
    use crate::language::Language;

    fn run(source: &str) -> crate::extractor::helpers::Finalized {
        finalize(source, Language::Python, declarations(source))
    }

    #[test]
    fn test_top_level_function() {
        let out = run("def reverse_string(s):\n    return s[::-1]\n");
        assert_eq!(out.functions.len(), 1);
        assert_eq!(out.functions[0].name, "reverse_string");
        assert_eq!(out.functions[0].signature.params, "s");
        assert_eq!(out.functions[0].body, "return s[::-1]");
    }

    #[test]
    fn test_return_annotation_captured() {
        let out = run("def total(xs: list) -> int:\n    return sum(xs)\n");
        assert_eq!(
            out.functions[0].signature.return_type.as_deref(),
            Some("int")
        );
    }

    #[test]
    fn test_methods_keyed_by_owner() {
        let source = "\
class Calculator:
    def __init__(self, value=0):
        self.value = value

    def add(self, x):
        self.value += x
        return self.value
";
        let out = run(source);
        assert_eq!(out.classes.len(), 1);
        assert_eq!(out.classes[0].name, "Calculator");
        let names: Vec<&str> = out.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Calculator.__init__", "Calculator.add"]);
        assert!(out.functions.is_empty());
    }

    #[test]
    fn test_class_bases_captured_raw() {
        let out = run("class Child(Base, Mixin):\n    pass\n");
        assert_eq!(
            out.classes[0].signature.bases.as_deref(),
            Some("Base, Mixin")
        );
    }

    #[test]
    fn test_class_without_bases_is_none() {
        let out = run("class Plain:\n    pass\n");
        assert_eq!(out.classes[0].signature.bases, None);
    }

    #[test]
    fn test_leading_comment_and_docstring_joined() {
        let source = "\
# Adds two numbers
def add(a, b):
    \"\"\"Returns the sum.\"\"\"
    return a + b
";
        let out = run(source);
        assert_eq!(out.functions.len(), 1);
        assert_eq!(out.functions[0].name, "add");
        assert_eq!(
            out.functions[0].doc.as_deref(),
            Some("Adds two numbers\n\nReturns the sum.")
        );
    }

    #[test]
    fn test_function_body_ends_at_next_declaration() {
        let source = "def a():\n    x = 1\n    y = 2\n\ndef b():\n    pass\n";
        let out = run(source);
        assert_eq!(out.functions[0].body, "x = 1\n    y = 2");
    }

    #[test]
    fn test_nested_def_after_class_belongs_to_enclosing_function() {
        // A def nested in a top-level function is not owned by an earlier
        // class that has already closed.
        let source = "\
class A:
    def m(self):
        pass

def outer():
    def inner():
        pass
";
        let out = run(source);
        let names: Vec<&str> = out.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["A.m", "inner"]);
    }

    #[test]
    fn test_async_def_matches() {
        let out = run("async def fetch(url):\n    pass\n");
        assert_eq!(out.functions[0].name, "fetch");
    }
}
