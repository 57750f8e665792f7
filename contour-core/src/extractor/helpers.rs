//! Shared machinery for the per-language extractors.
//!
//! Each language module produces a flat list of raw declarations with byte
//! offsets and nesting depths. The helpers here turn that list into final
//! entities: body spans by lookahead to the next declaration at the same or
//! lower depth, keyword false-positive filtering, owner resolution for
//! methods, and first-occurrence deduplication.

use std::collections::HashSet;

use crate::language::Language;
use crate::types::{Entity, EntityKind, Signature};

use super::doc;

/// A raw declaration match before body/doc assignment.
#[derive(Clone, Debug)]
pub(crate) struct Decl {
    pub kind: EntityKind,
    pub name: String,
    pub params: String,
    pub return_type: Option<String>,
    pub bases: Option<String>,
    /// Byte offset where the declaration match starts.
    pub start: usize,
    /// Byte offset just past the signature terminator (`:`, `{`, `=>`).
    pub sig_end: usize,
    /// Nesting depth. Indentation width for Python; 0 for top-level and 1
    /// for class members in brace languages.
    pub depth: usize,
}

impl Decl {
    pub fn new(kind: EntityKind, name: impl Into<String>, start: usize, sig_end: usize) -> Self {
        Self {
            kind,
            name: name.into(),
            params: String::new(),
            return_type: None,
            bases: None,
            start,
            sig_end,
            depth: 0,
        }
    }

    pub fn with_params(mut self, params: &str) -> Self {
        self.params = params.trim().to_string();
        self
    }

    pub fn with_return_type(mut self, ret: Option<&str>) -> Self {
        self.return_type = ret.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        self
    }

    pub fn with_bases(mut self, bases: Option<&str>) -> Self {
        self.bases = bases.map(|b| b.trim().to_string()).filter(|b| !b.is_empty());
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

/// Compute the body span for the declaration at `index`: from the end of
/// its signature to the start of the next declaration at the same or lower
/// depth, or end of file.
///
/// This is a lookahead over matched declarations, not brace or indentation
/// balancing. Nested non-declaration braces or string literals containing
/// declaration-like text can mis-span a body; that imprecision is accepted.
fn body_span(source: &str, decls: &[Decl], index: usize) -> String {
    let decl = &decls[index];
    let end = decls[index + 1..]
        .iter()
        .find(|d| d.depth <= decl.depth)
        .map(|d| d.start)
        .unwrap_or(source.len());
    let start = decl.sig_end.min(end);
    source[start..end].trim().to_string()
}

/// Resolve the owning class for each method declaration by scanning with a
/// scope stack: the owner is the nearest enclosing class declaration, and a
/// method's key becomes `"Owner.name"`. A nested declaration with no
/// enclosing class keeps its bare name.
fn qualify_methods(decls: &mut [Decl]) {
    let mut stack: Vec<(EntityKind, String, usize)> = Vec::new();

    for decl in decls.iter_mut() {
        while let Some((_, _, depth)) = stack.last() {
            if *depth >= decl.depth {
                stack.pop();
            } else {
                break;
            }
        }

        if decl.kind == EntityKind::Method {
            let owner = stack
                .iter()
                .rev()
                .find(|(kind, _, _)| *kind == EntityKind::Class)
                .map(|(_, name, _)| name.clone());
            if let Some(owner) = owner {
                decl.name = format!("{}.{}", owner, decl.name);
            }
        }

        stack.push((decl.kind, decl.name.clone(), decl.depth));
    }
}

/// Result of finalizing a declaration list.
pub(crate) struct Finalized {
    pub functions: Vec<Entity>,
    pub classes: Vec<Entity>,
    pub methods: Vec<Entity>,
    pub duplicates_dropped: u32,
}

/// Turn raw declarations into final entities: sort by position, drop
/// keyword false positives, assign bodies and docs, qualify method names,
/// and deduplicate keeping the first occurrence in source order.
pub(crate) fn finalize(source: &str, language: Language, mut decls: Vec<Decl>) -> Finalized {
    decls.sort_by_key(|d| d.start);
    decls.retain(|d| !language.is_reserved(&d.name));
    qualify_methods(&mut decls);

    let mut functions = Vec::new();
    let mut classes = Vec::new();
    let mut methods = Vec::new();
    let mut seen: HashSet<(EntityKind, String)> = HashSet::new();
    let mut duplicates_dropped = 0u32;

    for index in 0..decls.len() {
        let decl = &decls[index];
        if !seen.insert((decl.kind, decl.name.clone())) {
            duplicates_dropped += 1;
            continue;
        }

        let entity = Entity {
            kind: decl.kind,
            name: decl.name.clone(),
            signature: Signature {
                params: decl.params.clone(),
                return_type: decl.return_type.clone(),
                bases: decl.bases.clone(),
            },
            body: body_span(source, &decls, index),
            doc: doc::associate(source, decl.start, decl.sig_end, language),
        };

        match decl.kind {
            EntityKind::Function => functions.push(entity),
            EntityKind::Class => classes.push(entity),
            EntityKind::Method => methods.push(entity),
        }
    }

    Finalized {
        functions,
        classes,
        methods,
        duplicates_dropped,
    }
}

/// End of a top-level construct's span: the start of the next top-level
/// declaration after `start`, or end of file. `starts` must be sorted.
pub(crate) fn sibling_end(starts: &[usize], start: usize, source_len: usize) -> usize {
    starts
        .iter()
        .copied()
        .find(|&s| s > start)
        .unwrap_or(source_len)
}

/// Byte offset of the start of the line containing `offset`.
pub(crate) fn line_start(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0)
}
