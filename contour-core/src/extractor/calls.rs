//! Call-site extraction.
//!
//! A coarse per-language sweep for `name(...)` shapes, keeping qualified
//! callees (`obj.method`, `ns::func`) as written. Control-flow keywords
//! that look like calls are filtered, and duplicates are dropped keeping
//! the first occurrence.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::language::Language;

static PY_CALL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([\w.]+)[ \t]*\(").unwrap());

static JS_CALL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:(\w+)\.)?(\w+)[ \t]*\(").unwrap());

static CPP_CALL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:(\w+)::)?(\w+)[ \t]*\(").unwrap());

const PY_SKIP: &[&str] = &["if", "for", "while", "with", "print", "elif", "else"];
const BRACE_SKIP: &[&str] = &["if", "for", "while", "switch", "catch"];

pub(crate) fn extract(source: &str, language: Language) -> Vec<String> {
    let mut calls = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut push = |call: String| {
        if seen.insert(call.clone()) {
            calls.push(call);
        }
    };

    match language {
        Language::Python => {
            for caps in PY_CALL_RE.captures_iter(source) {
                let name = &caps[1];
                let last = name.rsplit('.').next().unwrap_or(name);
                if PY_SKIP.contains(&last) {
                    continue;
                }
                push(name.to_string());
            }
        }
        Language::C | Language::Cpp => {
            for caps in CPP_CALL_RE.captures_iter(source) {
                let name = &caps[2];
                if BRACE_SKIP.contains(&name) {
                    continue;
                }
                match caps.get(1) {
                    Some(ns) => push(format!("{}::{}", ns.as_str(), name)),
                    None => push(name.to_string()),
                }
            }
        }
        _ => {
            for caps in JS_CALL_RE.captures_iter(source) {
                let name = &caps[2];
                if BRACE_SKIP.contains(&name) {
                    continue;
                }
                match caps.get(1) {
                    Some(obj) => push(format!("{}.{}", obj.as_str(), name)),
                    None => push(name.to_string()),
                }
            }
        }
    }

    calls
}
