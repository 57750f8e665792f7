//! Doc association heuristics.
//!
//! For each extracted declaration we look in two places:
//!
//! 1. Backward from the line immediately above the declaration, collecting a
//!    contiguous run of single-line comments (`#` or `//`). Any non-comment
//!    line — including a blank one — breaks the run, so a comment separated
//!    from the declaration by a blank line is not attached.
//! 2. Forward past the declaration's terminator for a block/doc comment
//!    (`"""`/`'''` for Python, `/* */` or `/** */` for C-family and JS)
//!    beginning on the very next non-blank line.
//!
//! When both are found they are joined with a blank line, leading run first.
//! An unterminated block comment ends the search gracefully with no doc.

use crate::language::Language;

use super::helpers::line_start;

/// Attach the nearest qualifying comment text to a declaration, if any.
pub(crate) fn associate(
    source: &str,
    decl_start: usize,
    sig_end: usize,
    language: Language,
) -> Option<String> {
    let leading = leading_run(source, decl_start, language.line_comment());
    let block = trailing_block(source, sig_end, language);

    match (leading, block) {
        (Some(lead), Some(block)) => Some(format!("{}\n\n{}", lead, block)),
        (Some(lead), None) => Some(lead),
        (None, Some(block)) => Some(block),
        (None, None) => None,
    }
}

/// Collect the contiguous line-comment run ending on the line immediately
/// above the declaration.
fn leading_run(source: &str, decl_start: usize, marker: &str) -> Option<String> {
    let decl_line = line_start(source, decl_start);
    let mut run: Vec<&str> = Vec::new();
    let mut end = decl_line;

    while end > 0 {
        let start = line_start(source, end - 1);
        let line = source[start..end].trim_end_matches(['\n', '\r']);
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(marker) {
            // Doc variants repeat the marker character (`///`, `##`).
            let rest = rest.trim_start_matches(marker.chars().next().unwrap_or(' '));
            run.push(rest.strip_prefix(' ').unwrap_or(rest));
            end = start;
        } else {
            break;
        }
    }

    if run.is_empty() {
        return None;
    }
    run.reverse();
    Some(run.join("\n").trim().to_string()).filter(|s| !s.is_empty())
}

/// Find a block/doc comment starting on the first non-blank line after the
/// signature terminator.
fn trailing_block(source: &str, sig_end: usize, language: Language) -> Option<String> {
    let rest = source.get(sig_end..)?;

    // Anything other than whitespace on the remainder of the signature line
    // is a statement, not a doc comment.
    let (same_line, after) = match rest.find('\n') {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => (rest, ""),
    };
    if !same_line.trim().is_empty() {
        return None;
    }

    let mut remaining = after;
    loop {
        let (line, tail) = match remaining.find('\n') {
            Some(i) => (&remaining[..i], &remaining[i + 1..]),
            None => (remaining, ""),
        };
        if line.trim().is_empty() {
            if tail.is_empty() {
                return None;
            }
            remaining = tail;
            continue;
        }
        // First non-blank line; it must begin the block comment.
        return parse_block(remaining, line.trim_start(), language);
    }
}

fn parse_block(text: &str, first_line: &str, language: Language) -> Option<String> {
    let (open, close) = if language.uses_docstrings() {
        if first_line.starts_with("\"\"\"") {
            ("\"\"\"", "\"\"\"")
        } else if first_line.starts_with("'''") {
            ("'''", "'''")
        } else {
            return None;
        }
    } else if first_line.starts_with("/*") {
        ("/*", "*/")
    } else {
        return None;
    };

    let body_start = text.find(open)? + open.len();
    let inner = &text[body_start..];
    // Unterminated block: stop the search gracefully, attach nothing.
    let body_end = inner.find(close)?;
    let raw = &inner[..body_end];

    let cleaned: Vec<String> = raw
        .lines()
        .map(|line| {
            let line = line.trim_start();
            // Strip the decorative asterisk column of /** */ comments.
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end().to_string()
        })
        .collect();

    Some(cleaned.join("\n").trim().to_string()).filter(|s| !s.is_empty())
}
