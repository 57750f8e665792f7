//! JSON serialization for snapshots, diffs, and graphs.

use serde::Serialize;

use crate::error::Result;

/// Serialize any exportable value, optionally pretty-printed.
pub fn export<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}
