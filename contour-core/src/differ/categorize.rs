//! Heuristic change categorization.
//!
//! Groups the added and modified functions of a diff by name substrings.
//! Classes and methods are never classified, and removed functions are
//! ignored. Precedence is fixed and first match wins.

use serde::{Deserialize, Serialize};

use super::changes::{DiffResult, EntityRef};

/// Category assigned to a changed function by name heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCategory {
    BugFix,
    Performance,
    Api,
    Feature,
    Refactor,
    Other,
}

impl ChangeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeCategory::BugFix => "bug_fix",
            ChangeCategory::Performance => "performance",
            ChangeCategory::Api => "api",
            ChangeCategory::Feature => "feature",
            ChangeCategory::Refactor => "refactor",
            ChangeCategory::Other => "other",
        }
    }
}

/// Classify a function name. Matching is case-insensitive and ordered;
/// the first rule that fires decides.
pub fn categorize(name: &str) -> ChangeCategory {
    let name = name.to_lowercase();
    if name.contains("fix") || name.contains("bug") {
        ChangeCategory::BugFix
    } else if name.contains("perf") || name.contains("optimize") || name.contains("performance") {
        ChangeCategory::Performance
    } else if name.contains("api") || name.starts_with("get") || name.starts_with("set") {
        ChangeCategory::Api
    } else if name.contains("feature") || name.contains("add") {
        ChangeCategory::Feature
    } else if name.contains("refactor") {
        ChangeCategory::Refactor
    } else {
        ChangeCategory::Other
    }
}

/// Changed-function references grouped by category.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChangeGroups {
    pub bug_fix: Vec<EntityRef>,
    pub performance: Vec<EntityRef>,
    pub api: Vec<EntityRef>,
    pub feature: Vec<EntityRef>,
    pub refactor: Vec<EntityRef>,
    pub other: Vec<EntityRef>,
}

impl ChangeGroups {
    fn push(&mut self, category: ChangeCategory, entry: EntityRef) {
        match category {
            ChangeCategory::BugFix => self.bug_fix.push(entry),
            ChangeCategory::Performance => self.performance.push(entry),
            ChangeCategory::Api => self.api.push(entry),
            ChangeCategory::Feature => self.feature.push(entry),
            ChangeCategory::Refactor => self.refactor.push(entry),
            ChangeCategory::Other => self.other.push(entry),
        }
    }
}

/// Group a diff's added and modified functions by category.
pub fn classify_changes(diff: &DiffResult) -> ChangeGroups {
    let mut groups = ChangeGroups::default();
    let entries = diff
        .function_changes
        .added
        .iter()
        .chain(diff.function_changes.modified.iter());
    for entry in entries {
        groups.push(categorize(&entry.name), entry.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::changes::CategoryChanges;

    #[test]
    fn test_get_prefix_is_api() {
        assert_eq!(categorize("getUserById"), ChangeCategory::Api);
        assert_eq!(categorize("setTimeout"), ChangeCategory::Api);
    }

    #[test]
    fn test_fix_wins_over_api() {
        assert_eq!(categorize("fix_api_cache"), ChangeCategory::BugFix);
    }

    #[test]
    fn test_precedence_chain() {
        assert_eq!(categorize("optimizeAddFeature"), ChangeCategory::Performance);
        assert_eq!(categorize("add_user"), ChangeCategory::Feature);
        assert_eq!(categorize("refactor_module"), ChangeCategory::Refactor);
        assert_eq!(categorize("handle_request"), ChangeCategory::Other);
    }

    #[test]
    fn test_classify_skips_removed_functions() {
        let mut diff = DiffResult::default();
        diff.function_changes = CategoryChanges {
            added: vec![EntityRef::new("a.py", "add_feature")],
            removed: vec![EntityRef::new("a.py", "fix_crash")],
            modified: vec![EntityRef::new("a.py", "get_token")],
        };
        let groups = classify_changes(&diff);
        assert_eq!(groups.feature.len(), 1);
        assert_eq!(groups.api.len(), 1);
        assert!(groups.bug_fix.is_empty());
    }
}
