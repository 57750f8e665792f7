//! Semantic diff between two snapshots.

mod categorize;
mod changes;
mod engine;

pub use categorize::{categorize, classify_changes, ChangeCategory, ChangeGroups};
pub use changes::{
    CategoryChanges, DiffResult, DiffSummary, EntityDiff, EntityRef, FileChanges, FileDiff,
    ModifiedPair,
};
pub use engine::diff;
