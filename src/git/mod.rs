//! Git operations using git2-rs.

pub mod changes;
pub mod commit;

pub use changes::{ChangeKind, ChangeSet, PendingChange, collect_changes, stage_changes};
pub use commit::{CommitResult, DiffStat, commit_staged, current_branch, diff_stat};
