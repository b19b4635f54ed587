//! Commit creation from the staged index and the resulting summary.

use std::fmt;

use git2::{Commit, ErrorCode, Oid, Repository};
use tracing::debug;

use crate::error::CommitError;

/// Branch label used when HEAD does not point at a branch.
const DETACHED_HEAD: &str = "detached HEAD";

/// Totals from a commit's diff against its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStat {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

/// The outcome of creating a commit, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    pub branch: String,
    pub id: Oid,
    pub short_id: String,
    /// First line of the commit message.
    pub summary: String,
    pub stats: DiffStat,
}

impl fmt::Display for CommitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {}] {}\r\n{} file(s) changed, {} insertions(+), {} deletions(-)",
            self.branch,
            self.short_id,
            self.summary,
            self.stats.files_changed,
            self.stats.insertions,
            self.stats.deletions
        )
    }
}

/// Resolve the commit HEAD points at, if any.
///
/// Returns `Ok(None)` for an unborn branch (no commits yet).
fn resolve_head_commit(repo: &Repository) -> Result<Option<Commit<'_>>, CommitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(CommitError::CommitFailed(e)),
    };

    let commit = head_ref.peel_to_commit().map_err(CommitError::CommitFailed)?;
    Ok(Some(commit))
}

/// Name of the branch HEAD points at, or `detached HEAD`.
pub fn current_branch(repo: &Repository) -> Result<String, CommitError> {
    let head = repo.head().map_err(CommitError::CommitFailed)?;
    if !head.is_branch() {
        return Ok(DETACHED_HEAD.to_string());
    }
    Ok(head.shorthand().unwrap_or(DETACHED_HEAD).to_string())
}

/// Compute the diffstat of `commit` against its first parent.
///
/// A root commit is compared against the empty tree.
pub fn diff_stat(repo: &Repository, commit: &Commit<'_>) -> Result<DiffStat, CommitError> {
    let tree = commit.tree().map_err(CommitError::StatsFailed)?;
    let parent_tree = match commit.parents().next() {
        Some(parent) => Some(parent.tree().map_err(CommitError::StatsFailed)?),
        None => None,
    };

    let diff = repo
        .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
        .map_err(CommitError::StatsFailed)?;
    let stats = diff.stats().map_err(CommitError::StatsFailed)?;

    Ok(DiffStat {
        files_changed: stats.files_changed(),
        insertions: stats.insertions(),
        deletions: stats.deletions(),
    })
}

/// Create a commit on HEAD from whatever is currently staged.
///
/// The author and committer come from the repository's git config. The
/// commit is created even if the index matches HEAD.
pub fn commit_staged(repo: &Repository, message: &str) -> Result<CommitResult, CommitError> {
    let mut index = repo.index().map_err(CommitError::CommitFailed)?;
    let tree_id = index.write_tree().map_err(CommitError::CommitFailed)?;
    let tree = repo.find_tree(tree_id).map_err(CommitError::CommitFailed)?;

    let sig = repo.signature().map_err(CommitError::ConfigError)?;

    let parent = resolve_head_commit(repo)?;
    let parents: Vec<&Commit<'_>> = parent.iter().collect();

    let oid = repo
        .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .map_err(CommitError::CommitFailed)?;
    debug!("Created commit {oid}");

    let commit = repo.find_commit(oid).map_err(CommitError::CommitFailed)?;
    let stats = diff_stat(repo, &commit)?;
    let short_id = commit
        .as_object()
        .short_id()
        .ok()
        .and_then(|buf| buf.as_str().map(String::from))
        .unwrap_or_else(|| oid.to_string()[..7].to_string());

    Ok(CommitResult {
        branch: current_branch(repo)?,
        id: oid,
        short_id,
        summary: message.lines().next().unwrap_or_default().to_string(),
        stats,
    })
}
