//! Working tree inspection and staging using git2.

use std::path::Path;

use git2::{Repository, Status, StatusOptions};
use tracing::{debug, warn};

use crate::error::CommitError;

/// How a changed path gets into the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Untracked, modified, or type-changed: add the working tree content.
    Add,
    /// Deleted from the working tree: remove from the index.
    Remove,
}

/// A path that differs between the index and the working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange {
    pub path: String,
    pub kind: ChangeKind,
}

/// The paths staged by [`stage_changes`], sorted and de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    paths: Vec<String>,
}

impl ChangeSet {
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.binary_search_by(|p| p.as_str().cmp(path)).is_ok()
    }
}

impl FromIterator<String> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut paths: Vec<String> = iter.into_iter().collect();
        paths.sort();
        paths.dedup();
        Self { paths }
    }
}

/// List untracked and modified files in the working tree.
///
/// Only differences between the index and the working tree count; changes
/// that are already staged are left alone. Ignored files, submodules and
/// untracked nested repositories are skipped.
pub fn collect_changes(repo: &Repository) -> Result<Vec<PendingChange>, CommitError> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false)
        .exclude_submodules(true);

    let statuses = repo
        .statuses(Some(&mut opts))
        .map_err(CommitError::StatusFailed)?;

    let mut changes = Vec::new();
    for entry in statuses.iter() {
        let status = entry.status();
        let kind = if status.contains(Status::WT_DELETED) {
            ChangeKind::Remove
        } else if status.intersects(
            Status::WT_NEW | Status::WT_MODIFIED | Status::WT_TYPECHANGE | Status::WT_RENAMED,
        ) {
            ChangeKind::Add
        } else {
            continue;
        };

        match entry.path() {
            // An untracked repository inside the work tree is listed as `dir/`
            Some(path) if path.ends_with('/') => {
                warn!("Skipping nested git repository {path}");
            }
            Some(path) => changes.push(PendingChange {
                path: path.to_string(),
                kind,
            }),
            None => warn!("Skipping changed path that is not valid UTF-8"),
        }
    }

    changes.sort_by(|a, b| a.path.cmp(&b.path));
    changes.dedup_by(|a, b| a.path == b.path);
    Ok(changes)
}

/// Stage every untracked and modified file, one path at a time.
///
/// Returns [`CommitError::NoChanges`] when the working tree matches the
/// index. A failure on any single path aborts staging; paths handled before
/// it stay in the in-memory index but the index is not written.
pub fn stage_changes(repo: &Repository) -> Result<ChangeSet, CommitError> {
    let changes = collect_changes(repo)?;
    if changes.is_empty() {
        return Err(CommitError::NoChanges);
    }

    let mut index = repo.index().map_err(CommitError::StagingFailed)?;
    for change in &changes {
        debug!("Staging {:?} {}", change.kind, change.path);
        let path = Path::new(&change.path);
        let staged = match change.kind {
            ChangeKind::Add => index.add_path(path),
            ChangeKind::Remove => index.remove_path(path),
        };
        staged.map_err(CommitError::StagingFailed)?;
    }
    index.write().map_err(CommitError::StagingFailed)?;

    Ok(changes.into_iter().map(|c| c.path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_set_sorts_and_dedups() {
        let set: ChangeSet = ["b.txt", "a.txt", "b.txt"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(set.paths(), ["a.txt".to_string(), "b.txt".to_string()]);
        assert!(set.contains("a.txt"));
        assert!(!set.contains("c.txt"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_collect_changes_on_fresh_repo_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        assert!(collect_changes(&repo).unwrap().is_empty());
        assert!(matches!(stage_changes(&repo), Err(CommitError::NoChanges)));
    }

    #[test]
    fn test_collect_changes_recurses_into_untracked_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        std::fs::create_dir_all(dir.path().join("src/nested")).unwrap();
        std::fs::write(dir.path().join("src/nested/lib.rs"), "fn main() {}\n").unwrap();

        let changes = collect_changes(&repo).unwrap();
        assert_eq!(
            changes,
            vec![PendingChange {
                path: "src/nested/lib.rs".to_string(),
                kind: ChangeKind::Add,
            }]
        );
    }

    #[test]
    fn test_collect_changes_skips_ignored_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        std::fs::write(dir.path().join(".gitignore"), "target/\n").unwrap();
        std::fs::create_dir_all(dir.path().join("target")).unwrap();
        std::fs::write(dir.path().join("target/out.o"), [0u8, 1, 2]).unwrap();

        let paths: Vec<String> = collect_changes(&repo)
            .unwrap()
            .into_iter()
            .map(|c| c.path)
            .collect();
        assert_eq!(paths, vec![".gitignore".to_string()]);
    }

    #[test]
    fn test_stage_changes_on_bare_repo_fails() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init_bare(dir.path()).unwrap();

        assert!(matches!(
            stage_changes(&repo),
            Err(CommitError::StatusFailed(_))
        ));
    }
}
