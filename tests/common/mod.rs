//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature};
use lint_along::{OutputPolicy, ProcessRunner, Song, SongPool};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository with a committer identity configured.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config
            .set_str("user.name", "Test User")
            .expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");

        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the repository root, creating parent dirs.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Commit the given files as they are on disk. Returns the commit OID.
    pub fn commit_files(&self, files: &[&str], message: &str) -> Oid {
        let sig =
            Signature::now("Test User", "test@example.com").expect("Failed to create signature");

        let mut index = self.repo.index().expect("Failed to get index");
        for file in files {
            index.add_path(Path::new(file)).expect("Failed to add file");
        }
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Whether `path` has an entry in the index.
    pub fn is_staged(&self, path: &str) -> bool {
        let index = self.repo.index().expect("Failed to get index");
        index.get_path(Path::new(path), 0).is_some()
    }

    /// Blank out the committer identity so signing a commit fails.
    pub fn clear_identity(&self) {
        let mut config = self.repo.config().expect("Failed to open repo config");
        config
            .set_str("user.name", "")
            .expect("Failed to clear user.name");
        config
            .set_str("user.email", "")
            .expect("Failed to clear user.email");
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        let mut revwalk = self.repo.revwalk().expect("Failed to create revwalk");
        if revwalk.push_head().is_err() {
            return 0;
        }
        revwalk.count()
    }
}

/// Pool holding a single known song.
pub fn single_song_pool() -> SongPool {
    SongPool::new(vec![Song::new("La la la", "Tester", "http://x")])
        .expect("Failed to build song pool")
}

/// Process runner that never spawns anything and reports a fixed status.
pub struct FixedExitRunner {
    pub code: Option<i32>,
}

impl ProcessRunner for FixedExitRunner {
    fn run(
        &self,
        _program: &str,
        _args: &[String],
        _output: OutputPolicy,
    ) -> io::Result<Option<i32>> {
        Ok(self.code)
    }
}

/// Process runner that simulates a linter rewriting a file before exiting 0.
pub struct FixingRunner {
    pub file: PathBuf,
    pub contents: String,
}

impl ProcessRunner for FixingRunner {
    fn run(
        &self,
        _program: &str,
        _args: &[String],
        _output: OutputPolicy,
    ) -> io::Result<Option<i32>> {
        std::fs::write(&self.file, &self.contents)?;
        Ok(Some(0))
    }
}
