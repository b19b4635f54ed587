//! Lint, stage, and commit pipeline.
//!
//! Orchestrates the linter run, staging of whatever it changed, song
//! selection, and commit creation. Every step completes before the next one
//! starts and any error stops the run; nothing is retried or rolled back.

use git2::Repository;
use rand::Rng;
use tracing::debug;

use crate::commit::lyric_message;
use crate::error::{CommitError, RunError};
use crate::git::{ChangeSet, CommitResult, commit_staged, stage_changes};
use crate::lint::{Linter, ProcessRunner};
use crate::song::SongPool;

/// How a run ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The linter changed files and they were committed.
    Committed {
        changes: ChangeSet,
        commit: CommitResult,
    },
    /// The linter left the working tree untouched.
    NothingToLint,
}

/// One lint-along run against a repository.
pub struct LintAlong<'a, P: ProcessRunner + ?Sized> {
    repo: &'a Repository,
    linter: Linter,
    pool: SongPool,
    runner: &'a P,
}

impl<'a, P: ProcessRunner + ?Sized> LintAlong<'a, P> {
    pub fn new(repo: &'a Repository, linter: Linter, pool: SongPool, runner: &'a P) -> Self {
        Self {
            repo,
            linter,
            pool,
            runner,
        }
    }

    /// Run the full pipeline.
    ///
    /// Steps:
    /// 1. Run the linter (any failure aborts, nothing is staged)
    /// 2. Stage untracked and modified files
    /// 3. Pick a song with `rng`
    /// 4. Commit the index with the song's message
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Outcome, RunError> {
        self.linter.run(self.runner)?;

        let changes = match stage_changes(self.repo) {
            Ok(changes) => changes,
            Err(CommitError::NoChanges) => {
                debug!("Linter left the working tree clean");
                return Ok(Outcome::NothingToLint);
            }
            Err(e) => return Err(e.into()),
        };
        debug!("Staged {} file(s)", changes.len());

        let message = lyric_message(self.pool.pick(rng));
        let commit = commit_staged(self.repo, &message)?;

        Ok(Outcome::Committed { changes, commit })
    }
}
