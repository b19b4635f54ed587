//! lint-along - run your linter and commit the fixes with a song lyric.
//!
//! # Overview
//!
//! lint-along runs the configured linter, stages every file it touched, and
//! commits them with a message quoting a randomly chosen song. Configuration
//! is layered from a bundled default, `~/.lint-along.yml`, and a project-local
//! `.lint-along.yml`.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod lint;
pub mod pipeline;
pub mod song;

// Re-export commonly used types
pub use config::Config;
pub use error::{CommitError, ConfigError, LintError, RunError, SongError};
pub use git::{ChangeSet, CommitResult, DiffStat};
pub use lint::{Linter, OutputPolicy, ProcessRunner, SystemRunner};
pub use pipeline::{LintAlong, Outcome};
pub use song::{Song, SongPool};
