//! Error types for lint-along modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading the layered configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Bundled default configuration is invalid: {0}")]
    InvalidDefault(#[source] serde_yaml::Error),

    #[error("Failed to read config file {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Config file {} must contain a mapping at the top level", path.display())]
    NotAMapping { path: PathBuf },

    #[error("Invalid configuration: {0}")]
    Invalid(#[source] serde_yaml::Error),

    #[error("The 'linter' setting must name at least a program to run")]
    EmptyLinterCommand,
}

/// Errors from running the linter subprocess.
#[derive(Error, Debug)]
pub enum LintError {
    /// `exit_code` is `None` when the program could not be found on `PATH`
    /// at all, as opposed to the linter reporting it through its status.
    #[error("Linting command \"{command}\" does not exist")]
    CommandNotFound {
        command: String,
        exit_code: Option<i32>,
    },

    #[error("Linting command \"{command}\" exited with code {exit_code}")]
    Failed { command: String, exit_code: i32 },

    #[error("Linting command \"{command}\" was terminated by a signal")]
    Terminated { command: String },

    #[error("Failed to spawn linting command \"{command}\": {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl LintError {
    /// Exit status the CLI should terminate with for this failure.
    ///
    /// Mirrors the linter's own status where one exists. A program missing
    /// from `PATH` maps to 127, the shell's "command not found" status.
    pub fn exit_code(&self) -> i32 {
        match self {
            LintError::CommandNotFound { exit_code, .. } => exit_code.unwrap_or(127),
            LintError::Failed { exit_code, .. } => *exit_code,
            LintError::Terminated { .. } | LintError::SpawnFailed { .. } => 1,
        }
    }
}

/// Errors from staging changes and creating the commit.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("No changes to commit (working tree is clean)")]
    NoChanges,

    #[error("Failed to read working tree status: {0}")]
    StatusFailed(#[source] git2::Error),

    #[error("Failed to stage changes: {0}")]
    StagingFailed(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git config error (missing user.name or user.email): {0}")]
    ConfigError(#[source] git2::Error),

    #[error("Failed to compute commit stats: {0}")]
    StatsFailed(#[source] git2::Error),
}

/// Errors from loading the lyric pool.
#[derive(Error, Debug)]
pub enum SongError {
    #[error("Lyric pool is not valid JSON: {0}")]
    InvalidPool(#[source] serde_json::Error),

    #[error("Lyric pool contains no songs")]
    EmptyPool,
}

/// Errors surfaced by the lint-and-commit pipeline.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lint(#[from] LintError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error(transparent)]
    Song(#[from] SongError),
}
