//! lint-along - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use git2::Repository;
use tracing_subscriber::EnvFilter;

use lint_along::{
    Config, ConfigError, LintAlong, LintError, Linter, OutputPolicy, Outcome, RunError, SongPool,
    SystemRunner,
};

/// Run the linter and commit whatever it fixed with a song lyric.
#[derive(Parser, Debug)]
#[command(name = "lint-along")]
#[command(about = "Run the linter and commit whatever it fixed with a song lyric")]
#[command(version)]
struct Cli {
    /// Show debug logs and the linter's own output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let report = report(&run(&cli));
    match report.stream {
        Stream::Stdout => println!("{}", report.text),
        Stream::Stderr => eprintln!("{}", report.text),
    }
    ExitCode::from(report.status)
}

/// Where a report line is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// The line printed for a run and the status the process exits with.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Report {
    stream: Stream,
    text: String,
    status: u8,
}

/// Map a run's result onto what the user sees.
///
/// A missing linter is reported on stdout like any other outcome; every
/// other failure goes to stderr. Lint failures exit with the linter's status.
fn report(result: &Result<Outcome>) -> Report {
    match result {
        Ok(Outcome::Committed { commit, .. }) => Report {
            stream: Stream::Stdout,
            text: commit.to_string(),
            status: 0,
        },
        Ok(Outcome::NothingToLint) => Report {
            stream: Stream::Stdout,
            text: "Nothing to lint along".to_string(),
            status: 0,
        },
        Err(err) => match err.downcast_ref::<RunError>() {
            Some(RunError::Lint(lint_err @ LintError::CommandNotFound { .. })) => Report {
                stream: Stream::Stdout,
                text: lint_err.to_string(),
                status: exit_status(lint_err.exit_code()),
            },
            Some(RunError::Lint(lint_err)) => Report {
                stream: Stream::Stderr,
                text: format!("Error: {lint_err}"),
                status: exit_status(lint_err.exit_code()),
            },
            _ => Report {
                stream: Stream::Stderr,
                text: format!("Error: {err:#}"),
                status: 1,
            },
        },
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let cwd = std::env::current_dir().context("Could not determine the working directory")?;

    let config = Config::load(&cwd).context("Failed to load configuration")?;

    let repo = Repository::open(&cwd)
        .context("Not a git repository. Run lint-along from the root of a git repository.")?;

    let pool = SongPool::bundled().context("Failed to load the lyric pool")?;

    let mut linter = Linter::from_config(&config).ok_or(ConfigError::EmptyLinterCommand)?;
    if cli.verbose {
        linter = linter.with_output(OutputPolicy::Inherit);
    }

    let runner = SystemRunner;
    let lint_along = LintAlong::new(&repo, linter, pool, &runner);

    Ok(lint_along.run(&mut rand::rng())?)
}

/// Install the tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown unless
/// `--verbose` was passed.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "lint_along=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Clamp a process status into the range an exit code can carry.
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Oid;
    use lint_along::{ChangeSet, CommitError, CommitResult, DiffStat};

    fn lint_failure(err: LintError) -> Result<Outcome> {
        Err(RunError::Lint(err).into())
    }

    #[test]
    fn test_committed_prints_summary_to_stdout() {
        let commit = CommitResult {
            branch: "main".to_string(),
            id: Oid::zero(),
            short_id: "abc1234".to_string(),
            summary: ":musical_note: La la la".to_string(),
            stats: DiffStat {
                files_changed: 1,
                insertions: 2,
                deletions: 0,
            },
        };
        let report = report(&Ok(Outcome::Committed {
            changes: ChangeSet::default(),
            commit,
        }));

        assert_eq!(report.stream, Stream::Stdout);
        assert_eq!(
            report.text,
            "[main abc1234] :musical_note: La la la\r\n\
             1 file(s) changed, 2 insertions(+), 0 deletions(-)"
        );
        assert_eq!(report.status, 0);
    }

    #[test]
    fn test_nothing_to_lint_prints_to_stdout() {
        let report = report(&Ok(Outcome::NothingToLint));
        assert_eq!(report.stream, Stream::Stdout);
        assert_eq!(report.text, "Nothing to lint along");
        assert_eq!(report.status, 0);
    }

    #[test]
    fn test_missing_linter_prints_to_stdout_with_linter_status() {
        let report = report(&lint_failure(LintError::CommandNotFound {
            command: "cargo fmt".to_string(),
            exit_code: Some(2),
        }));
        assert_eq!(report.stream, Stream::Stdout);
        assert_eq!(report.text, "Linting command \"cargo fmt\" does not exist");
        assert_eq!(report.status, 2);
    }

    #[test]
    fn test_missing_program_exits_127() {
        let report = report(&lint_failure(LintError::CommandNotFound {
            command: "nope".to_string(),
            exit_code: None,
        }));
        assert_eq!(report.stream, Stream::Stdout);
        assert_eq!(report.status, 127);
    }

    #[test]
    fn test_failed_linter_prints_to_stderr_with_its_status() {
        let report = report(&lint_failure(LintError::Failed {
            command: "cargo fmt".to_string(),
            exit_code: 3,
        }));
        assert_eq!(report.stream, Stream::Stderr);
        assert!(report.text.starts_with("Error: "));
        assert_eq!(report.status, 3);
    }

    #[test]
    fn test_out_of_range_status_is_clamped() {
        for code in [300, -1] {
            let report = report(&lint_failure(LintError::Failed {
                command: "lint".to_string(),
                exit_code: code,
            }));
            assert_eq!(report.status, 1, "exit code {code}");
        }
    }

    #[test]
    fn test_other_errors_print_to_stderr_and_exit_1() {
        let err: anyhow::Error = RunError::Commit(CommitError::NoChanges).into();
        let wrapped = report(&Err(err.context("Commit step failed")));
        assert_eq!(wrapped.stream, Stream::Stderr);
        assert!(wrapped.text.starts_with("Error: Commit step failed: "));
        assert_eq!(wrapped.status, 1);

        let plain = report(&Err(anyhow::anyhow!("Not a git repository")));
        assert_eq!(plain.text, "Error: Not a git repository");
        assert_eq!(plain.status, 1);
    }
}
