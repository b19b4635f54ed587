//! Blocking process spawning behind a mockable trait.

use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

/// What to do with a child's stdout and stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPolicy {
    /// Send both streams to the null device.
    Discard,
    /// Let the child write to our own stdout/stderr.
    Inherit,
}

impl OutputPolicy {
    fn stdio(self) -> Stdio {
        match self {
            OutputPolicy::Discard => Stdio::null(),
            OutputPolicy::Inherit => Stdio::inherit(),
        }
    }
}

/// Trait for running a program to completion.
///
/// This abstraction allows mocking the linter subprocess in tests.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// Returns the exit code, or `None` if the process was killed by a signal.
    /// A program that cannot be found is reported as an
    /// [`io::ErrorKind::NotFound`] error.
    fn run(&self, program: &str, args: &[String], output: OutputPolicy)
        -> io::Result<Option<i32>>;
}

/// Runner that spawns real processes with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        output: OutputPolicy,
    ) -> io::Result<Option<i32>> {
        // Resolve up front so a missing program is distinguishable from one
        // that exists but fails to start.
        let resolved = which::which(program)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
        debug!("Running {} {:?}", resolved.display(), args);

        let status = Command::new(resolved)
            .args(args)
            .stdin(Stdio::null())
            .stdout(output.stdio())
            .stderr(output.stdio())
            .status()?;

        Ok(status.code())
    }
}
