//! Run the configured linter and classify how it exited.

use std::io;

use tracing::debug;

use crate::config::Config;
use crate::error::LintError;

use super::runner::{OutputPolicy, ProcessRunner};

/// A linter invocation built from the effective configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linter {
    program: String,
    args: Vec<String>,
    not_found_exit_code: Option<i32>,
    output: OutputPolicy,
}

impl Linter {
    /// Create a linter from a command line (program first).
    ///
    /// Returns `None` for an empty command.
    pub fn new(command: &[String], not_found_exit_code: Option<i32>) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            not_found_exit_code,
            output: OutputPolicy::Discard,
        })
    }

    /// Create the linter described by `config`.
    pub fn from_config(config: &Config) -> Option<Self> {
        Self::new(&config.linter, config.not_found_exit_code)
    }

    /// Override where the linter's output goes (discarded by default).
    pub fn with_output(mut self, output: OutputPolicy) -> Self {
        self.output = output;
        self
    }

    /// The command words joined by single spaces, as shown to the user.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the linter to completion.
    ///
    /// Succeeds only when the linter exits with status 0.
    pub fn run<R: ProcessRunner + ?Sized>(&self, runner: &R) -> Result<(), LintError> {
        debug!("Linting with \"{}\"", self.command_line());

        let code = match runner.run(&self.program, &self.args, self.output) {
            Ok(code) => code,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LintError::CommandNotFound {
                    command: self.command_line(),
                    exit_code: None,
                });
            }
            Err(e) => {
                return Err(LintError::SpawnFailed {
                    command: self.command_line(),
                    source: e,
                });
            }
        };

        match code {
            Some(0) => Ok(()),
            Some(code) if Some(code) == self.not_found_exit_code => {
                Err(LintError::CommandNotFound {
                    command: self.command_line(),
                    exit_code: Some(code),
                })
            }
            Some(code) => Err(LintError::Failed {
                command: self.command_line(),
                exit_code: code,
            }),
            None => Err(LintError::Terminated {
                command: self.command_line(),
            }),
        }
    }
}
