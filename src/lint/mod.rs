//! Linter invocation.

pub mod linter;
pub mod runner;

pub use linter::Linter;
pub use runner::{OutputPolicy, ProcessRunner, SystemRunner};
