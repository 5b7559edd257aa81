/*!
 * External program invocation.
 *
 * Everything the application needs from the outside world (the subtitle
 * downloader and the phonemizer) goes through the [`ToolRunner`] trait:
 * - `process::SystemRunner`: spawns real processes with tokio
 * - `mock::MockRunner`: scripted outcomes for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

use crate::errors::ToolError;

/// Where the program's own output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Capture stdout and stderr for the caller
    Capture,
    /// Forward stdout and stderr to our stderr, keeping our stdout clean
    ForwardToStderr,
}

/// A single program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Program name or path
    pub program: String,
    /// Arguments, not including the program itself
    pub args: Vec<String>,
    /// Output handling
    pub mode: OutputMode,
    /// Optional wall-clock limit
    pub timeout: Option<Duration>,
    /// Text written to the program's standard input (capture mode only)
    pub stdin: Option<String>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            mode: OutputMode::Capture,
            timeout: None,
            stdin: None,
        }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.timeout = secs.map(Duration::from_secs);
        self
    }

    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// The text the program works on: standard input, else the last argument
    pub fn input(&self) -> Option<&str> {
        self.stdin.as_deref().or_else(|| self.args.last().map(String::as_str))
    }

    /// Value following `flag` in the argument list
    pub fn arg_after(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Shell-like rendering for log messages
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(char::is_whitespace) {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Output of a successful invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Captured standard output (empty when forwarded)
    pub stdout: String,
    /// Captured standard error (empty when forwarded)
    pub stderr: String,
}

/// Capability to run an external program and interpret its exit status
///
/// Implementations return `Ok` only for a zero exit status. A program that is
/// not installed maps to [`ToolError::NotFound`], a non-zero exit to
/// [`ToolError::Failed`].
#[async_trait]
pub trait ToolRunner: Send + Sync + Debug {
    /// Run the program to completion
    async fn run(&self, invocation: ToolInvocation) -> Result<ToolOutput, ToolError>;
}

pub mod process;
pub mod mock;

pub use mock::{MockOutcome, MockRunner};
pub use process::SystemRunner;
