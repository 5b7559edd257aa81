/*!
 * Subprocess-backed tool runner.
 */

use async_trait::async_trait;
use log::{debug, trace};
use std::io::ErrorKind;
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::errors::ToolError;
use crate::tools::{OutputMode, ToolInvocation, ToolOutput, ToolRunner};

/// Runs programs found on the PATH
#[derive(Debug, Default, Clone)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn spawn_error(program: &str, error: std::io::Error) -> ToolError {
        if error.kind() == ErrorKind::NotFound {
            ToolError::NotFound {
                program: program.to_string(),
            }
        } else {
            ToolError::Io {
                program: program.to_string(),
                message: error.to_string(),
            }
        }
    }

    fn check_status(program: &str, status: ExitStatus, stderr: &str) -> Result<(), ToolError> {
        if status.success() {
            return Ok(());
        }

        Err(ToolError::Failed {
            program: program.to_string(),
            status: status.to_string(),
            stderr: stderr.trim().to_string(),
        })
    }

    fn decode(program: &str, stream: &str, bytes: Vec<u8>) -> Result<String, ToolError> {
        String::from_utf8(bytes).map_err(|e| ToolError::Io {
            program: program.to_string(),
            message: format!("{} is not valid UTF-8: {}", stream, e),
        })
    }

    async fn output_with_stdin(command: &mut Command, input: &str) -> std::io::Result<std::process::Output> {
        let mut child = command.stdin(Stdio::piped()).spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes()).await?;
            // Dropping the handle closes the pipe so the program sees EOF
        }

        child.wait_with_output().await
    }

    async fn execute(invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        let program = invocation.program.as_str();
        let mut command = Command::new(program);
        command.args(&invocation.args).stdin(Stdio::null()).kill_on_drop(true);

        match invocation.mode {
            OutputMode::ForwardToStderr => {
                let status = command
                    .stdout(Stdio::from(std::io::stderr()))
                    .stderr(Stdio::inherit())
                    .status()
                    .await
                    .map_err(|e| Self::spawn_error(program, e))?;

                Self::check_status(program, status, "")?;
                Ok(ToolOutput::default())
            }
            OutputMode::Capture => {
                command.stdout(Stdio::piped()).stderr(Stdio::piped());
                let output = match &invocation.stdin {
                    Some(input) => Self::output_with_stdin(&mut command, input).await,
                    None => command.output().await,
                }
                .map_err(|e| Self::spawn_error(program, e))?;

                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                Self::check_status(program, output.status, &stderr)?;

                Ok(ToolOutput {
                    stdout: Self::decode(program, "stdout", output.stdout)?,
                    stderr,
                })
            }
        }
    }
}

#[async_trait]
impl ToolRunner for SystemRunner {
    async fn run(&self, invocation: ToolInvocation) -> Result<ToolOutput, ToolError> {
        trace!("Running: {}", invocation.command_line());

        let Some(timeout) = invocation.timeout else {
            return Self::execute(&invocation).await;
        };

        tokio::select! {
            result = Self::execute(&invocation) => result,
            _ = tokio::time::sleep(timeout) => {
                debug!("'{}' exceeded {:?}, killing it", invocation.program, timeout);
                Err(ToolError::TimedOut {
                    program: invocation.program.clone(),
                    secs: timeout.as_secs(),
                })
            }
        }
    }
}
