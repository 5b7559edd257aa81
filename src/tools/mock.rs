/*!
 * Scripted tool runner for testing.
 *
 * Outcomes are registered per program, optionally narrowed to invocations
 * whose input (standard input, or else the last argument) equals a given text. Input-specific rules win over
 * program-wide ones, and later rules over earlier ones:
 * - `MockOutcome::Stdout` - exits successfully with the given output
 * - `MockOutcome::Fail` - exits with a non-zero status
 * - `MockOutcome::NotInstalled` - behaves like a program missing from the PATH
 * - `MockOutcome::TimedOut` - behaves like a program killed by its timeout
 * - `MockOutcome::WriteTracks` - writes subtitle files like the downloader does
 *
 * Every invocation is recorded so tests can assert on the exact argv.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::PathBuf;

use crate::errors::ToolError;
use crate::tools::{ToolInvocation, ToolOutput, ToolRunner};

/// Scripted result of an invocation
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Succeeds with this stdout
    Stdout(String),
    /// Exits with status 1 and this stderr
    Fail { stderr: String },
    /// The program is not installed
    NotInstalled,
    /// The program exceeded its timeout
    TimedOut,
    /// Succeeds after writing `(language, content)` tracks using the `-o` template
    WriteTracks(Vec<(String, String)>),
}

#[derive(Debug, Clone)]
struct MockRule {
    program: String,
    input: Option<String>,
    outcome: MockOutcome,
}

/// Mock runner returning scripted outcomes
#[derive(Debug, Default)]
pub struct MockRunner {
    rules: Vec<MockRule>,
    calls: Mutex<Vec<ToolInvocation>>,
}

impl MockRunner {
    /// Create a runner where every program succeeds with empty output
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome for every invocation of `program` without a more specific rule
    pub fn on(mut self, program: &str, outcome: MockOutcome) -> Self {
        self.rules.push(MockRule {
            program: program.to_string(),
            input: None,
            outcome,
        });
        self
    }

    /// Outcome for invocations of `program` whose input is `input`
    pub fn on_input(mut self, program: &str, input: &str, outcome: MockOutcome) -> Self {
        self.rules.push(MockRule {
            program: program.to_string(),
            input: Some(input.to_string()),
            outcome,
        });
        self
    }

    /// Register successful transcriptions for several inputs at once
    pub fn with_transcriptions(mut self, program: &str, pairs: &[(&str, &str)]) -> Self {
        for (input, output) in pairs {
            self = self.on_input(program, input, MockOutcome::Stdout((*output).to_string()));
        }
        self
    }

    /// All invocations so far, in order
    pub fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.lock().clone()
    }

    /// Invocations of one program, in order
    pub fn calls_to(&self, program: &str) -> Vec<ToolInvocation> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.program == program)
            .cloned()
            .collect()
    }

    fn find_outcome(&self, invocation: &ToolInvocation) -> Option<&MockOutcome> {
        let input = invocation.input();
        // Later registrations override earlier ones
        let for_program = move || self.rules.iter().rev().filter(move |r| r.program == invocation.program);

        for_program()
            .find(|r| r.input.is_some() && r.input.as_deref() == input)
            .or_else(|| for_program().find(|r| r.input.is_none()))
            .map(|r| &r.outcome)
    }

    fn write_tracks(invocation: &ToolInvocation, tracks: &[(String, String)]) -> Result<(), ToolError> {
        let io_error = |message: String| ToolError::Io {
            program: invocation.program.clone(),
            message,
        };

        let template = invocation
            .arg_after("-o")
            .ok_or_else(|| io_error("no -o output template given".to_string()))?;
        let extension = invocation.arg_after("--sub-format").unwrap_or("vtt");

        for (language, content) in tracks {
            let path = PathBuf::from(template.replace("%(ext)s", &format!("{}.{}", language, extension)));
            std::fs::write(&path, content)
                .map_err(|e| io_error(format!("cannot write {}: {}", path.display(), e)))?;
        }

        Ok(())
    }
}

#[async_trait]
impl ToolRunner for MockRunner {
    async fn run(&self, invocation: ToolInvocation) -> Result<ToolOutput, ToolError> {
        self.calls.lock().push(invocation.clone());

        let program = invocation.program.clone();
        match self.find_outcome(&invocation) {
            None => Ok(ToolOutput::default()),
            Some(MockOutcome::Stdout(stdout)) => Ok(ToolOutput {
                stdout: stdout.clone(),
                stderr: String::new(),
            }),
            Some(MockOutcome::Fail { stderr }) => Err(ToolError::Failed {
                program,
                status: "exit status: 1".to_string(),
                stderr: stderr.clone(),
            }),
            Some(MockOutcome::NotInstalled) => Err(ToolError::NotFound { program }),
            Some(MockOutcome::TimedOut) => Err(ToolError::TimedOut { program, secs: 1 }),
            Some(MockOutcome::WriteTracks(tracks)) => {
                Self::write_tracks(&invocation, tracks)?;
                Ok(ToolOutput::default())
            }
        }
    }
}
