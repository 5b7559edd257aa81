use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::app_config::PhonemizerConfig;
use crate::errors::{AppError, ToolError};
use crate::tools::{ToolInvocation, ToolRunner};

// @module: IPA transcription through an external phonemizer (espeak)

static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Per-cue phonetic transcription
#[derive(Debug, Clone)]
pub struct Phonemizer {
    config: PhonemizerConfig,
    runner: Arc<dyn ToolRunner>,
}

impl Phonemizer {
    pub fn new(config: PhonemizerConfig, runner: Arc<dyn ToolRunner>) -> Self {
        Self { config, runner }
    }

    /// Arguments for one transcription: voice, quiet, IPA level, text on stdin.
    ///
    /// The cue text never goes on the command line, so dialogue lines such as
    /// `- Hej` cannot be taken for options.
    pub fn build_args(&self, language: &str) -> Vec<String> {
        vec![
            format!("-v{}", language),
            "-q".to_string(),
            format!("--ipa={}", self.config.ipa_level),
            "--stdin".to_string(),
        ]
    }

    /// Transcribe `text` spoken in `language`.
    ///
    /// Returns an empty string for empty input (without running the tool) and
    /// for any per-cue failure, which is logged as a warning. Only a missing
    /// phonemizer is an error, since no cue could ever succeed.
    pub async fn transcribe(&self, text: &str, language: &str) -> Result<String, AppError> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let invocation = ToolInvocation::new(self.config.program.clone(), self.build_args(language))
            .with_stdin(text)
            .with_timeout_secs(self.config.timeout_secs);

        match self.runner.run(invocation).await {
            Ok(output) => Ok(normalize_transcription(&output.stdout)),
            Err(e @ ToolError::NotFound { .. }) => Err(AppError::Tool(e)),
            Err(ToolError::Failed { program, stderr, .. }) => {
                warn!("{} failed for language '{}'. Output: {}", program, language, stderr);
                Ok(String::new())
            }
            Err(e) => {
                warn!("Unexpected error during IPA generation for language '{}': {}", language, e);
                Ok(String::new())
            }
        }
    }
}

/// Collapse whitespace runs to single spaces and strip surrounding quotes
pub fn normalize_transcription(raw: &str) -> String {
    WHITESPACE_RUN_REGEX
        .replace_all(raw, " ")
        .trim_matches(|c: char| c == '\'' || c == '"' || c.is_whitespace())
        .to_string()
}
