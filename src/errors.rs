/*!
 * Error types for the yt-parallel application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when invoking an external program
#[derive(Error, Debug)]
pub enum ToolError {
    /// The program could not be found on the PATH
    #[error("'{program}' command not found. Please install it.")]
    NotFound {
        /// Program name as it was invoked
        program: String,
    },

    /// The program ran but exited unsuccessfully
    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        /// Program name as it was invoked
        program: String,
        /// Exit status description (code or signal)
        status: String,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// The program did not finish within the configured timeout
    #[error("'{program}' timed out after {secs} seconds")]
    TimedOut {
        /// Program name as it was invoked
        program: String,
        /// Timeout that was exceeded
        secs: u64,
    },

    /// Spawning or talking to the program failed
    #[error("I/O error while running '{program}': {message}")]
    Io {
        /// Program name as it was invoked
        program: String,
        /// Underlying error message
        message: String,
    },
}

impl ToolError {
    /// Whether the error means the program is not installed at all
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors that can occur while merging two subtitle tracks
#[derive(Error, Debug, PartialEq)]
pub enum TranscriptError {
    /// The tracks cannot be paired index by index
    #[error("Cue counts do not match: primary track has {primary} cues, secondary track has {secondary}. Files are misaligned.")]
    CueCountMismatch {
        /// Number of cues in the primary track
        primary: usize,
        /// Number of cues in the secondary track
        secondary: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid command line usage
    #[error("Usage error: {0}")]
    Usage(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from an external program
    #[error("{0}")]
    Tool(#[from] ToolError),

    /// The subtitle downloader ran but reported a failure
    #[error("Subtitle download failed, see downloader output above: {0}")]
    DownloadFailed(ToolError),

    /// The primary subtitle track was not produced by the downloader
    #[error("Primary subtitle file ({language}) not found at {path}. Check language code or if subtitles are available.")]
    MissingPrimaryTrack {
        /// Primary language code
        language: String,
        /// Where the file was expected
        path: String,
    },

    /// Error from merging the tracks
    #[error("{0}")]
    Transcript(#[from] TranscriptError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),
}

impl AppError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::Tool(e) | Self::DownloadFailed(e) if e.is_not_found() => 127,
            _ => 1,
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Config(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
