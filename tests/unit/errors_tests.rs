/*!
 * Tests for error types and exit codes
 */

use yt_parallel::errors::{AppError, ToolError, TranscriptError};

#[test]
fn test_toolError_notFound_shouldNameProgram() {
    let error = ToolError::NotFound { program: "espeak".to_string() };
    assert!(error.is_not_found());
    assert!(error.to_string().contains("'espeak' command not found"));
}

#[test]
fn test_toolError_failed_shouldIncludeStderr() {
    let error = ToolError::Failed {
        program: "yt-dlp".to_string(),
        status: "exit status: 1".to_string(),
        stderr: "HTTP Error 403: Forbidden".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("yt-dlp"));
    assert!(display.contains("HTTP Error 403"));
    assert!(!error.is_not_found());
}

#[test]
fn test_transcriptError_mismatch_shouldNameBothCounts() {
    let error = TranscriptError::CueCountMismatch { primary: 5, secondary: 4 };
    let display = error.to_string();
    assert!(display.contains("Cue counts do not match"));
    assert!(display.contains('5'));
    assert!(display.contains('4'));
}

#[test]
fn test_appError_exitCodes_shouldDistinguishKinds() {
    assert_eq!(AppError::Usage("bad".to_string()).exit_code(), 2);
    assert_eq!(AppError::from(ToolError::NotFound { program: "yt-dlp".to_string() }).exit_code(), 127);
    assert_eq!(
        AppError::DownloadFailed(ToolError::NotFound { program: "yt-dlp".to_string() }).exit_code(),
        127
    );
    assert_eq!(
        AppError::from(TranscriptError::CueCountMismatch { primary: 1, secondary: 0 }).exit_code(),
        1
    );
    assert_eq!(
        AppError::MissingPrimaryTrack { language: "da".to_string(), path: "/tmp/x".to_string() }.exit_code(),
        1
    );
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error = AppError::from(io_error);
    assert!(matches!(error, AppError::File(_)));
    assert!(error.to_string().contains("denied"));
}
