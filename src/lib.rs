/*!
 * # yt-parallel - bilingual transcripts from video subtitles
 *
 * Downloads two subtitle tracks of a video, adds an IPA transcription of the
 * primary language and merges everything into one HTML document.
 *
 * ## Features
 *
 * - Subtitle download through yt-dlp (human-authored and auto-generated)
 * - WebVTT cue extraction and markup cleanup
 * - IPA generation through espeak, one cue at a time
 * - Strict index-based pairing of the two tracks
 * - Self-contained HTML output on standard output
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Cue extraction and text sanitizing
 * - `tools`: External program invocation (real and scripted runners)
 * - `downloader`: Subtitle download into a scratch directory
 * - `phonemizer`: Per-cue IPA transcription
 * - `transcript`: Track alignment and HTML rendering:
 *   - `transcript::align`: Index pairing and phonemization
 *   - `transcript::render`: Blocks and document shell
 * - `file_utils`: File helpers and the scratch directory handle
 * - `app_controller`: Main application controller
 * - `language_utils`: Language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitle_processor;
pub mod tools;
pub mod downloader;
pub mod phonemizer;
pub mod transcript;
pub mod app_controller;
pub mod language_utils;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use subtitle_processor::{Cue, SanitizedCue, extract_cues, sanitize_cue_text};
pub use transcript::{AlignedPair, TranscriptBuilder, TranscriptDocument};
pub use errors::{AppError, ToolError, TranscriptError};
