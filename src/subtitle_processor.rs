use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context, anyhow};
use log::debug;

// @module: WebVTT cue extraction and text cleanup

// @const: Cue timing header, e.g. `00:01:02.345 --> 00:01:04.000 align:start`
static TIMING_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2})\.(\d{3}) --> ").unwrap()
});

// @const: Inline markup, shortest match, never crossing a line break
static INLINE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<.*?>").unwrap()
});

// @struct: Single timed cue as it appears in the track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Timing line, verbatim, without line terminator
    pub timing_header: String,

    // @field: Cue payload lines joined with '\n', markup untouched
    pub raw_text: String,
}

impl Cue {
    pub fn new(timing_header: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Cue {
            timing_header: timing_header.into(),
            raw_text: raw_text.into(),
        }
    }

    /// Placeholder cue standing in for a missing track
    pub fn empty() -> Self {
        Cue::new(String::new(), String::new())
    }

    /// Start time in milliseconds, if the header carries one
    pub fn start_time_ms(&self) -> Option<u64> {
        let start = self.timing_header.split_whitespace().next()?;
        parse_timestamp(start).ok()
    }

    /// Markup-free text of this cue
    pub fn sanitize(&self) -> SanitizedCue {
        SanitizedCue {
            plain_text: sanitize_cue_text(&self.raw_text),
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.timing_header)?;
        writeln!(f, "{}", self.raw_text)?;
        writeln!(f)
    }
}

// @struct: Cue text with inline markup removed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SanitizedCue {
    pub plain_text: String,
}

impl SanitizedCue {
    pub fn is_empty(&self) -> bool {
        self.plain_text.is_empty()
    }
}

/// Extract the ordered cues of a WebVTT track.
///
/// A cue starts at a line beginning with a timing header and runs until the
/// next empty line or the end of input. Whitespace-only lines belong to the
/// cue. Anything outside a cue (the `WEBVTT`
/// banner, `Kind:`/`Language:` metadata, NOTE blocks, cue identifiers) is
/// skipped. Returns an empty vector when no cue is found.
pub fn extract_cues(content: &str) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        if !TIMING_HEADER_REGEX.is_match(line) {
            continue;
        }

        let mut text_lines: Vec<&str> = Vec::new();
        for text_line in lines.by_ref() {
            // Only a truly empty line ends a cue; auto-captions carry " " lines
            if text_line.trim_end_matches('\r').is_empty() {
                break;
            }
            text_lines.push(text_line);
        }

        cues.push(Cue::new(line, text_lines.join("\n")));
    }

    debug!("Extracted {} cues", cues.len());
    cues
}

/// Remove inline `<...>` markup, then trim surrounding whitespace.
///
/// Total and idempotent. Internal whitespace, including line breaks between
/// cue lines, is left as is.
pub fn sanitize_cue_text(raw: &str) -> String {
    INLINE_TAG_REGEX.replace_all(raw, "").trim().to_string()
}

/// Parse a WebVTT timestamp (`HH:MM:SS.mmm`) to milliseconds
pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
    let parts: Vec<&str> = timestamp.split(&[':', '.'][..]).collect();

    if parts.len() != 4 {
        return Err(anyhow!("Invalid timestamp format: {}", timestamp));
    }

    let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
    let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
    let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
    let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
    }

    Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
}
