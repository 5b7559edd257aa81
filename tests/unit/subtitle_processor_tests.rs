/*!
 * Tests for cue extraction and text sanitizing
 */

use yt_parallel::subtitle_processor::{Cue, extract_cues, parse_timestamp, sanitize_cue_text};
use crate::common;

/// Every cue is found, in order, with header and text kept verbatim
#[test]
fn test_extractCues_withWellFormedTrack_shouldPreserveHeadersAndText() {
    let cues = extract_cues(common::DANISH_VTT);

    assert_eq!(cues.len(), 3);
    assert_eq!(cues[0].timing_header, "00:00:01.000 --> 00:00:03.000 align:start position:0%");
    assert_eq!(cues[0].raw_text, "Hej verden");
    assert_eq!(cues[1].timing_header, "00:00:03.500 --> 00:00:05.000");
    assert_eq!(cues[1].raw_text, "<c>Hvordan</c> går det?");
    assert_eq!(cues[2].raw_text, "Godt, <i>tak</i>");
}

/// N generated cues come back as exactly N records
#[test]
fn test_extractCues_withGeneratedTrack_shouldReturnExactCount() {
    for count in [0, 1, 7, 42] {
        let cues = extract_cues(&common::numbered_track("line", count));
        assert_eq!(cues.len(), count);
        for (i, cue) in cues.iter().enumerate() {
            assert_eq!(cue.raw_text, format!("line {}", i + 1));
        }
    }
}

/// Multi-line cue text is kept line by line
#[test]
fn test_extractCues_withMultiLineCue_shouldKeepLines() {
    let content = "WEBVTT\n\n00:00:01.000 --> 00:00:04.000\nfirst line\nsecond line\n\n00:00:05.000 --> 00:00:06.000\nnext";
    let cues = extract_cues(content);

    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].raw_text, "first line\nsecond line");
    assert_eq!(cues[1].raw_text, "next");
}

/// Content without timing headers yields no cues rather than an error
#[test]
fn test_extractCues_withoutCues_shouldReturnEmpty() {
    assert!(extract_cues("").is_empty());
    assert!(extract_cues("WEBVTT\nKind: captions\nLanguage: en\n").is_empty());
    assert!(extract_cues("1\n00:00:01,000 --> 00:00:02,000\nSRT style\n").is_empty());
}

/// Cue identifiers before the timing line are not part of the text
#[test]
fn test_extractCues_withCueIdentifiers_shouldSkipThem() {
    let content = "WEBVTT\n\nintro\n00:00:01.000 --> 00:00:02.000\nHello\n\n2\n00:00:03.000 --> 00:00:04.000\nAgain\n";
    let cues = extract_cues(content);

    assert_eq!(cues, vec![
        Cue::new("00:00:01.000 --> 00:00:02.000", "Hello"),
        Cue::new("00:00:03.000 --> 00:00:04.000", "Again"),
    ]);
}

/// Inline tags are removed and the result trimmed
#[test]
fn test_sanitizeCueText_withMarkup_shouldStripTags() {
    assert_eq!(sanitize_cue_text("<b>Hej</b> verden"), "Hej verden");
    assert_eq!(sanitize_cue_text("  <i> tak </i>  "), "tak");
    assert_eq!(
        sanitize_cue_text("Hej<00:00:01.520><c> med</c><00:00:01.800><c> dig</c>"),
        "Hej med dig"
    );
    assert_eq!(sanitize_cue_text("<v Roger Bingham>We are in New York City"), "We are in New York City");
}

/// Non-greedy matching leaves text between tags alone
#[test]
fn test_sanitizeCueText_withAdjacentTags_shouldNotSwallowContent() {
    assert_eq!(sanitize_cue_text("<i>one</i> and <i>two</i>"), "one and two");
    assert_eq!(sanitize_cue_text("a <<b>> c"), "a > c");
}

/// Internal whitespace survives; only the ends are trimmed
#[test]
fn test_sanitizeCueText_withInternalWhitespace_shouldNotCollapse() {
    assert_eq!(sanitize_cue_text("\n first  line\nsecond \n"), "first  line\nsecond");
}

/// Sanitizing twice gives the same result as sanitizing once
#[test]
fn test_sanitizeCueText_appliedTwice_shouldBeIdempotent() {
    let samples = [
        "",
        "plain",
        "  <b>bold</b>  ",
        "<<b>a>",
        "a < b > c",
        "<i>open only",
        "x<y>z<",
        " <c.colorE5E5E5>mixed</c> \n <i>lines</i> ",
        "   ",
    ];

    for sample in samples {
        let once = sanitize_cue_text(sample);
        assert_eq!(sanitize_cue_text(&once), once, "not idempotent for {:?}", sample);
    }
}

/// Cue::sanitize wraps the sanitized text
#[test]
fn test_cueSanitize_shouldMatchFreeFunction() {
    let cue = Cue::new("00:00:01.000 --> 00:00:02.000", "<c>Hvordan</c> går det?");
    assert_eq!(cue.sanitize().plain_text, "Hvordan går det?");
    assert!(Cue::empty().sanitize().is_empty());
}

/// Timestamps parse to milliseconds and reject bad components
#[test]
fn test_parseTimestamp_withValidAndInvalidInput() {
    assert_eq!(parse_timestamp("01:23:45.678").unwrap(), 5_025_678);
    assert_eq!(parse_timestamp("00:00:00.000").unwrap(), 0);
    assert!(parse_timestamp("00:61:00.000").is_err());
    assert!(parse_timestamp("00:00:01,000").is_err());
    assert!(parse_timestamp("garbage").is_err());
}
