/*!
 * HTML rendering of transcript blocks and the document shell.
 */

use std::fmt;

/// Rule emitted between two consecutive blocks
pub const SEPARATOR: &str = "    <hr>";

/// Body used when the transcript has no blocks
pub const NO_CUES_PLACEHOLDER: &str = "    <p>Error: No cues found. Check VTT content.</p>";

const LINE_BREAK: &str = " \n        <br> ";

/// Render one paragraph: bold primary, phonetic, then secondary.
///
/// Each line is present only when its text is non-empty. With all three
/// empty the result is still an (empty) paragraph element.
pub fn render_block(primary: &str, phonetic: &str, secondary: &str) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(3);

    if !primary.is_empty() {
        lines.push(format!("<b>{}</b>", primary));
    }
    if !phonetic.is_empty() {
        lines.push(format!("<span class=\"ipa\">/{}/</span>", phonetic));
    }
    if !secondary.is_empty() {
        lines.push(secondary.to_string());
    }

    format!("    <p>{}</p>", lines.join(LINE_BREAK))
}

/// Rendered transcript, ready to be written out once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptDocument {
    pub primary_language: String,
    pub secondary_language: String,
    pub blocks: Vec<String>,
}

impl TranscriptDocument {
    pub fn new(primary_language: &str, secondary_language: &str, blocks: Vec<String>) -> Self {
        Self {
            primary_language: primary_language.to_string(),
            secondary_language: secondary_language.to_string(),
            blocks,
        }
    }

    /// Blocks separated by rules, or the placeholder when there are none
    pub fn body(&self) -> String {
        if self.blocks.is_empty() {
            return NO_CUES_PLACEHOLDER.to_string();
        }

        self.blocks.join(&format!("\n{}\n", SEPARATOR))
    }

    /// Complete HTML document
    pub fn render(&self) -> String {
        let primary = self.primary_language.to_uppercase();
        let secondary = self.secondary_language.to_uppercase();

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Parallel Transcript: {primary} / {secondary} with IPA</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            line-height: 1.6;
            padding: 20px;
            max-width: 800px;
            margin: 0 auto;
        }}
        p {{
            margin: 1em 0;
            white-space: normal;
        }}
        .ipa {{
            font-family: "Lucida Sans Unicode", "Arial Unicode MS", sans-serif;
            font-size: 0.9em;
            color: #555;
            font-style: italic;
        }}
        hr {{
            border: 0;
            height: 1px;
            background: #ccc;
            margin: 15px 0;
        }}
    </style>
</head>
<body>
    <h1>Parallel Transcript: {primary} in Bold, IPA, and {secondary}</h1>
{body}
</body>
</html>
"#,
            lang = self.secondary_language,
            primary = primary,
            secondary = secondary,
            body = self.body(),
        )
    }
}

impl fmt::Display for TranscriptDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}
