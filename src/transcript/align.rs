/*!
 * Index-based pairing of two cue tracks and block assembly.
 *
 * Cues are paired strictly by position. There is no realignment by
 * timestamp: tracks of different length are rejected before any rendering
 * or phonemizer call takes place.
 */

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};

use crate::errors::{AppError, TranscriptError};
use crate::phonemizer::Phonemizer;
use crate::subtitle_processor::{Cue, SanitizedCue};
use crate::transcript::render::{render_block, TranscriptDocument};

/// One index position across both tracks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlignedPair {
    pub primary: SanitizedCue,
    pub secondary: SanitizedCue,
    pub phonetic: String,
}

impl AlignedPair {
    pub fn render(&self) -> String {
        render_block(&self.primary.plain_text, &self.phonetic, &self.secondary.plain_text)
    }
}

/// Stand-in for an absent secondary track: one empty cue per primary cue
pub fn placeholder_track(len: usize) -> Vec<Cue> {
    vec![Cue::empty(); len]
}

/// Sanitize both tracks and pair them by index
pub fn pair_cues(primary: &[Cue], secondary: &[Cue]) -> Result<Vec<(SanitizedCue, SanitizedCue)>, TranscriptError> {
    let primary: Vec<SanitizedCue> = primary.iter().map(Cue::sanitize).collect();
    let secondary: Vec<SanitizedCue> = secondary.iter().map(Cue::sanitize).collect();

    if primary.len() != secondary.len() {
        return Err(TranscriptError::CueCountMismatch {
            primary: primary.len(),
            secondary: secondary.len(),
        });
    }

    Ok(primary.into_iter().zip(secondary).collect())
}

/// Number of pairs whose start times differ by more than `tolerance_ms`.
///
/// Pairs where either side has no parsable start time are not counted.
pub fn count_drifted_pairs(primary: &[Cue], secondary: &[Cue], tolerance_ms: u64) -> usize {
    primary
        .iter()
        .zip(secondary)
        .filter_map(|(p, s)| Some((p.start_time_ms()?, s.start_time_ms()?)))
        .filter(|(p, s)| p.abs_diff(*s) > tolerance_ms)
        .count()
}

/// Builds the transcript for one language pair
#[derive(Debug, Clone)]
pub struct TranscriptBuilder {
    phonemizer: Phonemizer,
    primary_language: String,
    secondary_language: String,
    drift_tolerance_ms: u64,
}

impl TranscriptBuilder {
    pub fn new(phonemizer: Phonemizer, primary_language: &str, secondary_language: &str) -> Self {
        Self {
            phonemizer,
            primary_language: primary_language.to_string(),
            secondary_language: secondary_language.to_string(),
            drift_tolerance_ms: 1000,
        }
    }

    pub fn with_drift_tolerance_ms(mut self, tolerance_ms: u64) -> Self {
        self.drift_tolerance_ms = tolerance_ms;
        self
    }

    /// Pair the tracks and phonemize every primary cue, in index order.
    ///
    /// `secondary = None` means the track is absent and is replaced by empty
    /// placeholders of the primary's length.
    pub async fn align(&self, primary: &[Cue], secondary: Option<&[Cue]>) -> Result<Vec<AlignedPair>, AppError> {
        let placeholders;
        let secondary = match secondary {
            Some(cues) => cues,
            None => {
                placeholders = placeholder_track(primary.len());
                &placeholders
            }
        };

        let pairs = pair_cues(primary, secondary)?;
        self.report_drift(primary, secondary);

        let progress_bar = ProgressBar::new(pairs.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cues ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);
        progress_bar.set_message("IPA");

        let mut aligned = Vec::with_capacity(pairs.len());
        for (index, (primary_cue, secondary_cue)) in pairs.into_iter().enumerate() {
            if primary_cue.is_empty() {
                debug!("Cue {} has no text after cleanup:\n{}", index + 1, primary[index]);
            }

            let phonetic = match self.phonemizer.transcribe(&primary_cue.plain_text, &self.primary_language).await {
                Ok(phonetic) => phonetic,
                Err(e) => {
                    progress_bar.abandon();
                    return Err(e);
                }
            };
            aligned.push(AlignedPair {
                primary: primary_cue,
                secondary: secondary_cue,
                phonetic,
            });
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        Ok(aligned)
    }

    /// Align the tracks and render every pair into the final document
    pub async fn build(&self, primary: &[Cue], secondary: Option<&[Cue]>) -> Result<TranscriptDocument, AppError> {
        let aligned = self.align(primary, secondary).await?;
        let blocks: Vec<String> = aligned.iter().map(AlignedPair::render).collect();

        debug!("Rendered {} blocks", blocks.len());
        Ok(TranscriptDocument::new(&self.primary_language, &self.secondary_language, blocks))
    }

    fn report_drift(&self, primary: &[Cue], secondary: &[Cue]) {
        let drifted = count_drifted_pairs(primary, secondary, self.drift_tolerance_ms);
        if drifted > 0 {
            warn!(
                "{} of {} cue pairs start more than {} ms apart; the tracks may not share the same timing",
                drifted,
                primary.len(),
                self.drift_tolerance_ms
            );
        }
    }
}
