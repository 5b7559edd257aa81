/*!
 * Bilingual transcript assembly.
 *
 * - `align`: pairs the primary and secondary cue tracks by index and
 *   attaches the phonetic transcription of every primary cue
 * - `render`: turns aligned pairs into HTML blocks and the document shell
 */

pub mod align;
pub mod render;

pub use align::{AlignedPair, TranscriptBuilder, pair_cues, placeholder_track};
pub use render::{TranscriptDocument, render_block};
