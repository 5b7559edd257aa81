use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::Config;
use crate::downloader::SubtitleDownloader;
use crate::errors::AppError;
use crate::file_utils::{FileManager, ScratchDir};
use crate::language_utils;
use crate::phonemizer::Phonemizer;
use crate::subtitle_processor::{self, Cue};
use crate::tools::{SystemRunner, ToolRunner};
use crate::transcript::{TranscriptBuilder, TranscriptDocument};

// @module: Application controller for transcript generation

/// Main application controller: download, merge, render
#[derive(Debug, Clone)]
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: External program runner shared by downloader and phonemizer
    runner: Arc<dyn ToolRunner>,
}

impl Controller {
    /// Create a controller that runs the real external programs
    pub fn with_config(config: Config) -> Self {
        Self::with_runner(config, Arc::new(SystemRunner::new()))
    }

    /// Create a controller on top of an arbitrary runner
    pub fn with_runner(config: Config, runner: Arc<dyn ToolRunner>) -> Self {
        Self { config, runner }
    }

    /// Check both language codes before anything is started
    pub fn validate_languages(primary: &str, secondary: &str) -> Result<(), AppError> {
        for code in [primary, secondary] {
            language_utils::validate_subtitle_code(code).map_err(|e| AppError::Usage(e.to_string()))?;

            if language_utils::validate_language_code(code.split(['-', '_']).next().unwrap_or(code)).is_err() {
                warn!("'{}' is not an ISO 639 language code; passing it to the downloader as is", code);
            }
        }
        Ok(())
    }

    /// Run the whole workflow for one video and return the rendered document.
    ///
    /// The scratch directory lives exactly as long as this call.
    pub async fn run(&self, url: &str, primary: &str, secondary: &str) -> Result<TranscriptDocument, AppError> {
        let start_time = Instant::now();
        Self::validate_languages(primary, secondary)?;

        let scratch = ScratchDir::new().map_err(|e| AppError::File(format!("{:#}", e)))?;
        info!("Using temporary directory: {}", scratch.path().display());

        let downloader = SubtitleDownloader::new(self.config.downloader.clone(), Arc::clone(&self.runner));
        let tracks = downloader.download(url, scratch.path(), primary, secondary).await?;

        info!("--- Merging and processing subtitles ---");
        let document = self
            .run_from_files(&tracks.primary, tracks.secondary.as_deref(), primary, secondary)
            .await?;

        scratch.close();
        debug!("Transcript ready in {:.1}s", start_time.elapsed().as_secs_f64());
        Ok(document)
    }

    /// Merge already downloaded track files into a document
    pub async fn run_from_files(
        &self,
        primary_path: &Path,
        secondary_path: Option<&Path>,
        primary: &str,
        secondary: &str,
    ) -> Result<TranscriptDocument, AppError> {
        let primary_cues = Self::read_cues(primary_path)?;
        let secondary_cues = match secondary_path {
            Some(path) => Some(Self::read_cues(path)?),
            None => None,
        };

        info!(
            "{}: {} cues, {}: {}",
            language_utils::describe(primary),
            primary_cues.len(),
            language_utils::describe(secondary),
            secondary_cues
                .as_ref()
                .map(|cues| format!("{} cues", cues.len()))
                .unwrap_or_else(|| "absent".to_string())
        );

        if primary_cues.is_empty() {
            warn!("No cues found in {}", primary_path.display());
        }

        self.builder(primary, secondary)
            .build(&primary_cues, secondary_cues.as_deref())
            .await
    }

    fn builder(&self, primary: &str, secondary: &str) -> TranscriptBuilder {
        let phonemizer = Phonemizer::new(self.config.phonemizer.clone(), Arc::clone(&self.runner));
        TranscriptBuilder::new(phonemizer, primary, secondary)
            .with_drift_tolerance_ms(self.config.transcript.drift_tolerance_ms)
    }

    fn read_cues(path: &Path) -> Result<Vec<Cue>, AppError> {
        let content = FileManager::read_to_string(path).map_err(|e| AppError::File(format!("{:#}", e)))?;
        Ok(subtitle_processor::extract_cues(&content))
    }
}
