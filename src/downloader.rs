use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::DownloaderConfig;
use crate::errors::{AppError, ToolError};
use crate::file_utils::FileManager;
use crate::tools::{OutputMode, ToolInvocation, ToolRunner};

// @module: Subtitle download through an external downloader (yt-dlp)

/// Base name of the files written into the scratch directory
const OUTPUT_STEM: &str = "temp";

// @struct: Track files produced by a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedTracks {
    // @field: Primary language track, always present
    pub primary: PathBuf,

    // @field: Secondary language track, absent when not offered
    pub secondary: Option<PathBuf>,
}

/// Fetches human-authored and auto-generated subtitles for a video
#[derive(Debug, Clone)]
pub struct SubtitleDownloader {
    config: DownloaderConfig,
    runner: Arc<dyn ToolRunner>,
}

impl SubtitleDownloader {
    pub fn new(config: DownloaderConfig, runner: Arc<dyn ToolRunner>) -> Self {
        Self { config, runner }
    }

    /// Where the downloader writes the track for `language`
    pub fn track_path(&self, dir: &Path, language: &str) -> PathBuf {
        dir.join(format!("{}.{}.{}", OUTPUT_STEM, language, self.config.sub_format))
    }

    /// Full downloader argument list
    pub fn build_args(&self, url: &str, dir: &Path, primary: &str, secondary: &str) -> Vec<String> {
        let template = dir.join(format!("{}.%(ext)s", OUTPUT_STEM));

        vec![
            url.to_string(),
            "--cookies-from-browser".to_string(),
            self.config.cookies_browser.clone(),
            "--write-sub".to_string(),
            "--write-auto-sub".to_string(),
            "--sub-langs".to_string(),
            format!("{},{}", primary, secondary),
            "--sub-format".to_string(),
            self.config.sub_format.clone(),
            "--skip-download".to_string(),
            "--retries".to_string(),
            self.config.retries.to_string(),
            "--impersonate".to_string(),
            self.config.impersonate.clone(),
            "-o".to_string(),
            template.to_string_lossy().into_owned(),
        ]
    }

    /// Download both tracks into `dir`.
    ///
    /// The downloader's own output is forwarded to stderr. The primary track
    /// must exist afterwards; a missing or empty secondary track only warns.
    pub async fn download(&self, url: &str, dir: &Path, primary: &str, secondary: &str) -> Result<DownloadedTracks, AppError> {
        info!("--- Downloading Subtitles ({}/{}) for {} ---", primary, secondary, url);

        let invocation = ToolInvocation::new(self.config.program.clone(), self.build_args(url, dir, primary, secondary))
            .with_mode(OutputMode::ForwardToStderr)
            .with_timeout_secs(self.config.timeout_secs);

        match self.runner.run(invocation).await {
            Ok(_) => info!("Subtitle download complete."),
            Err(e @ ToolError::NotFound { .. }) => return Err(AppError::Tool(e)),
            Err(e) => return Err(AppError::DownloadFailed(e)),
        }

        let primary_path = self.track_path(dir, primary);
        if !FileManager::file_exists(&primary_path) {
            return Err(AppError::MissingPrimaryTrack {
                language: primary.to_string(),
                path: primary_path.display().to_string(),
            });
        }

        let secondary_path = self.track_path(dir, secondary);
        let secondary = if FileManager::file_has_content(&secondary_path) {
            Some(secondary_path)
        } else {
            warn!("Secondary subtitle file ({}) not found. Proceeding with {} only.", secondary, primary);
            None
        };

        Ok(DownloadedTracks {
            primary: primary_path,
            secondary,
        })
    }
}
