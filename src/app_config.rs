use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and locating configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Subtitle downloader settings
    #[serde(default)]
    pub downloader: DownloaderConfig,

    /// Phonetic transcription settings
    #[serde(default)]
    pub phonemizer: PhonemizerConfig,

    /// Transcript merge settings
    #[serde(default)]
    pub transcript: TranscriptConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Subtitle downloader (yt-dlp) configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DownloaderConfig {
    // @field: Executable name or path
    #[serde(default = "default_downloader_program")]
    pub program: String,

    // @field: Browser whose cookies authenticate the request
    #[serde(default = "default_cookies_browser")]
    pub cookies_browser: String,

    // @field: Client fingerprint to impersonate
    #[serde(default = "default_impersonate")]
    pub impersonate: String,

    // @field: Retry count handed to the downloader
    #[serde(default = "default_retries")]
    pub retries: u32,

    // @field: Subtitle format requested and expected on disk
    #[serde(default = "default_sub_format")]
    pub sub_format: String,

    // @field: Optional wall-clock limit in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            program: default_downloader_program(),
            cookies_browser: default_cookies_browser(),
            impersonate: default_impersonate(),
            retries: default_retries(),
            sub_format: default_sub_format(),
            timeout_secs: None,
        }
    }
}

/// Phonemizer (espeak) configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PhonemizerConfig {
    /// Executable name or path
    #[serde(default = "default_phonemizer_program")]
    pub program: String,

    /// IPA detail level passed as `--ipa=<level>`; 2 adds stress marks
    #[serde(default = "default_ipa_level")]
    pub ipa_level: u8,

    /// Optional per-cue wall-clock limit in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for PhonemizerConfig {
    fn default() -> Self {
        Self {
            program: default_phonemizer_program(),
            ipa_level: default_ipa_level(),
            timeout_secs: None,
        }
    }
}

/// Transcript merge configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptConfig {
    /// Start-time difference above which a cue pair counts as drifted
    #[serde(default = "default_drift_tolerance_ms")]
    pub drift_tolerance_ms: u64,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            drift_tolerance_ms: default_drift_tolerance_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Environment variable selecting the cookie source browser
pub const COOKIES_ENV_VAR: &str = "YT_PARALLEL_COOKIES";

fn default_downloader_program() -> String {
    "yt-dlp".to_string()
}

fn default_cookies_browser() -> String {
    "chrome".to_string()
}

fn default_impersonate() -> String {
    "Safari".to_string()
}

fn default_retries() -> u32 {
    3
}

fn default_sub_format() -> String {
    "vtt".to_string()
}

fn default_phonemizer_program() -> String {
    "espeak".to_string()
}

fn default_ipa_level() -> u8 {
    2
}

fn default_drift_tolerance_ms() -> u64 {
    1000
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Per-user configuration file location, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("yt-parallel").join("config.json"))
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Without one, the per-user file is read when
    /// present and defaults are used otherwise. Nothing is written to disk.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::debug!("Using configuration from {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.downloader.program.trim().is_empty() {
            return Err(anyhow!("Downloader program must not be empty"));
        }

        if self.phonemizer.program.trim().is_empty() {
            return Err(anyhow!("Phonemizer program must not be empty"));
        }

        if self.downloader.cookies_browser.trim().is_empty() {
            return Err(anyhow!("Cookie source browser must not be empty"));
        }

        if self.downloader.sub_format.trim().is_empty() {
            return Err(anyhow!("Subtitle format must not be empty"));
        }

        if self.downloader.retries == 0 {
            return Err(anyhow!("Downloader retries must be at least 1"));
        }

        if !(1..=3).contains(&self.phonemizer.ipa_level) {
            return Err(anyhow!(
                "IPA level must be between 1 and 3, got {}",
                self.phonemizer.ipa_level
            ));
        }

        if self.downloader.timeout_secs == Some(0) || self.phonemizer.timeout_secs == Some(0) {
            return Err(anyhow!("Timeouts must be greater than zero when set"));
        }

        Ok(())
    }
}
