/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use yt_parallel::app_config::{Config, LogLevel};
use crate::common;

/// A config file overrides only the fields it names
#[test]
fn test_config_fromFile_withPartialJson_shouldKeepDefaults() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        dir.path(),
        "config.json",
        r#"{
            "downloader": { "cookies_browser": "firefox", "retries": 5, "timeout_secs": 600 },
            "transcript": { "drift_tolerance_ms": 250 },
            "log_level": "warn"
        }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.downloader.cookies_browser, "firefox");
    assert_eq!(config.downloader.retries, 5);
    assert_eq!(config.downloader.timeout_secs, Some(600));
    assert_eq!(config.downloader.program, "yt-dlp");
    assert_eq!(config.downloader.impersonate, "Safari");
    assert_eq!(config.phonemizer.program, "espeak");
    assert_eq!(config.transcript.drift_tolerance_ms, 250);
    assert_eq!(config.log_level, LogLevel::Warn);
    config.validate()?;
    Ok(())
}

/// An explicit path that does not exist is an error
#[test]
fn test_config_load_withMissingExplicitPath_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let missing = dir.path().join("nope.json");

    let err = Config::load(Some(&missing)).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to open config file"));
    assert!(!missing.exists());
    Ok(())
}

/// Malformed JSON reports the file it came from
#[test]
fn test_config_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "broken.json", "{ not json")?;

    let err = Config::from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
    Ok(())
}

/// Validation rejects unusable values
#[test]
fn test_config_validate_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.downloader.program = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.downloader.retries = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.phonemizer.timeout_secs = Some(0);
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.downloader.cookies_browser = String::new();
    assert!(config.validate().is_err());
}

/// Serializing and reading back keeps every value
#[test]
fn test_config_serialize_shouldRoundTrip() -> Result<()> {
    let mut config = Config::default();
    config.phonemizer.program = "espeak-ng".to_string();
    config.log_level = LogLevel::Trace;

    let json = serde_json::to_string_pretty(&config)?;
    let parsed: Config = serde_json::from_str(&json)?;

    assert_eq!(parsed.phonemizer.program, "espeak-ng");
    assert_eq!(parsed.log_level, LogLevel::Trace);
    assert_eq!(parsed.downloader.sub_format, "vtt");
    Ok(())
}

/// Log levels map onto the log crate's filters
#[test]
fn test_logLevel_intoLevelFilter_shouldMatch() {
    assert_eq!(log::LevelFilter::from(LogLevel::Error), log::LevelFilter::Error);
    assert_eq!(log::LevelFilter::from(LogLevel::Info), log::LevelFilter::Info);
    assert_eq!(log::LevelFilter::from(LogLevel::Trace), log::LevelFilter::Trace);
}
