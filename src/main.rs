// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use yt_parallel::app_config::{self, Config};
use yt_parallel::{AppError, Controller, TranscriptDocument};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for yt-parallel
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// yt-parallel - parallel transcripts with IPA
///
/// Downloads two subtitle tracks of a video, transcribes the first language
/// to IPA with espeak and prints a merged HTML transcript to standard output.
#[derive(Parser, Debug)]
#[command(name = "yt-parallel")]
#[command(version)]
#[command(about = "Bilingual HTML transcript with IPA from a video's subtitles")]
#[command(long_about = "yt-parallel downloads the subtitles of a video in two languages with yt-dlp,
generates IPA for the first language with espeak and writes a merged HTML
transcript to standard output. Progress and diagnostics go to standard error.

EXAMPLES:
    yt-parallel \"https://www.youtube.com/watch?v=...\" da en > da-en-transcript.html
    YT_PARALLEL_COOKIES=firefox yt-parallel \"https://youtu.be/...\" fr en > out.html
    yt-parallel --log-level debug \"https://youtu.be/...\" de en > out.html
    yt-parallel completions bash > yt-parallel.bash

CONFIGURATION:
    An optional JSON file (--config, or config.json in the per-user
    yt-parallel configuration directory) can override program names,
    the cookie browser, the impersonation target, retries and timeouts.")]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Video URL
    #[arg(value_name = "VIDEO_URL", required = true)]
    url: Option<String>,

    /// Primary language code, shown in bold with IPA (e.g. 'da')
    #[arg(value_name = "PRIMARY_LANG", required = true)]
    primary_language: Option<String>,

    /// Secondary language code, shown as translation (e.g. 'en')
    #[arg(value_name = "SECONDARY_LANG", required = true)]
    secondary_language: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Browser to read authentication cookies from
    #[arg(short = 'b', long, env = "YT_PARALLEL_COOKIES")]
    cookies_from_browser: Option<String>,
}

// @struct: Logger writing to stderr so stdout only carries the document
struct CustomLogger {
    level: LevelFilter,
    colored: bool,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger {
            level,
            colored: std::io::stderr().is_terminal(),
        });
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Prefix and ANSI color for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("! FATAL", "\x1B[1;31m"),
            Level::Warn => ("! WARNING", "\x1B[1;33m"),
            Level::Info => ("", "\x1B[1;32m"),
            Level::Debug => ("debug", "\x1B[1;36m"),
            Level::Trace => ("trace", "\x1B[1;35m"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let (prefix, color) = Self::style_for_level(record.level());
        let separator = if prefix.is_empty() { "" } else { ": " };

        let mut stderr = std::io::stderr();
        let _ = if self.colored {
            writeln!(stderr, "{}{} {}{}{}\x1B[0m", color, now, prefix, separator, record.args())
        } else {
            writeln!(stderr, "{} {}{}{}", now, prefix, separator, record.args())
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Accept everything here; the effective level is applied through log::set_max_level
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "yt-parallel", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(cli).await {
        Ok(document) => write_document(&document),
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(options: CommandLineOptions) -> Result<TranscriptDocument, AppError> {
    // If log level is set via command line, apply it before loading the config
    if let Some(level) = options.log_level {
        log::set_max_level(app_config::LogLevel::from(level).into());
    }

    let (Some(url), Some(primary), Some(secondary)) =
        (options.url, options.primary_language, options.secondary_language)
    else {
        return Err(AppError::Usage(
            "VIDEO_URL, PRIMARY_LANG and SECONDARY_LANG are required".to_string(),
        ));
    };

    let config = resolve_config(options.config, options.cookies_from_browser, options.log_level)?;
    log::set_max_level(config.log_level.into());

    let controller = Controller::with_config(config);
    controller.run(&url, &primary, &secondary).await
}

// Precedence: command line and environment, then config file, then defaults
fn resolve_config(
    config_path: Option<PathBuf>,
    cookies_from_browser: Option<String>,
    log_level: Option<CliLogLevel>,
) -> Result<Config, AppError> {
    let mut config = Config::load(config_path.as_deref())?;

    if let Some(browser) = cookies_from_browser {
        config.downloader.cookies_browser = browser;
    }

    if let Some(level) = log_level {
        config.log_level = level.into();
    }

    config.validate()?;
    Ok(config)
}

fn write_document(document: &TranscriptDocument) -> ExitCode {
    let html = document.render();
    let mut stdout = std::io::stdout().lock();

    match stdout.write_all(html.as_bytes()).and_then(|_| stdout.flush()) {
        Ok(()) => {
            info!("Transcript written ({} blocks)", document.blocks.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to write transcript to standard output: {}", e);
            ExitCode::FAILURE
        }
    }
}
