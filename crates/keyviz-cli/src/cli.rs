use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Per-line load decisions
    Debug,
    /// Every message, the most verbose level
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "keyviz")]
#[command(about = "keyviz - inspect, validate and edit MIDI visualizer settings")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file path (defaults to ~/.config/keyviz/settings.conf)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Effective log level: explicit level, then `-v`, then warnings only.
    pub fn level_filter(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::WARN,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print documentation for every option
    Options,

    /// Load the settings file, apply overrides and print the normalized result
    Show {
        /// Override an option (can be repeated), e.g. --set scale=2.0
        #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
        overrides: Vec<String>,
    },

    /// Load the settings file, apply overrides and write it back
    Write {
        /// Override an option (can be repeated), e.g. --set showWave=0
        #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
        overrides: Vec<String>,

        /// Destination file (defaults to the loaded settings file)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// List the rendering quality presets
    Presets,

    /// Export option metadata
    Schema {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: SchemaFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaFormat {
    Text,
    Json,
}
