//! Error types for the parser core.
//!
//! `IntentParser::parse` never returns an error; these cover construction,
//! configuration loading, the calendrical fallback and the voice pipeline.

use thiserror::Error;

/// Errors raised while building a parser.
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Invalid pattern in lexicon: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for environment variable {var}")]
    InvalidEnv { var: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failures inside the calendrical fallback parser.
///
/// The date resolver logs and discards these; they never reach a `ParseResult`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("Not a calendar date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Date arithmetic out of range for {0:?}")]
    OutOfRange(String),

    #[error("Invalid number in date expression: {0:?}")]
    Number(String),
}

/// Errors from the speech-to-text side of the voice pipeline.
#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to load transcription model: {0}")]
    ModelLoad(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Transcription produced no text")]
    EmptyTranscript,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
