//! Error types for usage-by-user operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, aggregating or rendering a usage report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// The parsing thread pool could not be started.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Invalid dimensions for framebuffer or chart.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// No anchored absolute path was found on a report line.
    #[error("line {line}: no path under the configured root: {content:?}")]
    MalformedLine {
        /// 1-based input line number.
        line: usize,
        /// The offending line, without its terminator.
        content: String,
    },

    /// The metadata part of a line could not be turned into a record.
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord {
        /// 1-based input line number.
        line: usize,
        /// What was wrong with the metadata fields.
        reason: String,
        /// Typed cause, when one exists (e.g. [`Error::UnknownUnit`]).
        #[source]
        source: Option<Box<Error>>,
    },

    /// Root prefix for the path anchor is unusable.
    #[error("invalid root prefix `{0}`: must be an absolute path")]
    InvalidRootPrefix(String),

    /// Unit symbol outside of `B`, `KB`, `MB`, `GB`.
    #[error("unknown size unit `{0}`")]
    UnknownUnit(String),

    /// The requested user owns nothing in the report.
    #[error("no records for user `{0}`")]
    UnknownUser(String),

    /// The report adds up to zero bytes, so shares are undefined.
    #[error("report contains no bytes to chart")]
    EmptyDataset,

    /// Configuration file was not found or unreadable.
    #[error("config not found: {0}")]
    ConfigNotFound(String),

    /// Configuration file could not be parsed.
    #[error("config parse error at line {line}: {message}")]
    ConfigParse {
        /// Line reported by the YAML parser (0 if unknown).
        line: usize,
        /// Parser message.
        message: String,
    },
}

impl Error {
    /// The typed cause behind a [`Error::MalformedRecord`], if any.
    #[must_use]
    pub fn record_cause(&self) -> Option<&Error> {
        match self {
            Error::MalformedRecord { source, .. } => source.as_deref(),
            _ => None,
        }
    }
}
