//! Error handling for trackprep.
//!
//! Feature steps work with `anyhow::Result` internally and attach context as
//! they go. At the public boundary everything is folded into [`PrepError`],
//! which callers can match on:
//!
//! ```
//! use trackprep::error::PrepError;
//!
//! fn describe(err: &PrepError) -> &'static str {
//!     match err {
//!         PrepError::Config(_) => "bad configuration",
//!         PrepError::Io(_) => "could not read configuration",
//!         _ => "dataframe processing failed",
//!     }
//! }
//! ```
//!
//! The [`ResultExt`] trait adds `.context()` to any result whose error
//! converts into [`PrepError`]:
//!
//! ```no_run
//! use trackprep::error::ResultExt as _;
//!
//! fn read(path: &str) -> trackprep::error::Result<String> {
//!     std::fs::read_to_string(path).context("Failed to read config")
//! }
//! ```

use std::fmt;

/// Main error type for trackprep operations.
#[derive(Debug)]
pub enum PrepError {
    /// I/O errors while reading or writing configuration
    Io(std::io::Error),

    /// Dataframe engine errors
    DataProcessing(String),

    /// Invalid or unparseable configuration
    Config(String),

    /// A feature step failed
    Step(String),
}

impl fmt::Display for PrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Step(msg) => write!(f, "Feature step error: {msg}"),
        }
    }
}

impl std::error::Error for PrepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PrepError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for PrepError {
    fn from(err: anyhow::Error) -> Self {
        // `{:#}` keeps the whole context chain on one line
        Self::Step(format!("{err:#}"))
    }
}

impl From<serde_json::Error> for PrepError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for PrepError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for trackprep operations.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Errors
    ///
    /// Returns the original error, converted and prefixed with `msg`.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    ///
    /// # Errors
    ///
    /// Returns the original error, converted and prefixed with the closure's message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PrepError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        let msg = msg.into();
        self.map_err(|e| wrap(e.into(), &msg))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(e.into(), &f()))
    }
}

/// Prefix an error with a message, keeping its category.
fn wrap(err: PrepError, msg: &str) -> PrepError {
    match err {
        PrepError::Io(e) => PrepError::Io(std::io::Error::new(e.kind(), format!("{msg}: {e}"))),
        PrepError::DataProcessing(inner) => PrepError::DataProcessing(format!("{msg}: {inner}")),
        PrepError::Config(inner) => PrepError::Config(format!("{msg}: {inner}")),
        PrepError::Step(inner) => PrepError::Step(format!("{msg}: {inner}")),
    }
}
