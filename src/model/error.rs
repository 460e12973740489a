//! Error types for sitemotion.
//!
//! A layered taxonomy built on `thiserror`; every layer composes into
//! [`AppError`] through `From` so the binary can propagate with `?`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level failure returned from `main`
//!   - [`ScriptError`] - event script could not be read (file missing, no input, I/O)
//!   - [`ParseError`] - one malformed script line; **non-fatal**, reported and skipped
//!   - [`FixtureError`] - page fixture could not be read or parsed
//!   - [`DomError`] - document-level failure (unresolvable target, detached node)
//!   - `ConfigError`, `LoggingError`, `ToolError` - ambient layers, defined beside their modules
//!
//! Failures inside page components never reach this taxonomy: a missing
//! element makes the component a no-op, and a failed optional enhancement is
//! logged and swallowed so the page stays usable.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Event script input failed.
    #[error("Failed to read event script: {0}")]
    Script(#[from] ScriptError),

    /// Page fixture failed to load.
    #[error("Failed to load page fixture: {0}")]
    Fixture(#[from] FixtureError),

    /// Configuration failed to load.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// A maintenance tool failed.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::tools::ToolError),

    /// Terminal or output stream failure.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors reading an event script from a file or stdin.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script path does not exist.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use sitemotion::model::ScriptError;
    ///
    /// let err = ScriptError::FileNotFound { path: PathBuf::from("/tmp/missing.jsonl") };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// No script path was given and stdin is an interactive terminal.
    #[error("No input source: provide a script path or pipe events to stdin")]
    NoInput,

    /// Underlying read failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A script line that could not be turned into an event.
///
/// Carries the 1-based line number so the replay report can point at it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line_number}: {message}")]
pub struct ParseError {
    /// 1-based line number in the script.
    pub line_number: usize,
    /// What was wrong with the line.
    pub message: String,
}

/// Errors loading a page fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture path does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// Read failure.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid TOML or a field with the wrong shape.
    #[error("Invalid fixture {path}: {reason}")]
    Parse {
        /// Path being parsed.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
}

/// Document-level failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    /// A selector matched nothing.
    #[error("No element matches selector {0:?}")]
    UnresolvedTarget(String),

    /// A selector could not be parsed.
    #[error("Invalid selector {0:?}")]
    InvalidSelector(String),

    /// A node that should have a parent is detached from the tree.
    #[error("Node {0} is detached from the document")]
    Detached(usize),

    /// Pointer capture release for a pointer that no longer holds capture.
    #[error("Pointer {pointer_id} does not hold capture on node {node}")]
    CaptureNotHeld {
        /// Node the release was requested on.
        node: usize,
        /// Pointer that was expected to hold capture.
        pointer_id: i32,
    },
}
