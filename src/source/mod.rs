//! Event script sources.
//!
//! - File loading for a script on disk
//! - Stdin for piped scripts
//! - [`ScriptSource`] unifying both

use crate::model::{PageEvent, ParseError, ScriptError};
use crate::parser::{parse_line_graceful, ParseResult};
use std::io::Read;
use std::path::PathBuf;
use tracing::warn;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Where an event script comes from. Exactly one variant.
#[derive(Debug)]
pub enum ScriptSource<R: Read = std::io::Stdin> {
    /// Script file.
    File(FileSource),
    /// Piped stdin.
    Stdin(StdinSource<R>),
}

/// A parsed script: the events in order plus the lines that failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    /// Events to replay.
    pub events: Vec<PageEvent>,
    /// Malformed lines, already reported.
    pub errors: Vec<ParseError>,
}

impl<R: Read> ScriptSource<R> {
    /// Read and parse every line.
    ///
    /// Malformed lines are logged and collected; they never abort the read.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::Io` for read failures.
    pub fn read_script(&mut self) -> Result<Script, ScriptError> {
        let lines = match self {
            ScriptSource::File(f) => f.drain_lines(),
            ScriptSource::Stdin(s) => s.read_all()?,
        };
        let mut script = Script::default();
        for (i, line) in lines.iter().enumerate() {
            match parse_line_graceful(line, i + 1) {
                ParseResult::Event(event) => script.events.push(event),
                ParseResult::Skipped => {}
                ParseResult::Malformed(err) => {
                    warn!(%err, "skipping malformed script line");
                    script.errors.push(err);
                }
            }
        }
        Ok(script)
    }
}

/// Pick the script source.
///
/// A path gives a [`FileSource`]; otherwise stdin, which must be piped.
///
/// # Errors
///
/// Returns `ScriptError::FileNotFound` for a missing path and
/// `ScriptError::NoInput` when stdin is a terminal.
pub fn detect_script_source(path: Option<PathBuf>) -> Result<ScriptSource, ScriptError> {
    match path {
        Some(path) => Ok(ScriptSource::File(FileSource::new(path)?)),
        None => Ok(ScriptSource::Stdin(StdinSource::new()?)),
    }
}
