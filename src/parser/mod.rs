//! JSONL parser for event scripts.
//!
//! Pure functions turning script lines into [`PageEvent`]s. A bad line never
//! stops a script: the graceful entry point reports it with its line number
//! and the caller moves on.

use crate::model::{PageEvent, ParseError};

/// Prefix marking a comment line.
const COMMENT_PREFIX: &str = "//";

/// Outcome of one script line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// Parsed an event.
    Event(PageEvent),
    /// Blank line or comment.
    Skipped,
    /// The line could not be parsed.
    Malformed(ParseError),
}

/// Whether a line carries no event.
pub fn is_ignorable(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX)
}

/// Parse one non-blank line into an event.
///
/// # Errors
///
/// Returns `ParseError` carrying `line_number` when the line is not valid JSON
/// or does not describe a known event.
pub fn parse_event(raw: &str, line_number: usize) -> Result<PageEvent, ParseError> {
    let event: PageEvent = serde_json::from_str(raw.trim()).map_err(|e| ParseError {
        line_number,
        message: e.to_string(),
    })?;
    validate(&event).map_err(|message| ParseError {
        line_number,
        message,
    })?;
    Ok(event)
}

/// Parse one line without failing: blanks and comments are skipped, errors
/// are returned as values.
pub fn parse_line_graceful(raw: &str, line_number: usize) -> ParseResult {
    if is_ignorable(raw) {
        return ParseResult::Skipped;
    }
    match parse_event(raw, line_number) {
        Ok(event) => ParseResult::Event(event),
        Err(err) => ParseResult::Malformed(err),
    }
}

/// Parse a whole script. Line numbers are 1-based.
pub fn parse_script(contents: &str) -> (Vec<PageEvent>, Vec<ParseError>) {
    let mut events = Vec::new();
    let mut errors = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        match parse_line_graceful(line, i + 1) {
            ParseResult::Event(event) => events.push(event),
            ParseResult::Skipped => {}
            ParseResult::Malformed(err) => errors.push(err),
        }
    }
    (events, errors)
}

/// Reject values serde accepts but no browser would deliver.
fn validate(event: &PageEvent) -> Result<(), String> {
    match event {
        PageEvent::Scroll { y } if !y.is_finite() => Err("scroll y must be finite".to_string()),
        PageEvent::Resize { width, height }
            if !(width.is_finite() && height.is_finite()) || *width < 0.0 || *height < 0.0 =>
        {
            Err("resize dimensions must be finite and non-negative".to_string())
        }
        PageEvent::PointerDown(p)
        | PageEvent::PointerMove(p)
        | PageEvent::PointerUp(p)
        | PageEvent::PointerCancel(p)
            if !p.x.is_finite() =>
        {
            Err("pointer x must be finite".to_string())
        }
        _ => match event.target() {
            Some(target) if target.trim().is_empty() => Err("empty target selector".to_string()),
            _ => Ok(()),
        },
    }
}
