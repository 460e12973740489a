//! Stdin script source for piped input.

use crate::model::ScriptError;
use std::io::{BufRead, BufReader, IsTerminal, Read};

/// Event script piped on stdin, e.g. `cat demo.jsonl | sitemotion replay ...`.
pub struct StdinSource<R: Read> {
    reader: BufReader<R>,
    complete: bool,
}

impl StdinSource<std::io::Stdin> {
    /// Stdin as a script source.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::NoInput` if stdin is an interactive terminal, so
    /// the replay does not sit waiting for typed events.
    pub fn new() -> Result<Self, ScriptError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(ScriptError::NoInput);
        }
        Ok(Self::from_reader(stdin))
    }
}

impl<R: Read> StdinSource<R> {
    /// Source over any reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            complete: false,
        }
    }

    /// Next line without its terminator, or `None` at EOF.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::Io` for read failures.
    pub fn next_line(&mut self) -> Result<Option<String>, ScriptError> {
        if self.complete {
            return Ok(None);
        }
        let mut buffer = String::new();
        if self.reader.read_line(&mut buffer)? == 0 {
            self.complete = true;
            return Ok(None);
        }
        let line = buffer.trim_end_matches(['\n', '\r']).to_string();
        Ok(Some(line))
    }

    /// Read every remaining line.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::Io` for read failures.
    pub fn read_all(&mut self) -> Result<Vec<String>, ScriptError> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line()? {
            lines.push(line);
        }
        Ok(lines)
    }

    /// Whether EOF has been reached.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

impl<R: Read> std::fmt::Debug for StdinSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdinSource")
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_returned_without_terminators() {
        let data = b"line1\r\nline2\n";
        let mut source = StdinSource::from_reader(&data[..]);
        assert_eq!(source.next_line().unwrap(), Some("line1".to_string()));
        assert_eq!(source.next_line().unwrap(), Some("line2".to_string()));
        assert_eq!(source.next_line().unwrap(), None);
        assert!(source.is_complete());
    }

    #[test]
    fn trailing_partial_line_is_kept() {
        let data = b"{\"type\":\"scroll\",\"y\":1}\n{\"type\":\"scroll\",\"y\":2}";
        let mut source = StdinSource::from_reader(&data[..]);
        assert_eq!(source.read_all().unwrap().len(), 2);
    }

    #[test]
    fn empty_input_completes_immediately() {
        let mut source = StdinSource::from_reader(&b""[..]);
        assert!(source.read_all().unwrap().is_empty());
        assert!(source.is_complete());
    }
}
