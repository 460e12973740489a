//! File-based script source.

use crate::model::ScriptError;
use std::path::{Path, PathBuf};

/// An event script read once from disk.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    contents: Option<String>,
}

impl FileSource {
    /// Read the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::FileNotFound` if the file does not exist and
    /// `ScriptError::Io` for other read failures.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScriptError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            contents: Some(contents),
        })
    }

    /// Path the script came from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the lines; empty on every call after the first.
    pub fn drain_lines(&mut self) -> Vec<String> {
        self.contents
            .take()
            .map(|c| c.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_reported() {
        let err = FileSource::new("/definitely/not/here.jsonl").unwrap_err();
        assert!(matches!(err, ScriptError::FileNotFound { .. }));
    }

    #[test]
    fn drains_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"type":"scroll","y":10}}"#).unwrap();
        writeln!(file, r#"{{"type":"scroll","y":20}}"#).unwrap();
        let mut source = FileSource::new(file.path()).unwrap();
        assert_eq!(source.drain_lines().len(), 2);
        assert!(source.drain_lines().is_empty());
    }
}
