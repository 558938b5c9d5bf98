//! Where a rendered report goes.
//!
//! The caller picks the destination; nothing here inspects the environment.

use crate::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Destination for a rendered text document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Write to standard output, for display by whatever is running us.
    Inline,
    /// Write (create or truncate) a file.
    File(PathBuf),
}

impl OutputSink {
    /// Send a document to its destination; `Inline` goes to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn emit(&self, document: &str) -> Result<()> {
        let stdout = std::io::stdout();
        self.emit_to(document, stdout.lock())
    }

    /// Send a document, using `inline` as the writer for [`OutputSink::Inline`].
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn emit_to<W: Write>(&self, document: &str, mut inline: W) -> Result<()> {
        match self {
            OutputSink::Inline => {
                inline.write_all(document.as_bytes())?;
                inline.flush()?;
            }
            OutputSink::File(path) => std::fs::write(path, document)?,
        }
        Ok(())
    }

    /// The target file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputSink::Inline => None,
            OutputSink::File(path) => Some(path),
        }
    }
}

impl std::fmt::Display for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputSink::Inline => f.write_str("stdout"),
            OutputSink::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_writes_to_writer() {
        let mut buffer = Vec::new();
        OutputSink::Inline.emit_to("<table/>", &mut buffer).unwrap();
        assert_eq!(buffer, b"<table/>");
        assert_eq!(OutputSink::Inline.path(), None);
    }

    #[test]
    fn test_file_sink_ignores_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.html");
        let sink = OutputSink::File(path.clone());
        let mut buffer = Vec::new();

        sink.emit_to("<html/>", &mut buffer).unwrap();

        assert!(buffer.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html/>");
        assert_eq!(sink.path(), Some(path.as_path()));
        assert_eq!(sink.to_string(), path.display().to_string());
    }

    #[test]
    fn test_file_sink_missing_dir() {
        let sink = OutputSink::File(PathBuf::from("/no/such/dir/table.html"));
        assert!(sink.emit("x").is_err());
    }
}
