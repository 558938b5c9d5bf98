//! Splits a walk report line at its anchored absolute path.

use crate::error::{Error, Result};
use regex::Regex;

/// Default mount-point prefix that every reported path starts with.
pub const DEFAULT_ROOT_PREFIX: &str = "/nfs/turbo/";

/// A report line cut into its metadata columns and its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLine<'a> {
    /// Everything before the path (owner, group, size, unit, mtime...).
    pub metadata: &'a str,
    /// The absolute path, running to end of line.
    pub path: &'a str,
}

/// Locates `<root prefix>.+$` on a line.
///
/// Paths may contain spaces, so the split is anchored on the root prefix
/// rather than on a column count. The first occurrence of the prefix wins.
#[derive(Debug, Clone)]
pub struct LineSplitter {
    anchor: Regex,
    root_prefix: String,
}

impl LineSplitter {
    /// Build a splitter for paths under `root_prefix`.
    ///
    /// The prefix is matched literally and must be an absolute path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRootPrefix`] if the prefix is not absolute or
    /// the anchor pattern cannot be compiled.
    pub fn new(root_prefix: &str) -> Result<Self> {
        if !root_prefix.starts_with('/') {
            return Err(Error::InvalidRootPrefix(root_prefix.to_string()));
        }
        let pattern = format!("({}.+)$", regex::escape(root_prefix));
        let anchor =
            Regex::new(&pattern).map_err(|_| Error::InvalidRootPrefix(root_prefix.to_string()))?;
        Ok(Self {
            anchor,
            root_prefix: root_prefix.to_string(),
        })
    }

    /// The configured root prefix.
    #[must_use]
    pub fn root_prefix(&self) -> &str {
        &self.root_prefix
    }

    /// Split one line (without its terminator). `number` is the 1-based line
    /// number used in the error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedLine`] when no anchored path is present or
    /// nothing precedes it.
    pub fn split<'a>(&self, number: usize, line: &'a str) -> Result<SplitLine<'a>> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let malformed = || Error::MalformedLine {
            line: number,
            content: line.to_string(),
        };

        let found = self.anchor.find(line).ok_or_else(malformed)?;
        let metadata = &line[..found.start()];
        if metadata.is_empty() {
            return Err(malformed());
        }

        Ok(SplitLine {
            metadata,
            path: found.as_str(),
        })
    }
}
