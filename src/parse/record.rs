//! Turns split report lines into typed records.

use super::splitter::SplitLine;
use crate::error::{Error, Result};
use crate::units::Unit;
use serde::{Deserialize, Serialize};

/// One filesystem entry from the walk report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the input report.
    pub line: usize,
    /// Owning user, exactly as printed.
    pub user: String,
    /// Size in bytes.
    pub bytes: u64,
    /// Absolute path.
    pub path: String,
}

/// Column positions (zero-based, after whitespace tokenization) of the fields
/// a record needs.
///
/// Walk tools do not all print the same columns. The positions are fixed per
/// report format and nothing checks that a column actually holds what the
/// layout claims, so a report with extra leading columns will misparse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Owner column.
    pub owner: usize,
    /// Numeric size column.
    pub size_value: usize,
    /// Size unit column.
    pub size_unit: usize,
}

impl FieldLayout {
    /// `<owner> <group> <perm> <size> <unit> <mtime...>`
    pub const OWNER_FIRST: Self = Self {
        owner: 0,
        size_value: 3,
        size_unit: 4,
    };

    /// `<perm> <owner> <group> <size> <unit> <mtime...>`
    pub const MODE_FIRST: Self = Self {
        owner: 1,
        size_value: 3,
        size_unit: 4,
    };

    /// Minimum number of metadata tokens a line must have.
    #[must_use]
    pub fn required_fields(&self) -> usize {
        self.owner.max(self.size_value).max(self.size_unit) + 1
    }
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self::OWNER_FIRST
    }
}

/// Named layout presets, as written in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPreset {
    /// See [`FieldLayout::OWNER_FIRST`].
    #[default]
    OwnerFirst,
    /// See [`FieldLayout::MODE_FIRST`].
    ModeFirst,
}

impl From<LayoutPreset> for FieldLayout {
    fn from(preset: LayoutPreset) -> Self {
        match preset {
            LayoutPreset::OwnerFirst => FieldLayout::OWNER_FIRST,
            LayoutPreset::ModeFirst => FieldLayout::MODE_FIRST,
        }
    }
}

/// Positional access to the metadata tokens of one line.
struct Fields<'a> {
    tokens: Vec<&'a str>,
    layout: FieldLayout,
}

impl<'a> Fields<'a> {
    fn owner(&self) -> &'a str {
        self.tokens[self.layout.owner]
    }

    fn size_value(&self) -> &'a str {
        self.tokens[self.layout.size_value]
    }

    fn size_unit(&self) -> &'a str {
        self.tokens[self.layout.size_unit]
    }
}

/// Builds [`Record`]s from [`SplitLine`]s using a [`FieldLayout`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordParser {
    layout: FieldLayout,
}

impl RecordParser {
    /// Create a parser for the given column layout.
    #[must_use]
    pub const fn new(layout: FieldLayout) -> Self {
        Self { layout }
    }

    /// The column layout in use.
    #[must_use]
    pub const fn layout(&self) -> FieldLayout {
        self.layout
    }

    /// Parse one split line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] when there are too few columns, the
    /// size is not a non-negative number, the unit is unknown, or the size
    /// does not fit in 64 bits.
    pub fn parse(&self, number: usize, split: SplitLine<'_>) -> Result<Record> {
        let malformed = |reason: String| Error::MalformedRecord {
            line: number,
            reason,
            source: None,
        };

        let tokens: Vec<&str> = split.metadata.split_whitespace().collect();
        let needed = self.layout.required_fields();
        if tokens.len() < needed {
            return Err(malformed(format!(
                "expected at least {needed} fields before the path, found {}",
                tokens.len()
            )));
        }
        let fields = Fields {
            tokens,
            layout: self.layout,
        };

        let unit = Unit::from_symbol(fields.size_unit()).map_err(|e| Error::MalformedRecord {
            line: number,
            reason: e.to_string(),
            source: Some(Box::new(e)),
        })?;
        let bytes = scaled_bytes(fields.size_value(), unit).map_err(malformed)?;

        Ok(Record {
            line: number,
            user: fields.owner().to_string(),
            bytes,
            path: split.path.to_string(),
        })
    }
}

/// Whole part of `value` times the unit. `value` is a plain decimal such as
/// `5`, `1.25` or `.5`; any fraction is dropped before scaling.
fn scaled_bytes(value: &str, unit: Unit) -> std::result::Result<u64, String> {
    let not_a_size = || format!("size `{value}` is not a non-negative number");

    let (whole, frac) = value.split_once('.').unwrap_or((value, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !is_digits(whole) || !is_digits(frac) {
        return Err(not_a_size());
    }

    let too_large = || format!("size `{value} {unit}` does not fit in 64 bits");
    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| too_large())?
    };
    whole.checked_mul(unit.multiplier()).ok_or_else(too_large)
}
