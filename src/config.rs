//! Configuration for report generation.
//!
//! Supports YAML configuration with precedence: CLI > file > defaults.

use crate::error::{Error, Result};
use crate::parse::{LayoutPreset, LineSplitter, RecordParser, DEFAULT_ROOT_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Pie chart settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Image width in pixels.
    #[serde(default = "default_chart_width")]
    pub width: u32,

    /// Image height in pixels.
    #[serde(default = "default_chart_height")]
    pub height: u32,

    /// PNG output path.
    #[serde(default = "default_chart_path")]
    pub path: PathBuf,

    /// Optional SVG companion with user names.
    #[serde(default)]
    pub svg: Option<PathBuf>,
}

fn default_chart_width() -> u32 {
    640
}
fn default_chart_height() -> u32 {
    480
}
fn default_chart_path() -> PathBuf {
    PathBuf::from("usage.png")
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            path: default_chart_path(),
            svg: None,
        }
    }
}

/// Largest-paths table settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// HTML output path when not writing inline.
    #[serde(default = "default_table_path")]
    pub path: PathBuf,
}

fn default_table_path() -> PathBuf {
    PathBuf::from("table.html")
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            path: default_table_path(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Mount-point prefix every reported path starts with.
    #[serde(default = "default_root_prefix")]
    pub root_prefix: String,

    /// Column layout of the walk report.
    #[serde(default)]
    pub layout: LayoutPreset,

    /// Worker threads for parsing (1 = sequential).
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Chart settings.
    #[serde(default)]
    pub chart: ChartConfig,

    /// Table settings.
    #[serde(default)]
    pub table: TableConfig,
}

fn default_version() -> u32 {
    1
}
fn default_root_prefix() -> String {
    DEFAULT_ROOT_PREFIX.to_string()
}
fn default_threads() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            root_prefix: default_root_prefix(),
            layout: LayoutPreset::default(),
            threads: default_threads(),
            chart: ChartConfig::default(),
            table: TableConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// `<config dir>/usagebyuser/config.yaml`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("usagebyuser").join("config.yaml"))
    }

    /// Load `path` if given, else the default file if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file is missing, or if any
    /// file that is found fails to parse.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(default) if default.is_file() => Self::load(default),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Line splitter for the configured root prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRootPrefix`] if the prefix is unusable.
    pub fn splitter(&self) -> Result<LineSplitter> {
        LineSplitter::new(&self.root_prefix)
    }

    /// Record parser for the configured layout.
    #[must_use]
    pub fn parser(&self) -> RecordParser {
        RecordParser::new(self.layout.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::FieldLayout;

    #[test]
    fn test_config_default() {
        let config = Config::new();
        assert_eq!(config.version, 1);
        assert_eq!(config.root_prefix, "/nfs/turbo/");
        assert_eq!(config.threads, 1);
        assert_eq!(config.chart.path, PathBuf::from("usage.png"));
        assert_eq!(config.table.path, PathBuf::from("table.html"));
        assert_eq!(config.parser().layout(), FieldLayout::OWNER_FIRST);
    }

    #[test]
    fn test_parse_partial_yaml() {
        let config = Config::parse(
            "root_prefix: /scratch/\nlayout: mode-first\nthreads: 4\nchart:\n  width: 800\n  svg: usage.svg\n",
        )
        .unwrap();
        assert_eq!(config.root_prefix, "/scratch/");
        assert_eq!(config.layout, LayoutPreset::ModeFirst);
        assert_eq!(config.threads, 4);
        assert_eq!(config.chart.width, 800);
        assert_eq!(config.chart.height, 480);
        assert_eq!(config.chart.svg, Some(PathBuf::from("usage.svg")));
        assert_eq!(config.parser().layout(), FieldLayout::MODE_FIRST);
    }

    #[test]
    fn test_parse_empty_mapping_is_default() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_error_reports_bad_value() {
        let err = Config::parse("threads: 2\nlayout: sideways\n").unwrap_err();
        match err {
            Error::ConfigParse { message, .. } => {
                assert!(message.contains("sideways") || message.contains("variant"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/config.yaml"),
            Err(Error::ConfigNotFound(_))
        ));
        assert!(Config::discover(Some(Path::new("/nonexistent/config.yaml"))).is_err());
    }

    #[test]
    fn test_load_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut config = Config::default();
        config.threads = 3;
        std::fs::write(&path, serde_yaml_ng::to_string(&config).unwrap()).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_bad_root_prefix() {
        let config = Config::parse("root_prefix: relative/\n").unwrap();
        assert!(matches!(config.splitter(), Err(Error::InvalidRootPrefix(_))));
    }
}
