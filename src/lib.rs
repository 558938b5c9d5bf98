//! # usage-by-user
//!
//! Per-user disk usage reports from the text output of a filesystem walk.
//!
//! Each input line names an owner, a size with a unit and an absolute path:
//!
//! ```text
//! alice users rwx 5 MB 2023-01-01 /nfs/turbo/proj/data.bin
//! ```
//!
//! The pipeline is split into small stages:
//!
//! - [`parse`]: anchor-based line splitting and positional record parsing
//! - [`aggregate`]: grouping by user (first-seen order, stable detail sort)
//! - [`share`]: whole-percent shares for the chart
//! - [`units`]: the fixed `B`/`KB`/`MB`/`GB` table and display formatting
//!
//! Two reports sit on top ([`report::graph`] and [`report::top`]) and render
//! through [`plots::PieChart`] and [`output::HtmlExporter`].
//!
//! ## Quick Start
//!
//! ```
//! use usage_by_user::prelude::*;
//!
//! let splitter = LineSplitter::new("/nfs/turbo/").unwrap();
//! let text = "alice users rwx 3 GB 2023-01-01 /nfs/turbo/a\n\
//!             bob users rwx 1 GB 2023-01-01 /nfs/turbo/b\n";
//! let records = parse_report(text, &splitter, &RecordParser::default(), 1).unwrap();
//! let table = UsageTable::from_records(records);
//!
//! let shares = chart_shares(&table.totals()).unwrap();
//! assert_eq!(shares[0].percent, 75);
//! assert_eq!(format_bytes(table.detail_for("bob").unwrap()[0].bytes), "1GB");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Size units and byte formatting.
pub mod units;

/// Walk report parsing.
pub mod parse;

/// Grouping of records by user.
pub mod aggregate;

/// Percentage shares for charting.
pub mod share;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Color types and the slice palette.
pub mod color;

/// Pixel framebuffer.
pub mod framebuffer;

/// Rasterization of chart primitives.
pub mod render;

/// Chart types.
pub mod plots;

/// Output encoders (PNG, SVG, HTML) and destinations.
pub mod output;

// ============================================================================
// Application Modules
// ============================================================================

/// Configuration loading.
pub mod config;

/// The `graph` and `top` reports.
pub mod report;

/// Error types.
pub mod error;

pub use error::{Error, Result};

/// Commonly used types and functions for convenient imports.
pub mod prelude {
    pub use crate::aggregate::{UsageTable, UserTotal};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::output::{HtmlExporter, OutputSink, PngEncoder};
    pub use crate::parse::{
        parse_report, read_report, FieldLayout, LineSplitter, Record, RecordParser,
    };
    pub use crate::plots::PieChart;
    pub use crate::share::{chart_shares, shares, UserShare};
    pub use crate::units::{format_bytes, reduce, Unit};
}
