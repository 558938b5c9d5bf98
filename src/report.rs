//! The `graph` and `top` reports.
//!
//! Each report reads the walk file once, parses and groups it completely,
//! and only then writes its output, so a failure never leaves a partial
//! chart or table behind.

use crate::aggregate::UsageTable;
use crate::config::Config;
use crate::error::Result;
use crate::output::{HtmlExporter, OutputSink, PngEncoder};
use crate::parse::{parse_report, read_report};
use crate::plots::PieChart;
use crate::share::{chart_shares, UserShare};
use crate::units::format_total;
use batuta_common::display::WithDimensions;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// What `graph` produced.
#[derive(Debug, Clone)]
pub struct GraphSummary {
    /// Distinct users in the report.
    pub users: usize,
    /// Users that got a slice, in slice order.
    pub charted: Vec<UserShare>,
    /// Bytes across all users.
    pub total_bytes: u128,
    /// PNG written.
    pub chart_path: PathBuf,
    /// SVG written, if configured.
    pub svg_path: Option<PathBuf>,
}

/// What `top` produced.
#[derive(Debug, Clone)]
pub struct TopSummary {
    /// User reported on.
    pub user: String,
    /// Table rows written.
    pub rows: usize,
    /// Sum of the user's bytes.
    pub total_bytes: u128,
}

/// Read, parse and group a walk report.
///
/// # Errors
///
/// Returns I/O errors and the first parse error in the file.
pub fn load_table(config: &Config, input: &Path) -> Result<UsageTable> {
    let splitter = config.splitter()?;
    let parser = config.parser();

    let text = read_report(input)?;
    debug!(
        "read {} bytes from {} (root {}, {} thread(s))",
        text.len(),
        input.display(),
        splitter.root_prefix(),
        config.threads
    );

    let records = parse_report(&text, &splitter, &parser, config.threads)?;
    let table = UsageTable::from_records(records);
    info!(
        "parsed {} records for {} users from {}",
        table.record_count(),
        table.user_count(),
        input.display()
    );
    Ok(table)
}

/// Write the per-user usage pie chart.
///
/// # Errors
///
/// Returns [`crate::Error::EmptyDataset`] if the report holds no bytes, plus
/// any load or write error.
pub fn graph(config: &Config, input: &Path) -> Result<GraphSummary> {
    let table = load_table(config, input)?;
    let totals = table.totals();
    let charted = chart_shares(&totals)?;
    debug!(
        "{} of {} users have at least 1% of usage",
        charted.len(),
        totals.len()
    );

    let mut chart = PieChart::new().data(&charted);
    chart.set_dimensions(config.chart.width, config.chart.height);
    let chart = chart.build()?;

    for slice in chart.slices() {
        info!(
            "{:>12} {:>8} {:>7} {}",
            slice.user,
            format_total(slice.bytes),
            slice.label,
            slice.color.to_css()
        );
    }

    let fb = chart.to_framebuffer()?;
    PngEncoder::write_to_file(&fb, &config.chart.path)?;
    info!("wrote {}", config.chart.path.display());

    if let Some(svg_path) = &config.chart.svg {
        chart.to_svg().write_to_file(svg_path)?;
        info!("wrote {}", svg_path.display());
    }

    Ok(GraphSummary {
        users: table.user_count(),
        charted,
        total_bytes: table.total_bytes(),
        chart_path: config.chart.path.clone(),
        svg_path: config.chart.svg.clone(),
    })
}

/// Write the largest-paths table for `user`.
///
/// # Errors
///
/// Returns [`crate::Error::UnknownUser`] if the user owns nothing, plus any
/// load or write error.
pub fn top(config: &Config, input: &Path, user: &str, sink: &OutputSink) -> Result<TopSummary> {
    let table = load_table(config, input)?;
    let detail = table.detail_for(user)?;
    let total_bytes: u128 = detail.iter().map(|r| u128::from(r.bytes)).sum();

    let exporter =
        HtmlExporter::new(&format!("Largest paths for {user}")).records(detail.iter().copied());
    sink.emit(&exporter.render())?;
    info!("wrote {} rows for {user} to {sink}", exporter.rows().len());

    Ok(TopSummary {
        user: user.to_string(),
        rows: exporter.rows().len(),
        total_bytes,
    })
}
