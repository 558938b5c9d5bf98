//! HTML table output for a user's largest paths.

use super::escape_markup;
use crate::parse::Record;
use crate::units::format_bytes;
use std::fmt::Write as FmtWrite;

/// One table row, with the size already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Input line the entry came from.
    pub line: usize,
    /// Owning user.
    pub user: String,
    /// Size such as `5MB`.
    pub size: String,
    /// Absolute path.
    pub path: String,
}

impl From<&Record> for TableRow {
    fn from(record: &Record) -> Self {
        Self {
            line: record.line,
            user: record.user.clone(),
            size: format_bytes(record.bytes),
            path: record.path.clone(),
        }
    }
}

/// Renders detail rows as a standalone HTML document.
#[derive(Debug, Clone, Default)]
pub struct HtmlExporter {
    title: String,
    rows: Vec<TableRow>,
}

impl HtmlExporter {
    /// Create an exporter with a document title.
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            rows: Vec::new(),
        }
    }

    /// Add rows built from records, in the order given.
    #[must_use]
    pub fn records<'a>(mut self, records: impl IntoIterator<Item = &'a Record>) -> Self {
        self.rows.extend(records.into_iter().map(TableRow::from));
        self
    }

    /// Rows added so far.
    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Render the full document.
    #[must_use]
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(256 + self.rows.len() * 128);
        let title = escape_markup(&self.title);

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{title}</title>");
        html.push_str(
            "<style>\n\
             table { border-collapse: collapse; font-family: sans-serif; }\n\
             th, td { padding: 2px 8px; text-align: left; }\n\
             td.size { text-align: right; }\n\
             tbody tr:nth-child(odd) { background: #f2f2f2; }\n\
             </style>\n",
        );
        html.push_str("</head>\n<body>\n<table>\n");
        let _ = writeln!(html, "<caption>{title}</caption>");
        html.push_str("<thead>\n<tr><th>line</th><th>user</th><th>bytes</th><th>path</th></tr>\n</thead>\n<tbody>\n");

        for row in &self.rows {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td class=\"size\">{}</td><td>{}</td></tr>",
                row.line,
                escape_markup(&row.user),
                escape_markup(&row.size),
                escape_markup(&row.path)
            );
        }

        html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
        html
    }
}
