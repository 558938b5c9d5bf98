//! Output encoders (PNG, SVG, HTML) and destinations.

mod html;
mod png_encoder;
mod sink;
mod svg;

pub use html::{HtmlExporter, TableRow};
pub use png_encoder::PngEncoder;
pub use sink::OutputSink;
pub use svg::{SvgElement, SvgEncoder, TextAnchor};

/// Escape text for HTML/SVG element content and attribute values.
#[must_use]
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
