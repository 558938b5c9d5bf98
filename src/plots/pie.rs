//! Pie chart of per-user disk usage.
//!
//! Slices run counter-clockwise from three o'clock in input order. Each slice
//! is labelled with its share of the charted bytes to two decimals.

use crate::color::{slice_color, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::{SvgEncoder, TextAnchor};
use crate::render::{draw_rect_outline, draw_text, draw_text_centered, text_size, Drawable, Sector};
use crate::share::UserShare;
use std::f32::consts::TAU;

/// Label distance from the center, as a fraction of the radius.
const LABEL_RADIUS: f32 = 0.6;
/// User-name distance in the vector output.
const NAME_RADIUS: f32 = 1.1;
const LEGEND_WIDTH: u32 = 160;
const SWATCH: u32 = 14;

/// One rendered slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// User name.
    pub user: String,
    /// User's bytes.
    pub bytes: u128,
    /// Whole-percent share of the full report.
    pub percent: u32,
    /// Share of the charted bytes, e.g. `75.00%`.
    pub label: String,
    /// Fill color.
    pub color: Rgba,
    /// Start angle (radians).
    pub start: f32,
    /// End angle (radians).
    pub end: f32,
}

/// Builder for the usage pie chart.
#[derive(Debug, Clone)]
pub struct PieChart {
    shares: Vec<UserShare>,
    width: u32,
    height: u32,
    margin: u32,
    background: Rgba,
    label_scale: u32,
}

impl Default for PieChart {
    fn default() -> Self {
        Self::new()
    }
}

impl PieChart {
    /// Create a new pie chart builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shares: Vec::new(),
            width: 640,
            height: 480,
            margin: 20,
            background: Rgba::WHITE,
            label_scale: 2,
        }
    }

    /// Set the slices, in drawing order.
    #[must_use]
    pub fn data(mut self, shares: &[UserShare]) -> Self {
        self.shares = shares.to_vec();
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Pixel scale of the percentage labels.
    #[must_use]
    pub fn label_scale(mut self, scale: u32) -> Self {
        self.label_scale = scale.max(1);
        self
    }

    /// Build and validate the chart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDataset`] if there are no slices or they hold no
    /// bytes, and [`Error::InvalidDimensions`] if the canvas is too small to
    /// hold a pie.
    pub fn build(self) -> Result<Self> {
        if self.shares.iter().all(|s| s.bytes == 0) {
            return Err(Error::EmptyDataset);
        }
        if self.width <= 2 * self.margin || self.height <= 2 * self.margin {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    /// Slices with their angles, colors and labels.
    #[must_use]
    pub fn slices(&self) -> Vec<PieSlice> {
        let charted: u128 = self.shares.iter().map(|s| s.bytes).sum();
        if charted == 0 {
            return Vec::new();
        }

        let mut cumulative: u128 = 0;
        let last = self.shares.len() - 1;
        self.shares
            .iter()
            .enumerate()
            .map(|(i, share)| {
                let start = (cumulative as f64 / charted as f64) as f32 * TAU;
                cumulative += share.bytes;
                // The last slice closes the circle exactly.
                let end = if i == last {
                    TAU
                } else {
                    (cumulative as f64 / charted as f64) as f32 * TAU
                };
                PieSlice {
                    user: share.user.clone(),
                    bytes: share.bytes,
                    percent: share.percent,
                    label: format!("{:.2}%", share.bytes as f64 / charted as f64 * 100.0),
                    color: slice_color(i),
                    start,
                    end,
                }
            })
            .collect()
    }

    fn show_legend(&self) -> bool {
        self.width >= self.height + LEGEND_WIDTH
    }

    /// Pie center and radius in pixels.
    fn geometry(&self) -> (f32, f32, f32) {
        let plot_width = if self.show_legend() {
            self.width - LEGEND_WIDTH
        } else {
            self.width
        };
        let diameter = plot_width.min(self.height).saturating_sub(2 * self.margin);
        (
            plot_width as f32 / 2.0,
            self.height as f32 / 2.0,
            diameter as f32 / 2.0,
        )
    }

    /// Render to a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the framebuffer cannot be created.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(self.background);

        let (cx, cy, radius) = self.geometry();
        let slices = self.slices();

        for slice in &slices {
            let sector = Sector {
                cx,
                cy,
                radius,
                start: slice.start,
                end: slice.end,
            };
            sector.draw(&mut fb, slice.color);
        }

        for slice in &slices {
            let sector = Sector {
                cx,
                cy,
                radius,
                start: slice.start,
                end: slice.end,
            };
            let (lx, ly) = sector.bisector_point(LABEL_RADIUS);
            draw_text_centered(
                &mut fb,
                lx,
                ly,
                &slice.label,
                self.label_scale,
                slice.color.contrasting_text(),
            );
        }

        if self.show_legend() {
            self.draw_legend(&mut fb, &slices);
        }

        Ok(fb)
    }

    /// Color swatches with each user's name and whole-percent share, top right.
    fn draw_legend(&self, fb: &mut Framebuffer, slices: &[PieSlice]) {
        let x = self.width - LEGEND_WIDTH + self.margin / 2;
        let text_x = x + SWATCH + 6;
        let (char_width, text_height) = text_size("0", 1);
        let max_chars = (self.width.saturating_sub(text_x) / (char_width + 1)) as usize;
        let row_height = SWATCH + 6;

        for (i, slice) in slices.iter().enumerate() {
            let y = self.margin + i as u32 * row_height;
            if y + SWATCH > self.height {
                break;
            }
            fb.fill_rect(x, y, SWATCH, SWATCH, slice.color);
            draw_rect_outline(fb, x, y, SWATCH, SWATCH, Rgba::BLACK, 1);
            draw_text(
                fb,
                text_x as i32,
                (y + (SWATCH - text_height) / 2) as i32,
                &legend_entry(slice, max_chars),
                1,
                Rgba::BLACK,
            );
        }
    }

    /// Vector rendering with user names next to each slice.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let (cx, cy, radius) = self.geometry();
        let mut svg = SvgEncoder::new(self.width, self.height).background(Some(self.background));

        for slice in self.slices() {
            if slice.end - slice.start >= TAU - f32::EPSILON {
                svg = svg.circle(cx, cy, radius, slice.color);
            } else {
                let (x1, y1) = (cx + radius * slice.start.cos(), cy - radius * slice.start.sin());
                let (x2, y2) = (cx + radius * slice.end.cos(), cy - radius * slice.end.sin());
                let large_arc = u8::from(slice.end - slice.start > TAU / 2.0);
                let d = format!(
                    "M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {radius:.2} {radius:.2} 0 {large_arc} 0 {x2:.2} {y2:.2} Z"
                );
                svg = svg.path(&d, Some(slice.color), Some(Rgba::WHITE), 1.0);
            }

            let sector = Sector {
                cx,
                cy,
                radius,
                start: slice.start,
                end: slice.end,
            };
            let (lx, ly) = sector.bisector_point(LABEL_RADIUS);
            svg = svg.text(lx, ly, &slice.label, 12.0, slice.color.contrasting_text(), TextAnchor::Middle);

            let (nx, ny) = sector.bisector_point(NAME_RADIUS);
            let anchor = if nx >= cx {
                TextAnchor::Start
            } else {
                TextAnchor::End
            };
            svg = svg.text(nx, ny, &slice.user, 12.0, Rgba::BLACK, anchor);
        }

        svg
    }
}

/// `user percent%`, with the name cut to `..` so the entry fits `max_chars`.
fn legend_entry(slice: &PieSlice, max_chars: usize) -> String {
    let percent = format!(" {}%", slice.percent);
    let room = max_chars.saturating_sub(percent.len());
    let name = if slice.user.chars().count() <= room {
        slice.user.clone()
    } else {
        let kept: String = slice.user.chars().take(room.saturating_sub(2)).collect();
        format!("{kept}..")
    };
    format!("{name}{percent}")
}

impl batuta_common::display::WithDimensions for PieChart {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
