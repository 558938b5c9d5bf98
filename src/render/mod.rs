//! Rasterization of chart primitives.
//!
//! - **Sectors**: filled pie slices, tested per pixel against radius and angle
//! - **Glyphs**: a minimal 5x7 bitmap font for percentage labels

mod glyphs;
mod primitives;

pub use glyphs::{draw_text, draw_text_centered, text_size};
pub use primitives::{draw_rect_outline, Drawable, Sector};
