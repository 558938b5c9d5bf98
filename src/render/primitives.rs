//! Primitive rendering functions.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use std::f32::consts::TAU;

/// Trait for drawable primitives.
pub trait Drawable {
    /// Draw this primitive to a framebuffer.
    fn draw(&self, fb: &mut Framebuffer, color: Rgba);
}

/// A filled circular sector.
///
/// Angles are in radians, measured counter-clockwise from the positive x axis
/// as seen on screen (y grows downward in the framebuffer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    /// Center x in pixels.
    pub cx: f32,
    /// Center y in pixels.
    pub cy: f32,
    /// Radius in pixels.
    pub radius: f32,
    /// Start angle (radians).
    pub start: f32,
    /// End angle (radians), `>= start`.
    pub end: f32,
}

impl Sector {
    /// Whether the pixel whose top-left corner is `(x, y)` lies inside.
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        let dx = x as f32 + 0.5 - self.cx;
        let dy = self.cy - (y as f32 + 0.5);
        if dx * dx + dy * dy > self.radius * self.radius {
            return false;
        }
        if self.end - self.start >= TAU {
            return true;
        }
        let angle = dy.atan2(dx).rem_euclid(TAU);
        let start = self.start.rem_euclid(TAU);
        let sweep = self.end - self.start;
        (angle - start).rem_euclid(TAU) < sweep
    }

    /// Point at `fraction` of the radius along the sector's bisector.
    #[must_use]
    pub fn bisector_point(&self, fraction: f32) -> (f32, f32) {
        let mid = (self.start + self.end) / 2.0;
        let r = self.radius * fraction;
        (self.cx + r * mid.cos(), self.cy - r * mid.sin())
    }
}

impl Drawable for Sector {
    fn draw(&self, fb: &mut Framebuffer, color: Rgba) {
        if self.radius <= 0.0 || self.end <= self.start {
            return;
        }
        let x0 = (self.cx - self.radius).floor().max(0.0) as u32;
        let y0 = (self.cy - self.radius).floor().max(0.0) as u32;
        let x1 = ((self.cx + self.radius).ceil().max(0.0) as u32).min(fb.width());
        let y1 = ((self.cy + self.radius).ceil().max(0.0) as u32).min(fb.height());

        for y in y0..y1 {
            for x in x0..x1 {
                if self.contains(x, y) {
                    fb.set_pixel(x, y, color);
                }
            }
        }
    }
}

/// Draw a rectangle outline.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    color: Rgba,
    thickness: u32,
) {
    let thickness = thickness.max(1);

    fb.fill_rect(x, y, width, thickness, color);
    if height > thickness {
        fb.fill_rect(x, y + height - thickness, width, thickness, color);
    }
    fb.fill_rect(x, y, thickness, height, color);
    if width > thickness {
        fb.fill_rect(x + width - thickness, y, thickness, height, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn half(start: f32) -> Sector {
        Sector {
            cx: 50.0,
            cy: 50.0,
            radius: 40.0,
            start,
            end: start + PI,
        }
    }

    #[test]
    fn test_upper_half() {
        let upper = half(0.0);
        assert!(upper.contains(50, 20));
        assert!(!upper.contains(50, 80));
        // Outside the radius
        assert!(!upper.contains(50, 5));
    }

    #[test]
    fn test_full_circle() {
        let full = Sector {
            cx: 10.0,
            cy: 10.0,
            radius: 5.0,
            start: 0.0,
            end: TAU,
        };
        assert!(full.contains(10, 10));
        assert!(full.contains(10, 14));
    }

    #[test]
    fn test_wrapping_start() {
        // Lower half expressed with a start angle past a full turn
        let lower = half(PI + TAU);
        assert!(lower.contains(50, 80));
        assert!(!lower.contains(50, 20));
    }

    #[test]
    fn test_draw_sector() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);
        half(0.0).draw(&mut fb, Rgba::BLACK);
        assert_eq!(fb.get_pixel(50, 20), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 80), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_bisector_point() {
        let (x, y) = half(0.0).bisector_point(0.5);
        assert!((x - 50.0).abs() < 0.01);
        assert!((y - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_rect_outline() {
        let mut fb = Framebuffer::new(20, 20).unwrap();
        fb.clear(Rgba::WHITE);
        draw_rect_outline(&mut fb, 2, 2, 10, 10, Rgba::BLACK, 1);
        assert_eq!(fb.get_pixel(2, 2), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(11, 11), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(6, 6), Some(Rgba::WHITE));
    }
}
