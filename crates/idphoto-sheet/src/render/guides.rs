//! Cutting guide rendering
//!
//! Draws a dashed rectangle just outside a photo cell. The dash pattern runs
//! continuously around the perimeter (top, right, bottom, left) the way a
//! stroked path would, so corners do not restart the pattern.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as PixelRect;

use crate::options::CuttingGuides;

/// Resolved stroke settings for a guide outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideStyle {
    pub color: Rgb<u8>,
    pub line_width_px: u32,
    pub dash_px: u32,
    pub gap_px: u32,
}

impl GuideStyle {
    /// Style for the given options, or `None` when guides are switched off
    pub fn from_options(guides: &CuttingGuides) -> Option<Self> {
        if !guides.enabled || guides.line_width_px == 0 || guides.dash_px == 0 {
            return None;
        }
        Some(Self {
            color: Rgb(guides.color),
            line_width_px: guides.line_width_px,
            dash_px: guides.dash_px,
            gap_px: guides.gap_px,
        })
    }

    fn period(&self) -> u32 {
        self.dash_px + self.gap_px
    }
}

impl Default for GuideStyle {
    fn default() -> Self {
        let guides = CuttingGuides::default();
        Self {
            color: Rgb(guides.color),
            line_width_px: guides.line_width_px,
            dash_px: guides.dash_px,
            gap_px: guides.gap_px,
        }
    }
}

/// Draw a dashed outline around the cell at (`x`, `y`) of the given size.
///
/// The stroke sits entirely outside the cell, so the photo itself is never
/// painted over. Anything falling off the image is clipped.
pub fn draw_cutting_guide(
    target: &mut RgbImage,
    x: i64,
    y: i64,
    width: u32,
    height: u32,
    style: &GuideStyle,
) {
    let w = style.line_width_px;
    // Outer box enclosing the stroke
    let left = x - i64::from(w);
    let top = y - i64::from(w);
    let outer_width = width + 2 * w;
    let outer_height = height + 2 * w;

    let right = left + i64::from(outer_width);
    let bottom = top + i64::from(outer_height);
    // (start x, start y, length, horizontal?, direction)
    let edges = [
        (left, top, outer_width, true, 1),
        (right - i64::from(w), top, outer_height, false, 1),
        (right - 1, bottom - i64::from(w), outer_width, true, -1),
        (left, bottom - 1, outer_height, false, -1),
    ];

    let mut phase = 0;
    for (start_x, start_y, length, horizontal, direction) in edges {
        for (offset, span) in dash_spans(phase, length, style.dash_px, style.gap_px) {
            let along = if direction > 0 {
                i64::from(offset)
            } else {
                -i64::from(offset + span - 1)
            };
            let (rx, ry, rw, rh) = if horizontal {
                (start_x + along, start_y, span, w)
            } else {
                (start_x, start_y + along, w, span)
            };
            fill_clipped(target, rx, ry, rw, rh, style.color);
        }
        phase = (phase + length) % style.period().max(1);
    }
}

/// Split a line of `length` pixels into drawn dash spans.
///
/// `phase` is how far into the on/off pattern the line starts. Returns
/// `(offset, span)` pairs measured from the start of the line.
pub fn dash_spans(phase: u32, length: u32, dash: u32, gap: u32) -> Vec<(u32, u32)> {
    let mut spans = Vec::new();
    if dash == 0 || length == 0 {
        return spans;
    }
    let period = dash + gap;
    let mut pos = 0;
    let mut cycle = phase % period;

    while pos < length {
        if cycle < dash {
            let span = (dash - cycle).min(length - pos);
            spans.push((pos, span));
            pos += span;
            cycle += span;
        } else {
            let skip = (period - cycle).min(length - pos);
            pos += skip;
            cycle += skip;
        }
        if cycle >= period {
            cycle = 0;
        }
    }
    spans
}

fn fill_clipped(target: &mut RgbImage, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
    if width == 0 || height == 0 {
        return;
    }
    let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
        return;
    };
    draw_filled_rect_mut(target, PixelRect::at(x, y).of_size(width, height), color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn test_dash_spans_from_start() {
        let spans = dash_spans(0, 35, 10, 10);
        assert_eq!(spans, vec![(0, 10), (20, 10)]);
    }

    #[test]
    fn test_dash_spans_truncated_dash() {
        let spans = dash_spans(0, 25, 10, 10);
        assert_eq!(spans, vec![(0, 10), (20, 5)]);
    }

    #[test]
    fn test_dash_spans_with_phase() {
        // Starting 15px into the pattern lands in a gap with 5px remaining
        let spans = dash_spans(15, 30, 10, 10);
        assert_eq!(spans, vec![(5, 10), (25, 5)]);

        // Starting 4px in continues the current dash
        let spans = dash_spans(4, 30, 10, 10);
        assert_eq!(spans, vec![(0, 6), (16, 10)]);
    }

    #[test]
    fn test_dash_spans_solid_when_no_gap() {
        let spans = dash_spans(0, 25, 10, 0);
        let drawn: u32 = spans.iter().map(|(_, len)| len).sum();
        assert_eq!(drawn, 25);
    }

    #[test]
    fn test_guide_stays_outside_cell() {
        let mut image = RgbImage::from_pixel(100, 100, WHITE);
        let style = GuideStyle::default();
        draw_cutting_guide(&mut image, 20, 20, 40, 40, &style);

        for y in 20..60 {
            for x in 20..60 {
                assert_eq!(*image.get_pixel(x, y), WHITE);
            }
        }

        // First dash starts at the outer top-left corner
        assert_eq!(*image.get_pixel(19, 19), style.color);
        assert_eq!(*image.get_pixel(28, 19), style.color);
        // Then a gap
        assert_eq!(*image.get_pixel(29, 19), WHITE);
        assert_eq!(*image.get_pixel(38, 19), WHITE);
        assert_eq!(*image.get_pixel(39, 19), style.color);
    }

    #[test]
    fn test_guide_clipped_at_image_edge() {
        let mut image = RgbImage::from_pixel(30, 30, WHITE);
        draw_cutting_guide(&mut image, 0, 0, 30, 30, &GuideStyle::default());
        assert!(image.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_disabled_guides_have_no_style() {
        let guides = CuttingGuides {
            enabled: false,
            ..Default::default()
        };
        assert!(GuideStyle::from_options(&guides).is_none());
        assert!(GuideStyle::from_options(&CuttingGuides::default()).is_some());
    }
}
