//! Interactive crop provider
//!
//! The session never crops pixels itself; it asks a [`CropProvider`] for the
//! selected region at an exact output resolution. [`ImageCropper`] is the
//! built-in provider: it rotates the source onto an enlarged canvas and keeps
//! an aspect-locked selection box inside that canvas.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

use crate::constants::{AUTO_CROP_AREA, MIN_SELECTION_PX};
use crate::types::{Result, SheetError};

/// Capability interface for anything that can hand out cropped photos.
pub trait CropProvider {
    /// Start a crop session on `image` constrained to `aspect_ratio` (width / height)
    fn from_image(image: DynamicImage, aspect_ratio: f32) -> Self
    where
        Self: Sized;

    /// Change the selection's aspect ratio, adjusting the current selection
    fn set_aspect_ratio(&mut self, aspect_ratio: f32);

    /// Rotate the source clockwise to an absolute angle in degrees
    fn rotate_to(&mut self, degrees: f32);

    /// Current rotation in degrees
    fn rotation(&self) -> f32;

    /// Current selection in canvas pixels
    fn selection(&self) -> CropBox;

    /// Replace the selection; it is refit to the aspect ratio and canvas
    fn set_selection(&mut self, selection: CropBox);

    /// Size of the (rotated) canvas the selection lives in
    fn canvas_size(&self) -> (u32, u32);

    /// The selected region resampled to exactly `width` × `height`
    fn cropped_image(&self, width: u32, height: u32) -> Result<RgbImage>;
}

/// A selection rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn centered_at(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    /// Largest box of `aspect_ratio` fitting a canvas, scaled by `fraction`, centered
    pub fn initial(canvas: (u32, u32), aspect_ratio: f32, fraction: f32) -> Self {
        let (cw, ch) = (canvas.0 as f32, canvas.1 as f32);
        let (width, height) = largest_fit(cw, ch, aspect_ratio);
        Self::centered_at(cw / 2.0, ch / 2.0, width * fraction, height * fraction)
    }

    /// Force the box to `aspect_ratio`, keep it inside the canvas and keep
    /// its center where possible.
    pub fn fit_within(self, canvas: (u32, u32), aspect_ratio: f32) -> Self {
        let (cw, ch) = (canvas.0 as f32, canvas.1 as f32);
        let aspect_ratio = sanitize_ratio(aspect_ratio);
        let (cx, cy) = self.center();

        // Keep the area while switching ratio
        let area = (self.width * self.height).max(MIN_SELECTION_PX * MIN_SELECTION_PX);
        let mut height = (area / aspect_ratio).sqrt();
        let mut width = height * aspect_ratio;

        let (max_width, max_height) = largest_fit(cw, ch, aspect_ratio);
        if width > max_width || height > max_height {
            width = max_width;
            height = max_height;
        }

        let x = (cx - width / 2.0).clamp(0.0, (cw - width).max(0.0));
        let y = (cy - height / 2.0).clamp(0.0, (ch - height).max(0.0));
        Self::new(x, y, width, height)
    }
}

fn sanitize_ratio(aspect_ratio: f32) -> f32 {
    if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        1.0
    }
}

/// Largest (width, height) of the given ratio inside a `cw` × `ch` box
fn largest_fit(cw: f32, ch: f32, aspect_ratio: f32) -> (f32, f32) {
    let aspect_ratio = sanitize_ratio(aspect_ratio);
    if ch <= 0.0 || cw <= 0.0 {
        return (0.0, 0.0);
    }
    if cw / ch > aspect_ratio {
        (ch * aspect_ratio, ch)
    } else {
        (cw, cw / aspect_ratio)
    }
}

/// Default crop provider backed by the `image` and `imageproc` crates
#[derive(Debug, Clone)]
pub struct ImageCropper {
    source: RgbaImage,
    canvas: RgbaImage,
    aspect_ratio: f32,
    rotation: f32,
    selection: CropBox,
}

impl ImageCropper {
    /// The rotated canvas the selection refers to
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Shift the selection by a canvas-pixel delta
    pub fn move_selection(&mut self, dx: f32, dy: f32) {
        let moved = CropBox::new(
            self.selection.x + dx,
            self.selection.y + dy,
            self.selection.width,
            self.selection.height,
        );
        self.set_selection(moved);
    }

    /// Grow (`factor` > 1) or shrink the selection around its center
    pub fn zoom_selection(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let (cx, cy) = self.selection.center();
        let width = (self.selection.width * factor).max(MIN_SELECTION_PX);
        let height = width / self.aspect_ratio;
        self.set_selection(CropBox::centered_at(cx, cy, width, height));
    }
}

impl CropProvider for ImageCropper {
    fn from_image(image: DynamicImage, aspect_ratio: f32) -> Self {
        let source = image.to_rgba8();
        let canvas = source.clone();
        let aspect_ratio = sanitize_ratio(aspect_ratio);
        let selection = CropBox::initial(canvas.dimensions(), aspect_ratio, AUTO_CROP_AREA);
        Self {
            source,
            canvas,
            aspect_ratio,
            rotation: 0.0,
            selection,
        }
    }

    fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = sanitize_ratio(aspect_ratio);
        self.selection = self
            .selection
            .fit_within(self.canvas.dimensions(), self.aspect_ratio);
    }

    fn rotate_to(&mut self, degrees: f32) {
        if !degrees.is_finite() || degrees == self.rotation {
            return;
        }
        let (old_w, old_h) = self.canvas.dimensions();
        let (cx, cy) = self.selection.center();
        let (rel_x, rel_y) = (cx / old_w.max(1) as f32, cy / old_h.max(1) as f32);

        self.canvas = rotated_canvas(&self.source, degrees);
        self.rotation = degrees;

        let (new_w, new_h) = self.canvas.dimensions();
        let moved = CropBox::centered_at(
            rel_x * new_w as f32,
            rel_y * new_h as f32,
            self.selection.width,
            self.selection.height,
        );
        self.selection = moved.fit_within((new_w, new_h), self.aspect_ratio);
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn selection(&self) -> CropBox {
        self.selection
    }

    fn set_selection(&mut self, selection: CropBox) {
        let (cw, ch) = self.canvas.dimensions();
        let (cx, cy) = selection.center();
        let width = selection.width.max(MIN_SELECTION_PX);
        let height = width / self.aspect_ratio;

        let (max_width, max_height) = largest_fit(cw as f32, ch as f32, self.aspect_ratio);
        let (width, height) = if width > max_width || height > max_height {
            (max_width, max_height)
        } else {
            (width, height)
        };

        let x = (cx - width / 2.0).clamp(0.0, (cw as f32 - width).max(0.0));
        let y = (cy - height / 2.0).clamp(0.0, (ch as f32 - height).max(0.0));
        self.selection = CropBox::new(x, y, width, height);
    }

    fn canvas_size(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    fn cropped_image(&self, width: u32, height: u32) -> Result<RgbImage> {
        if width == 0 || height == 0 {
            return Err(SheetError::Config(format!(
                "Cannot crop to an empty size {}x{}",
                width, height
            )));
        }

        let (cw, ch) = self.canvas.dimensions();
        if cw == 0 || ch == 0 {
            return Err(SheetError::Config("Photo has no pixels".to_string()));
        }
        let x = (self.selection.x.round().max(0.0) as u32).min(cw.saturating_sub(1));
        let y = (self.selection.y.round().max(0.0) as u32).min(ch.saturating_sub(1));
        let w = (self.selection.width.round() as u32).clamp(1, cw - x);
        let h = (self.selection.height.round() as u32).clamp(1, ch - y);

        let region = imageops::crop_imm(&self.canvas, x, y, w, h).to_image();
        let resized = imageops::resize(&region, width, height, FilterType::Lanczos3);
        Ok(flatten_onto_white(&resized))
    }
}

/// Rotate `source` clockwise about its center onto a canvas large enough to
/// hold every corner. Uncovered canvas is transparent.
pub fn rotated_canvas(source: &RgbaImage, degrees: f32) -> RgbaImage {
    let normalized = degrees.rem_euclid(360.0);
    if normalized == 0.0 {
        return source.clone();
    }
    if normalized == 90.0 {
        return imageops::rotate90(source);
    }
    if normalized == 180.0 {
        return imageops::rotate180(source);
    }
    if normalized == 270.0 {
        return imageops::rotate270(source);
    }

    let (w, h) = source.dimensions();
    let theta = normalized.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let bound_w = (w as f32 * cos + h as f32 * sin).ceil() as u32;
    let bound_h = (w as f32 * sin + h as f32 * cos).ceil() as u32;

    let transparent = Rgba([255, 255, 255, 0]);
    let mut padded = RgbaImage::from_pixel(bound_w.max(w), bound_h.max(h), transparent);
    let offset_x = i64::from((padded.width() - w) / 2);
    let offset_y = i64::from((padded.height() - h) / 2);
    imageops::replace(&mut padded, source, offset_x, offset_y);

    rotate_about_center(&padded, theta, Interpolation::Bilinear, transparent)
}

/// Composite an RGBA image over opaque white
pub fn flatten_onto_white(image: &RgbaImage) -> RgbImage {
    let mut out = RgbImage::new(image.width(), image.height());
    for (dst, src) in out.pixels_mut().zip(image.pixels()) {
        let alpha = u32::from(src[3]);
        let blend = |channel: u8| -> u8 {
            ((u32::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255) as u8
        };
        *dst = Rgb([blend(src[0]), blend(src[1]), blend(src[2])]);
    }
    out
}
