use egui::{Color32, ColorImage, Pos2};
use serde::{Deserialize, Serialize};

use crate::error::{InkError, InkResult};

/// Maximum distance in pixels between two brush stamps along a curve
const STAMP_SPACING: f32 = 0.5;

/// How a newly drawn pixel combines with the existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositeMode {
    /// Overwrite the pixel with the brush color
    Normal,
    /// Clear the pixel to full transparency
    Erase,
}

/// Width, color and compositing rule used to stroke a curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: Color32,
    pub width: f32,
    pub composite: CompositeMode,
}

impl Brush {
    pub fn new(color: Color32, width: f32, composite: CompositeMode) -> Self {
        Self {
            color,
            width,
            composite,
        }
    }

    /// The value a pixel under this brush ends up with
    fn ink(&self) -> Color32 {
        match self.composite {
            CompositeMode::Normal => self.color,
            CompositeMode::Erase => Color32::TRANSPARENT,
        }
    }
}

/// A width x height grid of pixels, stored row-major.
///
/// Pixels use egui's premultiplied `Color32`. Strokes only ever produce
/// fully opaque or fully transparent pixels, for which premultiplied and
/// straight alpha are the same bytes.
#[derive(Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
}

// Custom Debug so a failed assertion doesn't dump the whole pixel buffer
impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &format!("<{} pixels>", self.pixels.len()))
            .finish()
    }
}

impl Raster {
    /// Create a fully transparent raster
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Color32::TRANSPARENT)
    }

    /// Create a raster where every pixel has the given color
    pub fn filled(width: usize, height: usize, color: Color32) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Wrap an existing pixel buffer, checking it matches the dimensions
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color32>) -> InkResult<Self> {
        if pixels.len() != width * height {
            return Err(InkError::InvalidArgument(format!(
                "expected {} pixels for {}x{}, got {}",
                width * height,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a raster from straight (unmultiplied) RGBA bytes
    pub fn from_rgba_unmultiplied(width: usize, height: usize, bytes: &[u8]) -> InkResult<Self> {
        if bytes.len() != width * height * 4 {
            return Err(InkError::DecodeFailure(format!(
                "expected {} bytes for {}x{}, got {}",
                width * height * 4,
                width,
                height,
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Straight (unmultiplied) RGBA bytes, as image encoders expect them
    pub fn to_rgba_unmultiplied(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| c.to_srgba_unmultiplied())
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    /// True if the point falls on a pixel of this raster
    pub fn contains(&self, pos: Pos2) -> bool {
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x < self.width as f32 && pos.y < self.height as f32
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color32> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Set a pixel, ignoring coordinates outside the raster
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color32) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = color;
        }
    }

    /// `set_pixel` for signed coordinates that may lie off the left or top edge
    fn plot(&mut self, x: i32, y: i32, color: Color32) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize, color);
        }
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    /// Take a working copy of every pixel, to be written back with `put_pixels`
    pub fn read_pixels(&self) -> Vec<Color32> {
        self.pixels.clone()
    }

    /// Replace every pixel in one go
    pub fn put_pixels(&mut self, pixels: Vec<Color32>) -> InkResult<()> {
        if pixels.len() != self.pixels.len() {
            return Err(InkError::InvalidArgument(format!(
                "pixel buffer has {} entries, raster needs {}",
                pixels.len(),
                self.pixels.len()
            )));
        }
        self.pixels = pixels;
        Ok(())
    }

    /// Fill a rectangle, clipped to the raster
    pub fn fill_rect(&mut self, x: i32, y: i32, w: usize, h: usize, color: Color32) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = (x as i64 + w as i64).clamp(0, self.width as i64) as usize;
        let y1 = (y as i64 + h as i64).clamp(0, self.height as i64) as usize;
        for row in y0..y1 {
            let start = self.index(x0.min(x1), row);
            let end = self.index(x1, row);
            self.pixels[start..end].fill(color);
        }
    }

    /// Clear a rectangle to transparency, clipped to the raster
    pub fn clear_rect(&mut self, x: i32, y: i32, w: usize, h: usize) {
        self.fill_rect(x, y, w, h, Color32::TRANSPARENT);
    }

    pub fn clear(&mut self) {
        self.fill(Color32::TRANSPARENT);
    }

    pub fn fill(&mut self, color: Color32) {
        self.pixels.fill(color);
    }

    /// Stroke a quadratic Bézier from `start` to `end` bending towards `control`.
    ///
    /// The curve is flattened and a solid disc the width of the brush is stamped
    /// along it, which gives round caps and joins. A segment where all three
    /// points coincide draws nothing.
    pub fn stroke_quadratic_curve(&mut self, start: Pos2, control: Pos2, end: Pos2, brush: &Brush) {
        if start == control && control == end {
            return;
        }

        // The control polygon is never shorter than the curve itself
        let polygon_len = start.distance(control) + control.distance(end);
        let steps = ((polygon_len / STAMP_SPACING).ceil() as usize).max(1);
        let radius = brush.width.max(0.0) / 2.0;
        let ink = brush.ink();

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let a = start.lerp(control, t);
            let b = control.lerp(end, t);
            self.stamp_disc(a.lerp(b, t), radius, ink);
        }
    }

    /// Write every pixel whose center lies within `radius` of `center`
    fn stamp_disc(&mut self, center: Pos2, radius: f32, color: Color32) {
        let min_x = (center.x - radius).floor() as i32;
        let max_x = (center.x + radius).ceil() as i32;
        let min_y = (center.y - radius).floor() as i32;
        let max_y = (center.y + radius).ceil() as i32;
        let r2 = radius * radius;

        for y in min_y.max(0)..=max_y.min(self.height as i32 - 1) {
            let dy = y as f32 + 0.5 - center.y;
            for x in min_x.max(0)..=max_x.min(self.width as i32 - 1) {
                let dx = x as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    self.plot(x, y, color);
                }
            }
        }

        // Thin brushes must still mark the pixel under the pointer
        self.plot(center.x.floor() as i32, center.y.floor() as i32, color);
    }

    /// Composite another raster on top of this one with source-over blending,
    /// placing its top-left corner at `(x, y)` and clipping to our bounds.
    pub fn draw_image(&mut self, src: &Raster, x: i32, y: i32) {
        for sy in 0..src.height {
            let dy = y as i64 + sy as i64;
            if dy < 0 || dy >= self.height as i64 {
                continue;
            }
            for sx in 0..src.width {
                let dx = x as i64 + sx as i64;
                if dx < 0 || dx >= self.width as i64 {
                    continue;
                }
                let idx = self.index(dx as usize, dy as usize);
                let top = src.pixels[src.index(sx, sy)];
                self.pixels[idx] = blend_over(top, self.pixels[idx]);
            }
        }
    }

    /// Copy of the pixels in the form egui uploads as a texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage {
            size: self.size(),
            pixels: self.pixels.clone(),
        }
    }
}

/// Premultiplied source-over: out = src + dst * (1 - src_alpha)
fn blend_over(src: Color32, dst: Color32) -> Color32 {
    match src.a() {
        255 => src,
        0 => dst,
        a => {
            let inv = 255 - a as u16;
            let mix = |s: u8, d: u8| (s as u16 + (d as u16 * inv + 127) / 255).min(255) as u8;
            Color32::from_rgba_premultiplied(
                mix(src.r(), dst.r()),
                mix(src.g(), dst.g()),
                mix(src.b(), dst.b()),
                mix(src.a(), dst.a()),
            )
        }
    }
}
