use egui::Color32;

use crate::error::{InkError, InkResult};
use crate::raster::Raster;

/// What a flood fill did to the raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// The seed already had the fill color; nothing was written
    Unchanged,
    /// The connected region was repainted
    Filled { pixels: usize },
}

impl FillOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Filled { .. })
    }
}

/// Working state for one fill pass: the pixel buffer plus which pixels we
/// already painted. Kept apart from the raster so the result lands in one write.
struct FillBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
    painted: Vec<bool>,
}

impl FillBuffer {
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn paint(&mut self, x: usize, y: usize, fill: Color32) {
        let idx = self.index(x, y);
        self.pixels[idx] = fill;
        self.painted[idx] = true;
    }
}

/// Whether the pixel at `(x, y)` belongs to the region being filled.
///
/// Pixels that are not fully opaque always match, so a fill spreads across
/// untouched background. A pixel painted earlier in this pass never matches.
fn matches(buffer: &FillBuffer, x: usize, y: usize, start: Color32) -> bool {
    let idx = buffer.index(x, y);
    if buffer.painted[idx] {
        return false;
    }
    let pixel = buffer.pixels[idx];
    pixel.a() != 255 || pixel == start
}

/// Repaint the 4-connected region around `(x, y)` that matches the seed
/// pixel's color.
///
/// Scanline fill over an explicit stack of column seeds: each popped seed is
/// walked up to the top of its run and then painted downwards, pushing at most
/// one new seed per contiguous run on either side. The stack stays bounded by
/// the region's perimeter rather than its area.
pub fn flood_fill(raster: &mut Raster, x: usize, y: usize, fill: Color32) -> InkResult<FillOutcome> {
    let Some(start) = raster.get_pixel(x, y) else {
        return Err(InkError::InvalidArgument(format!(
            "fill seed ({}, {}) is outside the {}x{} raster",
            x,
            y,
            raster.width(),
            raster.height()
        )));
    };
    if start == fill {
        return Ok(FillOutcome::Unchanged);
    }

    let (width, height) = (raster.width(), raster.height());
    let mut buffer = FillBuffer {
        width,
        height,
        pixels: raster.read_pixels(),
        painted: vec![false; width * height],
    };

    let mut count = 0;
    let mut stack = vec![(x, y)];

    while let Some((x, mut y)) = stack.pop() {
        if !matches(&buffer, x, y, start) {
            continue;
        }

        while y > 0 && matches(&buffer, x, y - 1, start) {
            y -= 1;
        }

        let mut reach_left = false;
        let mut reach_right = false;

        while y < buffer.height && matches(&buffer, x, y, start) {
            buffer.paint(x, y, fill);
            count += 1;

            if x > 0 {
                if matches(&buffer, x - 1, y, start) {
                    if !reach_left {
                        stack.push((x - 1, y));
                        reach_left = true;
                    }
                } else {
                    reach_left = false;
                }
            }

            if x + 1 < buffer.width {
                if matches(&buffer, x + 1, y, start) {
                    if !reach_right {
                        stack.push((x + 1, y));
                        reach_right = true;
                    }
                } else {
                    reach_right = false;
                }
            }

            y += 1;
        }
    }

    raster.put_pixels(buffer.pixels)?;
    log::debug!("Flood fill from ({}, {}) painted {} pixels", x, y, count);

    Ok(FillOutcome::Filled { pixels: count })
}
