//! Coverage masks of rendered glyphs.

use std::collections::VecDeque;

use image::{Pixel, RgbaImage};

use crate::model::Color;


/// Rectangular area of the mask's coordinate space, with exclusive right & bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clip {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Clip {
    /// Area of an image of given size as seen from the pen position `(x, y)`,
    /// grown by `margin` on every side.
    pub fn around_image(img: &RgbaImage, x: i32, y: i32, margin: u32) -> Self {
        let (width, height) = img.dimensions();
        let margin = margin as i32;
        Clip{
            left: -x - margin,
            top: -y - margin,
            right: width as i32 - x + margin,
            bottom: height as i32 - y + margin,
        }
    }

    /// Whether the area overlaps with the `[left, right) x [top, bottom)` rectangle.
    #[inline]
    pub fn overlaps(&self, left: i32, top: i32, right: i32, bottom: i32) -> bool {
        left < self.right && right > self.left && top < self.bottom && bottom > self.top
    }

    /// Mask covering the intersection of the area
    /// with the `[left, right) x [top, bottom)` rectangle.
    pub fn mask(&self, left: i32, top: i32, right: i32, bottom: i32) -> GlyphMask {
        let (left, top) = (left.max(self.left), top.max(self.top));
        let (right, bottom) = (right.min(self.right), bottom.min(self.bottom));
        if right <= left || bottom <= top {
            return GlyphMask::empty();
        }
        GlyphMask::new(left, top, (right - left) as u32, (bottom - top) as u32)
    }
}


/// Antialiased ink coverage of a piece of text.
///
/// Coordinates are relative to the pen position at the start of the baseline,
/// so the mask's top-left corner usually lies above and to the left of it.
#[derive(Clone, Debug)]
pub struct GlyphMask {
    left: i32,
    top: i32,
    width: u32,
    height: u32,
    coverage: Vec<f32>,
}

impl GlyphMask {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        GlyphMask{
            left, top, width, height,
            coverage: vec![0.0; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn empty() -> Self {
        GlyphMask::new(0, 0, 0, 0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coverage.iter().all(|&v| v <= 0.0)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Add coverage at given point, keeping the larger of the two values.
    /// Points outside of the mask are ignored.
    pub fn add(&mut self, x: i32, y: i32, value: f32) {
        if let Some(i) = self.offset(x, y) {
            let value = value.max(0.0).min(1.0);
            if value > self.coverage[i] {
                self.coverage[i] = value;
            }
        }
    }

    /// Coverage at given point, zero if it's outside of the mask.
    pub fn coverage_at(&self, x: i32, y: i32) -> f32 {
        self.offset(x, y).map(|i| self.coverage[i]).unwrap_or(0.0)
    }

    /// Grow the mask by given radius in every direction
    /// (morphological dilation with a disk).
    ///
    /// Each row of the disk is a horizontal span, so the result is the maximum
    /// of the rows' running horizontal maxima, shifted vertically.
    pub fn dilate(&self, radius: u32) -> GlyphMask {
        if radius == 0 || self.coverage.is_empty() {
            return self.clone();
        }
        let r = radius as usize;
        let mut result = GlyphMask::new(
            self.left - radius as i32, self.top - radius as i32,
            self.width + 2 * radius, self.height + 2 * radius);
        let (width, height) = (result.width as usize, result.height as usize);

        let mut padded = vec![0.0; width * height];
        for y in 0..self.height as usize {
            let src = &self.coverage[y * self.width as usize..(y + 1) * self.width as usize];
            let start = (y + r) * width + r;
            padded[start..start + src.len()].copy_from_slice(src);
        }

        let mut spans = vec![0.0; width * height];
        for dy in 0..=r {
            let half_width = disk_half_width(r, dy);
            for (src, dst) in padded.chunks(width).zip(spans.chunks_mut(width)) {
                running_max(src, half_width, dst);
            }
            // Row `y` of the result takes the span of rows `y - dy` and `y + dy`.
            for y in 0..height {
                let above = if y >= dy { Some(y - dy) } else { None };
                let below = if y + dy < height { Some(y + dy) } else { None };
                for row in above.into_iter().chain(below) {
                    let (out, span) = (y * width, row * width);
                    for x in 0..width {
                        let value = spans[span + x];
                        if value > result.coverage[out + x] {
                            result.coverage[out + x] = value;
                        }
                    }
                }
            }
        }
        result
    }

    /// Blend the mask onto the image in given color,
    /// with the mask's origin placed at given point.
    /// Parts falling outside of the image are clipped.
    pub fn draw(&self, img: &mut RgbaImage, origin_x: i32, origin_y: i32, color: Color) {
        let (img_width, img_height) = img.dimensions();
        for y in 0..self.height as i32 {
            let py = origin_y + self.top + y;
            if py < 0 || py >= img_height as i32 {
                continue;
            }
            for x in 0..self.width as i32 {
                let px = origin_x + self.left + x;
                if px < 0 || px >= img_width as i32 {
                    continue;
                }
                let value = self.coverage[(y as u32 * self.width + x as u32) as usize];
                if value <= 0.0 {
                    continue;
                }
                let alpha = (value * 255.0).round() as u8;
                img.get_pixel_mut(px as u32, py as u32).blend(&color.to_rgba(alpha));
            }
        }
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (x - self.left, y - self.top);
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as u32 * self.width + x as u32) as usize)
    }
}


/// Largest `dx` such that `(dx, dy)` lies within a disk of given radius.
fn disk_half_width(radius: usize, dy: usize) -> usize {
    let mut dx = radius;
    while dx * dx + dy * dy > radius * radius {
        dx -= 1;
    }
    dx
}

/// Maximum of `src` over the window `[x - half_width, x + half_width]` for every `x`.
fn running_max(src: &[f32], half_width: usize, dst: &mut [f32]) {
    let len = src.len();
    let mut window: VecDeque<usize> = VecDeque::new();
    let mut next = 0;
    for x in 0..len {
        let last = (x + half_width).min(len - 1);
        while next <= last {
            while window.back().map_or(false, |&i| src[i] <= src[next]) {
                window.pop_back();
            }
            window.push_back(next);
            next += 1;
        }
        while window.front().map_or(false, |&i| i + half_width < x) {
            window.pop_front();
        }
        dst[x] = window.front().map_or(0.0, |&i| src[i]);
    }
}
