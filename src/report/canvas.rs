//! Intensity canvas for report rasterization.
//!
//! Charts and text render into a grayscale intensity buffer
//! (0.0 = white, 1.0 = black) which is converted to an 8-bit
//! grayscale image at the end.

use image::GrayImage;

pub struct Canvas {
    buf: Vec<f32>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buf: vec![0.0; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Set pixel intensity, taking the maximum of existing and new value.
    #[inline]
    pub fn blend(&mut self, x: usize, y: usize, intensity: f32) {
        if self.in_bounds(x, y) {
            let idx = y * self.width + x;
            self.buf[idx] = self.buf[idx].max(intensity);
        }
    }

    #[cfg(test)]
    pub fn intensity(&self, x: usize, y: usize) -> f32 {
        self.buf[y * self.width + x]
    }

    pub fn hline(&mut self, x1: usize, x2: usize, y: usize, thickness: usize, intensity: f32) {
        let half = thickness / 2;
        for dy in 0..thickness {
            let py = (y + dy).saturating_sub(half);
            for px in x1..=x2.min(self.width.saturating_sub(1)) {
                self.blend(px, py, intensity);
            }
        }
    }

    pub fn vline(&mut self, x: usize, y1: usize, y2: usize, thickness: usize, intensity: f32) {
        let half = thickness / 2;
        for dx in 0..thickness {
            let px = (x + dx).saturating_sub(half);
            for py in y1..=y2.min(self.height.saturating_sub(1)) {
                self.blend(px, py, intensity);
            }
        }
    }

    pub fn hline_dashed(
        &mut self,
        x1: usize,
        x2: usize,
        y: usize,
        dash_on: usize,
        dash_off: usize,
        intensity: f32,
    ) {
        let mut x = x1;
        let mut drawing = true;
        let mut count = 0;
        while x <= x2.min(self.width.saturating_sub(1)) {
            if drawing {
                self.blend(x, y, intensity);
            }
            count += 1;
            let period = if drawing { dash_on } else { dash_off };
            if count >= period {
                drawing = !drawing;
                count = 0;
            }
            x += 1;
        }
    }

    pub fn fill_rect(&mut self, x1: usize, y1: usize, x2: usize, y2: usize, intensity: f32) {
        for y in y1..y2.min(self.height) {
            for x in x1..x2.min(self.width) {
                self.blend(x, y, intensity);
            }
        }
    }

    /// Copy another canvas onto this one at the given offset.
    pub fn blit(&mut self, other: &Canvas, ox: usize, oy: usize) {
        for y in 0..other.height {
            for x in 0..other.width {
                self.blend(ox + x, oy + y, other.buf[y * other.width + x]);
            }
        }
    }

    /// Convert to an 8-bit grayscale image (intensity 1.0 becomes black).
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let v = self.buf[y as usize * self.width + x as usize].clamp(0.0, 1.0);
            image::Luma([255 - (v * 255.0).round() as u8])
        })
    }
}
