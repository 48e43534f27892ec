//! Rasterizer - drawing primitives over an indexed framebuffer
//!
//! Every primitive funnels its pixels through [`Framebuffer::set_pixel`],
//! so clipping and color mapping are applied uniformly and callers may pass
//! any coordinates. Loops over large areas are narrowed to the clip rectangle
//! first; the visible result is the same as visiting every pixel.
//!
//! # Shapes
//!
//! - **line**: integer Bresenham, both endpoints included, each pixel once.
//!   Endpoints are put in a canonical order so `line(a, b)` and `line(b, a)`
//!   cover the same pixels.
//! - **rect**: corners are normalized; outline mode draws four border spans
//!   and paints the corners twice (writes are idempotent).
//! - **circle**: a squared-distance band over the bounding box, not a
//!   Bresenham circle. A pixel at offset `(dx, dy)` is painted when
//!   `inner <= dx² + dy² <= r²` with `inner = 0` (filled, or radius 0) or
//!   `(r - 1)²` (ring). Keep it this way: existing art depends on the exact
//!   pixels.

use crate::font::glyph;
use crate::framebuffer::Framebuffer;
use crate::palette::ColorMapping;
use crate::pixels::decode_pixel;
use crate::types::{PixError, PixResult, GLYPH_SIZE};

/// Drawing context: a framebuffer plus the mapping in effect.
pub struct Raster<'a> {
    fb: &'a mut Framebuffer,
    mapping: &'a ColorMapping,
}

impl<'a> Raster<'a> {
    pub fn new(fb: &'a mut Framebuffer, mapping: &'a ColorMapping) -> Self {
        Self { fb, mapping }
    }

    #[inline(always)]
    fn plot(&mut self, x: i32, y: i32, color: u8) {
        self.fb.set_pixel(x, y, color, self.mapping);
    }

    /// Fill the clip rectangle.
    pub fn clear(&mut self, color: u8) {
        let clip = self.fb.clip();
        for y in clip.y0..=clip.y1 {
            for x in clip.x0..=clip.x1 {
                self.plot(x, y, color);
            }
        }
    }

    pub fn pixel(&mut self, color: u8, x: i32, y: i32) {
        self.plot(x, y, color);
    }

    pub fn line(&mut self, color: u8, x0: i32, y0: i32, x1: i32, y1: i32) {
        let ((mut x0, mut y0), (x1, y1)) = if (x1, y1) < (x0, y0) {
            ((x1, y1), (x0, y0))
        } else {
            ((x0, y0), (x1, y1))
        };

        let dx = (x1 as i64 - x0 as i64).abs();
        let dy = -(y1 as i64 - y0 as i64).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = err * 2;
            if e2 > dy {
                err += dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    pub fn rect(&mut self, color: u8, x0: i32, y0: i32, x1: i32, y1: i32, filled: bool) {
        let (x0, x1) = if x0 > x1 { (x1, x0) } else { (x0, x1) };
        let (y0, y1) = if y0 > y1 { (y1, y0) } else { (y0, y1) };
        let clip = self.fb.clip();

        if filled {
            for y in y0.max(clip.y0)..=y1.min(clip.y1) {
                for x in x0.max(clip.x0)..=x1.min(clip.x1) {
                    self.plot(x, y, color);
                }
            }
            return;
        }

        for y in y0.max(clip.y0)..=y1.min(clip.y1) {
            self.plot(x0, y, color);
            self.plot(x1, y, color);
        }
        for x in x0.max(clip.x0)..=x1.min(clip.x1) {
            self.plot(x, y0, color);
            self.plot(x, y1, color);
        }
    }

    pub fn circle(&mut self, color: u8, cx: i32, cy: i32, radius: i32, filled: bool) {
        if radius < 0 {
            return;
        }
        let r = radius as i64;
        let outer = r * r;
        // A zero-radius ring is still its centre pixel.
        let inner = if filled || r == 0 { 0 } else { (r - 1) * (r - 1) };
        let clip = self.fb.clip();

        let (cx64, cy64) = (cx as i64, cy as i64);
        let y_lo = (-r).max(clip.y0 as i64 - cy64);
        let y_hi = r.min(clip.y1 as i64 - cy64);
        let x_lo = (-r).max(clip.x0 as i64 - cx64);
        let x_hi = r.min(clip.x1 as i64 - cx64);

        for dy in y_lo..=y_hi {
            let dy2 = dy * dy;
            for dx in x_lo..=x_hi {
                let dist = dx * dx + dy2;
                if dist >= inner && dist <= outer {
                    self.plot((cx64 + dx) as i32, (cy64 + dy) as i32, color);
                }
            }
        }
    }

    /// Draw `s` with the built-in 8x8 font, advancing 8 pixels per character.
    pub fn text(&mut self, color: u8, x: i32, y: i32, s: &str) {
        let mut x0 = x;
        for ch in s.chars() {
            let rows = glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if bits & (1 << col) != 0 {
                        self.plot(x0.wrapping_add(col), y.wrapping_add(row as i32), color);
                    }
                }
            }
            x0 = x0.wrapping_add(GLYPH_SIZE);
        }
    }

    /// Copy a `width` x `height` hex pixel string to `(x, y)`.
    ///
    /// Pixels decoding to `alpha` are skipped; `None` draws every pixel.
    /// A length mismatch fails before anything is written.
    pub fn blit(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        data: &[u8],
        alpha: Option<u8>,
    ) -> PixResult<()> {
        if width < 0 || height < 0 || (width as i64) * (height as i64) != data.len() as i64 {
            return Err(PixError::invalid(format!(
                "invalid length of pixel string: expected {}x{}, got {} bytes",
                width,
                height,
                data.len()
            )));
        }
        if width == 0 {
            return Ok(());
        }

        for (row, line) in data.chunks_exact(width as usize).enumerate() {
            for (col, &byte) in line.iter().enumerate() {
                let color = decode_pixel(byte);
                if Some(color) != alpha {
                    self.plot(x.wrapping_add(col as i32), y.wrapping_add(row as i32), color);
                }
            }
        }
        Ok(())
    }
}
