//! Indexed framebuffer with a clip rectangle.

use crate::palette::ColorMapping;
use crate::types::{PixError, PixResult, Size, MAX_SCREEN_HEIGHT, MAX_SCREEN_WIDTH};

/// Inclusive clip rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl ClipRect {
    fn full(width: u32, height: u32) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: width as i32 - 1,
            y1: height as i32 - 1,
        }
    }

    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// 2D grid of palette indices (`0..16`), row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    clip: ClipRect,
    dirty: bool,
}

impl Framebuffer {
    /// Create a zero-filled canvas.
    ///
    /// Fails with `InvalidArgument` unless `1 <= width <= 1024` and
    /// `1 <= height <= 1024`. The clip covers the whole canvas and the canvas
    /// starts dirty.
    pub fn new(width: u32, height: u32) -> PixResult<Self> {
        if width == 0 || width > MAX_SCREEN_WIDTH {
            return Err(PixError::invalid(format!("invalid screen width {width}")));
        }
        if height == 0 || height > MAX_SCREEN_HEIGHT {
            return Err(PixError::invalid(format!("invalid screen height {height}")));
        }
        let len = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
            clip: ClipRect::full(width, height),
            dirty: true,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn clip(&self) -> ClipRect {
        self.clip
    }

    /// Stored palette indices, row-major, `width * height` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u8> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    /// Store `mapping[color % 16]` at `(x, y)`.
    ///
    /// Pixels outside the clip rectangle are dropped without error.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u8, mapping: &ColorMapping) {
        if !self.clip.contains(x, y) {
            return;
        }
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = mapping.resolve(color);
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning whether it was set.
    ///
    /// Only the present step should call this.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}
