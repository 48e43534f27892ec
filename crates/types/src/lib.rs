//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the runtime.
//! Everything here is plain data with no I/O, usable by the rasterizer, the
//! scheduler and any presentation backend alike.
//!
//! # Screen Limits
//!
//! - **Palette**: 16 true-color slots, addressed by 4-bit indices
//! - **Canvas**: 1x1 up to 1024x1024 indexed pixels
//! - **Default screen**: 256x256, titled "PiX Window"
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FPS` | 30 | Simulation updates per second |
//! | `TICK_MS` | 33 | Fixed timestep interval (`1000 / FPS`, integer) |
//! | `KEY_RELEASE_TIMEOUT_MS` | 150 | Idle time before a synthesized key release |
//!
//! # Examples
//!
//! ```
//! use tui_pix_types::{EventKind, Rgb, PALETTE_SIZE, TICK_MS};
//!
//! assert_eq!(PALETTE_SIZE, 16);
//! assert_eq!(TICK_MS, 33);
//!
//! let kind = EventKind::from_str("on_keydown").unwrap();
//! assert_eq!(kind, EventKind::KeyDown);
//! assert_eq!(kind.as_str(), "on_keydown");
//!
//! assert_eq!(Rgb::new(1, 2, 3).to_tuple(), (1, 2, 3));
//! ```

pub mod error;
pub mod event;

pub use error::{PixError, PixResult};
pub use event::{Event, EventKind};

/// Number of palette slots (4-bit indices).
pub const PALETTE_SIZE: usize = 16;

/// Largest accepted canvas width in pixels.
pub const MAX_SCREEN_WIDTH: u32 = 1024;

/// Largest accepted canvas height in pixels.
pub const MAX_SCREEN_HEIGHT: u32 = 1024;

/// Canvas width used when nothing else is configured.
pub const DEFAULT_SCREEN_WIDTH: u32 = 256;

/// Canvas height used when nothing else is configured.
pub const DEFAULT_SCREEN_HEIGHT: u32 = 256;

/// Window title used when the host passes none.
pub const DEFAULT_TITLE: &str = "PiX Window";

/// Space reserved around the window for desktop chrome, in desktop pixels.
pub const WINDOW_PADDING: u32 = 64;

/// Simulation updates per second.
pub const FPS: u32 = 30;

/// Fixed timestep interval in milliseconds.
pub const TICK_MS: u32 = 1000 / FPS;

/// Idle time after the last press before a key counts as released, on
/// terminals that never report releases.
pub const KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Glyph cell edge in pixels (8x8 font, fixed advance).
pub const GLYPH_SIZE: i32 = 8;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from arbitrary integers, clamping each channel to `0..=255`.
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: r.clamp(0, 255) as u8,
            g: g.clamp(0, 255) as u8,
            b: b.clamp(0, 255) as u8,
        }
    }

    pub fn to_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// Integer extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Placement of the output window on the desktop, in desktop pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct WindowPlacement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl WindowPlacement {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Validate a palette index coming from a caller.
///
/// Returns the index as `usize` or `InvalidArgument`.
pub fn check_color_index(index: i32) -> PixResult<usize> {
    if (0..PALETTE_SIZE as i32).contains(&index) {
        Ok(index as usize)
    } else {
        Err(PixError::InvalidArgument(format!(
            "invalid color index {index}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(FPS, 30);
        assert_eq!(TICK_MS, 33);
    }

    #[test]
    fn rgb_clamps_out_of_range_channels() {
        assert_eq!(Rgb::clamped(-5, 128, 300), Rgb::new(0, 128, 255));
    }

    #[test]
    fn color_index_bounds() {
        assert_eq!(check_color_index(0).unwrap(), 0);
        assert_eq!(check_color_index(15).unwrap(), 15);
        assert!(matches!(
            check_color_index(16),
            Err(PixError::InvalidArgument(_))
        ));
        assert!(matches!(
            check_color_index(-1),
            Err(PixError::InvalidArgument(_))
        ));
    }
}
