//! Core pixel engine - pure, deterministic, and testable
//!
//! This crate owns the indexed canvas and everything that draws into it.
//! It has **zero dependencies** on windows, terminals or clocks, making it:
//!
//! - **Deterministic**: Same calls produce identical canvases
//! - **Testable**: Every primitive can be checked pixel by pixel
//! - **Portable**: Any presenter can consume the canvas
//! - **Fast**: Drawing never allocates
//!
//! # Module Structure
//!
//! - [`palette`]: 16 true-color slots plus the color mapping indirection
//! - [`framebuffer`]: Indexed canvas with a clip rectangle and a dirty flag
//! - [`raster`]: Pixel, line, rect, circle, text and blit primitives
//! - [`font`]: Built-in 8x8 glyph lookup
//! - [`pixels`]: Hex pixel-string decoding for blits
//! - [`fit`]: Window sizing against the desktop bounds
//!
//! # Drawing Rules
//!
//! - Every primitive writes through [`Framebuffer::set_pixel`], which silently
//!   drops pixels outside the clip rectangle. Primitives never special-case
//!   screen edges.
//! - A requested color `c` is stored as `mapping[c % 16]`. The palette decodes
//!   stored indices into RGB only at presentation time.
//!
//! # Example
//!
//! ```
//! use tui_pix_core::{Framebuffer, Palette, Raster};
//!
//! let mut palette = Palette::new();
//! let mut fb = Framebuffer::new(32, 32).unwrap();
//! palette.remap(7, 2).unwrap();
//!
//! let mut raster = Raster::new(&mut fb, palette.mapping());
//! raster.clear(0);
//! raster.line(7, 0, 0, 31, 31);
//!
//! // Color 7 was remapped to slot 2 at write time.
//! assert_eq!(fb.get_pixel(10, 10), Some(2));
//! ```

pub mod fit;
pub mod font;
pub mod framebuffer;
pub mod palette;
pub mod pixels;
pub mod raster;

pub use tui_pix_types as types;

// Re-export commonly used types for convenience
pub use fit::{fit_window, fullscreen_window};
pub use font::glyph;
pub use framebuffer::{ClipRect, Framebuffer};
pub use palette::{ColorMapping, Palette, DEFAULT_PALETTE};
pub use pixels::decode_pixel;
pub use raster::Raster;
