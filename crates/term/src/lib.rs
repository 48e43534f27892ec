//! Terminal presentation backend.
//!
//! Renders the canvas as a true-color "window" inside the terminal. Each
//! cell carries two vertical pixels via a half-block glyph, so the terminal
//! behaves like a desktop of `cols x rows*2` pixels.
//!
//! Goals:
//! - Keep `core` and `engine` free of any terminal knowledge
//! - Only rewrite cells that changed since the previous frame
//! - Scale the canvas with the same window fitting a desktop backend uses

pub mod grid;
pub mod presenter;
pub mod renderer;

pub use tui_pix_core as core;
pub use tui_pix_types as types;

pub use grid::{Cell, CellGrid, HALF_BLOCK};
pub use presenter::{scale_into, TerminalPresenter, TERMINAL_PADDING};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
