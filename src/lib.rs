//! TUI PiX (workspace facade crate).
//!
//! A tiny 16-color pixel runtime: an indexed canvas, drawing primitives and
//! a fixed 30 FPS loop, presented in a true-color terminal. The
//! implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_pix::{core,engine,input,term,types}`.

pub use tui_pix_core as core;
pub use tui_pix_engine as engine;
pub use tui_pix_input as input;
pub use tui_pix_term as term;
pub use tui_pix_types as types;
