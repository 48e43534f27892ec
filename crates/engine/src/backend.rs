//! Backend seams: presentation, time and input.
//!
//! The engine never talks to a window system directly. A backend supplies a
//! [`Presenter`] (owned by the engine), plus a [`Clock`] and an
//! [`EventSource`] handed to the scheduler.

use std::time::{Duration, Instant};

use crate::types::{Event, PixResult, Rgb, Size, WindowPlacement, WINDOW_PADDING};

/// Output side of a backend: a window holding one streaming texture.
///
/// Call order per frame is `update_texture` (only when the canvas changed),
/// then always `clear`, `copy_texture`, `present`.
pub trait Presenter {
    /// Usable desktop size, if the backend can tell.
    fn desktop_bounds(&mut self) -> Option<Size>;

    /// Space kept free around the window on the desktop.
    fn ui_padding(&self) -> u32 {
        WINDOW_PADDING
    }

    /// (Re)create the texture at `canvas` size and place the window.
    ///
    /// Any previous texture is gone after this call, even on failure.
    fn create_target(&mut self, canvas: Size, window: WindowPlacement, title: &str)
        -> PixResult<()>;

    /// Drop the texture. Idempotent.
    fn destroy_target(&mut self);

    /// Move/resize the window without touching the texture.
    fn move_window(&mut self, window: WindowPlacement) -> PixResult<()>;

    /// Replace the texture contents; `pixels` is row-major, canvas-sized.
    fn update_texture(&mut self, pixels: &[Rgb]) -> PixResult<()>;

    /// Clear the draw target.
    fn clear(&mut self) -> PixResult<()>;

    /// Draw the texture scaled to the window area.
    fn copy_texture(&mut self) -> PixResult<()>;

    /// Show the finished frame.
    fn present(&mut self) -> PixResult<()>;

    /// Switch between a padded window and the whole desktop.
    ///
    /// Backends without a fullscreen mode ignore the request and keep
    /// reporting `false` from [`Presenter::is_fullscreen`].
    fn set_fullscreen(&mut self, _fullscreen: bool) -> PixResult<()> {
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        false
    }

    /// Show or hide the pointer over the window.
    fn show_cursor(&mut self, _show: bool) -> PixResult<()> {
        Ok(())
    }

    fn is_cursor_shown(&self) -> bool {
        true
    }
}

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&mut self) -> u64;

    /// Idle for about `ms` between iterations. Stands in for vsync pacing;
    /// the default returns immediately.
    fn wait_ms(&mut self, _ms: u64) {}
}

/// Non-blocking input source.
pub trait EventSource {
    /// Next pending event, or `None` when drained. Never waits.
    fn poll_event(&mut self) -> PixResult<Option<Event>>;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&mut self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn wait_ms(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}
