//! Headless backend.
//!
//! Runs the engine without any display: the presenter keeps the last
//! uploaded texture in memory and counts calls, the clock is advanced by
//! hand and events come from a queue. Used for tests, benchmarks and
//! offline rendering.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::backend::{Clock, EventSource, Presenter};
use crate::types::{Event, PixError, PixResult, Rgb, Size, WindowPlacement};

/// Counters and last-known state of a [`HeadlessPresenter`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentStats {
    pub targets_created: u32,
    pub targets_destroyed: u32,
    pub uploads: u32,
    pub clears: u32,
    pub copies: u32,
    pub presents: u32,
    pub canvas: Option<Size>,
    pub window: Option<WindowPlacement>,
    pub title: String,
    pub texture: Vec<Rgb>,
    pub fullscreen: bool,
    pub cursor_shown: bool,
}

/// In-memory presenter.
#[derive(Debug, Clone)]
pub struct HeadlessPresenter {
    desktop: Option<Size>,
    padding: u32,
    fail_present: bool,
    stats: Rc<RefCell<PresentStats>>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self {
            desktop: None,
            padding: crate::types::WINDOW_PADDING,
            fail_present: false,
            stats: Rc::new(RefCell::new(PresentStats {
                cursor_shown: true,
                ..PresentStats::default()
            })),
        }
    }

    pub fn with_desktop(mut self, desktop: Size, padding: u32) -> Self {
        self.desktop = Some(desktop);
        self.padding = padding;
        self
    }

    /// Make every `present` fail with `BackendFailure`.
    pub fn failing(mut self) -> Self {
        self.fail_present = true;
        self
    }

    /// Shared handle to the counters; stays valid after the presenter moves.
    pub fn stats(&self) -> Rc<RefCell<PresentStats>> {
        Rc::clone(&self.stats)
    }
}

impl Default for HeadlessPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for HeadlessPresenter {
    fn desktop_bounds(&mut self) -> Option<Size> {
        self.desktop
    }

    fn ui_padding(&self) -> u32 {
        self.padding
    }

    fn create_target(
        &mut self,
        canvas: Size,
        window: WindowPlacement,
        title: &str,
    ) -> PixResult<()> {
        let mut s = self.stats.borrow_mut();
        s.targets_created += 1;
        s.canvas = Some(canvas);
        s.window = Some(window);
        s.title = title.to_string();
        s.texture = vec![Rgb::BLACK; canvas.area()];
        Ok(())
    }

    fn destroy_target(&mut self) {
        let mut s = self.stats.borrow_mut();
        if s.canvas.take().is_some() {
            s.targets_destroyed += 1;
        }
        s.texture.clear();
    }

    fn move_window(&mut self, window: WindowPlacement) -> PixResult<()> {
        self.stats.borrow_mut().window = Some(window);
        Ok(())
    }

    fn update_texture(&mut self, pixels: &[Rgb]) -> PixResult<()> {
        let mut s = self.stats.borrow_mut();
        if pixels.len() != s.texture.len() {
            return Err(PixError::backend(format!(
                "texture holds {} pixels, got {}",
                s.texture.len(),
                pixels.len()
            )));
        }
        s.texture.copy_from_slice(pixels);
        s.uploads += 1;
        Ok(())
    }

    fn clear(&mut self) -> PixResult<()> {
        self.stats.borrow_mut().clears += 1;
        Ok(())
    }

    fn copy_texture(&mut self) -> PixResult<()> {
        self.stats.borrow_mut().copies += 1;
        Ok(())
    }

    fn present(&mut self) -> PixResult<()> {
        if self.fail_present {
            return Err(PixError::backend("present failed"));
        }
        self.stats.borrow_mut().presents += 1;
        Ok(())
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> PixResult<()> {
        self.stats.borrow_mut().fullscreen = fullscreen;
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.stats.borrow().fullscreen
    }

    fn show_cursor(&mut self, show: bool) -> PixResult<()> {
        self.stats.borrow_mut().cursor_shown = show;
        Ok(())
    }

    fn is_cursor_shown(&self) -> bool {
        self.stats.borrow().cursor_shown
    }
}

/// Clock advanced explicitly.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<RefCell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        *self.now.borrow_mut() += ms;
    }

    /// Another handle on the same time line.
    pub fn handle(&self) -> Self {
        self.clone()
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> u64 {
        *self.now.borrow()
    }

    /// Waiting moves time forward, so a full `run` terminates.
    fn wait_ms(&mut self, ms: u64) {
        self.advance(ms);
    }
}

/// Events served in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct QueuedEvents {
    queue: Rc<RefCell<VecDeque<Event>>>,
}

impl QueuedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.queue.borrow_mut().push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Another handle on the same queue.
    pub fn handle(&self) -> Self {
        self.clone()
    }
}

impl EventSource for QueuedEvents {
    fn poll_event(&mut self) -> PixResult<Option<Event>> {
        Ok(self.queue.borrow_mut().pop_front())
    }
}
