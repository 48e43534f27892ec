//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` events into runtime [`Event`](crate::types::Event)s and
//! exposes them through a non-blocking [`EventSource`].
//!
//! Terminals that report key releases deliver real `KeyUp`s. For the rest,
//! [`KeyReleaser`] synthesizes them from a press timeout.

pub mod map;
pub mod release;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event;

use tui_pix_engine::EventSource;

pub use tui_pix_types as types;

pub use map::{button_number, is_interrupt, key_name, map_event, Mapped};
pub use release::KeyReleaser;

use types::{Event, PixResult};

/// Reads whatever the terminal has queued, without waiting.
#[derive(Debug)]
pub struct TerminalEvents {
    pending: VecDeque<Event>,
    releaser: Option<KeyReleaser>,
    start: Instant,
}

impl TerminalEvents {
    /// Event source that synthesizes key releases after the default timeout.
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            releaser: Some(KeyReleaser::new()),
            start: Instant::now(),
        }
    }

    /// Use the terminal's own release events instead of synthesizing them.
    pub fn with_native_releases(mut self) -> Self {
        self.releaser = None;
        self
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        if self.releaser.is_some() {
            self.releaser = Some(KeyReleaser::with_timeout_ms(timeout_ms));
        }
        self
    }

    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for TerminalEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for TerminalEvents {
    fn poll_event(&mut self) -> PixResult<Option<Event>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }
            let now = self.now_ms();
            if !event::poll(Duration::ZERO)? {
                if let Some(releaser) = self.releaser.as_mut() {
                    releaser.expire(now, &mut self.pending);
                }
                return Ok(self.pending.pop_front());
            }
            let mapped = map_event(&event::read()?);
            match self.releaser.as_mut() {
                Some(releaser) => {
                    for event in mapped {
                        releaser.feed(event, now, &mut self.pending);
                    }
                }
                None => self.pending.extend(mapped),
            }
        }
    }
}
