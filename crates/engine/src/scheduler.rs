//! Fixed-timestep scheduler.
//!
//! Each real iteration:
//!
//! 1. drain every pending input event and dispatch it,
//! 2. add the elapsed wall time to an accumulator and run one update per
//!    whole tick it holds (zero, one or many; partial ticks carry over),
//! 3. present exactly once.
//!
//! The loop ends at the first check after the engine's quit request is set,
//! either by a quit event or by a callback calling [`Engine::quit`].

use log::{debug, info};

use crate::backend::{Clock, EventSource};
use crate::callbacks::Callbacks;
use crate::context::Engine;
use crate::types::{Event, PixResult, TICK_MS};

/// `Stopped` before `start` and after `finish`, `Running` in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    tick_ms: u64,
    accumulator: u64,
    last_tick: u64,
    frame_no: u32,
    state: LoopState,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::with_tick_ms(TICK_MS)
    }

    pub fn with_tick_ms(tick_ms: u32) -> Self {
        Self {
            tick_ms: tick_ms.max(1) as u64,
            accumulator: 0,
            last_tick: 0,
            frame_no: 0,
            state: LoopState::Stopped,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of updates run so far.
    pub fn frame_no(&self) -> u32 {
        self.frame_no
    }

    pub fn tick_ms(&self) -> u32 {
        self.tick_ms as u32
    }

    /// Milliseconds left before the next update is due.
    pub fn until_next_tick(&self) -> u64 {
        self.tick_ms - self.accumulator.min(self.tick_ms)
    }

    /// Run `on_init` and start the clock.
    pub fn start(
        &mut self,
        engine: &mut Engine,
        callbacks: &mut Callbacks,
        clock: &mut dyn Clock,
    ) -> PixResult<()> {
        callbacks.dispatch(engine, &Event::Init)?;
        self.accumulator = 0;
        self.last_tick = clock.now_ms();
        self.state = LoopState::Running;
        info!("loop running at {} ms per tick", self.tick_ms);
        Ok(())
    }

    /// One real iteration. Returns how many updates ran.
    pub fn step(
        &mut self,
        engine: &mut Engine,
        callbacks: &mut Callbacks,
        events: &mut dyn EventSource,
        clock: &mut dyn Clock,
    ) -> PixResult<u32> {
        while let Some(event) = events.poll_event()? {
            self.handle_event(engine, callbacks, event)?;
        }

        let now = clock.now_ms();
        self.accumulator += now.saturating_sub(self.last_tick);
        self.last_tick = now;

        let mut updates = 0;
        while self.accumulator >= self.tick_ms {
            self.frame_no = self.frame_no.wrapping_add(1);
            callbacks.dispatch(engine, &Event::Update { frame: self.frame_no })?;
            self.accumulator -= self.tick_ms;
            updates += 1;
        }

        engine.present()?;
        Ok(updates)
    }

    fn handle_event(
        &mut self,
        engine: &mut Engine,
        callbacks: &mut Callbacks,
        event: Event,
    ) -> PixResult<()> {
        match event {
            Event::Quit => {
                debug!("quit event received");
                engine.quit();
                Ok(())
            }
            Event::Resized(desktop) => engine.handle_resize(desktop),
            Event::MouseMoved { x, y } => {
                let (x, y) = engine.window_to_canvas(x, y);
                callbacks
                    .dispatch(engine, &Event::MouseMoved { x, y })
                    .map(|_| ())
            }
            other => callbacks.dispatch(engine, &other).map(|_| ()),
        }
    }

    /// Run `on_quit` and enter the terminal state.
    pub fn finish(&mut self, engine: &mut Engine, callbacks: &mut Callbacks) -> PixResult<()> {
        self.state = LoopState::Stopped;
        info!("loop stopped after {} updates", self.frame_no);
        callbacks.dispatch(engine, &Event::Quit).map(|_| ())
    }

    /// Start, iterate until quit is requested, then finish.
    ///
    /// Between iterations the clock idles until the next tick is due.
    ///
    /// Errors (from callbacks or the backend) abort the loop immediately and
    /// skip `on_quit`.
    pub fn run(
        &mut self,
        engine: &mut Engine,
        callbacks: &mut Callbacks,
        events: &mut dyn EventSource,
        clock: &mut dyn Clock,
    ) -> PixResult<()> {
        self.start(engine, callbacks, clock)?;
        while !engine.is_quit_requested() {
            self.step(engine, callbacks, events, clock)?;
            if !engine.is_quit_requested() {
                clock.wait_ms(self.until_next_tick());
            }
        }
        self.finish(engine, callbacks)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessPresenter, ManualClock, QueuedEvents};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(cb: &mut Callbacks) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        cb.on_update(move |_, frame| {
            l.borrow_mut().push(format!("update {frame}"));
            Ok(())
        });
        let l = Rc::clone(&log);
        cb.on_keydown(move |_, key| {
            l.borrow_mut().push(format!("key {key}"));
            Ok(())
        });
        log
    }

    #[test]
    fn three_ticks_run_three_updates_and_one_present() {
        let presenter = HeadlessPresenter::new();
        let stats = presenter.stats();
        let mut engine = Engine::new(Box::new(presenter));
        let mut cb = Callbacks::new();
        let log = recorder(&mut cb);
        let mut clock = ManualClock::new();
        let mut events = QueuedEvents::new();
        let mut sched = Scheduler::new();

        sched.start(&mut engine, &mut cb, &mut clock).unwrap();
        clock.advance(3 * TICK_MS as u64);
        let n = sched.step(&mut engine, &mut cb, &mut events, &mut clock).unwrap();

        assert_eq!(n, 3);
        assert_eq!(*log.borrow(), vec!["update 1", "update 2", "update 3"]);
        assert_eq!(stats.borrow().presents, 1);
    }

    #[test]
    fn partial_ticks_carry_over() {
        let mut engine = Engine::new(Box::new(HeadlessPresenter::new()));
        let mut cb = Callbacks::new();
        let mut clock = ManualClock::new();
        let mut events = QueuedEvents::new();
        let mut sched = Scheduler::with_tick_ms(10);
        sched.start(&mut engine, &mut cb, &mut clock).unwrap();

        clock.advance(7);
        assert_eq!(sched.step(&mut engine, &mut cb, &mut events, &mut clock).unwrap(), 0);
        clock.advance(7);
        assert_eq!(sched.step(&mut engine, &mut cb, &mut events, &mut clock).unwrap(), 1);
        clock.advance(6);
        assert_eq!(sched.step(&mut engine, &mut cb, &mut events, &mut clock).unwrap(), 1);
        assert_eq!(sched.frame_no(), 2);
    }

    #[test]
    fn events_are_dispatched_before_updates() {
        let mut engine = Engine::new(Box::new(HeadlessPresenter::new()));
        let mut cb = Callbacks::new();
        let log = recorder(&mut cb);
        let mut clock = ManualClock::new();
        let mut events = QueuedEvents::new();
        let mut sched = Scheduler::new();
        sched.start(&mut engine, &mut cb, &mut clock).unwrap();

        events.push(Event::key_down("A"));
        events.push(Event::key_down("B"));
        clock.advance(TICK_MS as u64);
        sched.step(&mut engine, &mut cb, &mut events, &mut clock).unwrap();

        assert_eq!(*log.borrow(), vec!["key A", "key B", "update 1"]);
        assert_eq!(events.pending(), 0);
    }

    #[test]
    fn quit_event_stops_after_current_iteration() {
        let presenter = HeadlessPresenter::new();
        let stats = presenter.stats();
        let mut engine = Engine::new(Box::new(presenter));
        let mut cb = Callbacks::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let o = Rc::clone(&order);
        cb.on_init(move |_| {
            o.borrow_mut().push("init");
            Ok(())
        });
        let o = Rc::clone(&order);
        cb.on_quit(move |_| {
            o.borrow_mut().push("quit");
            Ok(())
        });

        let mut events = QueuedEvents::new();
        events.push(Event::Quit);
        let mut clock = ManualClock::new();
        let mut sched = Scheduler::new();
        sched
            .run(&mut engine, &mut cb, &mut events, &mut clock)
            .unwrap();

        assert_eq!(*order.borrow(), vec!["init", "quit"]);
        assert_eq!(sched.state(), LoopState::Stopped);
        assert_eq!(stats.borrow().presents, 1);
    }

    #[test]
    fn backend_failure_aborts_without_on_quit() {
        let mut engine = Engine::new(Box::new(HeadlessPresenter::new().failing()));
        let mut cb = Callbacks::new();
        let quit_called = Rc::new(RefCell::new(false));
        let q = Rc::clone(&quit_called);
        cb.on_quit(move |_| {
            *q.borrow_mut() = true;
            Ok(())
        });

        let mut events = QueuedEvents::new();
        let mut clock = ManualClock::new();
        let err = Scheduler::new()
            .run(&mut engine, &mut cb, &mut events, &mut clock)
            .unwrap_err();

        assert!(err.is_fatal());
        assert!(!*quit_called.borrow());
    }

    #[test]
    fn run_paces_one_update_per_iteration() {
        let presenter = HeadlessPresenter::new();
        let stats = presenter.stats();
        let mut engine = Engine::new(Box::new(presenter));
        let mut cb = Callbacks::new();
        cb.on_update(|engine, frame| {
            if frame == 5 {
                engine.quit();
            }
            Ok(())
        });

        let mut events = QueuedEvents::new();
        let mut clock = ManualClock::new();
        let mut sched = Scheduler::new();
        sched
            .run(&mut engine, &mut cb, &mut events, &mut clock)
            .unwrap();

        assert_eq!(sched.frame_no(), 5);
        // First iteration runs no update; each later one runs exactly one.
        assert_eq!(stats.borrow().presents, 6);
        assert_eq!(clock.now_ms(), 5 * TICK_MS as u64);
    }

    #[test]
    fn mouse_positions_are_translated_to_canvas() {
        let presenter =
            HeadlessPresenter::new().with_desktop(crate::types::Size::new(800, 600), 64);
        let mut engine = Engine::new(Box::new(presenter));
        engine.configure_screen(100, 100, None).unwrap();

        let mut cb = Callbacks::new();
        let seen = Rc::new(RefCell::new(None));
        let s = Rc::clone(&seen);
        cb.on_mousemoved(move |_, x, y| {
            *s.borrow_mut() = Some((x, y));
            Ok(())
        });

        let mut events = QueuedEvents::new();
        events.push(Event::MouseMoved { x: 160, y: 55 });
        let mut clock = ManualClock::new();
        let mut sched = Scheduler::new();
        sched.start(&mut engine, &mut cb, &mut clock).unwrap();
        sched.step(&mut engine, &mut cb, &mut events, &mut clock).unwrap();

        assert_eq!(*seen.borrow(), Some((2, 1)));
    }
}
