//! Callback registry.
//!
//! One optional handler per [`EventKind`]. An empty slot is a normal state:
//! input events for it are dropped, and only an explicit [`Callbacks::emit`]
//! reports `MissingHandler`.

use log::warn;

use crate::context::Engine;
use crate::types::{Event, EventKind, PixError, PixResult};

/// A registered handler. Receives the engine and the event that fired.
pub type Handler = Box<dyn FnMut(&mut Engine, &Event) -> PixResult<()>>;

pub struct Callbacks {
    slots: [Option<Handler>; EventKind::COUNT],
}

impl Callbacks {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Register `handler` for `kind`, replacing any previous one.
    pub fn on(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&mut Engine, &Event) -> PixResult<()> + 'static,
    ) -> &mut Self {
        self.slots[kind.index()] = Some(Box::new(handler));
        self
    }

    pub fn on_init(
        &mut self,
        mut f: impl FnMut(&mut Engine) -> PixResult<()> + 'static,
    ) -> &mut Self {
        self.on(EventKind::Init, move |engine, _| f(engine))
    }

    pub fn on_update(
        &mut self,
        mut f: impl FnMut(&mut Engine, u32) -> PixResult<()> + 'static,
    ) -> &mut Self {
        self.on(EventKind::Update, move |engine, event| match event {
            Event::Update { frame } => f(engine, *frame),
            _ => Ok(()),
        })
    }

    pub fn on_quit(
        &mut self,
        mut f: impl FnMut(&mut Engine) -> PixResult<()> + 'static,
    ) -> &mut Self {
        self.on(EventKind::Quit, move |engine, _| f(engine))
    }

    pub fn on_keydown(
        &mut self,
        mut f: impl FnMut(&mut Engine, &str) -> PixResult<()> + 'static,
    ) -> &mut Self {
        self.on(EventKind::KeyDown, move |engine, event| match event {
            Event::KeyDown { key } => f(engine, key),
            _ => Ok(()),
        })
    }

    pub fn on_keyup(
        &mut self,
        mut f: impl FnMut(&mut Engine, &str) -> PixResult<()> + 'static,
    ) -> &mut Self {
        self.on(EventKind::KeyUp, move |engine, event| match event {
            Event::KeyUp { key } => f(engine, key),
            _ => Ok(()),
        })
    }

    pub fn on_mousemoved(
        &mut self,
        mut f: impl FnMut(&mut Engine, i32, i32) -> PixResult<()> + 'static,
    ) -> &mut Self {
        self.on(EventKind::MouseMoved, move |engine, event| match event {
            Event::MouseMoved { x, y } => f(engine, *x, *y),
            _ => Ok(()),
        })
    }

    /// Unregister the handler for `kind`, returning whether one was set.
    pub fn remove(&mut self, kind: EventKind) -> bool {
        self.slots[kind.index()].take().is_some()
    }

    pub fn has(&self, kind: EventKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// Run the handler for `event` if one is registered.
    ///
    /// Returns `Ok(false)` when the slot is empty or the event has none.
    pub fn dispatch(&mut self, engine: &mut Engine, event: &Event) -> PixResult<bool> {
        let Some(kind) = event.kind() else {
            return Ok(false);
        };
        match self.slots[kind.index()].as_mut() {
            Some(handler) => {
                handler(engine, event)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Manually fire `event`; an empty slot is reported as `MissingHandler`.
    pub fn emit(&mut self, engine: &mut Engine, event: &Event) -> PixResult<()> {
        if self.dispatch(engine, event)? {
            return Ok(());
        }
        let name = event
            .kind()
            .map(|k| k.as_str().to_string())
            .unwrap_or_else(|| format!("{event:?}"));
        warn!("emit: no handler for '{}'", name);
        Err(PixError::MissingHandler(name))
    }

    /// Fire the handler registered under `name` with `payload`.
    ///
    /// Unknown names and empty slots both report `MissingHandler(name)`. A
    /// payload of another kind is rejected with `InvalidArgument`, since the
    /// typed handlers would otherwise skip it.
    pub fn emit_named(
        &mut self,
        engine: &mut Engine,
        name: &str,
        payload: &Event,
    ) -> PixResult<()> {
        let kind = Self::lookup(name)?;
        if payload.kind() != Some(kind) {
            return Err(PixError::invalid(format!(
                "{name}: payload {payload:?} is not a {} event",
                kind.as_str()
            )));
        }
        match self.slots[kind.index()].as_mut() {
            Some(handler) => handler(engine, payload),
            None => {
                warn!("emit: no handler for '{}'", name);
                Err(PixError::MissingHandler(name.to_string()))
            }
        }
    }

    /// Resolve a callback name such as `"on_keydown"`.
    pub fn lookup(name: &str) -> PixResult<EventKind> {
        EventKind::from_str(name).ok_or_else(|| PixError::MissingHandler(name.to_string()))
    }
}

impl Default for Callbacks {
    fn default() -> Self {
        Self::new()
    }
}
