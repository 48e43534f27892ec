//! Events delivered to host callbacks.
//!
//! Backends produce [`Event`]s from their native input; the engine produces
//! the lifecycle ones (`Init`, `Update`, `Quit`). Each event with a callback
//! maps to exactly one [`EventKind`], which is the key of the callback registry.

use crate::Size;

/// Callback slot identifier.
///
/// The string form is the callback name a host registers under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Init,
    Update,
    Quit,
    KeyDown,
    KeyUp,
    TextInput,
    MouseDown,
    MouseUp,
    MouseMoved,
    ControllerAdded,
    ControllerRemoved,
    ControllerDown,
    ControllerUp,
    ControllerMoved,
}

impl EventKind {
    /// Number of callback slots.
    pub const COUNT: usize = 14;

    pub const ALL: [EventKind; EventKind::COUNT] = [
        EventKind::Init,
        EventKind::Update,
        EventKind::Quit,
        EventKind::KeyDown,
        EventKind::KeyUp,
        EventKind::TextInput,
        EventKind::MouseDown,
        EventKind::MouseUp,
        EventKind::MouseMoved,
        EventKind::ControllerAdded,
        EventKind::ControllerRemoved,
        EventKind::ControllerDown,
        EventKind::ControllerUp,
        EventKind::ControllerMoved,
    ];

    /// Parse a callback name (exact, e.g. `"on_keydown"`).
    ///
    /// ```
    /// use tui_pix_types::EventKind;
    ///
    /// assert_eq!(EventKind::from_str("on_update"), Some(EventKind::Update));
    /// assert_eq!(EventKind::from_str("on_nothing"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        EventKind::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Init => "on_init",
            EventKind::Update => "on_update",
            EventKind::Quit => "on_quit",
            EventKind::KeyDown => "on_keydown",
            EventKind::KeyUp => "on_keyup",
            EventKind::TextInput => "on_textinput",
            EventKind::MouseDown => "on_mousedown",
            EventKind::MouseUp => "on_mouseup",
            EventKind::MouseMoved => "on_mousemoved",
            EventKind::ControllerAdded => "on_controlleradded",
            EventKind::ControllerRemoved => "on_controllerremoved",
            EventKind::ControllerDown => "on_controllerdown",
            EventKind::ControllerUp => "on_controllerup",
            EventKind::ControllerMoved => "on_controllermoved",
        }
    }

    /// Dense slot index in `0..COUNT`.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// An event with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Loop is about to start.
    Init,
    /// One fixed simulation step; `frame` starts at 1.
    Update { frame: u32 },
    /// The loop is stopping (or the user asked to close).
    Quit,
    KeyDown { key: String },
    KeyUp { key: String },
    TextInput { text: String },
    /// Buttons are numbered 1 = left, 2 = middle, 3 = right.
    MouseDown { button: u8 },
    MouseUp { button: u8 },
    /// Position in canvas pixels once the engine has translated it.
    MouseMoved { x: i32, y: i32 },
    ControllerAdded { id: u32 },
    ControllerRemoved { id: u32 },
    ControllerDown { id: u32, button: String },
    ControllerUp { id: u32, button: String },
    /// Axis position in `[-1, 1]`.
    ControllerMoved { id: u32, axis: String, value: f32 },
    /// The desktop area changed size. Handled by the engine, never dispatched.
    Resized(Size),
}

impl Event {
    /// Build an axis event from a raw signed 16-bit reading.
    ///
    /// Positive readings divide by 32767 and negative by 32768 so both ends
    /// land exactly on `1.0` / `-1.0`.
    pub fn controller_axis(id: u32, axis: impl Into<String>, raw: i16) -> Self {
        let value = if raw >= 0 {
            raw as f32 / 32767.0
        } else {
            raw as f32 / 32768.0
        };
        Event::ControllerMoved {
            id,
            axis: axis.into(),
            value,
        }
    }

    /// Callback slot for this event, `None` for engine-internal events.
    pub fn kind(&self) -> Option<EventKind> {
        let kind = match self {
            Event::Init => EventKind::Init,
            Event::Update { .. } => EventKind::Update,
            Event::Quit => EventKind::Quit,
            Event::KeyDown { .. } => EventKind::KeyDown,
            Event::KeyUp { .. } => EventKind::KeyUp,
            Event::TextInput { .. } => EventKind::TextInput,
            Event::MouseDown { .. } => EventKind::MouseDown,
            Event::MouseUp { .. } => EventKind::MouseUp,
            Event::MouseMoved { .. } => EventKind::MouseMoved,
            Event::ControllerAdded { .. } => EventKind::ControllerAdded,
            Event::ControllerRemoved { .. } => EventKind::ControllerRemoved,
            Event::ControllerDown { .. } => EventKind::ControllerDown,
            Event::ControllerUp { .. } => EventKind::ControllerUp,
            Event::ControllerMoved { .. } => EventKind::ControllerMoved,
            Event::Resized(_) => return None,
        };
        Some(kind)
    }

    pub fn key_down(key: impl Into<String>) -> Self {
        Event::KeyDown { key: key.into() }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Event::KeyUp { key: key.into() }
    }
}
