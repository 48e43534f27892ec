//! Mapping from terminal events to runtime events.
//!
//! Key names follow the conventional desktop names (`"A"`, `"Left"`,
//! `"Space"`, `"Return"`, `"F5"`...), so cartridges can be written without
//! caring which backend delivers the input.

use arrayvec::ArrayVec;
use crossterm::event::{
    Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::types::{Event, Size};

/// One terminal event expands to at most two runtime events
/// (a key press plus its text input).
pub type Mapped = ArrayVec<Event, 2>;

/// Translate one terminal event.
///
/// Mouse rows are doubled: every terminal cell shows two vertical pixels.
pub fn map_event(event: &TermEvent) -> Mapped {
    let mut out = Mapped::new();
    match event {
        TermEvent::Key(key) => map_key(key, &mut out),
        TermEvent::Mouse(mouse) => {
            if let Some(ev) = map_mouse(mouse) {
                out.push(ev);
            }
        }
        TermEvent::Resize(cols, rows) => {
            out.push(Event::Resized(Size::new(*cols as u32, *rows as u32 * 2)));
        }
        _ => {}
    }
    out
}

fn map_key(key: &KeyEvent, out: &mut Mapped) {
    if is_interrupt(key) {
        if key.kind != KeyEventKind::Release {
            out.push(Event::Quit);
        }
        return;
    }
    let Some(name) = key_name(key.code) else {
        return;
    };
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            out.push(Event::KeyDown { key: name });
            if let Some(text) = text_of(key) {
                out.push(Event::TextInput { text });
            }
        }
        KeyEventKind::Release => out.push(Event::KeyUp { key: name }),
    }
}

fn map_mouse(mouse: &MouseEvent) -> Option<Event> {
    let x = mouse.column as i32;
    let y = mouse.row as i32 * 2;
    match mouse.kind {
        MouseEventKind::Down(b) => Some(Event::MouseDown {
            button: button_number(b),
        }),
        MouseEventKind::Up(b) => Some(Event::MouseUp {
            button: button_number(b),
        }),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Event::MouseMoved { x, y }),
        _ => None,
    }
}

/// Left, middle and right buttons are 1, 2 and 3.
pub fn button_number(button: MouseButton) -> u8 {
    match button {
        MouseButton::Left => 1,
        MouseButton::Middle => 2,
        MouseButton::Right => 3,
    }
}

/// Ctrl+C ends the loop like a window close request.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Name of a key, or `None` for keys cartridges never see.
pub fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().collect(),
        KeyCode::Enter => "Return".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => return None,
    };
    Some(name)
}

fn text_of(key: &KeyEvent) -> Option<String> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}
