//! Key release synthesis for terminals that never report releases.
//!
//! Without the keyboard enhancement protocol a terminal only sends presses
//! (and auto-repeat presses). A key is treated as held from its last press;
//! it is released when a different key is pressed or when no press for it
//! has arrived within the timeout.

use std::collections::VecDeque;

use crate::types::{Event, KEY_RELEASE_TIMEOUT_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
struct HeldKey {
    name: String,
    last_seen_ms: u64,
}

/// Tracks keys that are down and owes a `KeyUp` for each of them.
#[derive(Debug, Clone)]
pub struct KeyReleaser {
    held: Vec<HeldKey>,
    timeout_ms: u64,
}

impl KeyReleaser {
    pub fn new() -> Self {
        Self::with_timeout_ms(KEY_RELEASE_TIMEOUT_MS)
    }

    pub fn with_timeout_ms(timeout_ms: u64) -> Self {
        Self {
            held: Vec::new(),
            timeout_ms,
        }
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.iter().any(|k| k.name == key)
    }

    /// Queue `event`, preceded by any releases it implies.
    pub fn feed(&mut self, event: Event, now_ms: u64, out: &mut VecDeque<Event>) {
        match &event {
            Event::KeyDown { key } => {
                self.release_where(out, |k| k.name != *key);
                match self.held.iter_mut().find(|k| k.name == *key) {
                    Some(held) => held.last_seen_ms = now_ms,
                    None => self.held.push(HeldKey {
                        name: key.clone(),
                        last_seen_ms: now_ms,
                    }),
                }
            }
            Event::KeyUp { key } => self.held.retain(|k| k.name != *key),
            _ => {}
        }
        out.push_back(event);
    }

    /// Release every key not pressed again for longer than the timeout.
    pub fn expire(&mut self, now_ms: u64, out: &mut VecDeque<Event>) {
        let timeout = self.timeout_ms;
        self.release_where(out, |k| now_ms.saturating_sub(k.last_seen_ms) > timeout);
    }

    fn release_where(
        &mut self,
        out: &mut VecDeque<Event>,
        mut released: impl FnMut(&HeldKey) -> bool,
    ) {
        self.held.retain(|k| {
            if released(k) {
                out.push_back(Event::KeyUp {
                    key: k.name.clone(),
                });
                false
            } else {
                true
            }
        });
    }
}

impl Default for KeyReleaser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(out: &mut VecDeque<Event>) -> Vec<Event> {
        out.drain(..).collect()
    }

    #[test]
    fn test_tap_is_released_after_timeout() {
        let mut r = KeyReleaser::new();
        let mut out = VecDeque::new();
        r.feed(Event::key_down("A"), 1_000, &mut out);
        assert_eq!(drain(&mut out), vec![Event::key_down("A")]);

        r.expire(1_000 + KEY_RELEASE_TIMEOUT_MS, &mut out);
        assert!(out.is_empty());
        assert!(r.is_held("A"));

        r.expire(1_001 + KEY_RELEASE_TIMEOUT_MS, &mut out);
        assert_eq!(drain(&mut out), vec![Event::key_up("A")]);
        assert!(!r.is_held("A"));

        r.expire(5_000, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_repeats_keep_the_key_held() {
        let mut r = KeyReleaser::with_timeout_ms(100);
        let mut out = VecDeque::new();
        for t in [0, 80, 160, 240] {
            r.feed(Event::key_down("Left"), t, &mut out);
            r.expire(t + 50, &mut out);
        }
        assert!(out.iter().all(|e| *e == Event::key_down("Left")));
        r.expire(400, &mut out);
        assert_eq!(out.back(), Some(&Event::key_up("Left")));
    }

    #[test]
    fn test_new_key_releases_the_previous_one_first() {
        let mut r = KeyReleaser::new();
        let mut out = VecDeque::new();
        r.feed(Event::key_down("Left"), 0, &mut out);
        r.feed(Event::TextInput { text: "x".into() }, 5, &mut out);
        r.feed(Event::key_down("Right"), 10, &mut out);
        assert_eq!(
            drain(&mut out),
            vec![
                Event::key_down("Left"),
                Event::TextInput { text: "x".into() },
                Event::key_up("Left"),
                Event::key_down("Right"),
            ]
        );
        assert!(r.is_held("Right"));
    }

    #[test]
    fn test_real_release_is_not_doubled() {
        let mut r = KeyReleaser::new();
        let mut out = VecDeque::new();
        r.feed(Event::key_down("Q"), 0, &mut out);
        r.feed(Event::key_up("Q"), 20, &mut out);
        r.expire(1_000, &mut out);
        assert_eq!(
            drain(&mut out),
            vec![Event::key_down("Q"), Event::key_up("Q")]
        );
    }
}
