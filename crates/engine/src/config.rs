//! Runtime configuration read from the environment.

use crate::types::{
    DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, DEFAULT_TITLE, KEY_RELEASE_TIMEOUT_MS,
};

/// Startup settings for a host.
///
/// | Variable | Default |
/// |----------|---------|
/// | `PIX_WIDTH` | 256 |
/// | `PIX_HEIGHT` | 256 |
/// | `PIX_TITLE` | `PiX Window` |
/// | `PIX_LOG_FILE` | unset (logging disabled) |
/// | `PIX_KEY_RELEASE_MS` | 150 |
///
/// Unparseable numbers fall back to the default. Range checks happen later,
/// in [`Engine::configure_screen`](crate::Engine::configure_screen).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub log_file: Option<String>,
    /// Press timeout for synthesized key releases.
    pub key_release_ms: u64,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let width = lookup("PIX_WIDTH")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_SCREEN_WIDTH);
        let height = lookup("PIX_HEIGHT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_SCREEN_HEIGHT);

        let title = lookup("PIX_TITLE")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let log_file = lookup("PIX_LOG_FILE")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let key_release_ms = lookup("PIX_KEY_RELEASE_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(KEY_RELEASE_TIMEOUT_MS);

        Self {
            width,
            height,
            title,
            log_file,
            key_release_ms,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.width, 256);
        assert_eq!(cfg.height, 256);
        assert_eq!(cfg.title, "PiX Window");
        assert_eq!(cfg.log_file, None);
        assert_eq!(cfg.key_release_ms, 150);
    }

    #[test]
    fn reads_all_variables() {
        let cfg = RuntimeConfig::from_lookup(lookup(&[
            ("PIX_WIDTH", "128"),
            ("PIX_HEIGHT", " 96 "),
            ("PIX_TITLE", "demo"),
            ("PIX_LOG_FILE", "/tmp/pix.log"),
            ("PIX_KEY_RELEASE_MS", "400"),
        ]));
        assert_eq!((cfg.width, cfg.height), (128, 96));
        assert_eq!(cfg.title, "demo");
        assert_eq!(cfg.log_file.as_deref(), Some("/tmp/pix.log"));
        assert_eq!(cfg.key_release_ms, 400);
    }

    #[test]
    fn garbage_falls_back() {
        let cfg = RuntimeConfig::from_lookup(lookup(&[
            ("PIX_WIDTH", "wide"),
            ("PIX_HEIGHT", "-3"),
            ("PIX_LOG_FILE", "   "),
        ]));
        assert_eq!((cfg.width, cfg.height), (256, 256));
        assert_eq!(cfg.log_file, None);
    }
}
