//! User display preferences with an injected persistence port.
//!
//! Preferences are an explicit value object passed down by callers, never
//! ambient global state. Persistence is behind the [`PrefsStore`] trait so
//! the same code serves cookie-backed storage in the dashboard and an
//! in-memory store in tests.

use crate::error::ScreenerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const THEME_KEY: &str = "theme";
const LANGUAGE_KEY: &str = "language";

/// Key-value persistence port for preferences.
pub trait PrefsStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), ScreenerError>;
}

/// Dashboard color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Explicit user preferences value object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Preferences {
    pub theme: Theme,
    /// BCP 47 language tag, e.g. "en" or "ru".
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: "en".to_string(),
        }
    }
}

impl Preferences {
    /// Load preferences from the store, falling back to defaults for
    /// missing or unparseable entries.
    pub fn load(store: &dyn PrefsStore) -> Self {
        let defaults = Self::default();
        Self {
            theme: store
                .read(THEME_KEY)
                .and_then(|v| Theme::parse(&v))
                .unwrap_or(defaults.theme),
            language: store
                .read(LANGUAGE_KEY)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.language),
        }
    }

    /// Persist both preference keys.
    pub fn save(&self, store: &mut dyn PrefsStore) -> Result<(), ScreenerError> {
        store.write(THEME_KEY, self.theme.as_str())?;
        store.write(LANGUAGE_KEY, &self.language)
    }
}

/// In-memory store used in tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefsStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), ScreenerError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
