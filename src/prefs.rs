//! Durable key-value preferences.

use crate::i18n::Language;
use crate::state::{Preferences, Theme};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, warn};

pub const LANGUAGE_KEY: &str = "portfolio-lang";
pub const THEME_KEY: &str = "portfolio-theme";

/// Synchronous string storage. Never reports errors: an unavailable store
/// simply returns `None` and drops writes.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl Preferences {
    /// Read both preferences, using the default for anything absent or
    /// unrecognised.
    pub fn load(store: &dyn PreferenceStore) -> Preferences {
        let language = match store.get(LANGUAGE_KEY) {
            Some(code) => Language::from_code(&code).unwrap_or_else(|e| {
                warn!("Ignoring stored language: {}", e);
                Language::default()
            }),
            None => Language::default(),
        };

        let theme = match store.get(THEME_KEY) {
            Some(code) => Theme::from_code(&code).unwrap_or_else(|| {
                warn!("Ignoring stored theme '{}'", code);
                Theme::default()
            }),
            None => Theme::default(),
        };

        debug!("Loaded preferences: language={}, theme={}", language, theme);
        Preferences { language, theme }
    }
}

pub fn save_language(store: &dyn PreferenceStore, language: Language) {
    store.set(LANGUAGE_KEY, language.code());
}

pub fn save_theme(store: &dyn PreferenceStore, theme: Theme) {
    store.set(THEME_KEY, theme.code());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults_when_empty() {
        let store = MemoryStore::new();
        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn test_load_saved_values() {
        let store = MemoryStore::new();
        save_language(&store, Language::HINDI);
        save_theme(&store, Theme::Light);

        let prefs = Preferences::load(&store);
        assert_eq!(prefs.language, Language::HINDI);
        assert_eq!(prefs.theme, Theme::Light);
    }

    #[test]
    fn test_load_ignores_unknown_values() {
        let store = MemoryStore::new();
        store.set(LANGUAGE_KEY, "fr");
        store.set(THEME_KEY, "sepia");

        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn test_keys_are_independent() {
        let store = MemoryStore::new();
        save_theme(&store, Theme::Light);

        let prefs = Preferences::load(&store);
        assert_eq!(prefs.language, Language::ENGLISH);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(store.get(LANGUAGE_KEY), None);
    }
}
