//! Language type: validated language handle.
//!
//! `Language` is a small `Copy` value that can only be built for codes the
//! registry knows about, so every place that holds one is guaranteed to hold
//! a supported, enabled language.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "hi")
    code: &'static str,
}

impl Language {
    /// English, the default language.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Hindi.
    pub const HINDI: Language = Language { code: "hi" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Get the canonical (default) language.
    pub fn canonical() -> Language {
        Language {
            code: LanguageRegistry::get().canonical().code,
        }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    pub fn config(&self) -> &'static LanguageConfig {
        let registry = LanguageRegistry::get();
        registry
            .get_by_code(self.code)
            .unwrap_or_else(|| registry.canonical())
    }

    /// The language a toggle press switches to.
    pub fn other(&self) -> Language {
        Language {
            code: LanguageRegistry::get().next_after(self.code).code,
        }
    }

    /// Every enabled language, in registry order.
    pub fn enabled() -> Vec<Language> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// Payload attributes of every enabled language: a node carrying any of
    /// them is translatable.
    pub fn payload_attrs() -> Vec<String> {
        Language::enabled()
            .into_iter()
            .flat_map(|language| [language.text_attr(), language.placeholder_attr()])
            .collect()
    }

    /// Attribute carrying this language's text payload on a translatable node.
    pub fn text_attr(&self) -> String {
        format!("data-text-{}", self.code)
    }

    /// Attribute carrying this language's placeholder payload on an input.
    pub fn placeholder_attr(&self) -> String {
        format!("data-placeholder-{}", self.code)
    }

    /// Label for the language toggle while this language is active: it names
    /// the language the user would switch to.
    pub fn toggle_label(&self) -> &'static str {
        self.other().config().toggle_label
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
