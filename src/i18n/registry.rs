//! Language registry: Single source of truth for all supported languages.
//!
//! The registry is initialized once on first access with `OnceLock` and is
//! immutable thereafter.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "hi")
    pub code: &'static str,

    /// Short label shown on the language toggle when this language is the
    /// one the user would switch *to*
    pub toggle_label: &'static str,

    /// Value for the `dir` / `data-dir` attributes
    pub direction: &'static str,

    /// Whether this is the default language (only one should be true)
    pub is_canonical: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in registry order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the canonical (default) language configuration.
    ///
    /// Falls back to the first registered language if none is flagged.
    pub fn canonical(&self) -> &LanguageConfig {
        self.languages
            .iter()
            .find(|lang| lang.is_canonical)
            .unwrap_or(&self.languages[0])
    }

    /// The enabled language that follows `code` in registry order, wrapping
    /// around. With two languages this is simply "the other one".
    pub fn next_after(&self, code: &str) -> &LanguageConfig {
        let enabled = self.list_enabled();
        let position = enabled.iter().position(|lang| lang.code == code);
        match position {
            Some(i) => enabled[(i + 1) % enabled.len()],
            None => self.canonical(),
        }
    }
}

/// Default language configurations: English (canonical) and Hindi.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            toggle_label: "EN",
            direction: "ltr",
            is_canonical: true,
            enabled: true,
        },
        LanguageConfig {
            code: "hi",
            toggle_label: "HI",
            direction: "ltr",
            is_canonical: false,
            enabled: true,
        },
    ]
}
