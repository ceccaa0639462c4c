use crate::dom::Element;
use crate::i18n::Language;
use crate::prefs::{self, PreferenceStore};
use tracing::info;

/// Rewrites translatable text for the active language.
pub struct LanguageController<E> {
    /// `<html>`
    root: Option<E>,
    /// `<body>`
    body: Option<E>,
    /// Label inside the language toggle
    toggle_label: Option<E>,
}

impl<E: Element> LanguageController<E> {
    pub fn new(root: Option<E>, body: Option<E>, toggle_label: Option<E>) -> Self {
        Self {
            root,
            body,
            toggle_label,
        }
    }

    /// Nodes carrying a text or placeholder payload for any language, looked
    /// up on every render so content inserted later is covered.
    fn translatable(&self) -> Vec<E> {
        self.root
            .as_ref()
            .or(self.body.as_ref())
            .map(|scope| scope.find_by_attributes(&Language::payload_attrs()))
            .unwrap_or_default()
    }

    /// Render the page in `language`. Safe to call any number of times.
    pub fn apply(&self, language: Language) {
        let direction = language.config().direction;

        if let Some(root) = &self.root {
            root.set_attr("lang", language.code());
            root.set_attr("dir", direction);
        }
        if let Some(body) = &self.body {
            body.set_attr("data-lang", language.code());
            body.set_attr("data-dir", direction);
        }

        let text_attr = language.text_attr();
        let placeholder_attr = language.placeholder_attr();
        for node in self.translatable() {
            if let Some(text) = node.attr(&text_attr) {
                node.set_text(&text);
            }
            if let Some(placeholder) = node.attr(&placeholder_attr) {
                node.set_attr("placeholder", &placeholder);
            }
        }

        if let Some(label) = &self.toggle_label {
            label.set_text(language.toggle_label());
        }
    }

    /// Switch `current` to the other language, render and persist it.
    pub fn toggle(&self, current: &mut Language, store: &dyn PreferenceStore) -> Language {
        *current = current.other();
        self.apply(*current);
        prefs::save_language(store, *current);
        info!("Language switched to {}", current);
        *current
    }
}
