//! Application state owned by the coordinator.
//!
//! Controllers never hold their own copy of this data; [`crate::app::App`]
//! lends each one the slice it needs for a single call.

use crate::i18n::Language;
use std::fmt;

/// Colour scheme applied through the `data-theme` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn from_code(code: &str) -> Option<Theme> {
        match code {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn other(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Icon class for the toggle: it shows the theme a press switches to.
    pub fn icon_class(&self) -> &'static str {
        match self {
            Theme::Dark => "fas fa-sun",
            Theme::Light => "fas fa-moon",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The two durable user choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
}

/// Transient interface state, rebuilt on every page load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub active_section: Option<String>,
    pub menu_open: bool,
    pub loaded: bool,
    /// A scroll frame has been requested and not yet rendered.
    pub scroll_frame_pending: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub preferences: Preferences,
    pub ui: UiState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_codes_round_trip() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_eq!(Theme::from_code(theme.code()), Some(theme));
        }
        assert_eq!(Theme::from_code("sepia"), None);
    }

    #[test]
    fn test_theme_other_twice_is_identity() {
        assert_eq!(Theme::Dark.other(), Theme::Light);
        assert_eq!(Theme::Dark.other().other(), Theme::Dark);
    }

    #[test]
    fn test_icon_classes_differ() {
        assert_eq!(Theme::Dark.icon_class(), "fas fa-sun");
        assert_eq!(Theme::Light.icon_class(), "fas fa-moon");
    }

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.preferences.language, Language::ENGLISH);
        assert_eq!(state.preferences.theme, Theme::Dark);
        assert!(!state.ui.menu_open);
        assert!(!state.ui.loaded);
        assert!(state.ui.active_section.is_none());
    }
}
