use crate::dom::Element;
use crate::prefs::{self, PreferenceStore};
use crate::state::Theme;
use tracing::info;

/// Applies the colour scheme and keeps the toggle icon in sync.
pub struct ThemeController<E> {
    body: Option<E>,
    icon: Option<E>,
}

impl<E: Element> ThemeController<E> {
    pub fn new(body: Option<E>, icon: Option<E>) -> Self {
        Self { body, icon }
    }

    pub fn apply(&self, theme: Theme) {
        if let Some(body) = &self.body {
            body.set_attr("data-theme", theme.code());
        }
        if let Some(icon) = &self.icon {
            icon.set_class_name(theme.icon_class());
        }
    }

    pub fn toggle(&self, current: &mut Theme, store: &dyn PreferenceStore) -> Theme {
        *current = current.other();
        self.apply(*current);
        prefs::save_theme(store, *current);
        info!("Theme switched to {}", current);
        *current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryElement;
    use crate::prefs::{MemoryStore, THEME_KEY};

    #[test]
    fn test_apply_sets_attribute_and_icon() {
        let body = MemoryElement::new("body");
        let icon = MemoryElement::new("i");
        let controller = ThemeController::new(Some(body.clone()), Some(icon.clone()));

        controller.apply(Theme::Light);
        assert_eq!(body.attr("data-theme").as_deref(), Some("light"));
        assert_eq!(icon.attr("class").as_deref(), Some("fas fa-moon"));
    }

    #[test]
    fn test_toggle_twice_restores_theme_and_icon() {
        let body = MemoryElement::new("body");
        let icon = MemoryElement::new("i");
        let controller = ThemeController::new(Some(body.clone()), Some(icon.clone()));
        let store = MemoryStore::new();
        let mut theme = Theme::Dark;
        controller.apply(theme);
        let original_icon = icon.attr("class");

        controller.toggle(&mut theme, &store);
        assert_eq!(theme, Theme::Light);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));

        controller.toggle(&mut theme, &store);
        assert_eq!(theme, Theme::Dark);
        assert_eq!(body.attr("data-theme").as_deref(), Some("dark"));
        assert_eq!(icon.attr("class"), original_icon);
    }

    #[test]
    fn test_missing_elements_still_toggle_state() {
        let controller: ThemeController<MemoryElement> = ThemeController::new(None, None);
        let store = MemoryStore::new();
        let mut theme = Theme::Dark;
        controller.toggle(&mut theme, &store);
        assert_eq!(theme, Theme::Light);
    }
}
