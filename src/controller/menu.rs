use crate::dom::Element;
use tracing::debug;

const OPEN_CLASS: &str = "active";

/// Mobile overlay menu: the panel and the button that toggles it.
pub struct MenuController<E> {
    panel: Option<E>,
    button: Option<E>,
}

impl<E: Element> MenuController<E> {
    pub fn new(panel: Option<E>, button: Option<E>) -> Self {
        Self { panel, button }
    }

    /// Initial ARIA state. The menu always starts closed.
    pub fn init(&self, aria_label: &str) {
        if let Some(button) = &self.button {
            button.set_attr("aria-expanded", "false");
        }
        self.set_label(aria_label);
    }

    /// Accessible name of the toggle button, in the active language.
    pub fn set_label(&self, aria_label: &str) {
        if let Some(button) = &self.button {
            button.set_attr("aria-label", aria_label);
        }
    }

    fn render(&self, open: bool) {
        if let Some(panel) = &self.panel {
            panel.toggle_class(OPEN_CLASS, open);
        }
        if let Some(button) = &self.button {
            button.toggle_class(OPEN_CLASS, open);
            button.set_attr("aria-expanded", if open { "true" } else { "false" });
        }
    }

    /// Flip the menu. No-op without both panel and button.
    pub fn toggle(&self, open: &mut bool) {
        if self.panel.is_none() || self.button.is_none() {
            return;
        }
        *open = !*open;
        debug!("Menu {}", if *open { "opened" } else { "closed" });
        self.render(*open);
    }

    /// Close the menu if open. Calling it on a closed menu changes nothing.
    pub fn close(&self, open: &mut bool) {
        if *open {
            self.toggle(open);
        }
    }

    /// Document click: closes when the target lies outside both the panel
    /// and the button.
    pub fn on_document_click(&self, target: &E, open: &mut bool) {
        if !*open {
            return;
        }
        let inside = |el: &Option<E>| el.as_ref().is_some_and(|el| el.contains(target));
        if !inside(&self.panel) && !inside(&self.button) {
            self.close(open);
        }
    }

    pub fn on_key(&self, key: &str, open: &mut bool) {
        if key == "Escape" {
            self.close(open);
        }
    }
}
