use crate::dom::{Element, Window};
use tracing::debug;

/// A page section that can become the active one.
#[derive(Debug, Clone)]
pub struct Section<E> {
    pub id: String,
    pub element: E,
}

/// A navigation link pointing at an in-page section.
#[derive(Debug, Clone)]
pub struct NavLink<E> {
    pub element: E,
    /// Target section id (the link's `href` without `#`)
    pub target: Option<String>,
    /// Section this link represents for highlighting (`data-section`)
    pub section: Option<String>,
}

impl<E: Element> NavLink<E> {
    pub fn from_element(element: E) -> Self {
        let target = element
            .attr("href")
            .and_then(|href| href.strip_prefix('#').map(str::to_string))
            .filter(|id| !id.is_empty());
        let section = element.attr("data-section");
        Self {
            element,
            target,
            section,
        }
    }

    fn represents(&self, section_id: &str) -> bool {
        match &self.section {
            Some(section) => section == section_id,
            None => self.target.as_deref() == Some(section_id),
        }
    }
}

/// Active-section tracking and in-page navigation.
pub struct NavigationController<E> {
    links: Vec<NavLink<E>>,
    sections: Vec<Section<E>>,
    header: Option<E>,
    probe_offset: f64,
}

impl<E: Element> NavigationController<E> {
    pub fn new(links: Vec<NavLink<E>>, sections: Vec<Section<E>>, header: Option<E>, probe_offset: f64) -> Self {
        Self {
            links,
            sections,
            header,
            probe_offset,
        }
    }

    pub fn links(&self) -> &[NavLink<E>] {
        &self.links
    }

    pub fn first_section(&self) -> Option<&str> {
        self.sections.first().map(|s| s.id.as_str())
    }

    /// The first section (document order) whose span contains the probe
    /// point `scroll_y + probe_offset`.
    pub fn section_at(&self, scroll_y: f64) -> Option<&str> {
        let probe = scroll_y + self.probe_offset;
        self.sections
            .iter()
            .find(|s| {
                let top = s.element.offset_top();
                probe >= top && probe < top + s.element.offset_height()
            })
            .map(|s| s.id.as_str())
    }

    /// Recompute the active section after a scroll. When no section contains
    /// the probe point the previous value is kept.
    pub fn on_scroll(&self, active: &mut Option<String>, scroll_y: f64) {
        let Some(id) = self.section_at(scroll_y) else {
            return;
        };
        if active.as_deref() != Some(id) {
            debug!("Active section: {}", id);
            *active = Some(id.to_string());
        }
        self.highlight_section(id);
    }

    /// Mark every link representing `section_id` as active, and no other.
    pub fn highlight_section(&self, section_id: &str) {
        for link in &self.links {
            link.element.toggle_class("active", link.represents(section_id));
        }
    }

    fn highlight_link(&self, index: usize) {
        for (i, link) in self.links.iter().enumerate() {
            link.element.toggle_class("active", i == index);
        }
    }

    /// Handle a click on link `index`. Returns false when the link does not
    /// point at a known section, in which case the browser's default
    /// navigation should proceed.
    pub fn on_link_click(
        &self,
        index: usize,
        active: &mut Option<String>,
        window: &dyn Window,
        smooth: bool,
    ) -> bool {
        let Some(link) = self.links.get(index) else {
            return false;
        };
        let Some(target) = link.target.as_deref() else {
            return false;
        };
        let Some(section) = self.sections.iter().find(|s| s.id == target) else {
            return false;
        };

        let header_height = self.header.as_ref().map(|h| h.offset_height()).unwrap_or(0.0);
        let top = section.element.offset_top() - header_height;
        window.scroll_to(top, smooth);

        self.highlight_link(index);
        *active = Some(link.section.clone().unwrap_or_else(|| target.to_string()));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryElement, MemoryWindow};
    use proptest::prelude::*;

    fn link(section: &str) -> NavLink<MemoryElement> {
        NavLink::from_element(
            MemoryElement::new("a")
                .with_class("nav-link")
                .with_attr("href", &format!("#{}", section))
                .with_attr("data-section", section),
        )
    }

    /// home 0..800, about 800..1600, skills 1600..2600
    fn controller() -> NavigationController<MemoryElement> {
        let sections = [("home", 0.0, 800.0), ("about", 800.0, 800.0), ("skills", 1600.0, 1000.0)]
            .iter()
            .map(|(id, top, height)| Section {
                id: id.to_string(),
                element: MemoryElement::new("section")
                    .with_attr("id", id)
                    .with_layout(*top, *height),
            })
            .collect();
        NavigationController::new(
            vec![link("home"), link("about"), link("skills")],
            sections,
            Some(MemoryElement::new("header").with_layout(0.0, 70.0)),
            100.0,
        )
    }

    fn active_links(c: &NavigationController<MemoryElement>) -> Vec<String> {
        c.links()
            .iter()
            .filter(|l| l.element.has_class("active"))
            .filter_map(|l| l.section.clone())
            .collect()
    }

    // ==================== Link Parsing Tests ====================

    #[test]
    fn test_from_element_reads_href_and_section() {
        let l = link("about");
        assert_eq!(l.target.as_deref(), Some("about"));
        assert_eq!(l.section.as_deref(), Some("about"));
    }

    #[test]
    fn test_external_href_has_no_target() {
        let l = NavLink::from_element(MemoryElement::new("a").with_attr("href", "https://x.dev"));
        assert!(l.target.is_none());
    }

    // ==================== Scroll Tests ====================

    #[test]
    fn test_probe_point_selects_section() {
        let c = controller();
        assert_eq!(c.section_at(0.0), Some("home"));
        assert_eq!(c.section_at(699.0), Some("home"));
        assert_eq!(c.section_at(700.0), Some("about"));
        assert_eq!(c.section_at(1500.0), Some("skills"));
    }

    #[test]
    fn test_on_scroll_highlights_single_link() {
        let c = controller();
        let mut active = None;
        c.on_scroll(&mut active, 900.0);

        assert_eq!(active.as_deref(), Some("about"));
        assert_eq!(active_links(&c), vec!["about".to_string()]);
    }

    #[test]
    fn test_no_match_keeps_previous_section() {
        let c = controller();
        let mut active = Some("skills".to_string());
        c.on_scroll(&mut active, 10_000.0);
        assert_eq!(active.as_deref(), Some("skills"));
    }

    #[test]
    fn test_overlapping_sections_first_wins() {
        let a = MemoryElement::new("section").with_layout(0.0, 1000.0);
        let b = MemoryElement::new("section").with_layout(500.0, 1000.0);
        let c = NavigationController::new(
            Vec::new(),
            vec![
                Section { id: "a".into(), element: a },
                Section { id: "b".into(), element: b },
            ],
            None,
            100.0,
        );
        assert_eq!(c.section_at(600.0), Some("a"));
    }

    // ==================== Click Tests ====================

    #[test]
    fn test_click_scrolls_below_header_and_marks_link() {
        let c = controller();
        let window = MemoryWindow::new(800.0, 4000.0);
        let mut active = Some("home".to_string());

        assert!(c.on_link_click(2, &mut active, &window, true));
        assert_eq!(window.scroll_requests(), vec![(1530.0, true)]);
        assert_eq!(active.as_deref(), Some("skills"));
        assert_eq!(active_links(&c), vec!["skills".to_string()]);
    }

    #[test]
    fn test_click_unknown_target_falls_through() {
        let c = NavigationController::new(vec![link("blog")], Vec::new(), None, 100.0);
        let window = MemoryWindow::new(800.0, 4000.0);
        let mut active = None;
        assert!(!c.on_link_click(0, &mut active, &window, true));
        assert!(!c.on_link_click(7, &mut active, &window, true));
        assert!(window.scroll_requests().is_empty());
    }

    #[test]
    fn test_click_without_motion_jumps() {
        let c = controller();
        let window = MemoryWindow::new(800.0, 4000.0);
        let mut active = None;
        assert!(c.on_link_click(1, &mut active, &window, false));
        assert_eq!(window.scroll_requests(), vec![(730.0, false)]);
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_active_section_contains_probe(scroll in 0.0f64..3000.0) {
            let c = controller();
            let mut active = None;
            c.on_scroll(&mut active, scroll);

            let highlighted = active_links(&c);
            prop_assert!(highlighted.len() <= 1);
            if let Some(id) = active {
                let section = c.sections.iter().find(|s| s.id == id).unwrap();
                let top = section.element.offset_top();
                let probe = scroll + 100.0;
                prop_assert!(probe >= top && probe < top + section.element.offset_height());
                prop_assert_eq!(highlighted, vec![id]);
            }
        }
    }
}
