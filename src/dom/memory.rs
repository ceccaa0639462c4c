//! In-memory page model.
//!
//! A minimal node tree with explicit layout boxes. It backs the test suite
//! and lets the whole application run headless: every controller behaves the
//! same against a [`MemoryElement`] as against a browser element.

use super::{Element, Window};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct Node {
    tag: String,
    text: String,
    html: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    top: f64,
    height: f64,
    validity: Option<bool>,
    parent: Weak<RefCell<Node>>,
    children: Vec<MemoryElement>,
}

/// Shared handle to an in-memory node.
#[derive(Debug, Clone)]
pub struct MemoryElement(Rc<RefCell<Node>>);

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        MemoryElement(Rc::new(RefCell::new(Node {
            tag: tag.to_string(),
            ..Node::default()
        })))
    }

    /// Builder: set an attribute.
    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: add a class.
    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Builder: set the text content.
    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Builder: place the node at `top` with `height` in document space.
    pub fn with_layout(self, top: f64, height: f64) -> Self {
        self.set_layout(top, height);
        self
    }

    pub fn set_layout(&self, top: f64, height: f64) {
        let mut node = self.0.borrow_mut();
        node.top = top;
        node.height = height;
    }

    /// Force the result of [`Element::native_validity`].
    pub fn set_native_validity(&self, valid: bool) {
        self.0.borrow_mut().validity = Some(valid);
    }

    /// Append an existing node as the last child.
    pub fn append(&self, child: &MemoryElement) {
        child.remove();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
    }

    pub fn children(&self) -> Vec<MemoryElement> {
        self.0.borrow().children.clone()
    }

    pub fn parent(&self) -> Option<MemoryElement> {
        self.0.borrow().parent.upgrade().map(MemoryElement)
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    /// Markup of this node including its own tag.
    pub fn outer_html(&self) -> String {
        let (tag, attrs) = {
            let node = self.0.borrow();
            let mut attrs = String::new();
            if !node.classes.is_empty() {
                attrs.push_str(&format!(r#" class="{}""#, node.classes.join(" ")));
            }
            for (name, value) in &node.attrs {
                attrs.push_str(&format!(r#" {}="{}""#, name, value));
            }
            (node.tag.clone(), attrs)
        };
        format!("<{}{}>{}</{}>", tag, attrs, self.inner_html(), tag)
    }
}

fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

impl Element for MemoryElement {
    fn text(&self) -> String {
        let node = self.0.borrow();
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&child.text());
        }
        text
    }

    fn set_text(&self, text: &str) {
        let mut node = self.0.borrow_mut();
        node.text = text.to_string();
        node.html = text.to_string();
        node.children.clear();
    }

    fn inner_html(&self) -> String {
        let node = self.0.borrow();
        if node.children.is_empty() {
            return node.html.clone();
        }
        let mut html = node.html.clone();
        for child in &node.children {
            html.push_str(&child.outer_html());
        }
        html
    }

    fn set_inner_html(&self, html: &str) {
        let mut node = self.0.borrow_mut();
        node.html = html.to_string();
        node.text = strip_tags(html);
        node.children.clear();
    }

    fn attr(&self, name: &str) -> Option<String> {
        let node = self.0.borrow();
        if name == "class" {
            return (!node.classes.is_empty()).then(|| node.classes.join(" "));
        }
        node.attrs.get(name).cloned()
    }

    fn set_attr(&self, name: &str, value: &str) {
        if name == "class" {
            self.set_class_name(value);
            return;
        }
        self.0
            .borrow_mut()
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attr(&self, name: &str) {
        if name == "class" {
            self.0.borrow_mut().classes.clear();
            return;
        }
        self.0.borrow_mut().attrs.remove(name);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn set_class_name(&self, class_name: &str) {
        self.0.borrow_mut().classes = class_name
            .split_whitespace()
            .map(str::to_string)
            .collect();
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn offset_top(&self) -> f64 {
        self.0.borrow().top
    }

    fn offset_height(&self) -> f64 {
        self.0.borrow().height
    }

    fn contains(&self, other: &Self) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node == *self {
                return true;
            }
            current = node.parent();
        }
        false
    }

    fn append_new(&self, tag: &str) -> Option<Self> {
        let child = MemoryElement::new(tag);
        self.append(&child);
        Some(child)
    }

    fn remove(&self) {
        let parent = self.0.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent
                .borrow_mut()
                .children
                .retain(|c| !Rc::ptr_eq(&c.0, &self.0));
        }
        self.0.borrow_mut().parent = Weak::new();
    }

    fn native_validity(&self) -> Option<bool> {
        self.0.borrow().validity
    }

    fn find_by_attributes(&self, names: &[String]) -> Vec<Self> {
        let mut found = Vec::new();
        for child in self.children() {
            let carries = {
                let node = child.0.borrow();
                names.iter().any(|name| node.attrs.contains_key(name))
            };
            if carries {
                found.push(child.clone());
            }
            found.extend(child.find_by_attributes(names));
        }
        found
    }
}

/// In-memory browsing context with observable side effects.
#[derive(Debug)]
pub struct MemoryWindow {
    scroll_y: Cell<f64>,
    inner_height: Cell<f64>,
    document_height: Cell<f64>,
    reduced_motion: Cell<bool>,
    layout_reads: Cell<usize>,
    alerts: RefCell<Vec<String>>,
    scroll_requests: RefCell<Vec<(f64, bool)>>,
}

impl MemoryWindow {
    pub fn new(inner_height: f64, document_height: f64) -> Self {
        Self {
            scroll_y: Cell::new(0.0),
            inner_height: Cell::new(inner_height),
            document_height: Cell::new(document_height),
            reduced_motion: Cell::new(false),
            layout_reads: Cell::new(0),
            alerts: RefCell::new(Vec::new()),
            scroll_requests: RefCell::new(Vec::new()),
        }
    }

    /// Move the viewport as a user scroll would (no clamping).
    pub fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(y);
    }

    pub fn set_reduced_motion(&self, reduced: bool) {
        self.reduced_motion.set(reduced);
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    /// Every `scroll_to` call as `(top, smooth)`.
    pub fn scroll_requests(&self) -> Vec<(f64, bool)> {
        self.scroll_requests.borrow().clone()
    }

    /// Number of times the scroll offset has been read.
    pub fn layout_reads(&self) -> usize {
        self.layout_reads.get()
    }
}

impl Window for MemoryWindow {
    fn scroll_y(&self) -> f64 {
        self.layout_reads.set(self.layout_reads.get() + 1);
        self.scroll_y.get()
    }

    fn inner_height(&self) -> f64 {
        self.inner_height.get()
    }

    fn document_height(&self) -> f64 {
        self.document_height.get()
    }

    fn scroll_to(&self, top: f64, smooth: bool) {
        self.scroll_requests.borrow_mut().push((top, smooth));
        let max = (self.document_height.get() - self.inner_height.get()).max(0.0);
        self.scroll_y.set(top.clamp(0.0, max));
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Element Tests ====================

    #[test]
    fn test_classes_and_class_attr_agree() {
        let el = MemoryElement::new("div").with_class("a");
        el.add_class("b");
        el.add_class("a");
        assert_eq!(el.attr("class").as_deref(), Some("a b"));

        el.set_attr("class", "form-status success");
        assert!(el.has_class("success"));
        assert!(!el.has_class("a"));
    }

    #[test]
    fn test_toggle_class() {
        let el = MemoryElement::new("nav");
        el.toggle_class("active", true);
        assert!(el.has_class("active"));
        el.toggle_class("active", false);
        assert!(!el.has_class("active"));
    }

    #[test]
    fn test_inner_html_updates_text() {
        let el = MemoryElement::new("button");
        el.set_inner_html("<i class=\"fas\"></i> <span>Send</span>");
        assert_eq!(el.text(), " Send");
        assert!(el.inner_html().contains("<span>"));
    }

    #[test]
    fn test_contains_walks_ancestors() {
        let menu = MemoryElement::new("ul");
        let item = MemoryElement::new("li");
        let link = MemoryElement::new("a");
        menu.append(&item);
        item.append(&link);
        let outsider = MemoryElement::new("p");

        assert!(menu.contains(&menu));
        assert!(menu.contains(&link));
        assert!(!menu.contains(&outsider));
        assert!(!link.contains(&menu));
    }

    #[test]
    fn test_append_new_and_remove() {
        let parent = MemoryElement::new("div");
        let child = parent.append_new("span").expect("Should create");
        child.set_text("|");
        assert_eq!(parent.children().len(), 1);
        assert_eq!(parent.text(), "|");

        child.remove();
        assert!(parent.children().is_empty());
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_disabled_round_trip() {
        let button = MemoryElement::new("button");
        assert!(!button.is_disabled());
        button.set_disabled(true);
        assert!(button.is_disabled());
        button.set_disabled(false);
        assert!(!button.is_disabled());
    }

    #[test]
    fn test_value_and_validity() {
        let input = MemoryElement::new("input");
        input.set_value("hello");
        assert_eq!(input.value(), "hello");
        assert_eq!(input.native_validity(), None);
        input.set_native_validity(false);
        assert_eq!(input.native_validity(), Some(false));
    }

    #[test]
    fn test_find_by_attributes_walks_descendants_in_order() {
        let root = MemoryElement::new("html");
        let english = MemoryElement::new("h2").with_attr("data-text-en", "Skills");
        let section = MemoryElement::new("section");
        let hindi_only = MemoryElement::new("p").with_attr("data-text-hi", "कौशल");
        let plain = MemoryElement::new("p");
        root.append(&english);
        root.append(&section);
        section.append(&hindi_only);
        section.append(&plain);

        let names = vec!["data-text-en".to_string(), "data-text-hi".to_string()];
        assert_eq!(root.find_by_attributes(&names), vec![english, hindi_only]);
    }

    #[test]
    fn test_inner_html_serializes_appended_children() {
        let button = MemoryElement::new("button");
        let span = button.append_new("span").expect("Should create");
        span.set_attr("data-text-en", "Sending...");
        span.set_text("Sending...");

        assert_eq!(
            button.inner_html(),
            r#"<span data-text-en="Sending...">Sending...</span>"#
        );
    }

    // ==================== Window Tests ====================

    #[test]
    fn test_scroll_to_clamps_and_records() {
        let window = MemoryWindow::new(800.0, 3000.0);
        window.scroll_to(5000.0, true);
        assert_eq!(window.scroll_y(), 2200.0);
        window.scroll_to(-10.0, false);
        assert_eq!(window.scroll_y(), 0.0);
        assert_eq!(window.scroll_requests(), vec![(5000.0, true), (-10.0, false)]);
    }

    #[test]
    fn test_layout_reads_counted() {
        let window = MemoryWindow::new(800.0, 3000.0);
        window.scroll_y();
        window.scroll_y();
        assert_eq!(window.layout_reads(), 2);
    }
}
