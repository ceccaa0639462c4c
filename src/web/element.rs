use crate::dom::{Element, Window};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, HtmlInputElement, HtmlTextAreaElement, ScrollBehavior, ScrollToOptions};

fn log_failure(result: Result<(), JsValue>, what: &str) {
    if let Err(e) = result {
        debug!("DOM call {} failed: {:?}", what, e);
    }
}

/// A live DOM element.
#[derive(Debug, Clone, PartialEq)]
pub struct WebElement(web_sys::Element);

impl WebElement {
    pub fn new(element: web_sys::Element) -> Self {
        Self(element)
    }

    pub fn inner(&self) -> &web_sys::Element {
        &self.0
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.0.dyn_ref::<HtmlElement>()
    }
}

impl Element for WebElement {
    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attr(&self, name: &str, value: &str) {
        log_failure(self.0.set_attribute(name, value), "setAttribute");
    }

    fn remove_attr(&self, name: &str) {
        log_failure(self.0.remove_attribute(name), "removeAttribute");
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        log_failure(self.0.class_list().add_1(class), "classList.add");
    }

    fn remove_class(&self, class: &str) {
        log_failure(self.0.class_list().remove_1(class), "classList.remove");
    }

    fn set_class_name(&self, class_name: &str) {
        self.0.set_class_name(class_name);
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(html) = self.html() {
            log_failure(html.style().set_property(property, value), "style.setProperty");
        }
    }

    fn offset_top(&self) -> f64 {
        self.html().map(|h| h.offset_top() as f64).unwrap_or(0.0)
    }

    fn offset_height(&self) -> f64 {
        self.html().map(|h| h.offset_height() as f64).unwrap_or(0.0)
    }

    fn contains(&self, other: &Self) -> bool {
        let node: &web_sys::Node = &other.0;
        self.0.contains(Some(node))
    }

    fn append_new(&self, tag: &str) -> Option<Self> {
        let document = self.0.owner_document()?;
        let child = document.create_element(tag).ok()?;
        self.0.append_child(&child).ok()?;
        Some(Self(child))
    }

    fn remove(&self) {
        self.0.remove();
    }

    fn value(&self) -> String {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            return input.value();
        }
        if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            return area.value();
        }
        self.attr("value").unwrap_or_default()
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else {
            self.set_attr("value", value);
        }
    }

    fn native_validity(&self) -> Option<bool> {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            return Some(input.check_validity());
        }
        self.0
            .dyn_ref::<HtmlTextAreaElement>()
            .map(|area| area.check_validity())
    }

    fn find_by_attributes(&self, names: &[String]) -> Vec<Self> {
        if names.is_empty() {
            return Vec::new();
        }
        let selector = names
            .iter()
            .map(|name| format!("[{}]", name))
            .collect::<Vec<_>>()
            .join(", ");
        let list = match self.0.query_selector_all(&selector) {
            Ok(list) => list,
            Err(e) => {
                debug!("querySelectorAll({}) failed: {:?}", selector, e);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(Self)
            .collect()
    }
}

/// The page's `window`.
#[derive(Debug, Clone)]
pub struct BrowserWindow(web_sys::Window);

impl BrowserWindow {
    pub fn new(window: web_sys::Window) -> Self {
        Self(window)
    }
}

impl Window for BrowserWindow {
    fn scroll_y(&self) -> f64 {
        self.0.scroll_y().unwrap_or(0.0)
    }

    fn inner_height(&self) -> f64 {
        self.0
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn document_height(&self) -> f64 {
        self.0
            .document()
            .and_then(|d| d.document_element())
            .map(|root| root.scroll_height() as f64)
            .unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64, smooth: bool) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        });
        self.0.scroll_to_with_scroll_to_options(&options);
    }

    fn alert(&self, message: &str) {
        log_failure(self.0.alert_with_message(message), "alert");
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.0
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false)
    }

    fn has_intersection_observer(&self) -> bool {
        js_sys::Reflect::has(&self.0, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
    }
}
