//! Platform seams between the controllers and the page.
//!
//! Controllers never reach for globals: they receive [`Element`] handles and
//! a [`Window`] when they are built. The browser implementations live in
//! `crate::web`; [`memory`] provides an in-memory tree used by tests and
//! headless runs.

pub mod memory;

/// A cloneable handle to one node of the page.
///
/// Cloning a handle never copies the node; two clones refer to the same
/// node. All operations are infallible: a browser error on a single node is
/// swallowed by the implementation, matching the "degrade, never throw"
/// handling of the page script.
pub trait Element: Clone + 'static {
    fn text(&self) -> String;
    fn set_text(&self, text: &str);

    fn inner_html(&self) -> String;
    fn set_inner_html(&self, html: &str);

    fn attr(&self, name: &str) -> Option<String>;
    fn set_attr(&self, name: &str, value: &str);
    fn remove_attr(&self, name: &str);

    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// Replace the whole class list.
    fn set_class_name(&self, class_name: &str);

    fn set_style(&self, property: &str, value: &str);

    /// Distance from the document top to the node's top edge (px).
    fn offset_top(&self) -> f64;
    /// Rendered height (px).
    fn offset_height(&self) -> f64;

    /// Whether `other` is this node or one of its descendants.
    fn contains(&self, other: &Self) -> bool;

    /// Create a new element in the same document and append it to this one.
    fn append_new(&self, tag: &str) -> Option<Self>;
    /// Detach this node from its parent.
    fn remove(&self);

    /// Current value of a form control. Non-controls report their `value`
    /// attribute.
    fn value(&self) -> String {
        self.attr("value").unwrap_or_default()
    }

    fn set_value(&self, value: &str) {
        self.set_attr("value", value);
    }

    /// Constraint validation as reported by the platform (`checkValidity`).
    /// `None` when the platform offers none for this node.
    fn native_validity(&self) -> Option<bool> {
        None
    }

    /// Descendants carrying at least one of `names`, in document order.
    fn find_by_attributes(&self, names: &[String]) -> Vec<Self>;

    fn toggle_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    fn set_disabled(&self, disabled: bool) {
        if disabled {
            self.set_attr("disabled", "");
        } else {
            self.remove_attr("disabled");
        }
    }

    fn is_disabled(&self) -> bool {
        self.attr("disabled").is_some()
    }
}

/// The browsing context: scroll geometry and the few global services the
/// page script uses.
pub trait Window {
    /// Vertical scroll offset (`scrollY`).
    fn scroll_y(&self) -> f64;
    /// Viewport height (`innerHeight`).
    fn inner_height(&self) -> f64;
    /// Full document height (`documentElement.scrollHeight`).
    fn document_height(&self) -> f64;
    /// Scroll the document to `top`, smoothly or instantly.
    fn scroll_to(&self, top: f64, smooth: bool);
    /// Show a blocking notification to the user.
    fn alert(&self, message: &str);
    /// Whether the user asked the platform to minimise motion.
    fn prefers_reduced_motion(&self) -> bool {
        false
    }
    /// Whether visibility is reported by a native intersection observer.
    /// When false the scroll dispatcher checks layout itself every frame.
    fn has_intersection_observer(&self) -> bool {
        false
    }
}

/// One read of the scroll geometry, taken once per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSnapshot {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollSnapshot {
    pub fn read(window: &dyn Window) -> Self {
        Self {
            scroll_y: window.scroll_y(),
            viewport_height: window.inner_height(),
            document_height: window.document_height(),
        }
    }
}

/// `parseInt`-style parse of a data attribute: optional sign, then leading
/// digits. No digits (including absence) is 0; out-of-range values saturate.
pub fn parse_leading_int(value: Option<&str>) -> i64 {
    let Some(value) = value else {
        return 0;
    };
    let value = value.trim_start();
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    digits
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0i64, |acc, digit| {
            let acc = acc.saturating_mul(10);
            if negative {
                acc.saturating_sub(i64::from(digit))
            } else {
                acc.saturating_add(i64::from(digit))
            }
        })
}
