use crate::animation::css_number;
use crate::config::{NavigationConfig, ParallaxConfig};
use crate::dom::{Element, ScrollSnapshot};

const PROGRESS_BAR_STYLES: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("height", "3px"),
    ("background", "linear-gradient(90deg, #c084fc, #a78bfa, #67e8f9)"),
    ("z-index", "9999"),
    ("width", "0%"),
    ("transition", "width 0.1s ease"),
];

/// Percentage of the scrollable distance covered at `scroll_top`, in [0, 100].
/// A page that does not scroll reports 0.
pub fn progress_percent(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Everything a scroll frame repaints apart from navigation: progress bar,
/// header and back-to-top state, and parallax offsets.
pub struct ScrollEffects<E> {
    progress_bar: Option<E>,
    header: Option<E>,
    back_to_top: Option<E>,
    profile_image: Option<E>,
    grid: Option<E>,
    navigation: NavigationConfig,
    parallax: ParallaxConfig,
}

impl<E: Element> ScrollEffects<E> {
    /// Creates the progress bar as the last child of `body`.
    pub fn new(
        body: Option<&E>,
        header: Option<E>,
        back_to_top: Option<E>,
        profile_image: Option<E>,
        grid: Option<E>,
        navigation: NavigationConfig,
        parallax: ParallaxConfig,
    ) -> Self {
        let progress_bar = body.and_then(|body| body.append_new("div"));
        if let Some(bar) = &progress_bar {
            bar.set_class_name("scroll-progress");
            for (property, value) in PROGRESS_BAR_STYLES {
                bar.set_style(property, value);
            }
        }
        Self {
            progress_bar,
            header,
            back_to_top,
            profile_image,
            grid,
            navigation,
            parallax,
        }
    }

    pub fn progress_bar(&self) -> Option<&E> {
        self.progress_bar.as_ref()
    }

    /// Vertical offset of the profile image for `scroll_y`.
    pub fn profile_offset(&self, scroll_y: f64) -> f64 {
        (scroll_y * self.parallax.profile_factor).min(self.parallax.profile_max_offset)
    }

    pub fn render(&self, snapshot: &ScrollSnapshot) {
        let y = snapshot.scroll_y;

        if let Some(bar) = &self.progress_bar {
            let percent = progress_percent(y, snapshot.document_height, snapshot.viewport_height);
            bar.set_style("width", &format!("{}%", css_number(percent)));
        }
        if let Some(header) = &self.header {
            header.toggle_class("scrolled", y > self.navigation.header_threshold);
        }
        if let Some(button) = &self.back_to_top {
            button.toggle_class("show", y > self.navigation.back_to_top_threshold);
        }
        if let Some(profile) = &self.profile_image {
            profile.set_style(
                "transform",
                &format!("translateY({}px)", css_number(self.profile_offset(y))),
            );
        }
        if let Some(grid) = &self.grid {
            grid.set_style(
                "transform",
                &format!("translateY({}px)", css_number(y * self.parallax.grid_factor)),
            );
        }
    }
}
