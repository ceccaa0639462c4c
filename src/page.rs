//! The element handles the script works with, gathered once at startup.
//!
//! The browser front end fills a [`PageHandles`] by querying the selectors
//! below; tests build one by hand from in-memory elements. Anything absent
//! stays `None` or empty and the matching behavior is skipped.

use crate::animation::intro::{HeroHandles, LoaderHandles};
use crate::animation::metrics::SkillMeter;
use crate::controller::ContactField;

pub mod selectors {
    pub const LANGUAGE_TOGGLE: &str = "#langToggle";
    pub const LANGUAGE_LABEL: &str = "#langToggle .lang-text";
    pub const THEME_TOGGLE: &str = "#themeToggle";
    pub const THEME_ICON: &str = "#themeToggle i";

    pub const NAV_LINKS: &str = ".nav-link[href^=\"#\"]";
    pub const SECTIONS: &str = "section[id]";
    pub const HEADER: &str = ".main-header";
    pub const MENU_PANEL: &str = "#navMenu";
    pub const MENU_BUTTON: &str = "#menuToggle";
    pub const BACK_TO_TOP: &str = "#backToTop";

    pub const CONTACT_FORM: &str = "#contactForm";
    pub const FORM_INPUTS: &str = "#contactForm .form-input";
    pub const FORM_ERROR: &str = ".form-error";
    pub const SUBMIT_BUTTON: &str = "#contactForm .btn-submit";
    pub const FORM_STATUS: &str = "#formStatus";

    pub const LOADER: &str = "#loader";
    pub const LOADER_BAR: &str = "#loaderProgress";
    pub const LOADER_PERCENTAGE: &str = "#loaderPercentage";

    pub const HERO_NAME: &str = "#heroName .name-value";
    pub const HERO_TITLE: &str = ".hero-title";
    pub const HERO_DESCRIPTION: &str = ".hero-description";
    pub const HERO_BUTTONS: &str = ".hero-buttons .btn";
    pub const HERO_SOCIAL: &str = ".hero-social .social-icon";
    pub const PROFILE_IMAGE: &str = "#profileImage";
    pub const BADGES: &str = ".floating-badge";

    pub const SKILL_ITEMS: &str = "#skills .skill-item";
    pub const SKILL_BAR: &str = ".skill-progress";
    pub const SKILL_LABEL: &str = ".skill-percent";
    pub const STATS: &str = ".stat-number";
    pub const TIMELINE_ITEMS: &str = ".timeline-item";
    pub const PROJECT_CARDS: &str = ".project-card";
    pub const CONTENT_SECTIONS: &str = ".section";
    pub const SECTION_HEADER: &str = ".section-header";
    pub const CARDS: &str = ".card, .project-card, .contact-item";
    pub const CONTACT_ITEMS: &str = ".contact-item";
    pub const FADE_INS: &str = ".fade-in";

    pub const GRID: &str = ".code-grid-bg";
    pub const PARTICLES: &str = "#particles";
}

#[derive(Debug, Clone)]
pub struct PageHandles<E> {
    /// `<html>`
    pub root: Option<E>,
    pub body: Option<E>,
    pub language_label: Option<E>,
    pub theme_icon: Option<E>,

    pub nav_links: Vec<E>,
    /// `section[id]`, in document order
    pub sections: Vec<E>,
    pub header: Option<E>,
    pub menu_panel: Option<E>,
    pub menu_button: Option<E>,
    pub back_to_top: Option<E>,

    pub contact_fields: Vec<ContactField<E>>,
    pub submit_button: Option<E>,
    pub form_status: Option<E>,

    pub loader: Option<LoaderHandles<E>>,
    pub hero: HeroHandles<E>,

    pub skills: Vec<SkillMeter<E>>,
    pub stats: Vec<E>,
    pub timeline_items: Vec<E>,
    pub project_cards: Vec<E>,
    /// `.section` blocks with their `.section-header`
    pub content_sections: Vec<(E, Option<E>)>,
    /// `.card, .project-card, .contact-item`, in document order
    pub cards: Vec<E>,
    pub contact_items: Vec<E>,
    pub fade_ins: Vec<E>,

    pub grid: Option<E>,
    pub particles: Option<E>,
}

impl<E> Default for PageHandles<E> {
    fn default() -> Self {
        Self {
            root: None,
            body: None,
            language_label: None,
            theme_icon: None,
            nav_links: Vec::new(),
            sections: Vec::new(),
            header: None,
            menu_panel: None,
            menu_button: None,
            back_to_top: None,
            contact_fields: Vec::new(),
            submit_button: None,
            form_status: None,
            loader: None,
            hero: HeroHandles::default(),
            skills: Vec::new(),
            stats: Vec::new(),
            timeline_items: Vec::new(),
            project_cards: Vec::new(),
            content_sections: Vec::new(),
            cards: Vec::new(),
            contact_items: Vec::new(),
            fade_ins: Vec::new(),
            grid: None,
            particles: None,
        }
    }
}
