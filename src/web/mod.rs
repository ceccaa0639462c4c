//! Browser front end: gathers the page, builds the [`App`] and forwards DOM
//! events to it.

mod element;
mod platform;

pub use element::{BrowserWindow, WebElement};
pub use platform::{BrowserScheduler, LocalStore};

use crate::animation::intro::{HeroHandles, LoaderHandles};
use crate::animation::metrics::SkillMeter;
use crate::app::{dispatch_scroll, select_animator, submit_contact, App, Services};
use crate::config::Config;
use crate::controller::ContactField;
use crate::dom::Window;
use crate::logging;
use crate::page::{selectors, PageHandles};
use crate::relay::{EmailJsRelay, EmailRelay};
use crate::schedule::Scheduler;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent,
};

const CONFIG_ELEMENT_ID: &str = "portfolio-config";

type SharedApp = Rc<RefCell<App<WebElement>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init().map_err(|e| JsValue::from_str(&e.to_string()))?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    if document.ready_state() == "loading" {
        let target: &EventTarget = &document;
        listen(target, "DOMContentLoaded", move |_| {
            if let Err(e) = boot(window.clone()) {
                error!("Portfolio boot failed: {:?}", e);
            }
        })
    } else {
        boot(window)
    }
}

fn boot(window: web_sys::Window) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    let config = read_config(&document);
    let page = collect_page(&document);

    let nav_links = page.nav_links.clone();
    let inputs: Vec<WebElement> = page.contact_fields.iter().map(|f| f.input.clone()).collect();
    let profile = page.hero.profile_image.clone();
    let menu_button = page.menu_button.clone();
    let back_to_top = page.back_to_top.clone();

    let browser: Rc<dyn Window> = Rc::new(BrowserWindow::new(window.clone()));
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new(window.clone()));
    let services = Services {
        animator: select_animator(&config.animation, browser.as_ref(), Rc::clone(&scheduler)),
        window: browser,
        scheduler,
        store: Rc::new(LocalStore::new(&window)),
    };
    let relay: Rc<dyn EmailRelay> = Rc::new(EmailJsRelay::new(config.relay.clone()));

    let app: SharedApp = Rc::new(RefCell::new(App::new(page, config, services)));
    app.borrow_mut().init();
    app.borrow().spawn_particles(&mut rand::thread_rng());

    // Preferences
    if let Some(toggle) = query(&document, selectors::LANGUAGE_TOGGLE) {
        let app = Rc::clone(&app);
        listen(toggle.inner(), "click", move |_| {
            app.borrow_mut().toggle_language();
        })?;
    }
    if let Some(toggle) = query(&document, selectors::THEME_TOGGLE) {
        let app = Rc::clone(&app);
        listen(toggle.inner(), "click", move |_| {
            app.borrow_mut().toggle_theme();
        })?;
    }

    // Navigation and menu
    for (i, link) in nav_links.iter().enumerate() {
        let app = Rc::clone(&app);
        listen(link.inner(), "click", move |event| {
            if app.borrow_mut().nav_click(i) {
                event.prevent_default();
            }
        })?;
    }
    if let Some(button) = menu_button {
        let app = Rc::clone(&app);
        listen(button.inner(), "click", move |_| app.borrow_mut().menu_toggle_click())?;
    }
    {
        let app = Rc::clone(&app);
        listen(&document, "click", move |event| {
            let target = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok());
            if let Some(target) = target {
                app.borrow_mut().document_click(&WebElement::new(target));
            }
        })?;
    }
    {
        let app = Rc::clone(&app);
        listen(&document, "keydown", move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|e| e.key()) {
                app.borrow_mut().key_down(&key);
            }
        })?;
    }
    if let Some(button) = back_to_top {
        let app = Rc::clone(&app);
        listen(button.inner(), "click", move |_| app.borrow().back_to_top_click())?;
    }

    // Scroll
    {
        let app = Rc::clone(&app);
        listen(&window, "scroll", move |_| dispatch_scroll(&app))?;
    }

    // Contact form
    for (i, input) in inputs.iter().enumerate() {
        for event in ["input", "blur"] {
            let app = Rc::clone(&app);
            listen(input.inner(), event, move |_| {
                app.borrow().field_changed(i);
            })?;
        }
    }
    if let Some(form) = query(&document, selectors::CONTACT_FORM) {
        let app = Rc::clone(&app);
        listen(form.inner(), "submit", move |event| {
            event.prevent_default();
            let app = Rc::clone(&app);
            let relay = Rc::clone(&relay);
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(blocked) = submit_contact(app, relay).await {
                    debug!("Contact form not sent: {}", blocked);
                }
            });
        })?;
    }

    // Hover
    if let Some(profile) = profile {
        for (event, entering) in [("mouseenter", true), ("mouseleave", false)] {
            let app = Rc::clone(&app);
            listen(profile.inner(), event, move |_| app.borrow().profile_hover(entering))?;
        }
    }
    let hover_targets = app.borrow().hover_targets();
    for (i, card) in hover_targets.iter().enumerate() {
        for (event, entering) in [("mouseenter", true), ("mouseleave", false)] {
            let app = Rc::clone(&app);
            listen(card.inner(), event, move |_| app.borrow().card_hover(i, entering))?;
        }
    }

    // Visibility
    if app.borrow().services().window.has_intersection_observer() {
        observe_reveals(&app)?;
    } else {
        warn!("IntersectionObserver unavailable, reveals follow scroll frames");
    }

    // Page load
    if document.ready_state() == "complete" {
        app.borrow_mut().start_intro(StdRng::from_entropy());
    } else {
        let app = Rc::clone(&app);
        listen(&window, "load", move |_| {
            app.borrow_mut().start_intro(StdRng::from_entropy());
        })?;
    }

    info!("Portfolio script ready");
    Ok(())
}

/// Attach `handler` for the life of the page.
fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// One observer per watch, dropped from observation once it fires.
fn observe_reveals(app: &SharedApp) -> Result<(), JsValue> {
    let pending = app.borrow().pending_reveals();
    for (key, element, options) in pending {
        let app = Rc::clone(app);
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        observer.unobserve(&entry.target());
                        app.borrow_mut().reveal_triggered(key);
                    }
                }
            },
        ));

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin());
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        observer.observe(element.inner());
        callback.forget();
    }
    Ok(())
}

/// Configuration embedded in the page, or defaults.
fn read_config(document: &Document) -> Config {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return Config::default();
    };

    match Config::from_json(&text) {
        Ok(config) => {
            info!("Loaded embedded configuration");
            config
        }
        Err(e) => {
            warn!("Ignoring embedded configuration: {:#}", e);
            Config::default()
        }
    }
}

// ==================== Page Collection ====================

fn query(document: &Document, selector: &str) -> Option<WebElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .map(WebElement::new)
}

fn query_all(document: &Document, selector: &str) -> Vec<WebElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .map(WebElement::new)
        .collect()
}

fn within(parent: &WebElement, selector: &str) -> Option<WebElement> {
    parent
        .inner()
        .query_selector(selector)
        .ok()
        .flatten()
        .map(WebElement::new)
}

fn field_name(input: &WebElement) -> &'static str {
    match input.inner().get_attribute("name").as_deref() {
        Some("name") => "name",
        Some("email") => "email",
        Some("subject") => "subject",
        Some("message") => "message",
        _ => "other",
    }
}

fn contact_fields(document: &Document) -> Vec<ContactField<WebElement>> {
    query_all(document, selectors::FORM_INPUTS)
        .into_iter()
        .map(|input| {
            let error = input
                .inner()
                .parent_element()
                .and_then(|parent| parent.query_selector(selectors::FORM_ERROR).ok().flatten())
                .map(WebElement::new);
            ContactField::new(field_name(&input), input, error)
        })
        .collect()
}

fn collect_page(document: &Document) -> PageHandles<WebElement> {
    let loader = match (
        query(document, selectors::LOADER),
        query(document, selectors::LOADER_BAR),
        query(document, selectors::LOADER_PERCENTAGE),
    ) {
        (Some(overlay), Some(bar), Some(percentage)) => Some(LoaderHandles {
            overlay,
            bar,
            percentage,
        }),
        _ => {
            debug!("Loader elements not found");
            None
        }
    };

    let skills = query_all(document, selectors::SKILL_ITEMS)
        .into_iter()
        .map(|item| SkillMeter {
            bar: within(&item, selectors::SKILL_BAR),
            label: within(&item, selectors::SKILL_LABEL),
            item,
        })
        .collect();

    let content_sections = query_all(document, selectors::CONTENT_SECTIONS)
        .into_iter()
        .map(|section| {
            let header = within(&section, selectors::SECTION_HEADER);
            (section, header)
        })
        .collect();

    PageHandles {
        root: document.document_element().map(WebElement::new),
        body: document.body().map(|body| WebElement::new(body.into())),
        language_label: query(document, selectors::LANGUAGE_LABEL),
        theme_icon: query(document, selectors::THEME_ICON),
        nav_links: query_all(document, selectors::NAV_LINKS),
        sections: query_all(document, selectors::SECTIONS),
        header: query(document, selectors::HEADER),
        menu_panel: query(document, selectors::MENU_PANEL),
        menu_button: query(document, selectors::MENU_BUTTON),
        back_to_top: query(document, selectors::BACK_TO_TOP),
        contact_fields: contact_fields(document),
        submit_button: query(document, selectors::SUBMIT_BUTTON),
        form_status: query(document, selectors::FORM_STATUS),
        loader,
        hero: HeroHandles {
            name: query(document, selectors::HERO_NAME),
            title: query(document, selectors::HERO_TITLE),
            description: query(document, selectors::HERO_DESCRIPTION),
            buttons: query_all(document, selectors::HERO_BUTTONS),
            social_icons: query_all(document, selectors::HERO_SOCIAL),
            profile_image: query(document, selectors::PROFILE_IMAGE),
            badges: query_all(document, selectors::BADGES),
        },
        skills,
        stats: query_all(document, selectors::STATS),
        timeline_items: query_all(document, selectors::TIMELINE_ITEMS),
        project_cards: query_all(document, selectors::PROJECT_CARDS),
        content_sections,
        cards: query_all(document, selectors::CARDS),
        contact_items: query_all(document, selectors::CONTACT_ITEMS),
        fade_ins: query_all(document, selectors::FADE_INS),
        grid: query(document, selectors::GRID),
        particles: query(document, selectors::PARTICLES),
    }
}
