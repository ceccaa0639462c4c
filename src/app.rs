//! The coordinator: owns the application state and every controller, and
//! exposes one entry point per page event.
//!
//! Platform front ends (the browser bindings, or a test harness) translate
//! raw events into calls on [`App`]. Scroll events go through
//! [`dispatch_scroll`] so that any burst of them costs one layout read per
//! frame.

use crate::animation::intro::{self, HeroHandles, Loader};
use crate::animation::metrics::StatCounter;
use crate::animation::reveal::{RevealOptions, RevealWatcher};
use crate::animation::{Animator, Easing, FrameAnimator, InstantAnimator, Motion, Stagger, Timing};
use crate::config::{AnimationConfig, Config};
use crate::controller::form::PendingSubmit;
use crate::controller::navigation::{NavLink, Section};
use crate::controller::{
    FormController, LanguageController, MenuController, NavigationController, ScrollEffects,
    ThemeController,
};
use crate::dom::{Element, ScrollSnapshot, Window};
use crate::error::{RelayError, SubmitBlocked};
use crate::i18n::{Language, LanguageStrings};
use crate::page::PageHandles;
use crate::particles;
use crate::prefs::PreferenceStore;
use crate::relay::EmailRelay;
use crate::schedule::Scheduler;
use crate::state::{AppState, Preferences, Theme};
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

const PROJECT_HOVER_MS: u64 = 300;
const CONTACT_HOVER_MS: u64 = 200;
const FADE_IN_THRESHOLD: f64 = 0.1;
const FADE_IN_MARGIN: f64 = 100.0;
const METRIC_THRESHOLD: f64 = 0.5;

/// Platform services shared by every controller.
pub struct Services<E: Element> {
    pub window: Rc<dyn Window>,
    pub scheduler: Rc<dyn Scheduler>,
    pub store: Rc<dyn PreferenceStore>,
    pub animator: Rc<dyn Animator<E>>,
}

impl<E: Element> Clone for Services<E> {
    fn clone(&self) -> Self {
        Self {
            window: Rc::clone(&self.window),
            scheduler: Rc::clone(&self.scheduler),
            store: Rc::clone(&self.store),
            animator: Rc::clone(&self.animator),
        }
    }
}

/// Pick the animation engine once at startup: frame-driven tweens, unless
/// motion is switched off or the user prefers reduced motion.
pub fn select_animator<E: Element>(
    config: &AnimationConfig,
    window: &dyn Window,
    scheduler: Rc<dyn Scheduler>,
) -> Rc<dyn Animator<E>> {
    if !config.enabled {
        info!("Animations disabled by configuration");
        return Rc::new(InstantAnimator);
    }
    if config.respect_reduced_motion && window.prefers_reduced_motion() {
        info!("Reduced motion requested, animations land instantly");
        return Rc::new(InstantAnimator);
    }
    Rc::new(FrameAnimator::new(scheduler))
}

pub struct App<E: Element> {
    config: Config,
    state: AppState,
    services: Services<E>,

    language: LanguageController<E>,
    theme: ThemeController<E>,
    navigation: NavigationController<E>,
    menu: MenuController<E>,
    form: FormController<E>,
    scroll: ScrollEffects<E>,
    reveals: RevealWatcher<E>,

    loader: Option<Rc<RefCell<Loader<E>>>>,
    hero: HeroHandles<E>,
    hover_cards: Vec<(E, u64)>,
    particles: Option<E>,
}

impl<E: Element> App<E> {
    /// Build every controller from `page`. Nothing is rendered until
    /// [`App::init`].
    pub fn new(page: PageHandles<E>, config: Config, services: Services<E>) -> Self {
        let mut reveals = RevealWatcher::new();
        register_reveals(&mut reveals, &page, &services.animator);

        let sections = page
            .sections
            .iter()
            .filter_map(|element| {
                let id = element.attr("id").filter(|id| !id.is_empty())?;
                Some(Section {
                    id,
                    element: element.clone(),
                })
            })
            .collect();
        let links = page.nav_links.into_iter().map(NavLink::from_element).collect();
        let navigation = NavigationController::new(
            links,
            sections,
            page.header.clone(),
            config.navigation.probe_offset,
        );

        let scroll = ScrollEffects::new(
            page.body.as_ref(),
            page.header,
            page.back_to_top,
            page.hero.profile_image.clone(),
            page.grid,
            config.navigation.clone(),
            config.parallax.clone(),
        );

        let hover_cards = page
            .project_cards
            .into_iter()
            .map(|card| (card, PROJECT_HOVER_MS))
            .chain(
                page.contact_items
                    .into_iter()
                    .map(|item| (item, CONTACT_HOVER_MS)),
            )
            .collect();

        let loader = page
            .loader
            .map(|handles| Rc::new(RefCell::new(Loader::new(handles, config.loader.clone()))));

        Self {
            theme: ThemeController::new(page.body.clone(), page.theme_icon),
            language: LanguageController::new(page.root, page.body, page.language_label),
            navigation,
            menu: MenuController::new(page.menu_panel, page.menu_button),
            form: FormController::new(page.contact_fields, page.submit_button, page.form_status),
            scroll,
            reveals,
            loader,
            hero: page.hero,
            hover_cards,
            particles: page.particles,
            config,
            state: AppState::default(),
            services,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn services(&self) -> &Services<E> {
        &self.services
    }

    /// Load preferences and bring the page in line with them.
    pub fn init(&mut self) {
        let preferences = Preferences::load(self.services.store.as_ref());
        self.state.preferences = preferences;

        self.language.apply(preferences.language);
        self.theme.apply(preferences.theme);
        self.menu
            .init(LanguageStrings::for_language(preferences.language).menu_toggle_label);

        self.state.ui.active_section = self.navigation.first_section().map(str::to_string);
        if let Some(id) = &self.state.ui.active_section {
            self.navigation.highlight_section(id);
        }
        self.render_scroll();

        info!(
            "Portfolio initialised: language={}, theme={}, {} reveal(s) watched",
            preferences.language,
            preferences.theme,
            self.reveals.len()
        );
    }

    // ==================== Preferences ====================

    pub fn toggle_language(&mut self) -> Language {
        let language = self.language.toggle(
            &mut self.state.preferences.language,
            self.services.store.as_ref(),
        );
        self.menu
            .set_label(LanguageStrings::for_language(language).menu_toggle_label);
        language
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme
            .toggle(&mut self.state.preferences.theme, self.services.store.as_ref())
    }

    // ==================== Navigation & Menu ====================

    /// Click on navigation link `index`. Returns true when the click was
    /// handled and the default navigation must be suppressed.
    pub fn nav_click(&mut self, index: usize) -> bool {
        let smooth = self.services.animator.is_enabled();
        let handled = self.navigation.on_link_click(
            index,
            &mut self.state.ui.active_section,
            self.services.window.as_ref(),
            smooth,
        );
        if handled {
            self.menu.close(&mut self.state.ui.menu_open);
        }
        handled
    }

    pub fn menu_toggle_click(&mut self) {
        self.menu.toggle(&mut self.state.ui.menu_open);
    }

    pub fn document_click(&mut self, target: &E) {
        self.menu
            .on_document_click(target, &mut self.state.ui.menu_open);
    }

    pub fn key_down(&mut self, key: &str) {
        self.menu.on_key(key, &mut self.state.ui.menu_open);
    }

    pub fn back_to_top_click(&self) {
        self.services
            .window
            .scroll_to(0.0, self.services.animator.is_enabled());
    }

    // ==================== Scroll ====================

    /// One frame's worth of scroll work from a single layout read.
    pub fn render_scroll(&mut self) {
        let window = Rc::clone(&self.services.window);
        let snapshot = ScrollSnapshot::read(window.as_ref());

        self.navigation
            .on_scroll(&mut self.state.ui.active_section, snapshot.scroll_y);
        self.scroll.render(&snapshot);

        if !window.has_intersection_observer() {
            self.reveals
                .check_layout(snapshot.scroll_y, snapshot.viewport_height);
        }
    }

    /// Watches that have not fired yet, for registering native observers.
    pub fn pending_reveals(&self) -> Vec<(usize, E, RevealOptions)> {
        self.reveals.pending()
    }

    /// A native observer reports watch `key` as visible.
    pub fn reveal_triggered(&mut self, key: usize) -> bool {
        self.reveals.trigger(key)
    }

    // ==================== Contact Form ====================

    pub fn field_changed(&self, index: usize) -> bool {
        self.form.validate_field(index)
    }

    pub fn begin_submit(&mut self) -> Result<PendingSubmit, SubmitBlocked> {
        let pending = self.form.begin_submit(
            self.state.preferences.language,
            &self.config.relay.to_email,
        )?;
        info!("Sending contact message from {}", pending.params.from_email);
        Ok(pending)
    }

    pub fn finish_submit(&mut self, pending: PendingSubmit, outcome: &Result<(), RelayError>) {
        self.form.finish_submit(
            pending,
            outcome,
            self.state.preferences.language,
            self.services.window.as_ref(),
            self.services.scheduler.as_ref(),
            Duration::from_millis(self.config.form.status_hide_ms),
        );
    }

    // ==================== Hover ====================

    pub fn profile_hover(&self, entering: bool) {
        if let Some(profile) = &self.hero.profile_image {
            intro::profile_hover(profile, &self.services.animator, entering);
        }
    }

    /// Cards with a hover effect: project cards first, then contact items.
    pub fn hover_targets(&self) -> Vec<E> {
        self.hover_cards.iter().map(|(card, _)| card.clone()).collect()
    }

    pub fn card_hover(&self, index: usize, entering: bool) {
        if let Some((card, duration_ms)) = self.hover_cards.get(index) {
            intro::card_hover(card, &self.services.animator, entering, *duration_ms);
        }
    }

    // ==================== Page Load ====================

    /// The `load` event: start the loader and, after the cascade delay, the
    /// hero entrance.
    pub fn start_intro<R: Rng + 'static>(&mut self, rng: R) {
        if self.state.ui.loaded {
            debug!("Intro already started");
            return;
        }
        self.state.ui.loaded = true;

        match &self.loader {
            Some(loader) => Loader::start(Rc::clone(loader), Rc::clone(&self.services.scheduler), rng),
            None => debug!("No loader on this page"),
        }

        let hero = self.hero.clone();
        let animator = Rc::clone(&self.services.animator);
        let scheduler = Rc::clone(&self.services.scheduler);
        self.services.scheduler.set_timeout(
            Duration::from_millis(self.config.animation.cascade_delay_ms),
            Box::new(move || hero.play(&animator, &scheduler)),
        );
    }

    /// Fill the particle container. Returns how many were added.
    pub fn spawn_particles<R: Rng>(&self, rng: &mut R) -> usize {
        let Some(container) = &self.particles else {
            return 0;
        };
        let generated = particles::generate(rng, &self.config.particles);
        particles::render(container, &generated)
    }
}

/// Queue a scroll frame unless one is already pending. Every scroll event
/// between two frames collapses into the one render.
pub fn dispatch_scroll<E: Element>(app: &Rc<RefCell<App<E>>>) {
    let scheduler = {
        let mut current = app.borrow_mut();
        if current.state.ui.scroll_frame_pending {
            return;
        }
        current.state.ui.scroll_frame_pending = true;
        Rc::clone(&current.services.scheduler)
    };

    let app = Rc::downgrade(app);
    scheduler.request_frame(Box::new(move |_| {
        if let Some(app) = app.upgrade() {
            let mut app = app.borrow_mut();
            app.state.ui.scroll_frame_pending = false;
            app.render_scroll();
        }
    }));
}

/// Validate, send through `relay` and report the outcome. The app is not
/// borrowed while the request is in flight, so other events keep flowing.
pub async fn submit_contact<E: Element>(
    app: Rc<RefCell<App<E>>>,
    relay: Rc<dyn EmailRelay>,
) -> Result<(), SubmitBlocked> {
    let pending = app.borrow_mut().begin_submit()?;
    let outcome = relay.send(&pending.params).await;
    app.borrow_mut().finish_submit(pending, &outcome);
    Ok(())
}

fn register_reveals<E: Element>(
    watcher: &mut RevealWatcher<E>,
    page: &PageHandles<E>,
    animator: &Rc<dyn Animator<E>>,
) {
    let fade = RevealOptions::new(FADE_IN_THRESHOLD).with_bottom_margin(FADE_IN_MARGIN);
    let visible = page
        .fade_ins
        .iter()
        .chain(page.content_sections.iter().map(|(section, _)| section));
    for element in visible {
        watcher.watch(element.clone(), fade, Box::new(|el: &E| el.add_class("visible")));
    }

    for (section, header) in &page.content_sections {
        let Some(header) = header.clone() else {
            continue;
        };
        let animator = Rc::clone(animator);
        watcher.watch(
            section.clone(),
            RevealOptions::new(0.2),
            Box::new(move |_: &E| {
                animator.animate(
                    &header,
                    &Motion::new().opacity(0.0, 1.0).translate_y(-20.0, 0.0),
                    Timing::new(600, Easing::OutExpo),
                )
            }),
        );
    }

    slide_in(
        watcher,
        &page.timeline_items,
        RevealOptions::new(0.3),
        Motion::new().opacity(0.0, 1.0).translate_x(-50.0, 0.0),
        Timing::new(1000, Easing::OutExpo),
        Stagger::new(150),
        animator,
    );
    slide_in(
        watcher,
        &page.project_cards,
        RevealOptions::new(0.2),
        Motion::new()
            .opacity(0.0, 1.0)
            .translate_y(50.0, 0.0)
            .scale(0.9, 1.0),
        Timing::new(1000, Easing::OutExpo),
        Stagger::new(100),
        animator,
    );
    slide_in(
        watcher,
        &page.cards,
        RevealOptions::new(0.2),
        Motion::new().opacity(0.0, 1.0).translate_y(30.0, 0.0),
        Timing::new(500, Easing::OutExpo),
        Stagger::new(30),
        animator,
    );

    for meter in &page.skills {
        let meter = meter.clone();
        let animator = Rc::clone(animator);
        watcher.watch(
            meter.item.clone(),
            RevealOptions::new(METRIC_THRESHOLD),
            Box::new(move |_: &E| meter.play(&animator)),
        );
    }

    for stat in &page.stats {
        let counter = StatCounter {
            element: stat.clone(),
        };
        let animator = Rc::clone(animator);
        watcher.watch(
            stat.clone(),
            RevealOptions::new(METRIC_THRESHOLD),
            Box::new(move |_: &E| counter.play(&animator)),
        );
    }
}

/// Watch each of `targets`, playing `motion` with a per-index delay.
fn slide_in<E: Element>(
    watcher: &mut RevealWatcher<E>,
    targets: &[E],
    options: RevealOptions,
    motion: Motion,
    timing: Timing,
    stagger: Stagger,
    animator: &Rc<dyn Animator<E>>,
) {
    for (i, target) in targets.iter().enumerate() {
        let animator = Rc::clone(animator);
        let motion = motion.clone();
        let timing = timing.delayed(stagger.delay(i));
        watcher.watch(
            target.clone(),
            options,
            Box::new(move |el: &E| animator.animate(el, &motion, timing)),
        );
    }
}
