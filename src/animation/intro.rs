//! Page-load sequence: the loader overlay and the hero entrance cascade.

use super::{Animator, Easing, Motion, Stagger, Timing};
use crate::config::LoaderConfig;
use crate::dom::Element;
use crate::schedule::Scheduler;
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

// ==================== Loader ====================

/// Loader overlay elements. All three must be present for the loader to run.
#[derive(Debug, Clone)]
pub struct LoaderHandles<E> {
    pub overlay: E,
    pub bar: E,
    pub percentage: E,
}

/// Fake progress meter shown until the page has loaded.
///
/// Progress grows by random increments on a fixed tick and has no relation
/// to actual resource loading.
pub struct Loader<E> {
    handles: LoaderHandles<E>,
    config: LoaderConfig,
    progress: f64,
}

impl<E: Element> Loader<E> {
    pub fn new(handles: LoaderHandles<E>, config: LoaderConfig) -> Self {
        Self {
            handles,
            config,
            progress: 0.0,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Add `increment`, clamp at 100 and render. Returns true once full.
    pub fn advance(&mut self, increment: f64) -> bool {
        self.progress = (self.progress + increment.max(0.0)).min(100.0);
        self.handles
            .bar
            .set_style("width", &format!("{}%", super::css_number(self.progress)));
        self.handles
            .percentage
            .set_text(&format!("{}%", self.progress.floor() as i64));
        self.progress >= 100.0
    }

    /// Start ticking. When progress is full the overlay fades (class
    /// `hidden`) and is then removed from layout.
    pub fn start<R: Rng + 'static>(loader: Rc<RefCell<Self>>, scheduler: Rc<dyn Scheduler>, rng: R) {
        schedule_tick(loader, scheduler, rng);
    }
}

fn schedule_tick<E: Element, R: Rng + 'static>(
    loader: Rc<RefCell<Loader<E>>>,
    scheduler: Rc<dyn Scheduler>,
    mut rng: R,
) {
    let tick = Duration::from_millis(loader.borrow().config.tick_ms);
    let next = Rc::clone(&scheduler);
    scheduler.set_timeout(
        tick,
        Box::new(move || {
            let (finished, config) = {
                let mut l = loader.borrow_mut();
                let max = l.config.max_increment;
                let increment = rng.gen_range(0.0..max);
                (l.advance(increment), l.config.clone())
            };

            if !finished {
                schedule_tick(loader, next, rng);
                return;
            }

            info!("Loader complete");
            let overlay = loader.borrow().handles.overlay.clone();
            let later = Rc::clone(&next);
            next.set_timeout(
                Duration::from_millis(config.hide_delay_ms),
                Box::new(move || {
                    overlay.add_class("hidden");
                    later.set_timeout(
                        Duration::from_millis(config.remove_delay_ms),
                        Box::new(move || overlay.set_style("display", "none")),
                    );
                }),
            );
        }),
    );
}

// ==================== Typing effect ====================

/// The first `floor(progress)` characters of `text`.
pub fn typed_prefix(text: &str, progress: f64) -> String {
    let count = progress.max(0.0).floor() as usize;
    text.chars().take(count).collect()
}

const CURSOR_LIFETIME: Duration = Duration::from_millis(2000);

// ==================== Hero cascade ====================

/// Elements of the hero block that take part in the entrance cascade.
#[derive(Debug, Clone)]
pub struct HeroHandles<E> {
    /// Text node that gets the typing effect
    pub name: Option<E>,
    pub title: Option<E>,
    pub description: Option<E>,
    pub buttons: Vec<E>,
    pub social_icons: Vec<E>,
    pub profile_image: Option<E>,
    pub badges: Vec<E>,
}

impl<E> Default for HeroHandles<E> {
    fn default() -> Self {
        Self {
            name: None,
            title: None,
            description: None,
            buttons: Vec::new(),
            social_icons: Vec::new(),
            profile_image: None,
            badges: Vec::new(),
        }
    }
}

impl<E: Element> HeroHandles<E> {
    /// Run the cascade. Delays are relative to this call.
    pub fn play(&self, animator: &Rc<dyn Animator<E>>, scheduler: &Rc<dyn Scheduler>) {
        debug!("Playing hero entrance cascade");

        if let Some(name) = &self.name {
            type_name(name, animator, scheduler);
        }

        if let Some(title) = &self.title {
            animator.animate(
                title,
                &Motion::new().opacity(0.0, 1.0).translate_x(-30.0, 0.0),
                Timing::new(1000, Easing::OutExpo).delayed_ms(800),
            );
        }

        if let Some(description) = &self.description {
            animator.animate(
                description,
                &Motion::new().opacity(0.0, 1.0).translate_y(20.0, 0.0),
                Timing::new(1000, Easing::OutExpo).delayed_ms(1200),
            );
        }

        let stagger = Stagger::new(100).starting_at(1500);
        for (i, button) in self.buttons.iter().enumerate() {
            animator.animate(
                button,
                &Motion::new().opacity(0.0, 1.0).scale(0.8, 1.0),
                Timing::new(800, Easing::OutBack).delayed(stagger.delay(i)),
            );
        }

        let stagger = Stagger::new(100).starting_at(2000);
        for (i, icon) in self.social_icons.iter().enumerate() {
            animator.animate(
                icon,
                &Motion::new()
                    .opacity(0.0, 1.0)
                    .scale(0.0, 1.0)
                    .rotate(180.0, 0.0),
                Timing::new(800, Easing::OutBack).delayed(stagger.delay(i)),
            );
        }

        if let Some(profile) = &self.profile_image {
            animator.animate(
                profile,
                &Motion::new()
                    .opacity(0.0, 1.0)
                    .scale(0.8, 1.0)
                    .rotate(180.0, 0.0),
                Timing::new(1500, Easing::OUT_ELASTIC).delayed_ms(1000),
            );
        }

        let stagger = Stagger::new(200).starting_at(1500);
        for (i, badge) in self.badges.iter().enumerate() {
            animator.animate(
                badge,
                &Motion::new().opacity(0.0, 1.0).scale(0.0, 1.0),
                Timing::new(800, Easing::OutBack).delayed(stagger.delay(i)),
            );
        }
    }
}

fn type_name<E: Element>(name: &E, animator: &Rc<dyn Animator<E>>, scheduler: &Rc<dyn Scheduler>) {
    let text = name.text();
    let length = text.chars().count() as f64;
    name.set_text("");

    let target = name.clone();
    let done_target = name.clone();
    let scheduler = Rc::clone(scheduler);
    animator.tween(
        0.0,
        length,
        Timing::new(1500, Easing::InOutQuad).delayed_ms(500),
        Box::new(move |v| target.set_text(&typed_prefix(&text, v))),
        Some(Box::new(move || {
            if let Some(cursor) = done_target.append_new("span") {
                cursor.set_class_name("name-cursor");
                cursor.set_text("|");
                cursor.set_style("animation", "blink 1s infinite");
                scheduler.set_timeout(CURSOR_LIFETIME, Box::new(move || cursor.remove()));
            }
        })),
    );
}

/// Scale/rotate nudge on the profile image while hovered.
pub fn profile_hover<E: Element>(profile: &E, animator: &Rc<dyn Animator<E>>, entering: bool) {
    let motion = if entering {
        Motion::new().scale(1.0, 1.1).rotate(0.0, 5.0)
    } else {
        Motion::new().scale(1.1, 1.0).rotate(5.0, 0.0)
    };
    animator.animate(profile, &motion, Timing::new(500, Easing::OUT_ELASTIC));
}

/// Slight grow on hover for cards; `duration_ms` differs per card family.
pub fn card_hover<E: Element>(
    card: &E,
    animator: &Rc<dyn Animator<E>>,
    entering: bool,
    duration_ms: u64,
) {
    let motion = if entering {
        Motion::new().scale(1.0, 1.02)
    } else {
        Motion::new().scale(1.02, 1.0)
    };
    animator.animate(card, &motion, Timing::new(duration_ms, Easing::OutQuad));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{FrameAnimator, InstantAnimator};
    use crate::dom::memory::MemoryElement;
    use crate::schedule::ManualScheduler;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn loader_handles() -> LoaderHandles<MemoryElement> {
        LoaderHandles {
            overlay: MemoryElement::new("div"),
            bar: MemoryElement::new("div"),
            percentage: MemoryElement::new("span"),
        }
    }

    // ==================== Loader Tests ====================

    #[test]
    fn test_advance_clamps_at_hundred() {
        let handles = loader_handles();
        let mut loader = Loader::new(handles.clone(), LoaderConfig::default());

        assert!(!loader.advance(60.5));
        assert_eq!(handles.percentage.text(), "60%");
        assert_eq!(handles.bar.style("width").as_deref(), Some("60.5%"));

        assert!(loader.advance(70.0));
        assert_eq!(loader.progress(), 100.0);
        assert_eq!(handles.percentage.text(), "100%");
        assert_eq!(handles.bar.style("width").as_deref(), Some("100%"));
    }

    #[test]
    fn test_loader_runs_to_completion_and_hides() {
        let scheduler = Rc::new(ManualScheduler::new());
        let handles = loader_handles();
        let loader = Rc::new(RefCell::new(Loader::new(
            handles.clone(),
            LoaderConfig::default(),
        )));

        Loader::start(loader.clone(), scheduler.clone(), StdRng::seed_from_u64(7));

        // Worst case is well under 60s of ticks
        for _ in 0..600 {
            if loader.borrow().progress() >= 100.0 {
                break;
            }
            scheduler.advance(Duration::from_millis(100));
        }
        assert_eq!(loader.borrow().progress(), 100.0);
        assert!(!handles.overlay.has_class("hidden"));

        scheduler.advance(Duration::from_millis(500));
        assert!(handles.overlay.has_class("hidden"));
        assert_eq!(handles.overlay.style("display"), None);

        scheduler.advance(Duration::from_millis(500));
        assert_eq!(handles.overlay.style("display").as_deref(), Some("none"));
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn test_loader_progress_never_decreases() {
        let scheduler = Rc::new(ManualScheduler::new());
        let loader = Rc::new(RefCell::new(Loader::new(
            loader_handles(),
            LoaderConfig::default(),
        )));
        Loader::start(loader.clone(), scheduler.clone(), StdRng::seed_from_u64(99));

        let mut last = 0.0;
        for _ in 0..200 {
            scheduler.advance(Duration::from_millis(100));
            let now = loader.borrow().progress();
            assert!(now >= last);
            assert!(now <= 100.0);
            last = now;
        }
    }

    // ==================== Typing Tests ====================

    #[test]
    fn test_typed_prefix() {
        assert_eq!(typed_prefix("Yuvaraj", 0.0), "");
        assert_eq!(typed_prefix("Yuvaraj", 3.9), "Yuv");
        assert_eq!(typed_prefix("Yuvaraj", 99.0), "Yuvaraj");
    }

    #[test]
    fn test_typed_prefix_counts_characters_not_bytes() {
        assert_eq!(typed_prefix("युवराज", 2.0), "यु");
    }

    #[test]
    fn test_type_name_ends_with_cursor_that_disappears() {
        let scheduler = Rc::new(ManualScheduler::new());
        let scheduler_dyn: Rc<dyn Scheduler> = scheduler.clone();
        let animator: Rc<dyn Animator<MemoryElement>> =
            Rc::new(FrameAnimator::new(scheduler.clone()));
        let name = MemoryElement::new("span").with_text("Yuvaraj");
        let hero = HeroHandles {
            name: Some(name.clone()),
            ..HeroHandles::default()
        };

        hero.play(&animator, &scheduler_dyn);
        assert_eq!(name.text(), "");

        scheduler.run_frames(60, Duration::from_millis(16)); // ~1s
        let partial = name.text();
        assert!(!partial.is_empty() && partial.len() < "Yuvaraj".len());

        scheduler.run_frames(100, Duration::from_millis(16));
        assert_eq!(name.text(), "Yuvaraj|");
        assert_eq!(name.children().len(), 1);

        scheduler.advance(Duration::from_millis(2000));
        assert_eq!(name.text(), "Yuvaraj");
        assert!(name.children().is_empty());
    }

    // ==================== Cascade Tests ====================

    #[test]
    fn test_cascade_instant_lands_every_element() {
        let scheduler: Rc<dyn Scheduler> = Rc::new(ManualScheduler::new());
        let animator: Rc<dyn Animator<MemoryElement>> = Rc::new(InstantAnimator);
        let hero = HeroHandles {
            name: Some(MemoryElement::new("span").with_text("Yuvaraj")),
            title: Some(MemoryElement::new("h2")),
            description: Some(MemoryElement::new("p")),
            buttons: vec![MemoryElement::new("a"), MemoryElement::new("a")],
            social_icons: vec![MemoryElement::new("a")],
            profile_image: Some(MemoryElement::new("img")),
            badges: vec![MemoryElement::new("div"); 3],
        };

        hero.play(&animator, &scheduler);

        assert_eq!(hero.title.unwrap().style("opacity").as_deref(), Some("1"));
        assert_eq!(
            hero.profile_image.unwrap().style("transform").as_deref(),
            Some("scale(1) rotate(0deg)")
        );
        for button in &hero.buttons {
            assert_eq!(button.style("transform").as_deref(), Some("scale(1)"));
        }
        assert!(hero.name.unwrap().text().starts_with("Yuvaraj"));
    }

    #[test]
    fn test_badges_stagger_in_order() {
        let scheduler = Rc::new(ManualScheduler::new());
        let scheduler_dyn: Rc<dyn Scheduler> = scheduler.clone();
        let animator: Rc<dyn Animator<MemoryElement>> =
            Rc::new(FrameAnimator::new(scheduler.clone()));
        let badges: Vec<MemoryElement> = (0..3).map(|_| MemoryElement::new("div")).collect();
        let hero = HeroHandles {
            badges: badges.clone(),
            ..HeroHandles::default()
        };

        hero.play(&animator, &scheduler_dyn);
        // 1500ms + 200ms: first two badges started, third not yet
        scheduler.run_frames(108, Duration::from_millis(16));

        assert!(badges[0].style("opacity").is_some());
        assert!(badges[1].style("opacity").is_some());
        assert!(badges[2].style("opacity").is_none());
    }

    // ==================== Hover Tests ====================

    #[test]
    fn test_profile_hover_round_trip() {
        let animator: Rc<dyn Animator<MemoryElement>> = Rc::new(InstantAnimator);
        let profile = MemoryElement::new("img");

        profile_hover(&profile, &animator, true);
        assert_eq!(
            profile.style("transform").as_deref(),
            Some("scale(1.1) rotate(5deg)")
        );
        profile_hover(&profile, &animator, false);
        assert_eq!(
            profile.style("transform").as_deref(),
            Some("scale(1) rotate(0deg)")
        );
    }

    #[test]
    fn test_card_hover() {
        let animator: Rc<dyn Animator<MemoryElement>> = Rc::new(InstantAnimator);
        let card = MemoryElement::new("div");
        card_hover(&card, &animator, true, 300);
        assert_eq!(card.style("transform").as_deref(), Some("scale(1.02)"));
        card_hover(&card, &animator, false, 300);
        assert_eq!(card.style("transform").as_deref(), Some("scale(1)"));
    }
}
