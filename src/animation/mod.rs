//! Motion: tween descriptions, the animator seam, and the scroll-driven
//! effects built on them.

mod easing;
mod engine;
pub mod intro;
pub mod metrics;
pub mod reveal;

pub use easing::Easing;
pub use engine::FrameAnimator;

use crate::dom::Element;
use std::time::Duration;

/// Start/end pairs for the properties one animation drives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Motion {
    pub opacity: Option<(f64, f64)>,
    pub translate_x: Option<(f64, f64)>,
    pub translate_y: Option<(f64, f64)>,
    pub scale: Option<(f64, f64)>,
    /// Degrees
    pub rotate: Option<(f64, f64)>,
    /// Percent
    pub width: Option<(f64, f64)>,
}

impl Motion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, from: f64, to: f64) -> Self {
        self.opacity = Some((from, to));
        self
    }

    pub fn translate_x(mut self, from: f64, to: f64) -> Self {
        self.translate_x = Some((from, to));
        self
    }

    pub fn translate_y(mut self, from: f64, to: f64) -> Self {
        self.translate_y = Some((from, to));
        self
    }

    pub fn scale(mut self, from: f64, to: f64) -> Self {
        self.scale = Some((from, to));
        self
    }

    pub fn rotate(mut self, from: f64, to: f64) -> Self {
        self.rotate = Some((from, to));
        self
    }

    pub fn width(mut self, from: f64, to: f64) -> Self {
        self.width = Some((from, to));
        self
    }

    /// Inline styles at eased progress `p` (0 = start, 1 = end).
    pub fn styles_at(&self, p: f64) -> Vec<(&'static str, String)> {
        let lerp = |(from, to): (f64, f64)| from + (to - from) * p;
        let mut styles = Vec::new();

        if let Some(pair) = self.opacity {
            styles.push(("opacity", css_number(lerp(pair))));
        }

        let mut transform = Vec::new();
        if let Some(pair) = self.translate_x {
            transform.push(format!("translateX({}px)", css_number(lerp(pair))));
        }
        if let Some(pair) = self.translate_y {
            transform.push(format!("translateY({}px)", css_number(lerp(pair))));
        }
        if let Some(pair) = self.scale {
            transform.push(format!("scale({})", css_number(lerp(pair))));
        }
        if let Some(pair) = self.rotate {
            transform.push(format!("rotate({}deg)", css_number(lerp(pair))));
        }
        if !transform.is_empty() {
            styles.push(("transform", transform.join(" ")));
        }

        if let Some(pair) = self.width {
            styles.push(("width", format!("{}%", css_number(lerp(pair)))));
        }

        styles
    }

    pub fn apply_at<E: Element>(&self, target: &E, p: f64) {
        for (property, value) in self.styles_at(p) {
            target.set_style(property, &value);
        }
    }
}

/// Render a number for CSS with at most three decimals.
pub(crate) fn css_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
}

impl Timing {
    pub fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            delay: Duration::ZERO,
            easing,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delayed_ms(self, delay_ms: u64) -> Self {
        self.delayed(Duration::from_millis(delay_ms))
    }

    /// Linear progress `elapsed_ms` after start, or `None` while the delay
    /// has not run out yet.
    pub fn progress(&self, elapsed_ms: f64) -> Option<f64> {
        let delay = self.delay.as_secs_f64() * 1000.0;
        if elapsed_ms < delay {
            return None;
        }
        let duration = self.duration.as_secs_f64() * 1000.0;
        if duration <= 0.0 {
            return Some(1.0);
        }
        Some(((elapsed_ms - delay) / duration).min(1.0))
    }
}

/// Per-index delays: `start + step * index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stagger {
    pub start: Duration,
    pub step: Duration,
}

impl Stagger {
    pub fn new(step_ms: u64) -> Self {
        Self {
            start: Duration::ZERO,
            step: Duration::from_millis(step_ms),
        }
    }

    pub fn starting_at(mut self, start_ms: u64) -> Self {
        self.start = Duration::from_millis(start_ms);
        self
    }

    pub fn delay(&self, index: usize) -> Duration {
        self.start + self.step * index as u32
    }
}

pub type UpdateFn = Box<dyn FnMut(f64)>;
pub type CompleteFn = Box<dyn FnOnce()>;

/// The animation engine seam.
///
/// Callers never check for an engine themselves: an animator that cannot
/// animate still lands every call on its end state.
pub trait Animator<E: Element> {
    /// Whether calls produce motion (as opposed to jumping to the end).
    fn is_enabled(&self) -> bool;

    /// Drive `motion` on `target`.
    fn animate(&self, target: &E, motion: &Motion, timing: Timing);

    /// Tween a plain number, reporting every intermediate value.
    fn tween(
        &self,
        from: f64,
        to: f64,
        timing: Timing,
        on_update: UpdateFn,
        on_complete: Option<CompleteFn>,
    );
}

/// Default animator when motion is unavailable or switched off: every
/// animation lands on its final state immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantAnimator;

impl<E: Element> Animator<E> for InstantAnimator {
    fn is_enabled(&self) -> bool {
        false
    }

    fn animate(&self, target: &E, motion: &Motion, _timing: Timing) {
        motion.apply_at(target, 1.0);
    }

    fn tween(
        &self,
        _from: f64,
        to: f64,
        _timing: Timing,
        mut on_update: UpdateFn,
        on_complete: Option<CompleteFn>,
    ) {
        on_update(to);
        if let Some(complete) = on_complete {
            complete();
        }
    }
}
