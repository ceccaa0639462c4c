//! Count-up effects for skill bars and statistic counters.

use super::{Animator, Easing, Motion, Timing};
use crate::dom::{parse_leading_int, Element};
use std::rc::Rc;
use tracing::debug;

const METRIC_DURATION_MS: u64 = 2000;
const SKILL_DELAY_MS: u64 = 300;

/// A skill row: progress bar plus percentage label, driven by
/// `data-percent` on the row.
#[derive(Debug, Clone)]
pub struct SkillMeter<E> {
    pub item: E,
    pub bar: Option<E>,
    pub label: Option<E>,
}

impl<E: Element> SkillMeter<E> {
    /// Target fill, limited to the bar's 0..=100 range.
    pub fn percent(&self) -> u32 {
        parse_leading_int(self.item.attr("data-percent").as_deref()).clamp(0, 100) as u32
    }

    /// Fill the bar from 0 and count the label up to the target.
    pub fn play(&self, animator: &Rc<dyn Animator<E>>) {
        let percent = self.percent() as f64;
        debug!(
            "Animating skill {} to {}%",
            self.item.attr("data-skill").unwrap_or_default(),
            percent
        );
        let timing = Timing::new(METRIC_DURATION_MS, Easing::OutExpo).delayed_ms(SKILL_DELAY_MS);

        if let Some(bar) = &self.bar {
            bar.set_style("width", "0%");
            animator.animate(bar, &Motion::new().width(0.0, percent), timing);
        }

        if let Some(label) = self.label.clone() {
            animator.tween(
                0.0,
                percent,
                timing,
                Box::new(move |v| label.set_text(&format!("{}%", v.floor() as i64))),
                None,
            );
        }
    }
}

/// A number that counts up from 0 to its `data-count`.
#[derive(Debug, Clone)]
pub struct StatCounter<E> {
    pub element: E,
}

impl<E: Element> StatCounter<E> {
    pub fn target(&self) -> i64 {
        parse_leading_int(self.element.attr("data-count").as_deref())
    }

    pub fn play(&self, animator: &Rc<dyn Animator<E>>) {
        let element = self.element.clone();
        animator.tween(
            0.0,
            self.target() as f64,
            Timing::new(METRIC_DURATION_MS, Easing::OutExpo),
            Box::new(move |v| element.set_text(&(v.floor() as i64).to_string())),
            None,
        );
    }
}
