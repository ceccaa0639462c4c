//! One-shot visibility triggers.
//!
//! Each watched element carries its own threshold and an action that runs
//! the first time enough of the element is on screen. The action is stored
//! as an `Option<FnOnce>` and taken when it fires, so it cannot run twice
//! whichever path (native observer or layout check) reports visibility.

use crate::dom::Element;
use tracing::debug;

/// When an element counts as visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the element's height that must be inside the viewport
    pub threshold: f64,
    /// Pixels trimmed off the bottom of the viewport
    pub bottom_margin: f64,
}

impl RevealOptions {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            bottom_margin: 0.0,
        }
    }

    pub fn with_bottom_margin(mut self, margin: f64) -> Self {
        self.bottom_margin = margin;
        self
    }

    /// `rootMargin` string for a native intersection observer.
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", super::css_number(-self.bottom_margin))
    }

    /// Whether a box at `[top, top + height)` in document space is visible
    /// enough with the viewport scrolled to `scroll_y`.
    pub fn is_visible(&self, top: f64, height: f64, scroll_y: f64, viewport_height: f64) -> bool {
        let view_top = scroll_y;
        let view_bottom = scroll_y + (viewport_height - self.bottom_margin).max(0.0);
        let overlap = (top + height).min(view_bottom) - top.max(view_top);
        if height <= 0.0 {
            return top >= view_top && top < view_bottom;
        }
        overlap > 0.0 && overlap / height >= self.threshold
    }
}

pub type RevealAction<E> = Box<dyn FnOnce(&E)>;

struct Watch<E> {
    target: E,
    options: RevealOptions,
    action: Option<RevealAction<E>>,
}

/// Registry of pending one-shot reveals.
pub struct RevealWatcher<E: Element> {
    watches: Vec<Watch<E>>,
}

impl<E: Element> Default for RevealWatcher<E> {
    fn default() -> Self {
        Self {
            watches: Vec::new(),
        }
    }
}

impl<E: Element> RevealWatcher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching `target`; returns the key used by [`Self::trigger`].
    pub fn watch(&mut self, target: E, options: RevealOptions, action: RevealAction<E>) -> usize {
        self.watches.push(Watch {
            target,
            options,
            action: Some(action),
        });
        self.watches.len() - 1
    }

    /// Fire the action for `key` if it has not fired yet. Returns whether it
    /// ran.
    pub fn trigger(&mut self, key: usize) -> bool {
        let Some(watch) = self.watches.get_mut(key) else {
            return false;
        };
        match watch.action.take() {
            Some(action) => {
                debug!("Reveal {} triggered", key);
                action(&watch.target);
                true
            }
            None => false,
        }
    }

    /// Layout-based visibility pass for platforms without a native observer.
    /// Returns how many actions fired.
    pub fn check_layout(&mut self, scroll_y: f64, viewport_height: f64) -> usize {
        let due: Vec<usize> = self
            .watches
            .iter()
            .enumerate()
            .filter(|(_, w)| w.action.is_some())
            .filter(|(_, w)| {
                w.options.is_visible(
                    w.target.offset_top(),
                    w.target.offset_height(),
                    scroll_y,
                    viewport_height,
                )
            })
            .map(|(key, _)| key)
            .collect();

        due.into_iter().filter(|&key| self.trigger(key)).count()
    }

    /// Watches that have not fired, for registering native observers.
    pub fn pending(&self) -> Vec<(usize, E, RevealOptions)> {
        self.watches
            .iter()
            .enumerate()
            .filter(|(_, w)| w.action.is_some())
            .map(|(key, w)| (key, w.target.clone(), w.options))
            .collect()
    }

    pub fn is_fired(&self, key: usize) -> bool {
        self.watches
            .get(key)
            .map(|w| w.action.is_none())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }
}
