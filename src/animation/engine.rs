use super::{Animator, CompleteFn, Motion, Timing};
use crate::dom::Element;
use crate::schedule::Scheduler;
use std::rc::Rc;

/// Tween engine driven by animation frames.
///
/// The first frame after a call marks the start time and puts the target in
/// its starting state, even while a delay holds the motion back; every later
/// frame samples the eased curve until the timing runs out.
#[derive(Clone)]
pub struct FrameAnimator {
    scheduler: Rc<dyn Scheduler>,
}

impl FrameAnimator {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self { scheduler }
    }
}

type StepFn = Box<dyn FnMut(f64)>;

/// Request one frame; re-arm until progress reaches 1.
fn drive(
    scheduler: Rc<dyn Scheduler>,
    timing: Timing,
    started: Option<f64>,
    mut step: StepFn,
    on_complete: Option<CompleteFn>,
) {
    let next = Rc::clone(&scheduler);
    scheduler.request_frame(Box::new(move |now| {
        let start = started.unwrap_or(now);
        match timing.progress(now - start) {
            None => {
                if started.is_none() {
                    step(0.0);
                }
                drive(next, timing, Some(start), step, on_complete)
            }
            Some(p) => {
                step(timing.easing.apply(p));
                if p < 1.0 {
                    drive(next, timing, Some(start), step, on_complete);
                } else if let Some(complete) = on_complete {
                    complete();
                }
            }
        }
    }));
}

impl<E: Element> Animator<E> for FrameAnimator {
    fn is_enabled(&self) -> bool {
        true
    }

    fn animate(&self, target: &E, motion: &Motion, timing: Timing) {
        let target = target.clone();
        let motion = motion.clone();
        drive(
            Rc::clone(&self.scheduler),
            timing,
            None,
            Box::new(move |p| motion.apply_at(&target, p)),
            None,
        );
    }

    fn tween(
        &self,
        from: f64,
        to: f64,
        timing: Timing,
        mut on_update: super::UpdateFn,
        on_complete: Option<CompleteFn>,
    ) {
        drive(
            Rc::clone(&self.scheduler),
            timing,
            None,
            Box::new(move |p| on_update(from + (to - from) * p)),
            on_complete,
        );
    }
}
