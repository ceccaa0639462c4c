//! Deferred work: timers and animation frames.
//!
//! Everything in the page runs on one thread, so tasks are plain boxed
//! closures with no `Send` bound.

use std::cell::{Cell, RefCell};
use std::time::Duration;

pub type Task = Box<dyn FnOnce()>;
/// Frame callback; receives the frame timestamp in milliseconds.
pub type FrameTask = Box<dyn FnOnce(f64)>;

pub trait Scheduler {
    /// Run `task` once after `delay`.
    fn set_timeout(&self, delay: Duration, task: Task);
    /// Run `task` before the next repaint.
    fn request_frame(&self, task: FrameTask);
}

struct Timer {
    due: f64,
    seq: u64,
    task: Task,
}

/// Virtual-clock scheduler.
///
/// Time only moves when [`ManualScheduler::advance`] is called; frames only
/// run on [`ManualScheduler::run_frame`]. Tasks scheduled while another task
/// runs are queued normally.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<f64>,
    seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    frames: RefCell<Vec<FrameTask>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> f64 {
        self.now.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Move the clock forward, firing every timer that comes due in order.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by.as_secs_f64() * 1000.0;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let index = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
                    .map(|(i, _)| i);
                index.map(|i| timers.remove(i))
            };
            match next {
                Some(timer) => {
                    self.now.set(timer.due.max(self.now.get()));
                    (timer.task)();
                }
                None => break,
            }
        }
        self.now.set(target);
    }

    /// Run the frame callbacks queued so far. Callbacks requested while this
    /// frame runs wait for the next one. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        let count = frames.len();
        let now = self.now.get();
        for frame in frames {
            frame(now);
        }
        count
    }

    /// Alternate `advance(frame)` and `run_frame()` `count` times, like a
    /// display refreshing at a fixed rate.
    pub fn run_frames(&self, count: usize, frame: Duration) {
        for _ in 0..count {
            self.advance(frame);
            self.run_frame();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, task: Task) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due: self.now.get() + delay.as_secs_f64() * 1000.0,
            seq,
            task,
        });
    }

    fn request_frame(&self, task: FrameTask) {
        self.frames.borrow_mut().push(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_timers_fire_in_due_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, name) in [(300, "c"), (100, "a"), (200, "b")] {
            let log = Rc::clone(&log);
            scheduler.set_timeout(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(name)),
            );
        }

        scheduler.advance(Duration::from_millis(250));
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        scheduler.advance(Duration::from_millis(50));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn test_equal_due_times_keep_insertion_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            scheduler.set_timeout(Duration::ZERO, Box::new(move || log.borrow_mut().push(name)));
        }
        scheduler.advance(Duration::ZERO);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_nested_timer_fires_within_same_advance() {
        let scheduler = Rc::new(ManualScheduler::new());
        let fired = Rc::new(Cell::new(false));

        let inner_scheduler = Rc::clone(&scheduler);
        let inner_fired = Rc::clone(&fired);
        scheduler.set_timeout(
            Duration::from_millis(100),
            Box::new(move || {
                inner_scheduler.set_timeout(
                    Duration::from_millis(100),
                    Box::new(move || inner_fired.set(true)),
                );
            }),
        );

        scheduler.advance(Duration::from_millis(250));
        assert!(fired.get());
        assert_eq!(scheduler.now(), 250.0);
    }

    #[test]
    fn test_frame_requested_during_frame_waits() {
        let scheduler = Rc::new(ManualScheduler::new());
        let count = Rc::new(Cell::new(0));

        let s = Rc::clone(&scheduler);
        let c = Rc::clone(&count);
        scheduler.request_frame(Box::new(move |_| {
            c.set(c.get() + 1);
            let c = Rc::clone(&c);
            s.request_frame(Box::new(move |_| c.set(c.get() + 1)));
        }));

        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.pending_frames(), 1);
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_frame_receives_current_time() {
        let scheduler = ManualScheduler::new();
        let seen = Rc::new(Cell::new(-1.0));
        let s = Rc::clone(&seen);
        scheduler.request_frame(Box::new(move |ts| s.set(ts)));
        scheduler.run_frames(1, Duration::from_millis(16));
        assert_eq!(seen.get(), 16.0);
    }
}
