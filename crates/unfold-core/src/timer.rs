//! Cancellable one-shot timers on the render event loop.
//!
//! Deferred reveal flips ("set revealed N ms after entering"), the
//! typewriter, and the education carousel all run here instead of spawning
//! threads: the platform pumps [`run_due`] once per frame and parks the loop
//! until [`next_deadline`]. Deadlines come from the animation [`Clock`], so
//! tests drive timers with `TestClock` + [`run_due`].
//!
//! [`Clock`]: crate::animation::Clock

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::animation;

/// Handle to a scheduled timer. `cancel` is idempotent; cancelling a timer
/// that already fired (or was already cancelled) is a no-op. Dropping the
/// handle does not cancel.
#[derive(Clone)]
pub struct TimerHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TimerHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

struct Entry {
    deadline: Instant,
    cancelled: Rc<Cell<bool>>,
    callback: Box<dyn FnOnce()>,
}

thread_local! {
    static QUEUE: RefCell<Vec<Entry>> = const { RefCell::new(Vec::new()) };
}

/// Schedule `f` to run `after` from now, on the same loop that renders.
pub fn schedule(after: Duration, f: impl FnOnce() + 'static) -> TimerHandle {
    let cancelled = Rc::new(Cell::new(false));
    QUEUE.with(|q| {
        q.borrow_mut().push(Entry {
            deadline: animation::now() + after,
            cancelled: cancelled.clone(),
            callback: Box::new(f),
        });
    });
    crate::runtime::request_frame();
    TimerHandle { cancelled }
}

/// Fire every timer whose deadline has passed; returns how many ran.
///
/// Due entries are collected first and run outside the queue borrow, so
/// callbacks may schedule or cancel freely. A timer scheduled by a callback
/// with a zero delay fires on the next pump, not this one.
pub fn run_due() -> usize {
    let now = animation::now();
    let due: Vec<Entry> = QUEUE.with(|q| {
        let mut q = q.borrow_mut();
        let mut due = Vec::new();
        let mut i = 0;
        while i < q.len() {
            if q[i].deadline <= now || q[i].cancelled.get() {
                due.push(q.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| e.deadline);
        due
    });

    let mut fired = 0;
    for entry in due {
        if !entry.cancelled.get() {
            (entry.callback)();
            fired += 1;
        }
    }
    fired
}

/// Earliest live deadline, for the event loop's wait.
pub fn next_deadline() -> Option<Instant> {
    QUEUE.with(|q| {
        q.borrow()
            .iter()
            .filter(|e| !e.cancelled.get())
            .map(|e| e.deadline)
            .min()
    })
}

/// Live (non-cancelled) timer count.
pub fn pending() -> usize {
    QUEUE.with(|q| q.borrow().iter().filter(|e| !e.cancelled.get()).count())
}

/// Drop every queued timer without firing. Used at teardown.
pub fn clear() {
    QUEUE.with(|q| q.borrow_mut().clear());
}
