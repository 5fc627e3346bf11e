//! Cycling typewriter for the hero headline.
//!
//! Types each role at ~60 ms a character, holds, deletes at ~40 ms, moves to
//! the next role, forever. Every step is one cancellable timer, so stopping
//! (or app teardown) cannot leave a late tick behind.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use unfold_core::prelude::*;
use unfold_core::timer::{self, TimerHandle};

pub const TYPE_TICK: Duration = Duration::from_millis(60);
pub const DELETE_TICK: Duration = Duration::from_millis(40);
pub const HOLD: Duration = Duration::from_millis(1400);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    Typing,
    Holding,
    Deleting,
}

pub struct Typewriter {
    roles: &'static [&'static str],
    display: Signal<String>,
    role: Cell<usize>,
    chars: Cell<usize>,
    phase: Cell<Phase>,
    pending: RefCell<Option<TimerHandle>>,
    running: Cell<bool>,
}

impl Typewriter {
    pub fn new(roles: &'static [&'static str]) -> Rc<Self> {
        Rc::new(Self {
            roles,
            display: signal(String::new()),
            role: Cell::new(0),
            chars: Cell::new(0),
            phase: Cell::new(Phase::Typing),
            pending: RefCell::new(None),
            running: Cell::new(false),
        })
    }

    pub fn display(&self) -> &Signal<String> {
        &self.display
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn start(self: &Rc<Self>) {
        if self.running.get() || self.roles.is_empty() {
            return;
        }
        self.running.set(true);
        self.arm(TYPE_TICK);
    }

    /// Idempotent; cancels the pending tick.
    pub fn stop(&self) {
        self.running.set(false);
        if let Some(t) = self.pending.borrow_mut().take() {
            t.cancel();
        }
    }

    fn arm(self: &Rc<Self>, after: Duration) {
        let weak = Rc::downgrade(self);
        let handle = timer::schedule(after, move || {
            if let Some(tw) = weak.upgrade() {
                tw.tick();
            }
        });
        *self.pending.borrow_mut() = Some(handle);
    }

    fn tick(self: Rc<Self>) {
        if !self.running.get() {
            return;
        }
        let role_text = self.roles[self.role.get() % self.roles.len()];
        let total = role_text.chars().count();

        let next_delay = match self.phase.get() {
            Phase::Typing => {
                let n = (self.chars.get() + 1).min(total);
                self.chars.set(n);
                self.publish(role_text, n);
                if n == total {
                    self.phase.set(Phase::Holding);
                    HOLD
                } else {
                    TYPE_TICK
                }
            }
            Phase::Holding => {
                self.phase.set(Phase::Deleting);
                DELETE_TICK
            }
            Phase::Deleting => {
                let n = self.chars.get().saturating_sub(1);
                self.chars.set(n);
                self.publish(role_text, n);
                if n == 0 {
                    self.role.set((self.role.get() + 1) % self.roles.len());
                    self.phase.set(Phase::Typing);
                }
                DELETE_TICK
            }
        };

        request_frame();
        self.arm(next_delay);
    }

    fn publish(&self, role_text: &str, n: usize) {
        let shown: String = role_text.chars().take(n).collect();
        if self.display.with(|d| d != &shown) {
            self.display.set(shown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unfold_core::animation::{TestClock, set_clock};

    fn pump(clock: &TestClock, by: Duration) {
        clock.advance(by);
        timer::run_due();
    }

    #[test]
    fn types_holds_and_deletes() {
        let clock = TestClock::start();
        set_clock(clock.clone());

        const ROLES: &[&str] = &["ab", "xyz"];
        let tw = Typewriter::new(ROLES);
        tw.start();

        pump(&clock, TYPE_TICK);
        assert_eq!(tw.display().get(), "a");
        pump(&clock, TYPE_TICK);
        assert_eq!(tw.display().get(), "ab");

        // Hold, then delete back down.
        pump(&clock, HOLD);
        pump(&clock, DELETE_TICK);
        assert_eq!(tw.display().get(), "a");
        pump(&clock, DELETE_TICK);
        assert_eq!(tw.display().get(), "");

        // Next role starts typing.
        pump(&clock, DELETE_TICK);
        assert_eq!(tw.display().get(), "x");
    }

    #[test]
    fn stop_cancels_pending_tick() {
        let clock = TestClock::start();
        set_clock(clock.clone());

        const ROLES: &[&str] = &["hello"];
        let tw = Typewriter::new(ROLES);
        tw.start();
        pump(&clock, TYPE_TICK);
        assert_eq!(tw.display().get(), "h");

        tw.stop();
        tw.stop(); // double stop is a no-op
        clock.advance(Duration::from_secs(5));
        assert_eq!(timer::run_due(), 0);
        assert_eq!(tw.display().get(), "h");
    }
}
