//! Reveal controllers: a boolean "revealed" state per element, driven by
//! the visibility observer under one of two policies.
//!
//! - One-shot: the first entered event flips the state true for the rest of
//!   the element's life and cancels the subscription on the spot; a policy
//!   delay turns the flip into a cancellable timer instead.
//! - Repeatable: the state mirrors every entered/exited event for the whole
//!   mounted lifetime; the delay is left to the presentation layer.
//!
//! Either way, state writes are idempotent and everything acquired is
//! released on [`release`](RevealController::release), which `use_reveal`
//! ties to key change and composition teardown.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::locals;
use crate::runtime::{remember_with_key, request_frame};
use crate::scope::scoped_effect;
use crate::signal::{Signal, signal};
use crate::timer::{self, TimerHandle};
use crate::viewport::{BoundsHandle, Viewport};
use crate::visibility::{Subscription, observe_visibility};
use crate::effects::on_unmount;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealPolicy {
    /// Fraction of the element that must be visible to count as entered.
    pub threshold: f32,
    /// Reset to hidden on exit (replay on re-entry) instead of latching.
    pub repeatable: bool,
    /// One-shot: flip the state this long after entering, via a cancellable
    /// timer. Repeatable: carried into the presentation transition.
    pub delay: Duration,
}

impl Default for RevealPolicy {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            repeatable: false,
            delay: Duration::ZERO,
        }
    }
}

impl RevealPolicy {
    pub fn once() -> Self {
        Self::default()
    }

    pub fn repeating() -> Self {
        Self {
            repeatable: true,
            ..Self::default()
        }
    }

    pub fn threshold(mut self, t: f32) -> Self {
        self.threshold = t;
        self
    }

    pub fn delay(mut self, d: Duration) -> Self {
        self.delay = d;
        self
    }
}

pub struct RevealController {
    policy: RevealPolicy,
    revealed: Signal<bool>,
    bounds: BoundsHandle,
    sub: RefCell<Option<Subscription>>,
    pending: RefCell<Option<TimerHandle>>,
    /// One-shot already triggered (subscription no longer wanted).
    done: Cell<bool>,
    /// Shared with deferred timer callbacks so a release observed there
    /// suppresses the write even if a cancel raced the pump.
    released: Rc<Cell<bool>>,
}

impl RevealController {
    pub fn new(policy: RevealPolicy) -> Rc<Self> {
        Rc::new(Self {
            policy,
            revealed: signal(false),
            bounds: BoundsHandle::new(),
            sub: RefCell::new(None),
            pending: RefCell::new(None),
            done: Cell::new(false),
            released: Rc::new(Cell::new(false)),
        })
    }

    /// Subscribe to the viewport. Exactly one live subscription per
    /// controller; calling again after release re-attaches.
    pub fn attach(self: &Rc<Self>, viewport: &Viewport) {
        if let Some(old) = self.sub.borrow_mut().take() {
            old.cancel();
        }
        self.released.set(false);

        let weak = Rc::downgrade(self);
        let sub = observe_visibility(viewport, &self.bounds, self.policy.threshold, move |vis| {
            if let Some(ctrl) = weak.upgrade() {
                ctrl.on_visibility(vis);
            }
        });

        // The initial evaluation may already have completed a one-shot.
        if self.done.get() {
            sub.cancel();
        } else {
            *self.sub.borrow_mut() = Some(sub);
        }
    }

    fn on_visibility(&self, visible: bool) {
        if self.released.get() {
            return;
        }

        if self.policy.repeatable {
            if self.revealed.get() != visible {
                self.revealed.set(visible);
                // The state changed outside composition; the view layer
                // needs a frame to pick it up.
                request_frame();
            }
            return;
        }

        // One-shot: exits are ignored; the first entry finishes the job.
        if !visible || self.done.get() {
            return;
        }
        self.done.set(true);
        if let Some(sub) = self.sub.borrow_mut().take() {
            sub.cancel();
        }

        if self.policy.delay.is_zero() {
            if !self.revealed.get() {
                self.revealed.set(true);
                request_frame();
            }
        } else {
            let revealed = self.revealed.clone();
            let released = self.released.clone();
            let handle = timer::schedule(self.policy.delay, move || {
                if !released.get() && !revealed.get() {
                    revealed.set(true);
                    request_frame();
                }
            });
            *self.pending.borrow_mut() = Some(handle);
        }
    }

    /// Cancel the subscription and any pending timer. Idempotent; after
    /// this no state write can occur.
    pub fn release(&self) {
        self.released.set(true);
        if let Some(sub) = self.sub.borrow_mut().take() {
            sub.cancel();
        }
        if let Some(timer) = self.pending.borrow_mut().take() {
            timer.cancel();
        }
    }

    pub fn policy(&self) -> RevealPolicy {
        self.policy
    }

    pub fn revealed(&self) -> &Signal<bool> {
        &self.revealed
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed.get()
    }

    /// Handle to bind to the target view via `Modifier::track_bounds`.
    pub fn bounds(&self) -> &BoundsHandle {
        &self.bounds
    }

    pub fn has_subscription(&self) -> bool {
        self.sub.borrow().as_ref().is_some_and(|s| s.is_active())
    }
}

/// Composition-side reveal state for one element.
///
/// Remembers a controller under `key`, attaches it to the ambient viewport
/// (see [`locals::with_viewport`]), re-creates it when the policy changes
/// (releasing the old one first), and releases it at teardown.
pub fn use_reveal(key: impl Into<String>, policy: RevealPolicy) -> Rc<RevealController> {
    let key = key.into();
    let viewport = locals::viewport();
    let slot = remember_with_key(format!("reveal:{key}"), || {
        RefCell::new(None::<(RevealPolicy, Rc<RevealController>)>)
    });

    {
        let occupant = slot.borrow();
        if let Some((existing_policy, ctrl)) = &*occupant
            && *existing_policy == policy
        {
            return ctrl.clone();
        }
    }

    let mut occupant = slot.borrow_mut();
    if let Some((_, old)) = occupant.take() {
        old.release();
    } else {
        // First composition at this key: release whatever occupies the
        // slot when the composition tears down.
        let slot = slot.clone();
        scoped_effect(move || {
            on_unmount(move || {
                if let Some((_, ctrl)) = slot.borrow_mut().take() {
                    ctrl.release();
                }
            })
        });
    }
    let ctrl = RevealController::new(policy);
    ctrl.attach(&viewport);
    *occupant = Some((policy, ctrl.clone()));
    ctrl
}
