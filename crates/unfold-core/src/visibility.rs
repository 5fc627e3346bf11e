//! Viewport intersection as a stream of boolean events.
//!
//! [`observe_visibility`] watches one element's content-space rect against
//! the scroll viewport and calls back on entered/exited transitions only.
//! This is the one mechanism every revealing section shares; the reveal
//! controller in [`crate::reveal`] layers policy on top of it.

use std::cell::Cell;
use std::rc::Rc;

use crate::geometry::Rect;
use crate::viewport::{BoundsHandle, Viewport};

/// Fraction of the element's area inside `[offset, offset + viewport_h)`.
/// Zero-height elements report 0.
pub fn visible_fraction(rect: Rect, offset: f32, viewport_h: f32) -> f32 {
    if rect.h <= 0.0 || viewport_h <= 0.0 {
        return 0.0;
    }
    let top = rect.y.max(offset);
    let bottom = (rect.y + rect.h).min(offset + viewport_h);
    ((bottom - top).max(0.0)) / rect.h
}

/// An active visibility subscription.
///
/// `cancel` stops all future notifications immediately and is idempotent.
/// Dropping the handle does not cancel; release is explicit so it can be
/// tied to the owning scope.
#[derive(Clone)]
pub struct Subscription {
    inner: Rc<SubInner>,
}

struct SubInner {
    active: Cell<bool>,
    unhooks: std::cell::RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl Subscription {
    pub fn cancel(&self) {
        if self.inner.active.replace(false) {
            for unhook in self.inner.unhooks.borrow_mut().drain(..) {
                unhook();
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }
}

/// Watch `bounds` against `viewport` and report entered/exited transitions
/// of `visible_fraction >= threshold` to `on_change`.
///
/// Edge-triggered: geometry updates that do not flip the boolean produce no
/// callback. While the element is unmounted (no published rect) nothing
/// fires; the first publication evaluates it. The initial state is
/// established silently, so a hidden element does not receive a spurious
/// exited event, while an element already in view receives its entered
/// event right away.
pub fn observe_visibility(
    viewport: &Viewport,
    bounds: &BoundsHandle,
    threshold: f32,
    on_change: impl Fn(bool) + 'static,
) -> Subscription {
    let sub = Subscription {
        inner: Rc::new(SubInner {
            active: Cell::new(true),
            unhooks: std::cell::RefCell::new(Vec::new()),
        }),
    };

    let last: Rc<Cell<Option<bool>>> = Rc::new(Cell::new(None));
    let on_change = Rc::new(on_change);

    let eval = {
        let active = sub.inner.clone();
        let viewport = viewport.clone();
        let bounds = bounds.clone();
        let last = last.clone();
        let on_change = on_change.clone();
        Rc::new(move || {
            if !active.active.get() {
                return;
            }
            let Some(rect) = bounds.get() else {
                return;
            };
            let fraction =
                visible_fraction(rect, viewport.offset.get(), viewport.height.get());
            let visible = fraction > 0.0 && fraction >= threshold;
            match last.get() {
                None => {
                    last.set(Some(visible));
                    if visible {
                        on_change(true);
                    }
                }
                Some(prev) if prev != visible => {
                    last.set(Some(visible));
                    on_change(visible);
                }
                Some(_) => {}
            }
        })
    };

    let offset_id = viewport.offset.subscribe({
        let eval = eval.clone();
        move |_| eval()
    });
    let height_id = viewport.height.subscribe({
        let eval = eval.clone();
        move |_| eval()
    });
    let bounds_id = bounds.rev().subscribe({
        let eval = eval.clone();
        move |_| eval()
    });

    {
        let mut unhooks = sub.inner.unhooks.borrow_mut();
        let offset_sig = viewport.offset.clone();
        unhooks.push(Box::new(move || offset_sig.unsubscribe(offset_id)));
        let height_sig = viewport.height.clone();
        unhooks.push(Box::new(move || height_sig.unsubscribe(height_id)));
        let bounds_sig = bounds.rev().clone();
        unhooks.push(Box::new(move || bounds_sig.unsubscribe(bounds_id)));
    }

    // Establish the initial state; silent if still unmounted.
    eval();

    sub
}
