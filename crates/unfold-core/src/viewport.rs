//! The page's scroll position as one shared observed value.
//!
//! Rather than every consumer reading ambient scroll state on every event,
//! a single [`Viewport`] carries the offset and visible extent as signals;
//! visibility observers, the nav highlighter, and the scroll-to-top button
//! each hold their own independent read subscription. Nothing but the scroll
//! container writes to it.

use std::cell::Cell;
use std::rc::Rc;

use crate::geometry::Rect;
use crate::signal::{Signal, signal};

/// Observable scroll viewport: `offset` is the content-space scroll position
/// of the top edge, `height` the visible extent.
#[derive(Clone)]
pub struct Viewport {
    pub offset: Signal<f32>,
    pub height: Signal<f32>,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            offset: signal(0.0),
            height: signal(0.0),
        }
    }

    /// Content-space range currently visible.
    pub fn visible_range(&self) -> (f32, f32) {
        let top = self.offset.get();
        (top, top + self.height.get())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable reference to one laid-out element.
///
/// The layout pass publishes the element's content-space rect here each time
/// it changes; until the first publication the element counts as unmounted
/// and observers stay silent. At most one rect is held at a time.
#[derive(Clone)]
pub struct BoundsHandle(Rc<BoundsInner>);

struct BoundsInner {
    rect: Cell<Option<Rect>>,
    /// Bumped on every rect change so observers can re-evaluate.
    rev: Signal<u64>,
}

impl BoundsHandle {
    pub fn new() -> Self {
        Self(Rc::new(BoundsInner {
            rect: Cell::new(None),
            rev: signal(0),
        }))
    }

    pub fn get(&self) -> Option<Rect> {
        self.0.rect.get()
    }

    /// Record the element's laid-out rect; no-op if unchanged.
    pub fn publish(&self, rect: Rect) {
        if self.0.rect.get() != Some(rect) {
            self.0.rect.set(Some(rect));
            self.0.rev.update(|v| *v += 1);
        }
    }

    /// Forget the rect (the element unmounted).
    pub fn clear(&self) {
        if self.0.rect.get().is_some() {
            self.0.rect.set(None);
            self.0.rev.update(|v| *v += 1);
        }
    }

    pub(crate) fn rev(&self) -> &Signal<u64> {
        &self.0.rev
    }
}

impl Default for BoundsHandle {
    fn default() -> Self {
        Self::new()
    }
}
