//! # Scroll model
//!
//! One vertical [`ScrollState`] owns the page's [`Viewport`] signals: wheel
//! input mutates the offset, layout feeds the viewport/content extents, and
//! every other consumer (reveal observers, nav highlighting, scroll-to-top)
//! holds read-only subscriptions on the viewport.
//!
//! `scroll_immediate` consumes a requested delta and returns the leftover so
//! nested scroll views could chain it. `animate_to` drives the offset with an
//! eased [`AnimatedValue`] for programmatic jumps (nav links, scroll-to-top);
//! user wheel input interrupts it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use unfold_core::prelude::*;
use unfold_core::runtime::remember_with_key;

pub struct ScrollState {
    viewport: Viewport,
    content_height: Signal<f32>,

    // physics
    vel: Cell<f32>,
    gliding: Cell<bool>,
    anim: RefCell<Option<AnimatedValue<f32>>>,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::with_viewport(Viewport::new())
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            content_height: signal(0.0),
            vel: Cell::new(0.0),
            gliding: Cell::new(false),
            anim: RefCell::new(None),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn offset(&self) -> f32 {
        self.viewport.offset.get()
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_height.get() - self.viewport.height.get()).max(0.0)
    }

    pub fn set_viewport_height(&self, h: f32) {
        let h = h.max(0.0);
        if (self.viewport.height.get() - h).abs() > f32::EPSILON {
            self.viewport.height.set(h);
            self.clamp_offset();
        }
    }

    pub fn set_content_height(&self, h: f32) {
        let h = h.max(0.0);
        if (self.content_height.get() - h).abs() > f32::EPSILON {
            self.content_height.set(h);
            self.clamp_offset();
        }
    }

    pub fn set_offset(&self, off: f32) {
        let clamped = off.clamp(0.0, self.max_offset());
        if (self.viewport.offset.get() - clamped).abs() > f32::EPSILON {
            self.viewport.offset.set(clamped);
        }
    }

    fn clamp_offset(&self) {
        let max = self.max_offset();
        let cur = self.viewport.offset.get();
        if cur > max {
            self.viewport.offset.set(max);
        }
    }

    /// Consume `dy`, clamp to bounds, return the leftover motion.
    pub fn scroll_immediate(&self, dy: f32) -> f32 {
        // User input wins over a programmatic glide.
        *self.anim.borrow_mut() = None;

        let before = self.viewport.offset.get();
        let new_off = (before + dy).clamp(0.0, self.max_offset());
        if (new_off - before).abs() > 0.0 {
            self.viewport.offset.set(new_off);
        }

        let consumed = new_off - before;
        self.vel.set(consumed);
        self.gliding.set(consumed.abs() > 0.25);
        if self.gliding.get() {
            request_frame();
        }

        dy - consumed
    }

    /// Ease the offset to `target` (clamped); used by nav links and the
    /// scroll-to-top button.
    pub fn animate_to(&self, target: f32) {
        let target = target.clamp(0.0, self.max_offset());
        let mut anim = AnimatedValue::new(self.viewport.offset.get(), AnimationSpec::slow());
        anim.set_target(target);
        *self.anim.borrow_mut() = Some(anim);
        self.gliding.set(false);
        request_frame();
    }

    /// Advance physics one tick; returns true while still moving.
    pub fn tick(&self) -> bool {
        // Programmatic glide first.
        let animated = {
            let mut slot = self.anim.borrow_mut();
            if let Some(anim) = slot.as_mut() {
                let more = anim.update();
                let value = *anim.get();
                if !more {
                    *slot = None;
                }
                Some((value, more))
            } else {
                None
            }
        };
        if let Some((value, more)) = animated {
            self.set_offset(value);
            if more {
                request_frame();
            }
            return more;
        }

        // Wheel inertia.
        if !self.gliding.get() {
            return false;
        }
        let vel = self.vel.get();
        if vel.abs() < 0.05 {
            self.vel.set(0.0);
            self.gliding.set(false);
            return false;
        }

        let before = self.viewport.offset.get();
        let new_off = (before + vel).clamp(0.0, self.max_offset());
        if (new_off - before).abs() > 0.0 {
            self.viewport.offset.set(new_off);
        }

        self.vel.set(vel * 0.9);
        request_frame();
        true
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Remembered ScrollState bound to `viewport` (requires a unique key).
pub fn remember_scroll_state(key: impl Into<String>, viewport: Viewport) -> Rc<ScrollState> {
    remember_with_key(key.into(), || ScrollState::with_viewport(viewport))
}

/// Vertical scroll container.
pub fn ScrollArea(modifier: Modifier, state: Rc<ScrollState>, content: View) -> View {
    let on_scroll = {
        let st = state.clone();
        Rc::new(move |d: Vec2| -> Vec2 {
            Vec2 {
                x: d.x,
                y: st.scroll_immediate(d.y),
            }
        })
    };
    let set_viewport = {
        let st = state.clone();
        Rc::new(move |h: f32| st.set_viewport_height(h))
    };
    let set_content = {
        let st = state.clone();
        Rc::new(move |h: f32| st.set_content_height(h))
    };
    let get_scroll = {
        let st = state.clone();
        Rc::new(move || {
            st.tick();
            st.offset()
        })
    };

    View::new(
        0,
        ViewKind::ScrollV {
            on_scroll: Some(on_scroll),
            set_viewport_height: Some(set_viewport),
            set_content_height: Some(set_content),
            get_scroll_offset: Some(get_scroll),
        },
    )
    .modifier(modifier)
    .with_children(vec![content])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use unfold_core::animation::{TestClock, set_clock};

    fn state(viewport_h: f32, content_h: f32) -> ScrollState {
        let st = ScrollState::new();
        st.set_viewport_height(viewport_h);
        st.set_content_height(content_h);
        st
    }

    #[test]
    fn scroll_clamps_and_reports_leftover() {
        let st = state(800.0, 2000.0);

        assert_eq!(st.scroll_immediate(500.0), 0.0);
        assert_eq!(st.offset(), 500.0);

        // 1200 max; 700 requested but only 700 available.
        assert_eq!(st.scroll_immediate(900.0), 200.0);
        assert_eq!(st.offset(), 1200.0);

        assert_eq!(st.scroll_immediate(-2000.0), -800.0);
        assert_eq!(st.offset(), 0.0);
    }

    #[test]
    fn shrinking_content_clamps_offset() {
        let st = state(800.0, 2000.0);
        st.set_offset(1200.0);
        st.set_content_height(1000.0);
        assert_eq!(st.offset(), 200.0);
    }

    #[test]
    fn animate_to_reaches_target() {
        let clock = TestClock::start();
        set_clock(clock.clone());

        let st = state(800.0, 3000.0);
        st.set_offset(1500.0);
        st.animate_to(0.0);

        // Mid-flight: still animating, moving down.
        clock.advance(Duration::from_millis(300));
        assert!(st.tick());
        assert!(st.offset() < 1500.0);
        assert!(st.offset() > 0.0);

        clock.advance(Duration::from_millis(600));
        while st.tick() {}
        assert_eq!(st.offset(), 0.0);
    }

    #[test]
    fn wheel_input_interrupts_glide() {
        let clock = TestClock::start();
        set_clock(clock.clone());

        let st = state(800.0, 3000.0);
        st.animate_to(2000.0);
        st.scroll_immediate(10.0);

        clock.advance(Duration::from_millis(1000));
        st.tick();
        // The glide was dropped; only the wheel delta (plus a little
        // inertia) moved the offset.
        assert!(st.offset() < 100.0);
    }
}
