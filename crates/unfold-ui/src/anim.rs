use std::cell::RefCell;

use unfold_core::animation::{AnimatedValue, AnimationSpec};
use unfold_core::prelude::*;
use unfold_core::runtime::remember_with_key;

/// Animate an f32 toward `target`; returns the current value each frame and
/// keeps frames coming while the transition runs.
pub fn animate_f32(key: impl Into<String>, target: f32, spec: AnimationSpec) -> f32 {
    let key = key.into();
    let anim = remember_with_key(format!("anim:f32:{key}"), || {
        RefCell::new(AnimatedValue::new(target, spec))
    });
    let mut a = anim.borrow_mut();
    if *a.target() != target {
        a.set_target(target);
    }
    if a.update() {
        request_frame();
    }
    *a.get()
}

/// Animate a Color toward `target`; returns the current value each frame.
pub fn animate_color(key: impl Into<String>, target: Color, spec: AnimationSpec) -> Color {
    let key = key.into();
    let anim = remember_with_key(format!("anim:color:{key}"), || {
        RefCell::new(AnimatedValue::new(target, spec))
    });
    let mut a = anim.borrow_mut();
    if *a.target() != target {
        a.set_target(target);
    }
    if a.update() {
        request_frame();
    }
    *a.get()
}
