//! Reveal presentation: the controller's boolean mapped to a fade/slide.
//!
//! [`Reveal`] wraps content in a Box whose alpha and paint offset animate
//! between the hidden and shown poses; the Box is also the observed element
//! (its bounds feed the controller). [`RevealGroup`] applies a [`Stagger`]
//! across sibling items: repeatable policies stagger the presentation
//! transition, one-shot policies stagger the deferred state flip itself.

use std::time::Duration;

use unfold_core::prelude::*;

use crate::anim::animate_f32;
use crate::{Box, ViewExt};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealStyle {
    pub from_alpha: f32,
    /// Hidden pose offset; animates to zero on reveal.
    pub offset: Vec2,
    pub duration: Duration,
    pub easing: Easing,
    /// Presentation-layer lead time (not a blocking wait).
    pub delay: Duration,
}

impl Default for RevealStyle {
    fn default() -> Self {
        Self::rise()
    }
}

impl RevealStyle {
    /// Fade in while sliding up from below, the page's default entrance.
    pub fn rise() -> Self {
        Self {
            from_alpha: 0.0,
            offset: Vec2 { x: 0.0, y: 24.0 },
            duration: Duration::from_millis(700),
            easing: Easing::EaseOut,
            delay: Duration::ZERO,
        }
    }

    /// Fade in while dropping from above; used for section headers.
    pub fn drop_in() -> Self {
        Self {
            offset: Vec2 { x: 0.0, y: -20.0 },
            duration: Duration::from_millis(500),
            ..Self::rise()
        }
    }

    /// Fade in from the right; used for the publications timeline.
    pub fn slide_from_right() -> Self {
        Self {
            offset: Vec2 { x: 48.0, y: 0.0 },
            ..Self::rise()
        }
    }

    pub fn fade() -> Self {
        Self {
            offset: Vec2::default(),
            duration: Duration::from_millis(500),
            ..Self::rise()
        }
    }

    pub fn duration(mut self, d: Duration) -> Self {
        self.duration = d;
        self
    }

    pub fn delayed(mut self, d: Duration) -> Self {
        self.delay = d;
        self
    }

    fn spec(&self) -> AnimationSpec {
        AnimationSpec {
            duration: self.duration,
            easing: self.easing,
            delay: self.delay,
        }
    }
}

/// Scroll-revealed content. The wrapper Box is the observed element; its
/// bounds feed the controller and its alpha/offset carry the transition.
pub fn Reveal(key: &str, policy: RevealPolicy, style: RevealStyle, content: View) -> View {
    let ctrl = use_reveal(key, policy);
    let shown = ctrl.is_revealed();
    let spec = style.spec();

    let alpha = animate_f32(
        format!("reveal.a:{key}"),
        if shown { 1.0 } else { style.from_alpha },
        spec,
    );
    let dx = animate_f32(
        format!("reveal.x:{key}"),
        if shown { 0.0 } else { style.offset.x },
        spec,
    );
    let dy = animate_f32(
        format!("reveal.y:{key}"),
        if shown { 0.0 } else { style.offset.y },
        spec,
    );

    Box(Modifier::new()
        .alpha(alpha)
        .offset_x(dx)
        .offset_y(dy)
        .track_bounds(ctrl.bounds().clone()))
    .child(content)
}

/// Staggered reveal across an ordered list of items.
///
/// Each item gets its own controller under `key:index`. For repeatable
/// policies the per-index delay rides the presentation spec; for one-shot
/// policies it becomes the controller's deferred-flip delay (a cancellable
/// timer), matching card cascades that reveal `i * base` after entering.
pub fn RevealGroup(
    key: &str,
    policy: RevealPolicy,
    style: RevealStyle,
    stagger: Stagger,
    children: Vec<View>,
) -> Vec<View> {
    children
        .into_iter()
        .enumerate()
        .map(|(i, child)| {
            let item_key = format!("{key}:{i}");
            let delay = stagger.delay(i);
            if policy.repeatable {
                Reveal(&item_key, policy, style.delayed(delay), child)
            } else {
                Reveal(&item_key, policy.delay(delay), style, child)
            }
        })
        .collect()
}
