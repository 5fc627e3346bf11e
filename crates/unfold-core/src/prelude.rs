pub use crate::animation::{
    AnimatedValue, AnimationSpec, Clock, Easing, Interpolate, SystemClock, TestClock, set_clock,
};
pub use crate::color::Color;
pub use crate::effects::{Dispose, disposable_effect, effect, on_unmount};
pub use crate::geometry::{Rect, Size, Vec2};
pub use crate::locals::{
    TextScale, Theme, text_scale, theme, viewport, with_text_scale, with_theme, with_viewport,
};
pub use crate::modifier::{Border, Modifier, PaddingValues};
pub use crate::reveal::{RevealController, RevealPolicy, use_reveal};
pub use crate::runtime::{
    ComposeGuard, Frame, HitRegion, Scheduler, remember, remember_state, remember_state_with_key,
    remember_with_key, request_frame,
};
pub use crate::scope::{Scope, current_scope, scoped_effect};
pub use crate::signal::{Signal, signal};
pub use crate::stagger::Stagger;
pub use crate::view::{
    ButtonColors, FieldColors, Scene, SceneNode, View, ViewId, ViewKind,
};
pub use crate::viewport::{BoundsHandle, Viewport};
pub use crate::visibility::{Subscription, observe_visibility, visible_fraction};
pub use taffy::{AlignContent, AlignItems, AlignSelf, FlexDirection, JustifyContent};
