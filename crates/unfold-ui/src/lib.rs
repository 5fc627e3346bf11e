#![allow(non_snake_case)]
//! Widgets, layout, scroll containers, and reveal composables.

pub mod anim;
pub mod layout;
pub mod reveal;
pub mod scroll;
pub mod text;
pub mod textfield;

use std::rc::Rc;

use unfold_core::prelude::*;

pub use anim::{animate_color, animate_f32};
pub use layout::{Interactions, layout_and_paint};
pub use reveal::{Reveal, RevealGroup, RevealStyle};
pub use scroll::{ScrollArea, ScrollState, remember_scroll_state};
pub use textfield::{TextFieldState, field_state, field_text, reset_field};

pub fn Surface(modifier: Modifier, child: View) -> View {
    let mut v = View::new(0, ViewKind::Surface).modifier(modifier);
    v.children = vec![child];
    v
}

pub fn Box(modifier: Modifier) -> View {
    View::new(0, ViewKind::Box).modifier(modifier)
}

pub fn Row(modifier: Modifier) -> View {
    View::new(0, ViewKind::Row).modifier(modifier)
}

pub fn Column(modifier: Modifier) -> View {
    View::new(0, ViewKind::Column).modifier(modifier)
}

pub fn Stack(modifier: Modifier) -> View {
    View::new(0, ViewKind::Stack).modifier(modifier)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(
        0,
        ViewKind::Text {
            text: text.into(),
            color: theme().on_surface,
            font_size: 16.0 * text_scale().0,
            soft_wrap: false,
        },
    )
}

pub fn Spacer() -> View {
    Box(Modifier::new().flex_grow(1.0))
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    let t = theme();
    View::new(
        0,
        ViewKind::Button {
            text: text.into(),
            colors: ButtonColors {
                bg: t.button_bg,
                bg_hover: t.button_bg_hover,
                bg_pressed: t.button_bg_pressed,
                fg: t.on_primary,
            },
            enabled: true,
            on_click: Some(Rc::new(on_click)),
        },
    )
}

/// Single-line input. `key` must be stable across frames; it addresses the
/// field's state in [`textfield::field_state`].
pub fn TextField(key: u64, hint: impl Into<String>) -> View {
    text_input(key, hint, 1)
}

/// Multi-line input, `rows` lines tall.
pub fn TextArea(key: u64, hint: impl Into<String>, rows: u32) -> View {
    text_input(key, hint, rows.max(2))
}

fn text_input(key: u64, hint: impl Into<String>, rows: u32) -> View {
    let t = theme();
    View::new(
        0,
        ViewKind::TextField {
            state_key: key,
            hint: hint.into(),
            rows,
            colors: FieldColors {
                bg: t.surface,
                text: t.on_surface,
                hint: t.muted,
                border: t.outline,
                border_focused: t.primary,
                caret: t.on_surface,
            },
        },
    )
}

pub trait TextExt {
    fn text_size(self, px: f32) -> View;
    fn text_color(self, color: Color) -> View;
    /// Wrap at the laid-out width instead of hugging one line.
    fn wrap(self) -> View;
}

impl TextExt for View {
    fn text_size(mut self, px: f32) -> View {
        if let ViewKind::Text { font_size, .. } = &mut self.kind {
            *font_size = px * text_scale().0;
        }
        self
    }
    fn text_color(mut self, c: Color) -> View {
        if let ViewKind::Text { color, .. } = &mut self.kind {
            *color = c;
        }
        self
    }
    fn wrap(mut self) -> View {
        if let ViewKind::Text { soft_wrap, .. } = &mut self.kind {
            *soft_wrap = true;
        }
        self
    }
}

pub trait ButtonExt {
    fn enabled(self, enabled: bool) -> View;
    fn button_colors(self, colors: ButtonColors) -> View;
}

impl ButtonExt for View {
    fn enabled(mut self, value: bool) -> View {
        if let ViewKind::Button { enabled, .. } = &mut self.kind {
            *enabled = value;
        }
        self
    }
    fn button_colors(mut self, value: ButtonColors) -> View {
        if let ViewKind::Button { colors, .. } = &mut self.kind {
            *colors = value;
        }
        self
    }
}

/// Extension trait for child building.
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(self, children: impl IntoChildren) -> Self {
        self.with_children(children.into_children())
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J);

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn paint(root: &View, size: (u32, u32)) -> (Scene, Vec<HitRegion>) {
        layout_and_paint(root, size, 1.0, &Interactions::default(), None)
    }

    #[test]
    fn column_stacks_children_and_publishes_bounds() {
        let first = BoundsHandle::new();
        let second = BoundsHandle::new();

        let root = Surface(
            Modifier::new().fill_max_size(),
            Column(Modifier::new()).child((
                Box(Modifier::new()
                    .height(100.0)
                    .fill_max_width()
                    .track_bounds(first.clone())),
                Box(Modifier::new()
                    .height(50.0)
                    .fill_max_width()
                    .track_bounds(second.clone())),
            )),
        );

        paint(&root, (800, 600));

        let a = first.get().unwrap();
        let b = second.get().unwrap();
        assert_eq!(a.y, 0.0);
        assert_eq!(a.h, 100.0);
        assert_eq!(b.y, 100.0);
        assert_eq!(b.h, 50.0);
        assert_eq!(a.w, 800.0);
    }

    #[test]
    fn scroll_container_feeds_viewport_and_content_space_bounds() {
        let vp = Viewport::new();
        let state = std::rc::Rc::new(ScrollState::with_viewport(vp.clone()));
        let tracked = BoundsHandle::new();

        let content = Column(Modifier::new()).child(vec![
            Box(Modifier::new().height(500.0).fill_max_width()),
            Box(Modifier::new()
                .height(300.0)
                .fill_max_width()
                .track_bounds(tracked.clone())),
            Box(Modifier::new().height(500.0).fill_max_width()),
        ]);

        let root = Surface(
            Modifier::new().fill_max_size(),
            ScrollArea(Modifier::new().fill_max_size(), state.clone(), content),
        );

        paint(&root, (800, 600));
        assert_eq!(vp.height.get(), 600.0);
        assert_eq!(state.max_offset(), 1300.0 - 600.0);

        // Content-space bounds are scroll-independent.
        let before = tracked.get().unwrap();
        assert_eq!(before.y, 500.0);

        state.set_offset(400.0);
        paint(&root, (800, 600));
        let after = tracked.get().unwrap();
        assert_eq!(after.y, 500.0);
    }

    #[test]
    fn scrolling_reveals_a_one_shot_section() {
        let vp = Viewport::new();
        let state = std::rc::Rc::new(ScrollState::with_viewport(vp.clone()));

        let ctrl = RevealController::new(RevealPolicy::once().threshold(0.2));
        ctrl.attach(&vp);

        let content = Column(Modifier::new()).child(vec![
            Box(Modifier::new().height(900.0).fill_max_width()),
            Box(Modifier::new()
                .height(400.0)
                .fill_max_width()
                .track_bounds(ctrl.bounds().clone())),
        ]);
        let root = Surface(
            Modifier::new().fill_max_size(),
            ScrollArea(Modifier::new().fill_max_size(), state.clone(), content),
        );

        // First frame: section fully below the fold.
        paint(&root, (800, 600));
        assert!(!ctrl.is_revealed());

        // Scroll until 25% of it is visible (threshold 0.2).
        state.set_offset(400.0);
        assert!(ctrl.is_revealed());
    }

    #[test]
    fn hidden_subtrees_emit_no_hit_regions() {
        let clicked = std::rc::Rc::new(Cell::new(false));
        let root = Surface(
            Modifier::new().fill_max_size(),
            Box(Modifier::new().alpha(0.0)).child(Button("hi", {
                let clicked = clicked.clone();
                move || clicked.set(true)
            })),
        );
        let (_, hits) = paint(&root, (800, 600));
        assert!(hits.iter().all(|h| h.on_click.is_none()));
    }

    #[test]
    fn buttons_are_focusable_hit_regions() {
        let root = Surface(
            Modifier::new().fill_max_size(),
            Column(Modifier::new()).child((Button("a", || {}), Button("b", || {}))),
        );
        let (_, hits) = paint(&root, (800, 600));
        let focusable: Vec<_> = hits.iter().filter(|h| h.focusable).collect();
        assert_eq!(focusable.len(), 2);
        assert!(focusable[0].rect.h > 0.0);
    }

    #[test]
    fn offscreen_button_is_clipped_out_of_hits() {
        let state = std::rc::Rc::new(ScrollState::new());
        let content = Column(Modifier::new()).child(vec![
            Box(Modifier::new().height(2000.0).fill_max_width()),
            Button("below the fold", || {}),
        ]);
        let root = Surface(
            Modifier::new().fill_max_size(),
            ScrollArea(Modifier::new().fill_max_size(), state, content),
        );
        let (_, hits) = paint(&root, (800, 600));
        assert!(!hits.iter().any(|h| h.focusable));
    }
}
