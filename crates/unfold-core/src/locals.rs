//! Composition locals: global UI parameters scoped to a subtree.
//!
//! - `Theme` — semantic colors for surfaces, text, and controls.
//! - `TextScale` — user text scaling.
//! - `Viewport` — the page scroll viewport reveal controllers observe.
//!
//! Override for a subtree with `with_theme` / `with_text_scale` /
//! `with_viewport`; getters fall back to defaults outside any frame.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::color::Color;
use crate::viewport::Viewport;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = const { RefCell::new(Vec::new()) };
    static DEFAULT_VIEWPORT: Viewport = Viewport::new();
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Frame guard ensures pop on unwind
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        } else {
            let mut m = HashMap::new();
            m.insert(t, v);
            st.borrow_mut().push(m);
        }
    });
}

fn get_local<T: Clone + 'static>() -> Option<T> {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return Some(t.clone());
            }
        }
        None
    })
}

/// Semantic color theme used by widgets. Intentionally small; sections pick
/// their own accents from content constants where the palette is not enough.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Window background / page root.
    pub background: Color,
    /// Card and panel surfaces.
    pub surface: Color,
    /// Primary foreground on top of `surface`/`background`.
    pub on_surface: Color,
    /// Low-emphasis text.
    pub muted: Color,
    /// Accent for buttons, active nav links, highlights.
    pub primary: Color,
    /// Foreground on top of `primary`.
    pub on_primary: Color,
    /// Low-emphasis outline/border.
    pub outline: Color,
    /// Focus rings.
    pub focus: Color,
    pub button_bg: Color,
    pub button_bg_hover: Color,
    pub button_bg_pressed: Color,
    pub scrollbar_track: Color,
    pub scrollbar_thumb: Color,
    pub error: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_hex("#121212"),
            surface: Color::from_hex("#1E1E1E"),
            on_surface: Color::from_hex("#DDDDDD"),
            muted: Color::from_hex("#888888"),
            primary: Color::from_hex("#34AF82"),
            on_primary: Color::WHITE,
            outline: Color::from_hex("#555555"),
            focus: Color::from_hex("#88CCFF"),
            button_bg: Color::from_hex("#34AF82"),
            button_bg_hover: Color::from_hex("#2A8F6A"),
            button_bg_pressed: Color::from_hex("#1F7556"),
            scrollbar_track: Color(0xDD, 0xDD, 0xDD, 32),
            scrollbar_thumb: Color(0xDD, 0xDD, 0xDD, 140),
            error: Color::from_hex("#AE3636"),
            success: Color::from_hex("#2E7D52"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TextScale(pub f32);

impl Default for TextScale {
    fn default() -> Self {
        Self(1.0)
    }
}

pub fn with_theme<R>(theme: Theme, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<Theme>(), Box::new(theme));
        f()
    })
}

pub fn with_text_scale<R>(ts: TextScale, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<TextScale>(), Box::new(ts));
        f()
    })
}

pub fn with_viewport<R>(viewport: Viewport, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<Viewport>(), Box::new(viewport));
        f()
    })
}

pub fn theme() -> Theme {
    get_local::<Theme>().unwrap_or_default()
}

pub fn text_scale() -> TextScale {
    get_local::<TextScale>().unwrap_or_default()
}

/// The innermost viewport local; a detached per-thread default otherwise.
pub fn viewport() -> Viewport {
    get_local::<Viewport>().unwrap_or_else(|| DEFAULT_VIEWPORT.with(|v| v.clone()))
}
