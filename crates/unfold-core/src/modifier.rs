use std::rc::Rc;

use taffy::{AlignItems, AlignSelf, JustifyContent};

use crate::color::Color;
use crate::geometry::{Size, Vec2};
use crate::viewport::BoundsHandle;

#[derive(Clone, Copy, Debug)]
pub struct Border {
    pub width: f32,
    pub color: Color,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PaddingValues {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl PaddingValues {
    pub fn all(v: f32) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }

    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            left: horizontal,
            right: horizontal,
            top: vertical,
            bottom: vertical,
        }
    }
}

/// Chainable per-view styling and behavior flags, resolved by the layout
/// pass. `alpha` and `offset_y` are presentation-only: they move and fade
/// what is painted without participating in layout, which is what the reveal
/// transitions ride on.
#[derive(Clone, Default)]
pub struct Modifier {
    pub size: Option<Size>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill_max: bool,
    pub fill_max_w: bool,
    pub fill_max_h: bool,
    pub padding: Option<PaddingValues>,
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    pub gap: Option<f32>,
    pub background: Option<Color>,
    pub border: Option<Border>,
    pub flex_grow: Option<f32>,
    pub flex_basis: Option<f32>,
    pub align_self: Option<AlignSelf>,
    pub justify_content: Option<JustifyContent>,
    pub align_items_container: Option<AlignItems>,
    pub clip: bool,
    pub clip_radius: f32,
    pub z_index: f32,
    pub on_click: Option<Rc<dyn Fn()>>,
    pub on_scroll: Option<Rc<dyn Fn(Vec2) -> Vec2>>,
    pub alpha: Option<f32>,
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
    pub absolute: bool,
    pub inset_left: Option<f32>,
    pub inset_right: Option<f32>,
    pub inset_top: Option<f32>,
    pub inset_bottom: Option<f32>,
    pub track_bounds: Option<BoundsHandle>,
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier")
            .field("size", &self.size)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fill_max", &self.fill_max)
            .field("padding", &self.padding)
            .field("background", &self.background)
            .field("border", &self.border)
            .field("flex_grow", &self.flex_grow)
            .field("alpha", &self.alpha)
            .field("offset_y", &self.offset_y)
            .field("on_click", &self.on_click.as_ref().map(|_| "..."))
            .field("on_scroll", &self.on_scroll.as_ref().map(|_| "..."))
            .field("track_bounds", &self.track_bounds.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Size {
            width: w,
            height: h,
        });
        self
    }
    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }
    pub fn height(mut self, h: f32) -> Self {
        self.height = Some(h);
        self
    }
    pub fn fill_max_size(mut self) -> Self {
        self.fill_max = true;
        self
    }
    pub fn fill_max_width(mut self) -> Self {
        self.fill_max_w = true;
        self
    }
    pub fn fill_max_height(mut self) -> Self {
        self.fill_max_h = true;
        self
    }
    pub fn padding(mut self, v: f32) -> Self {
        self.padding = Some(PaddingValues::all(v));
        self
    }
    pub fn padding_xy(mut self, horizontal: f32, vertical: f32) -> Self {
        self.padding = Some(PaddingValues::symmetric(horizontal, vertical));
        self
    }
    pub fn padding_values(mut self, padding: PaddingValues) -> Self {
        self.padding = Some(padding);
        self
    }
    pub fn min_width(mut self, w: f32) -> Self {
        self.min_width = Some(w);
        self
    }
    pub fn min_height(mut self, h: f32) -> Self {
        self.min_height = Some(h);
        self
    }
    pub fn max_width(mut self, w: f32) -> Self {
        self.max_width = Some(w);
        self
    }
    pub fn max_height(mut self, h: f32) -> Self {
        self.max_height = Some(h);
        self
    }
    /// Spacing between the children of a Row/Column.
    pub fn gap(mut self, v: f32) -> Self {
        self.gap = Some(v);
        self
    }
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
    pub fn border(mut self, width: f32, color: Color, radius: f32) -> Self {
        self.border = Some(Border {
            width,
            color,
            radius,
        });
        self
    }
    pub fn flex_grow(mut self, v: f32) -> Self {
        self.flex_grow = Some(v);
        self
    }
    pub fn flex_basis(mut self, v: f32) -> Self {
        self.flex_basis = Some(v);
        self
    }
    /// Equal share of the container's main axis.
    pub fn weight(self, grow: f32) -> Self {
        self.flex_grow(grow).flex_basis(0.0)
    }
    pub fn align_self(mut self, a: AlignSelf) -> Self {
        self.align_self = Some(a);
        self
    }
    pub fn align_self_center(mut self) -> Self {
        self.align_self = Some(AlignSelf::Center);
        self
    }
    pub fn justify_content(mut self, j: JustifyContent) -> Self {
        self.justify_content = Some(j);
        self
    }
    pub fn align_items(mut self, a: AlignItems) -> Self {
        self.align_items_container = Some(a);
        self
    }
    pub fn clip_rounded(mut self, radius: f32) -> Self {
        self.clip = true;
        self.clip_radius = radius;
        self
    }
    pub fn z_index(mut self, z: f32) -> Self {
        self.z_index = z;
        self
    }
    pub fn clickable(mut self, f: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }
    pub fn on_scroll(mut self, f: impl Fn(Vec2) -> Vec2 + 'static) -> Self {
        self.on_scroll = Some(Rc::new(f));
        self
    }
    pub fn alpha(mut self, a: f32) -> Self {
        self.alpha = Some(a);
        self
    }
    /// Paint-time horizontal translation (positive moves right).
    pub fn offset_x(mut self, dx: f32) -> Self {
        self.offset_x = Some(dx);
        self
    }
    /// Paint-time vertical translation (positive moves down).
    pub fn offset_y(mut self, dy: f32) -> Self {
        self.offset_y = Some(dy);
        self
    }
    pub fn absolute(mut self) -> Self {
        self.absolute = true;
        self
    }
    pub fn inset(
        mut self,
        left: Option<f32>,
        top: Option<f32>,
        right: Option<f32>,
        bottom: Option<f32>,
    ) -> Self {
        self.inset_left = left;
        self.inset_top = top;
        self.inset_right = right;
        self.inset_bottom = bottom;
        self
    }
    /// Publish this view's laid-out rect to `handle` every frame.
    pub fn track_bounds(mut self, handle: BoundsHandle) -> Self {
        self.track_bounds = Some(handle);
        self
    }
}
