//! Layout and paint: view tree -> taffy flexbox -> scene + hit regions.
//!
//! One pass per frame. Besides painting, the walk feeds the scroll
//! viewport's extents, publishes every `track_bounds` handle in
//! content-space logical units (what the visibility observers compare
//! against), and resolves presentation alpha/offsets into the emitted
//! nodes so the render backend only rasterizes.
//!
//! Units: the view tree and all modifier values are logical; `scale` maps
//! them to physical pixels. The scene and hit regions are physical, the
//! viewport/bounds signals logical.

use std::collections::{HashMap, HashSet};

use taffy::prelude::{TaffyTree, auto, length, percent};
use taffy::{
    AlignItems, AvailableSpace, Display, FlexDirection, JustifyContent, Overflow, Point, Position,
    Style,
};

use unfold_core::prelude::*;

use crate::text;
use crate::textfield::{self, TF_FONT, TF_PAD_X, TF_PAD_Y};

pub const BTN_FONT: f32 = 15.0;
pub const BTN_PAD_X: f32 = 16.0;
pub const BTN_HEIGHT: f32 = 38.0;
pub const BTN_RADIUS: f32 = 6.0;

const SCROLLBAR_W: f32 = 6.0;
const SCROLLBAR_TRACK: Color = Color(0, 0, 0, 24);
const SCROLLBAR_THUMB: Color = Color(0, 0, 0, 90);

/// Pointer interaction snapshot the platform feeds into painting.
#[derive(Default)]
pub struct Interactions {
    pub hover: Option<u64>,
    pub pressed: HashSet<u64>,
}

#[derive(Clone)]
enum NodeCtx {
    Text {
        text: String,
        font: f32,
        soft_wrap: bool,
    },
    Button {
        label: String,
    },
    TextField {
        rows: u32,
    },
    Container,
    Scroll,
}

pub fn layout_and_paint(
    root: &View,
    size_px: (u32, u32),
    scale: f32,
    interactions: &Interactions,
    focused: Option<u64>,
) -> (Scene, Vec<HitRegion>) {
    let scale = if scale > 0.0 { scale } else { 1.0 };
    let px = move |v: f32| v * scale;

    // Stable ids by traversal order.
    let mut next_id = 1u64;
    fn stamp(mut v: View, id: &mut u64) -> View {
        v.id = *id;
        *id += 1;
        v.children = v.children.into_iter().map(|c| stamp(c, id)).collect();
        v
    }
    let root = stamp(root.clone(), &mut next_id);

    let mut taffy: TaffyTree<NodeCtx> = TaffyTree::new();
    let mut nodes: HashMap<ViewId, taffy::NodeId> = HashMap::new();
    let root_node = build_node(&root, &mut taffy, &mut nodes, &px);

    {
        let mut rs = taffy.style(root_node).unwrap().clone();
        rs.size.width = length(size_px.0 as f32);
        rs.size.height = length(size_px.1 as f32);
        taffy.set_style(root_node, rs).unwrap();
    }

    let available = taffy::geometry::Size {
        width: AvailableSpace::Definite(size_px.0 as f32),
        height: AvailableSpace::Definite(size_px.1 as f32),
    };

    taffy
        .compute_layout_with_measure(root_node, available, |known, avail, _node, ctx, _style| {
            match ctx {
                Some(NodeCtx::Text {
                    text: content,
                    font,
                    soft_wrap,
                }) => {
                    let font_px = px(*font);
                    let line_h = text::line_height(font_px);
                    let single_w = text::line_width(content, font_px);

                    if *soft_wrap {
                        let wrap_w = known.width.unwrap_or(match avail.width {
                            AvailableSpace::Definite(w) => w,
                            _ => single_w,
                        });
                        let lines = text::wrap_lines(content, font_px, wrap_w);
                        let w = lines
                            .iter()
                            .map(|l| text::line_width(l, font_px))
                            .fold(0.0f32, f32::max);
                        taffy::geometry::Size {
                            width: known.width.unwrap_or(w.min(wrap_w)),
                            height: line_h * lines.len().max(1) as f32,
                        }
                    } else {
                        taffy::geometry::Size {
                            width: known.width.unwrap_or(single_w),
                            height: line_h,
                        }
                    }
                }
                Some(NodeCtx::Button { label }) => taffy::geometry::Size {
                    width: known
                        .width
                        .unwrap_or(text::line_width(label, px(BTN_FONT)) + px(BTN_PAD_X) * 2.0),
                    height: known.height.unwrap_or(px(BTN_HEIGHT)),
                },
                Some(NodeCtx::TextField { rows }) => {
                    let line_h = text::line_height(px(TF_FONT));
                    taffy::geometry::Size {
                        width: known.width.unwrap_or(px(240.0)),
                        height: known
                            .height
                            .unwrap_or(line_h * (*rows).max(1) as f32 + px(TF_PAD_Y) * 2.0),
                    }
                }
                Some(NodeCtx::Scroll) | Some(NodeCtx::Container) | None => {
                    taffy::geometry::Size::ZERO
                }
            }
        })
        .unwrap();

    let mut painter = Painter {
        scene: Scene {
            clear_color: root.modifier.background.unwrap_or(Color::BLACK),
            nodes: Vec::new(),
        },
        hits: Vec::new(),
        scale,
        interactions,
        focused,
        clips: Vec::new(),
    };
    painter.walk(
        &root,
        &taffy,
        &nodes,
        PaintFrame {
            origin: Vec2::default(),
            translate: Vec2::default(),
            alpha: 1.0,
            track_origin: None,
        },
    );

    (painter.scene, painter.hits)
}

/// Per-subtree paint frame: accumulated origin, presentation translation,
/// alpha, and the screen position of the scroll content's origin (for
/// content-space bounds publication).
#[derive(Clone, Copy)]
struct PaintFrame {
    origin: Vec2,
    translate: Vec2,
    alpha: f32,
    track_origin: Option<Vec2>,
}

struct Painter<'a> {
    scene: Scene,
    hits: Vec<HitRegion>,
    scale: f32,
    interactions: &'a Interactions,
    focused: Option<u64>,
    clips: Vec<Rect>,
}

fn build_node(
    v: &View,
    t: &mut TaffyTree<NodeCtx>,
    nodes: &mut HashMap<ViewId, taffy::NodeId>,
    px: &impl Fn(f32) -> f32,
) -> taffy::NodeId {
    let style = style_from_modifier(&v.modifier, &v.kind, px);

    let node = match &v.kind {
        ViewKind::Text {
            text,
            font_size,
            soft_wrap,
            ..
        } => t
            .new_leaf_with_context(
                style,
                NodeCtx::Text {
                    text: text.clone(),
                    font: *font_size,
                    soft_wrap: *soft_wrap,
                },
            )
            .unwrap(),
        ViewKind::Button { text, .. } => t
            .new_leaf_with_context(
                style,
                NodeCtx::Button {
                    label: text.clone(),
                },
            )
            .unwrap(),
        ViewKind::TextField { rows, .. } => t
            .new_leaf_with_context(style, NodeCtx::TextField { rows: *rows })
            .unwrap(),
        ViewKind::ScrollV { .. } => {
            let children: Vec<_> = v
                .children
                .iter()
                .map(|c| build_node(c, t, nodes, px))
                .collect();
            let n = t.new_with_children(style, &children).unwrap();
            t.set_node_context(n, Some(NodeCtx::Scroll)).ok();
            n
        }
        _ => {
            let children: Vec<_> = v
                .children
                .iter()
                .map(|c| build_node(c, t, nodes, px))
                .collect();
            let n = t.new_with_children(style, &children).unwrap();
            t.set_node_context(n, Some(NodeCtx::Container)).ok();
            n
        }
    };

    nodes.insert(v.id, node);
    node
}

fn style_from_modifier(m: &Modifier, kind: &ViewKind, px: &impl Fn(f32) -> f32) -> Style {
    let mut s = Style {
        display: Display::Flex,
        ..Style::default()
    };

    s.flex_direction = match kind {
        ViewKind::Row => FlexDirection::Row,
        _ => FlexDirection::Column,
    };

    s.align_items = Some(match kind {
        ViewKind::Row | ViewKind::Column | ViewKind::Surface | ViewKind::Stack => {
            AlignItems::Stretch
        }
        ViewKind::ScrollV { .. } => AlignItems::Stretch,
        _ => AlignItems::FlexStart,
    });
    s.justify_content = Some(JustifyContent::FlexStart);

    if let Some(a) = m.align_items_container {
        s.align_items = Some(a);
    }
    if let Some(j) = m.justify_content {
        s.justify_content = Some(j);
    }
    if let Some(a) = m.align_self {
        s.align_self = Some(a);
    }

    if let Some(sz) = m.size {
        s.size.width = length(px(sz.width));
        s.size.height = length(px(sz.height));
    }
    if let Some(w) = m.width {
        s.size.width = length(px(w));
    }
    if let Some(h) = m.height {
        s.size.height = length(px(h));
    }
    if m.fill_max {
        s.size.width = percent(1.0);
        s.size.height = percent(1.0);
    }
    if m.fill_max_w {
        s.size.width = percent(1.0);
    }
    if m.fill_max_h {
        s.size.height = percent(1.0);
    }
    if let Some(w) = m.min_width {
        s.min_size.width = length(px(w));
    }
    if let Some(h) = m.min_height {
        s.min_size.height = length(px(h));
    }
    if let Some(w) = m.max_width {
        s.max_size.width = length(px(w));
    }
    if let Some(h) = m.max_height {
        s.max_size.height = length(px(h));
    }

    if let Some(p) = m.padding {
        s.padding = taffy::geometry::Rect {
            left: length(px(p.left)),
            right: length(px(p.right)),
            top: length(px(p.top)),
            bottom: length(px(p.bottom)),
        };
    }
    if let Some(g) = m.gap {
        s.gap = taffy::geometry::Size {
            width: length(px(g)),
            height: length(px(g)),
        };
    }
    if let Some(g) = m.flex_grow {
        s.flex_grow = g;
    }
    if let Some(b) = m.flex_basis {
        s.flex_basis = length(px(b.max(0.0)));
    }

    if m.absolute {
        s.position = Position::Absolute;
        s.inset = taffy::geometry::Rect {
            left: m.inset_left.map(|v| length(px(v))).unwrap_or_else(auto),
            right: m.inset_right.map(|v| length(px(v))).unwrap_or_else(auto),
            top: m.inset_top.map(|v| length(px(v))).unwrap_or_else(auto),
            bottom: m.inset_bottom.map(|v| length(px(v))).unwrap_or_else(auto),
        };
    }

    if matches!(kind, ViewKind::ScrollV { .. }) {
        s.overflow = Point {
            x: Overflow::Visible,
            y: Overflow::Scroll,
        };
        s.scrollbar_width = 0.0;
    }

    s
}

impl Painter<'_> {
    fn px(&self, v: f32) -> f32 {
        v * self.scale
    }

    fn clip_rect(&self) -> Option<Rect> {
        self.clips.last().copied()
    }

    fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_rect() {
            Some(outer) => outer.intersect(&rect),
            None => rect,
        };
        self.scene.nodes.push(SceneNode::PushClip { rect: effective });
        self.clips.push(effective);
    }

    fn pop_clip(&mut self) {
        self.scene.nodes.push(SceneNode::PopClip);
        self.clips.pop();
    }

    fn walk(
        &mut self,
        v: &View,
        t: &TaffyTree<NodeCtx>,
        nodes: &HashMap<ViewId, taffy::NodeId>,
        frame: PaintFrame,
    ) {
        let layout = t.layout(nodes[&v.id]).unwrap();
        let m = &v.modifier;

        let translate = Vec2 {
            x: frame.translate.x + m.offset_x.map(|d| self.px(d)).unwrap_or(0.0),
            y: frame.translate.y + m.offset_y.map(|d| self.px(d)).unwrap_or(0.0),
        };
        let alpha = frame.alpha * m.alpha.unwrap_or(1.0);

        // Layout-stable position (before presentation translation).
        let pos = Vec2 {
            x: frame.origin.x + layout.location.x,
            y: frame.origin.y + layout.location.y,
        };
        let rect = Rect::new(
            pos.x + translate.x,
            pos.y + translate.y,
            layout.size.width,
            layout.size.height,
        );

        // Bounds are published from the untranslated position so a reveal
        // slide cannot feed back into its own visibility.
        if let Some(handle) = &m.track_bounds {
            let (bx, by) = match frame.track_origin {
                Some(origin) => (pos.x - origin.x, pos.y - origin.y),
                None => (pos.x, pos.y),
            };
            handle.publish(Rect::new(
                bx / self.scale,
                by / self.scale,
                layout.size.width / self.scale,
                layout.size.height / self.scale,
            ));
        }

        if alpha <= 0.004 {
            return; // fully transparent subtrees skip paint and hits
        }

        let radius = m
            .border
            .map(|b| self.px(b.radius))
            .unwrap_or(self.px(m.clip_radius));
        if let Some(bg) = m.background {
            self.scene.nodes.push(SceneNode::Rect {
                rect,
                color: bg.mul_alpha(alpha),
                radius,
            });
        }
        if let Some(b) = m.border {
            self.scene.nodes.push(SceneNode::Border {
                rect,
                color: b.color.mul_alpha(alpha),
                width: self.px(b.width),
                radius: self.px(b.radius),
            });
        }

        // Generic interactive region from the modifier.
        if m.on_click.is_some() || m.on_scroll.is_some() {
            self.push_hit(HitRegion {
                id: v.id,
                rect,
                on_click: m.on_click.clone(),
                on_scroll: m.on_scroll.clone(),
                focusable: m.on_click.is_some(),
                tf_key: None,
                z_index: m.z_index,
            });
        }

        if m.clip {
            self.push_clip(rect);
        }

        match &v.kind {
            ViewKind::Text {
                text: content,
                color,
                font_size,
                soft_wrap,
            } => {
                let font_px = self.px(*font_size);
                let line_h = text::line_height(font_px);
                let col = color.mul_alpha(alpha);
                if *soft_wrap {
                    for (i, line) in text::wrap_lines(content, font_px, rect.w).iter().enumerate() {
                        self.scene.nodes.push(SceneNode::Text {
                            pos: Vec2 {
                                x: rect.x,
                                y: rect.y + line_h * i as f32,
                            },
                            text: line.clone(),
                            color: col,
                            size: font_px,
                        });
                    }
                } else {
                    self.scene.nodes.push(SceneNode::Text {
                        pos: Vec2 {
                            x: rect.x,
                            y: rect.y,
                        },
                        text: content.clone(),
                        color: col,
                        size: font_px,
                    });
                }
            }

            ViewKind::Button {
                text: label,
                colors,
                enabled,
                on_click,
            } => {
                let hovered = self.interactions.hover == Some(v.id);
                let pressed = self.interactions.pressed.contains(&v.id);
                let bg = if !*enabled {
                    colors.bg.mul_alpha(0.5)
                } else if pressed {
                    colors.bg_pressed
                } else if hovered {
                    colors.bg_hover
                } else {
                    colors.bg
                };
                self.scene.nodes.push(SceneNode::Rect {
                    rect,
                    color: bg.mul_alpha(alpha),
                    radius: self.px(BTN_RADIUS),
                });
                if self.focused == Some(v.id) {
                    self.scene.nodes.push(SceneNode::Border {
                        rect,
                        color: colors.fg.mul_alpha(alpha * 0.9),
                        width: self.px(2.0),
                        radius: self.px(BTN_RADIUS),
                    });
                }

                let font_px = self.px(BTN_FONT);
                let tw = text::line_width(label, font_px);
                let th = text::line_height(font_px);
                self.scene.nodes.push(SceneNode::Text {
                    pos: Vec2 {
                        x: rect.x + (rect.w - tw) / 2.0,
                        y: rect.y + (rect.h - th) / 2.0,
                    },
                    text: label.clone(),
                    color: colors.fg.mul_alpha(alpha),
                    size: font_px,
                });

                self.push_hit(HitRegion {
                    id: v.id,
                    rect,
                    on_click: if *enabled { on_click.clone() } else { None },
                    on_scroll: None,
                    focusable: *enabled,
                    tf_key: None,
                    z_index: m.z_index,
                });
            }

            ViewKind::TextField {
                state_key,
                hint,
                rows,
                colors,
            } => {
                self.paint_text_field(v.id, *state_key, hint, *rows, *colors, rect, alpha, m);
            }

            ViewKind::ScrollV {
                on_scroll,
                set_viewport_height,
                set_content_height,
                get_scroll_offset,
            } => {
                // Whole container catches wheel input, padding included.
                self.push_hit(HitRegion {
                    id: v.id,
                    rect,
                    on_click: None,
                    on_scroll: on_scroll.clone(),
                    focusable: false,
                    tf_key: None,
                    z_index: m.z_index,
                });

                let pad = m.padding.unwrap_or_default();
                let vp = Rect::new(
                    rect.x + self.px(pad.left),
                    rect.y + self.px(pad.top),
                    rect.w - self.px(pad.left + pad.right),
                    rect.h - self.px(pad.top + pad.bottom),
                );
                if let Some(set_vh) = set_viewport_height {
                    set_vh((vp.h / self.scale).max(0.0));
                }

                let content_h = v
                    .children
                    .iter()
                    .map(|c| {
                        let nid = nodes[&c.id];
                        let cl = t.layout(nid).unwrap();
                        cl.location.y + subtree_extent(nid, t) - self.px(pad.top)
                    })
                    .fold(0.0f32, f32::max);
                if let Some(set_ch) = set_content_height {
                    set_ch((content_h / self.scale).max(0.0));
                }

                let offset_px = get_scroll_offset.as_ref().map(|g| g()).unwrap_or(0.0) * self.scale;

                // Children paint shifted by the scroll offset; descendant
                // hit regions are clamped into the viewport by push_hit via
                // the clip stack.
                self.push_clip(vp);
                let child_frame = PaintFrame {
                    origin: Vec2 {
                        x: pos.x,
                        y: pos.y - offset_px,
                    },
                    translate,
                    alpha,
                    track_origin: Some(Vec2 {
                        x: pos.x + self.px(pad.left),
                        y: pos.y + self.px(pad.top) - offset_px,
                    }),
                };
                for c in &v.children {
                    self.walk(c, t, nodes, child_frame);
                }
                self.pop_clip();

                self.paint_scrollbar(vp, content_h, offset_px);
            }

            // Containers only paint decoration; children follow below.
            _ => {}
        }

        if !matches!(v.kind, ViewKind::ScrollV { .. }) {
            let child_frame = PaintFrame {
                origin: pos,
                translate,
                alpha,
                track_origin: frame.track_origin,
            };
            for c in &v.children {
                self.walk(c, t, nodes, child_frame);
            }
        }

        if m.clip {
            self.pop_clip();
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_text_field(
        &mut self,
        id: u64,
        state_key: u64,
        hint: &str,
        rows: u32,
        colors: FieldColors,
        rect: Rect,
        alpha: f32,
        m: &Modifier,
    ) {
        let focused = self.focused == Some(id);
        let font_px = self.px(TF_FONT);
        let line_h = text::line_height(font_px);

        self.scene.nodes.push(SceneNode::Rect {
            rect,
            color: colors.bg.mul_alpha(alpha),
            radius: self.px(BTN_RADIUS),
        });
        self.scene.nodes.push(SceneNode::Border {
            rect,
            color: if focused {
                colors.border_focused.mul_alpha(alpha)
            } else {
                colors.border.mul_alpha(alpha)
            },
            width: self.px(if focused { 2.0 } else { 1.0 }),
            radius: self.px(BTN_RADIUS),
        });

        let inner = Rect::new(
            rect.x + self.px(TF_PAD_X),
            rect.y + self.px(TF_PAD_Y),
            rect.w - self.px(TF_PAD_X) * 2.0,
            rect.h - self.px(TF_PAD_Y) * 2.0,
        );

        let state = textfield::field_state(state_key);
        let mut st = state.borrow_mut();
        st.inner_width = inner.w;

        self.push_clip(inner);
        if st.text.is_empty() {
            self.scene.nodes.push(SceneNode::Text {
                pos: Vec2 {
                    x: inner.x,
                    y: inner.y,
                },
                text: hint.to_string(),
                color: colors.hint.mul_alpha(alpha),
                size: font_px,
            });
            if focused {
                self.caret(inner.x, inner.y, line_h, colors, alpha);
            }
        } else if rows <= 1 {
            let caret_x = st.caret_x(font_px);
            st.ensure_caret_visible(caret_x, inner.w);
            let x0 = inner.x - st.scroll_x;
            self.scene.nodes.push(SceneNode::Text {
                pos: Vec2 { x: x0, y: inner.y },
                text: st.text.clone(),
                color: colors.text.mul_alpha(alpha),
                size: font_px,
            });
            if focused {
                self.caret(x0 + caret_x, inner.y, line_h, colors, alpha);
            }
        } else {
            let mapped = text::wrap_map(&st.text, font_px, inner.w);
            let caret = st.caret.min(st.text.len());
            let mut caret_pos = (0usize, 0.0f32);
            for (i, (line, start)) in mapped.iter().enumerate() {
                self.scene.nodes.push(SceneNode::Text {
                    pos: Vec2 {
                        x: inner.x,
                        y: inner.y + line_h * i as f32,
                    },
                    text: line.clone(),
                    color: colors.text.mul_alpha(alpha),
                    size: font_px,
                });
                if caret >= *start && caret <= start + line.len() {
                    caret_pos = (i, text::line_width(&line[..caret - start], font_px));
                }
            }
            if focused {
                self.caret(
                    inner.x + caret_pos.1,
                    inner.y + line_h * caret_pos.0 as f32,
                    line_h,
                    colors,
                    alpha,
                );
            }
        }
        self.pop_clip();

        self.push_hit(HitRegion {
            id,
            rect,
            on_click: None,
            on_scroll: None,
            focusable: true,
            tf_key: Some(state_key),
            z_index: m.z_index,
        });
    }

    fn caret(&mut self, x: f32, y: f32, line_h: f32, colors: FieldColors, alpha: f32) {
        self.scene.nodes.push(SceneNode::Rect {
            rect: Rect::new(x, y, self.px(1.5), line_h),
            color: colors.caret.mul_alpha(alpha),
            radius: 0.0,
        });
    }

    fn paint_scrollbar(&mut self, vp: Rect, content_h: f32, offset_px: f32) {
        if content_h <= vp.h || content_h <= 0.0 {
            return;
        }
        let track = Rect::new(
            vp.x + vp.w - self.px(SCROLLBAR_W),
            vp.y,
            self.px(SCROLLBAR_W),
            vp.h,
        );
        let thumb_h = (vp.h * vp.h / content_h).max(self.px(24.0));
        let max_off = content_h - vp.h;
        let t = (offset_px / max_off).clamp(0.0, 1.0);
        let thumb = Rect::new(
            track.x,
            track.y + t * (vp.h - thumb_h),
            track.w,
            thumb_h,
        );
        self.scene.nodes.push(SceneNode::Rect {
            rect: track,
            color: SCROLLBAR_TRACK,
            radius: self.px(3.0),
        });
        self.scene.nodes.push(SceneNode::Rect {
            rect: thumb,
            color: SCROLLBAR_THUMB,
            radius: self.px(3.0),
        });
    }

    fn push_hit(&mut self, mut hit: HitRegion) {
        if let Some(clip) = self.clip_rect() {
            hit.rect = hit.rect.intersect(&clip);
            if hit.rect.is_empty() {
                return;
            }
        }
        self.hits.push(hit);
    }
}

/// Height of a node's subtree measured from the node's own top edge.
fn subtree_extent(node: taffy::NodeId, t: &TaffyTree<NodeCtx>) -> f32 {
    let l = t.layout(node).unwrap();
    let mut h = l.size.height;
    if let Ok(children) = t.children(node) {
        for child in children {
            let cl = t.layout(child).unwrap();
            h = h.max(cl.location.y + subtree_extent(child, t));
        }
    }
    h
}
