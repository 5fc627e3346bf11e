use std::rc::Rc;

use crate::color::Color;
use crate::geometry::{Rect, Vec2};
use crate::modifier::Modifier;

pub type ViewId = u64;

pub type Callback = Rc<dyn Fn()>;
pub type ScrollCallback = Rc<dyn Fn(Vec2) -> Vec2>;

/// Colors a button was composed with. Resolved from the theme at
/// composition time, since the paint pass runs outside the locals frame.
#[derive(Clone, Copy, Debug)]
pub struct ButtonColors {
    pub bg: Color,
    pub bg_hover: Color,
    pub bg_pressed: Color,
    pub fg: Color,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldColors {
    pub bg: Color,
    pub text: Color,
    pub hint: Color,
    pub border: Color,
    pub border_focused: Color,
    pub caret: Color,
}

#[derive(Clone)]
pub enum ViewKind {
    Surface,
    Box,
    Row,
    Column,
    Stack,
    ScrollV {
        on_scroll: Option<ScrollCallback>,
        set_viewport_height: Option<Rc<dyn Fn(f32)>>,
        set_content_height: Option<Rc<dyn Fn(f32)>>,
        get_scroll_offset: Option<Rc<dyn Fn() -> f32>>,
    },
    Text {
        text: String,
        color: Color,
        font_size: f32,
        soft_wrap: bool,
    },
    Button {
        text: String,
        colors: ButtonColors,
        enabled: bool,
        on_click: Option<Callback>,
    },
    TextField {
        /// Stable key into the text-field state registry.
        state_key: u64,
        hint: String,
        rows: u32,
        colors: FieldColors,
    },
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Surface => write!(f, "Surface"),
            ViewKind::Box => write!(f, "Box"),
            ViewKind::Row => write!(f, "Row"),
            ViewKind::Column => write!(f, "Column"),
            ViewKind::Stack => write!(f, "Stack"),
            ViewKind::ScrollV { .. } => write!(f, "ScrollV"),
            ViewKind::Text {
                text,
                color,
                font_size,
                soft_wrap,
            } => f
                .debug_struct("Text")
                .field("text", text)
                .field("color", color)
                .field("font_size", font_size)
                .field("soft_wrap", soft_wrap)
                .finish(),
            ViewKind::Button { text, enabled, .. } => f
                .debug_struct("Button")
                .field("text", text)
                .field("enabled", enabled)
                .field("on_click", &"<callback>")
                .finish(),
            ViewKind::TextField {
                state_key,
                hint,
                rows,
                ..
            } => f
                .debug_struct("TextField")
                .field("state_key", state_key)
                .field("hint", hint)
                .field("rows", rows)
                .finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            modifier: Modifier::default(),
            children: vec![],
        }
    }
    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
}

/// Renderable scene for one frame. Alpha and translation are already
/// resolved into the nodes; the backend only rasterizes.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
        radius: f32,
    },
    Border {
        rect: Rect,
        color: Color,
        width: f32,
        radius: f32,
    },
    Text {
        pos: Vec2,
        text: String,
        color: Color,
        size: f32,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
}
