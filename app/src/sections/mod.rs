//! The page's sections. Each picks one deliberate reveal policy (one-shot
//! card cascades, repeatable section fades) instead of the ad-hoc mix the
//! layout could otherwise drift into.

pub mod certifications;
pub mod contact;
pub mod education;
pub mod experience;
pub mod footer;
pub mod hero;
pub mod message;
pub mod projects;
pub mod publications;
pub mod skills;

use std::rc::Rc;
use std::time::Duration;

use unfold_core::prelude::*;
use unfold_ui::*;

use crate::app::PageState;
use crate::content::SectionId;

pub const SECTION_MAX_WIDTH: f32 = 960.0;
pub const SECTION_GAP: f32 = 24.0;

/// Section shell: full-width band tracked for the scroll spy, content
/// centered in a measured column.
pub fn Section(page: &Rc<PageState>, id: SectionId, content: Vec<View>) -> View {
    Column(
        Modifier::new()
            .fill_max_width()
            .padding_xy(24.0, 48.0)
            .align_items(AlignItems::Center)
            .track_bounds(page.handle(id)),
    )
    .child(
        Column(
            Modifier::new()
                .fill_max_width()
                .max_width(SECTION_MAX_WIDTH)
                .gap(SECTION_GAP),
        )
        .child(content),
    )
}

pub fn SectionTitle(label: &str) -> View {
    Column(Modifier::new().fill_max_width().align_items(AlignItems::Center))
        .child(Text(label).text_size(30.0))
}

/// Card chrome shared by the experience/project/certification tiles.
pub fn Card(content: Vec<View>) -> View {
    Column(
        Modifier::new()
            .fill_max_width()
            .padding(20.0)
            .gap(12.0)
            .background(theme().surface)
            .border(1.0, theme().outline, 10.0),
    )
    .child(content)
}

pub fn TagChip(label: &str, accent: Color) -> View {
    Box(Modifier::new()
        .padding_xy(10.0, 4.0)
        .background(accent.with_alpha(36))
        .border(1.0, accent.with_alpha(110), 12.0))
    .child(Text(label).text_size(13.0).text_color(theme().on_surface))
}

/// Fixed-columns grid out of Rows; trailing cells are padded so widths stay
/// equal on a short last row.
pub fn Grid(children: Vec<View>, per_row: usize, gap: f32) -> View {
    let per_row = per_row.max(1);
    let mut rows: Vec<View> = Vec::new();
    let mut iter = children.into_iter().peekable();
    while iter.peek().is_some() {
        let mut cells: Vec<View> = Vec::new();
        for _ in 0..per_row {
            let cell = Box(Modifier::new().weight(1.0));
            cells.push(match iter.next() {
                Some(child) => cell.child(child),
                None => cell,
            });
        }
        rows.push(Row(Modifier::new().fill_max_width().gap(gap)).child(cells));
    }
    Column(Modifier::new().fill_max_width().gap(gap)).child(rows)
}

/// Per-element entrance driven by a section's reveal state: fade plus a
/// small slide, with a presentation delay for cascades.
pub fn entrance(key: &str, shown: bool, delay: Duration, from_dy: f32) -> Modifier {
    let spec =
        AnimationSpec::tween(Duration::from_millis(500), Easing::EaseOut).delayed(delay);
    let alpha = animate_f32(format!("enter.a:{key}"), if shown { 1.0 } else { 0.0 }, spec);
    let dy = animate_f32(
        format!("enter.y:{key}"),
        if shown { 0.0 } else { from_dy },
        spec,
    );
    Modifier::new().alpha(alpha).offset_y(dy)
}
