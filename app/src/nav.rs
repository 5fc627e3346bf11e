//! Fixed navigation bar, scroll-spy highlighting, and the scroll-to-top
//! button.
//!
//! The spy is the page's one subscriber to the scroll offset: it maps the
//! probe line (offset + 100) onto the registered section bounds and feeds a
//! single `active` signal that every nav link reads. Links scroll with an
//! eased glide instead of jumping.

use std::rc::Rc;

use unfold_core::prelude::*;
use unfold_core::signal::SubId;
use unfold_ui::*;

use crate::app::PageState;
use crate::content::{self, NAV_ITEMS, OWNER_NAME, RESUME_URL, SectionId};
use crate::theme;

/// How far below the viewport top a section must reach to count as active.
pub const NAV_PROBE: f32 = 100.0;
/// Offset past which the bar turns solid.
pub const NAV_SOLID_AT: f32 = 50.0;
/// Offset past which the scroll-to-top button appears.
pub const TOP_BUTTON_AT: f32 = 500.0;

pub const NAV_HEIGHT: f32 = 56.0;

pub struct ScrollSpy {
    active: Signal<Option<SectionId>>,
    offset: Signal<f32>,
    sub: SubId,
}

impl ScrollSpy {
    pub fn attach(viewport: &Viewport, sections: Rc<Vec<(SectionId, BoundsHandle)>>) -> Self {
        let active = signal(None);
        let sub = viewport.offset.subscribe({
            let active = active.clone();
            move |off| {
                let target = spy_target(*off, &sections);
                if active.get() != target {
                    active.set(target);
                    request_frame();
                }
            }
        });
        Self {
            active,
            offset: viewport.offset.clone(),
            sub,
        }
    }

    pub fn active(&self) -> Option<SectionId> {
        self.active.get()
    }

    /// Idempotent; the spy stops following the viewport.
    pub fn release(&self) {
        self.offset.unsubscribe(self.sub);
    }
}

/// The section whose extent contains the probe line. Later sections win
/// when bounds overlap, matching document order.
pub fn spy_target(offset: f32, sections: &[(SectionId, BoundsHandle)]) -> Option<SectionId> {
    let probe = offset + NAV_PROBE;
    let mut found = None;
    for (id, handle) in sections {
        if let Some(r) = handle.get()
            && probe >= r.y
            && probe < r.y + r.h
        {
            found = Some(*id);
        }
    }
    found
}

pub fn NavBar(page: &Rc<PageState>) -> View {
    let t = theme();
    let scrolled = page.viewport.offset.get() > NAV_SOLID_AT;
    let active = page.spy.active();

    let bg = if scrolled {
        t.background.with_alpha(247)
    } else {
        Color::TRANSPARENT
    };

    let mut links: Vec<View> = Vec::new();
    for item in NAV_ITEMS {
        let is_active = active == Some(item.section);
        let fg = if is_active { t.primary } else { t.muted };
        let page = page.clone();
        let section = item.section;
        links.push(
            Button(item.label, move || page.scroll_to(section))
                .button_colors(theme::ghost_button(fg)),
        );
    }

    let brand = {
        let page = page.clone();
        Button(OWNER_NAME, move || page.scroll.animate_to(0.0))
            .button_colors(theme::ghost_button(t.primary))
    };

    let mut bar = Modifier::new()
        .fill_max_width()
        .height(NAV_HEIGHT)
        .padding_xy(24.0, 8.0)
        .gap(4.0)
        .align_items(AlignItems::Center)
        .background(bg)
        .z_index(10.0);
    if scrolled {
        bar = bar.border(1.0, t.outline, 0.0);
    }

    Row(bar).child((
        brand,
        Spacer(),
        links,
        Button("Resume", || content::open_link(RESUME_URL)),
    ))
}

pub fn ScrollToTop(page: &Rc<PageState>) -> View {
    let visible = page.viewport.offset.get() > TOP_BUTTON_AT;
    let spec = AnimationSpec::fast();
    let alpha = animate_f32("scroll_top.alpha", if visible { 1.0 } else { 0.0 }, spec);
    let dy = animate_f32("scroll_top.dy", if visible { 0.0 } else { 16.0 }, spec);

    let button = {
        let page = page.clone();
        Button("Top", move || page.scroll.animate_to(0.0))
    };

    // Fully faded out the subtree paints nothing and catches no clicks.
    Box(Modifier::new()
        .absolute()
        .inset(None, None, Some(24.0), Some(24.0))
        .alpha(alpha)
        .offset_y(dy)
        .z_index(20.0))
    .child(button)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(ranges: &[(SectionId, f32, f32)]) -> Vec<(SectionId, BoundsHandle)> {
        ranges
            .iter()
            .map(|(id, y, h)| {
                let handle = BoundsHandle::new();
                handle.publish(Rect::new(0.0, *y, 800.0, *h));
                (*id, handle)
            })
            .collect()
    }

    #[test]
    fn spy_tracks_probe_line() {
        let s = sections(&[
            (SectionId::About, 0.0, 700.0),
            (SectionId::Experience, 700.0, 500.0),
            (SectionId::Education, 1200.0, 500.0),
        ]);

        assert_eq!(spy_target(0.0, &s), Some(SectionId::About));
        // Probe = offset + 100: crossing at 600 puts us into Experience.
        assert_eq!(spy_target(599.0, &s), Some(SectionId::About));
        assert_eq!(spy_target(600.0, &s), Some(SectionId::Experience));
        assert_eq!(spy_target(1150.0, &s), Some(SectionId::Education));
        // Past the end of everything.
        assert_eq!(spy_target(5000.0, &s), None);
    }

    #[test]
    fn spy_ignores_unmounted_sections() {
        let mounted = BoundsHandle::new();
        mounted.publish(Rect::new(0.0, 0.0, 800.0, 400.0));
        let s = vec![
            (SectionId::About, mounted),
            (SectionId::Experience, BoundsHandle::new()),
        ];
        assert_eq!(spy_target(0.0, &s), Some(SectionId::About));
    }

    #[test]
    fn spy_signal_updates_and_releases() {
        let vp = Viewport::new();
        let s = Rc::new(sections(&[
            (SectionId::About, 0.0, 700.0),
            (SectionId::Experience, 700.0, 500.0),
        ]));
        let spy = ScrollSpy::attach(&vp, s);

        vp.offset.set(10.0);
        assert_eq!(spy.active(), Some(SectionId::About));
        vp.offset.set(650.0);
        assert_eq!(spy.active(), Some(SectionId::Experience));

        spy.release();
        spy.release();
        vp.offset.set(10.0);
        assert_eq!(spy.active(), Some(SectionId::Experience));
        assert_eq!(vp.offset.subscriber_count(), 0);
    }
}
