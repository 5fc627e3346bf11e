use std::cell::Cell;
use std::rc::Rc;

use unfold_core::prelude::*;
use unfold_core::runtime::remember_with_key;
use unfold_ui::*;

use crate::content::SectionId;
use crate::nav;
use crate::sections;
use crate::theme;

/// Page-wide state: the shared viewport, its scroll container, one bounds
/// handle per section (for the nav spy and section jumps), and the spy.
pub struct PageState {
    pub viewport: Viewport,
    pub scroll: Rc<ScrollState>,
    sections: Rc<Vec<(SectionId, BoundsHandle)>>,
    pub spy: nav::ScrollSpy,
}

impl PageState {
    pub fn new() -> Self {
        let viewport = Viewport::new();
        let scroll = Rc::new(ScrollState::with_viewport(viewport.clone()));
        let sections: Rc<Vec<(SectionId, BoundsHandle)>> = Rc::new(
            SectionId::ALL
                .iter()
                .map(|id| (*id, BoundsHandle::new()))
                .collect(),
        );
        let spy = nav::ScrollSpy::attach(&viewport, sections.clone());
        Self {
            viewport,
            scroll,
            sections,
            spy,
        }
    }

    pub fn handle(&self, id: SectionId) -> BoundsHandle {
        self.sections
            .iter()
            .find(|(s, _)| *s == id)
            .map(|(_, h)| h.clone())
            .unwrap_or_default()
    }

    /// Eased scroll so the section lands just under the nav bar.
    pub fn scroll_to(&self, id: SectionId) {
        if let Some(rect) = self.handle(id).get() {
            self.scroll.animate_to(rect.y);
        }
    }

    pub fn release(&self) {
        self.spy.release();
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

/// Root composition: nav bar over a single scrolling column of sections,
/// with the scroll-to-top button floating above both.
pub fn app(_s: &mut Scheduler) -> View {
    let page = remember_with_key("page", PageState::new);

    let installed = remember_with_key("page.cleanup", || Cell::new(false));
    if !installed.get() {
        installed.set(true);
        let page = page.clone();
        scoped_effect(move || on_unmount(move || page.release()));
    }

    with_theme(theme::light(), || {
        with_viewport(page.viewport.clone(), || {
            let content = Column(Modifier::new().fill_max_width()).child(vec![
                sections::hero::section(&page),
                sections::experience::section(&page),
                sections::education::section(&page),
                sections::projects::section(&page),
                sections::skills::section(&page),
                sections::certifications::section(&page),
                sections::publications::section(&page),
                sections::contact::section(&page),
                sections::message::section(&page),
                sections::footer::Footer(),
            ]);

            Surface(
                Modifier::new().fill_max_size().background(theme().background),
                Stack(Modifier::new().fill_max_size()).child((
                    Column(Modifier::new().fill_max_size()).child((
                        nav::NavBar(&page),
                        ScrollArea(
                            Modifier::new().fill_max_width().flex_grow(1.0),
                            page.scroll.clone(),
                            content,
                        ),
                    )),
                    nav::ScrollToTop(&page),
                )),
            )
        })
    })
}
