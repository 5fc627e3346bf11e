//! Education: repeatable reveal plus a campus highlight that cycles every
//! few seconds while the section is on screen. The cycle timer runs only
//! while visible and is cancelled on exit and at teardown.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use unfold_core::prelude::*;
use unfold_core::runtime::remember_with_key;
use unfold_core::timer::{self, TimerHandle};
use unfold_ui::*;

use crate::app::PageState;
use crate::content::{EDUCATION, SectionId};
use crate::sections::{Section, TagChip, entrance};

pub const CYCLE_PERIOD: Duration = Duration::from_secs(4);

pub struct Carousel {
    index: Signal<usize>,
    len: usize,
    pending: RefCell<Option<TimerHandle>>,
    running: Cell<bool>,
}

impl Carousel {
    pub fn new(len: usize) -> Rc<Self> {
        Rc::new(Self {
            index: signal(0),
            len: len.max(1),
            pending: RefCell::new(None),
            running: Cell::new(false),
        })
    }

    pub fn index(&self) -> usize {
        self.index.get() % self.len
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn start(self: &Rc<Self>) {
        if self.running.get() || self.len < 2 {
            return;
        }
        self.running.set(true);
        self.arm();
    }

    pub fn stop(&self) {
        self.running.set(false);
        if let Some(t) = self.pending.borrow_mut().take() {
            t.cancel();
        }
    }

    fn arm(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let handle = timer::schedule(CYCLE_PERIOD, move || {
            if let Some(c) = weak.upgrade() {
                if !c.running.get() {
                    return;
                }
                c.index.update(|i| *i = (*i + 1) % c.len);
                request_frame();
                c.arm();
            }
        });
        *self.pending.borrow_mut() = Some(handle);
    }
}

pub fn section(page: &Rc<PageState>) -> View {
    let t = theme();
    let ctrl = use_reveal("education", RevealPolicy::repeating().threshold(0.3));
    let shown = ctrl.is_revealed();

    let carousel = remember_with_key("education.carousel", || {
        Carousel::new(EDUCATION.highlights.len())
    });
    if shown && !carousel.is_running() {
        carousel.start();
    } else if !shown && carousel.is_running() {
        carousel.stop();
    }
    let installed = remember_with_key("education.carousel.cleanup", || Cell::new(false));
    if !installed.get() {
        installed.set(true);
        let carousel = carousel.clone();
        scoped_effect(move || on_unmount(move || carousel.stop()));
    }

    let highlight = EDUCATION.highlights[carousel.index()];
    let banner = Column(
        Modifier::new()
            .fill_max_width()
            .height(96.0)
            .background(t.primary.with_alpha(26))
            .border(1.0, t.primary.with_alpha(90), 10.0)
            .justify_content(JustifyContent::Center)
            .align_items(AlignItems::Center),
    )
    .child(Text(highlight).text_size(18.0).text_color(t.primary));

    let courses: Vec<View> = EDUCATION
        .courses
        .iter()
        .map(|c| TagChip(c, t.primary))
        .collect();

    let card = Column(
        Modifier::new()
            .fill_max_width()
            .padding(28.0)
            .gap(10.0)
            .background(t.surface)
            .border(1.0, t.outline, 14.0)
            .align_items(AlignItems::Center),
    )
    .child(vec![
        banner,
        Text(EDUCATION.school).text_size(24.0).text_color(t.primary),
        Text(EDUCATION.period).text_color(t.muted),
        Text(EDUCATION.degree).text_size(19.0),
        Text(EDUCATION.gpa),
        Text("Relevant Courses:").text_color(t.muted),
        Row(Modifier::new().gap(8.0)).child(courses),
    ]);

    Section(
        page,
        SectionId::Education,
        vec![
            Box(entrance("education.title", shown, Duration::ZERO, -20.0)).child(
                Column(Modifier::new().fill_max_width().align_items(AlignItems::Center))
                    .child(Text("Education").text_size(30.0)),
            ),
            Box(Modifier::new().track_bounds(ctrl.bounds().clone()))
                .child(Box(entrance("education.card", shown, Duration::from_millis(200), 20.0)).child(card)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use unfold_core::animation::{TestClock, set_clock};

    #[test]
    fn carousel_cycles_only_while_running() {
        let clock = TestClock::start();
        set_clock(clock.clone());

        let c = Carousel::new(3);
        c.start();
        assert_eq!(c.index(), 0);

        clock.advance(CYCLE_PERIOD);
        timer::run_due();
        assert_eq!(c.index(), 1);

        clock.advance(CYCLE_PERIOD);
        timer::run_due();
        assert_eq!(c.index(), 2);

        c.stop();
        c.stop();
        clock.advance(CYCLE_PERIOD * 3);
        assert_eq!(timer::run_due(), 0);
        assert_eq!(c.index(), 2);

        // Re-entering the viewport resumes the rotation.
        c.start();
        clock.advance(CYCLE_PERIOD);
        timer::run_due();
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn single_entry_carousel_never_schedules() {
        let clock = TestClock::start();
        set_clock(clock.clone());

        let c = Carousel::new(1);
        c.start();
        assert!(!c.is_running());
        assert_eq!(timer::pending(), 0);
    }
}
