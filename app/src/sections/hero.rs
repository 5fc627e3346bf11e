use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use unfold_core::prelude::*;
use unfold_core::runtime::remember_with_key;
use unfold_ui::*;

use crate::app::PageState;
use crate::content::{
    self, LINKEDIN_URL, OWNER_INITIALS, OWNER_NAME, RESUME_URL, ROLES, SUMMARY, SectionId,
};
use crate::sections::{Section, entrance};
use crate::theme;
use crate::typewriter::Typewriter;

/// Entrance cascade offsets, top to bottom.
const STEP: Duration = Duration::from_millis(200);

pub fn section(page: &Rc<PageState>) -> View {
    let t = theme();
    let ctrl = use_reveal("hero", RevealPolicy::repeating().threshold(0.2));
    let shown = ctrl.is_revealed();

    let tw = remember_with_key("hero.typewriter", || Typewriter::new(ROLES));
    if !tw.is_running() {
        tw.start();
    }
    let installed = remember_with_key("hero.typewriter.cleanup", || Cell::new(false));
    if !installed.get() {
        installed.set(true);
        let tw = tw.clone();
        scoped_effect(move || on_unmount(move || tw.stop()));
    }

    let avatar = Column(
        Modifier::new()
            .size(128.0, 128.0)
            .background(t.primary)
            .border(4.0, Color::WHITE, 64.0)
            .clip_rounded(64.0)
            .justify_content(JustifyContent::Center)
            .align_items(AlignItems::Center),
    )
    .child(Text(OWNER_INITIALS).text_size(40.0).text_color(t.on_primary));

    let headline = Row(Modifier::new().gap(8.0)).child((
        Text("Hi, I am").text_size(34.0),
        Text(OWNER_NAME).text_size(34.0).text_color(t.primary),
    ));

    let typed = tw.display().get();
    let role_line = Box(Modifier::new().min_height(34.0)).child(
        Text(if typed.is_empty() { " ".to_string() } else { typed })
            .text_size(22.0)
            .text_color(t.muted),
    );

    let summary = Box(Modifier::new().max_width(640.0))
        .child(Text(SUMMARY).wrap().text_size(17.0).text_color(t.muted));

    let actions = Row(Modifier::new().gap(12.0)).child((
        Button("Download Resume", || content::open_link(RESUME_URL)),
        Button("LinkedIn", || content::open_link(LINKEDIN_URL))
            .button_colors(theme::outline_button()),
    ));

    let contact_stagger = Stagger::new(Duration::from_millis(100)).with_lead(STEP * 5);
    let contact_buttons: Vec<View> = content::CONTACTS
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let url = c.url;
            Box(entrance(
                &format!("hero.contact:{}", c.label),
                shown,
                contact_stagger.delay(i),
                16.0,
            ))
            .child(
                Button(c.label, move || content::open_link(url))
                    .button_colors(theme::outline_button()),
            )
        })
        .collect();
    let contacts = Row(Modifier::new().gap(10.0)).child(contact_buttons);

    let column = Column(
        Modifier::new()
            .fill_max_width()
            .min_height(620.0)
            .gap(20.0)
            .align_items(AlignItems::Center)
            .justify_content(JustifyContent::Center)
            .track_bounds(ctrl.bounds().clone()),
    )
    .child(vec![
        Box(entrance("hero.avatar", shown, Duration::ZERO, -24.0)).child(avatar),
        Box(entrance("hero.headline", shown, STEP, 16.0)).child(headline),
        Box(entrance("hero.role", shown, STEP * 2, 0.0)).child(role_line),
        Box(entrance("hero.summary", shown, STEP * 3, 16.0)).child(summary),
        Box(entrance("hero.actions", shown, STEP * 4, 16.0)).child(actions),
        contacts,
    ]);

    Section(page, SectionId::About, vec![column])
}
