use std::rc::Rc;
use std::time::Duration;

use unfold_core::prelude::*;
use unfold_ui::*;

use crate::app::PageState;
use crate::content::{self, PUBLICATIONS, Publication, SectionId};
use crate::sections::{Card, Section, SectionTitle};
use crate::theme;

pub fn section(page: &Rc<PageState>) -> View {
    let stagger = Stagger::new(Duration::from_millis(200));

    // One-shot timeline sliding in from the right; the delay here is purely
    // presentational, so the latched state still animates in a cascade.
    let entries: Vec<View> = PUBLICATIONS
        .iter()
        .enumerate()
        .map(|(i, publication)| {
            Reveal(
                &format!("publications:{i}"),
                RevealPolicy::once().threshold(0.2),
                RevealStyle::slide_from_right().delayed(stagger.delay(i)),
                timeline_entry(publication),
            )
        })
        .collect();

    Section(
        page,
        SectionId::Publications,
        vec![
            SectionTitle("Publications"),
            Column(Modifier::new().fill_max_width().max_width(760.0).gap(24.0))
                .child(entries),
        ],
    )
}

fn timeline_entry(publication: &Publication) -> View {
    let t = theme();
    let dot = Box(Modifier::new()
        .size(12.0, 12.0)
        .background(t.primary)
        .clip_rounded(6.0));

    let read_url = publication.url;
    let linkedin_url = publication.linkedin_url;

    Row(Modifier::new().fill_max_width().gap(16.0)).child((
        Column(Modifier::new().padding_xy(0.0, 6.0)).child(dot),
        Box(Modifier::new().weight(1.0)).child(Card(vec![
            Text(publication.title).text_size(19.0),
            Text(publication.date).text_size(13.0).text_color(t.muted),
            Row(Modifier::new().gap(8.0)).child((
                Button("Read Article", move || content::open_link(read_url))
                    .button_colors(theme::outline_button()),
                Button("LinkedIn Post", move || content::open_link(linkedin_url))
                    .button_colors(theme::outline_button()),
            )),
        ])),
    ))
}
