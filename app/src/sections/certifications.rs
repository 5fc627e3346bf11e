use std::rc::Rc;
use std::time::Duration;

use unfold_core::prelude::*;
use unfold_ui::*;

use crate::app::PageState;
use crate::content::{self, CERTIFICATIONS, Certification, SectionId};
use crate::sections::{Grid, Section, SectionTitle};

pub fn section(page: &Rc<PageState>) -> View {
    let cards: Vec<View> = CERTIFICATIONS.iter().map(cert_card).collect();

    // Repeatable: the tiles replay their fade each time the user scrolls
    // back through, 0.1 s apart.
    let revealed = RevealGroup(
        "certifications",
        RevealPolicy::repeating().threshold(0.2),
        RevealStyle::rise().duration(Duration::from_millis(500)),
        Stagger::new(Duration::from_millis(100)),
        cards,
    );

    Section(
        page,
        SectionId::Certifications,
        vec![SectionTitle("Certifications"), Grid(revealed, 4, 16.0)],
    )
}

fn cert_card(cert: &Certification) -> View {
    let t = theme();
    let url = cert.url;
    Column(
        Modifier::new()
            .fill_max_width()
            .min_height(160.0)
            .padding(16.0)
            .gap(8.0)
            .background(t.surface)
            .border(1.0, t.outline, 10.0)
            .align_items(AlignItems::Center)
            .justify_content(JustifyContent::Center)
            .clickable(move || content::open_link(url)),
    )
    .child(vec![
        Text(cert.icon).text_size(26.0).text_color(t.primary),
        Text(cert.title).wrap().text_size(15.0),
        Text(cert.issuer).text_size(13.0).text_color(t.muted),
    ])
}
