use std::rc::Rc;
use std::time::Duration;

use unfold_core::prelude::*;
use unfold_ui::*;

use crate::app::PageState;
use crate::content::{self, CONTACTS, ContactLink, SectionId};
use crate::sections::{Grid, Section, SectionTitle};

pub fn section(page: &Rc<PageState>) -> View {
    let items: Vec<View> = CONTACTS.iter().map(contact_item).collect();

    // Repeatable: these tiles re-animate on every pass, 0.1 s apart.
    let revealed = RevealGroup(
        "contact",
        RevealPolicy::repeating().threshold(0.2),
        RevealStyle::rise().duration(Duration::from_millis(500)),
        Stagger::new(Duration::from_millis(100)),
        items,
    );

    Section(
        page,
        SectionId::Contact,
        vec![SectionTitle("Get In Touch"), Grid(revealed, 5, 16.0)],
    )
}

fn contact_item(link: &ContactLink) -> View {
    let t = theme();
    let url = link.url;
    let initial: String = link.label.chars().take(1).collect();

    let badge = Column(
        Modifier::new()
            .size(52.0, 52.0)
            .background(t.primary.with_alpha(30))
            .clip_rounded(26.0)
            .justify_content(JustifyContent::Center)
            .align_items(AlignItems::Center),
    )
    .child(Text(initial).text_size(20.0).text_color(t.primary));

    Column(
        Modifier::new()
            .fill_max_width()
            .gap(6.0)
            .padding(8.0)
            .align_items(AlignItems::Center)
            .clickable(move || content::open_link(url)),
    )
    .child(vec![
        badge,
        Text(link.label).text_size(15.0),
        Text(link.value).text_size(12.0).text_color(t.muted),
    ])
}
