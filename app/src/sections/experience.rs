use std::rc::Rc;
use std::time::Duration;

use unfold_core::prelude::*;
use unfold_ui::*;

use crate::app::PageState;
use crate::content::{self, JOBS, Job, SectionId};
use crate::sections::{Card, Grid, Section, SectionTitle};
use crate::theme;

pub fn section(page: &Rc<PageState>) -> View {
    let cards: Vec<View> = JOBS.iter().map(job_card).collect();

    // One-shot cascade: each card reveals 150 ms after the previous one and
    // stays put when scrolling back up.
    let revealed = RevealGroup(
        "experience",
        RevealPolicy::once().threshold(0.3),
        RevealStyle::rise(),
        Stagger::new(Duration::from_millis(150)),
        cards,
    );

    Section(
        page,
        SectionId::Experience,
        vec![SectionTitle("Experience"), Grid(revealed, 2, 20.0)],
    )
}

fn job_card(job: &Job) -> View {
    let t = theme();
    let mut footer: Vec<View> = vec![{
        let url = job.linkedin_url;
        Button("LinkedIn Post", move || content::open_link(url))
            .button_colors(theme::outline_button())
    }];
    if let Some(cert) = job.certificate_url {
        footer.push(Button("Certificate", move || content::open_link(cert)));
    }

    Card(vec![
        Text(job.title).text_size(19.0),
        Text(job.company).text_color(t.muted),
        Row(Modifier::new().gap(8.0)).child(footer),
    ])
}
