use std::rc::Rc;
use std::time::Duration;

use unfold_core::prelude::*;
use unfold_ui::*;

use crate::app::PageState;
use crate::content::{self, PROJECTS, Project, SectionId};
use crate::sections::{Card, Grid, Section, SectionTitle, TagChip};
use crate::theme;

pub fn section(page: &Rc<PageState>) -> View {
    let cards: Vec<View> = PROJECTS.iter().map(project_card).collect();

    let revealed = RevealGroup(
        "projects",
        RevealPolicy::once().threshold(0.2),
        RevealStyle::rise(),
        Stagger::new(Duration::from_millis(150)),
        cards,
    );

    Section(
        page,
        SectionId::Projects,
        vec![SectionTitle("Projects"), Grid(revealed, 2, 24.0)],
    )
}

fn project_card(project: &Project) -> View {
    let t = theme();
    let accent = theme::chip_color(crate::content::ChipCategory::Tech);

    let tags: Vec<View> = project
        .tags
        .iter()
        .map(|tag| TagChip(tag, accent))
        .collect();

    let mut footer: Vec<View> = vec![{
        let url = project.github_url;
        Button("GitHub", move || content::open_link(url))
            .button_colors(theme::outline_button())
    }];
    if let Some(linkedin) = project.linkedin_url {
        footer.push(
            Button("LinkedIn", move || content::open_link(linkedin))
                .button_colors(theme::outline_button()),
        );
    }

    Card(vec![
        Text(project.title).text_size(19.0),
        Text(project.description).wrap().text_color(t.muted),
        Row(Modifier::new().gap(8.0)).child(tags),
        Row(Modifier::new().gap(8.0)).child(footer),
    ])
}
