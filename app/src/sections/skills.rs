use std::rc::Rc;
use std::time::Duration;

use unfold_core::prelude::*;
use unfold_ui::*;

use crate::app::PageState;
use crate::content::{ChipSize, SKILLS, SectionId};
use crate::sections::{Grid, Section, entrance};
use crate::theme;

pub fn section(page: &Rc<PageState>) -> View {
    let ctrl = use_reveal("skills", RevealPolicy::repeating().threshold(0.2));
    let shown = ctrl.is_revealed();

    // Chips cascade in behind the title: 0.3 s lead, 0.1 s per chip.
    let stagger = Stagger::new(Duration::from_millis(100)).with_lead(Duration::from_millis(300));

    let chips: Vec<View> = SKILLS
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            let accent = theme::chip_color(skill.category);
            let (font, pad_x, pad_y) = match skill.size {
                ChipSize::Sm => (13.0, 12.0, 5.0),
                ChipSize::Md => (15.0, 16.0, 8.0),
                ChipSize::Lg => (17.0, 20.0, 11.0),
            };
            let chip = Column(
                Modifier::new()
                    .padding_xy(pad_x, pad_y)
                    .background(accent.with_alpha(34))
                    .border(1.0, accent.with_alpha(120), 18.0)
                    .align_items(AlignItems::Center),
            )
            .child(Text(skill.name).text_size(font));

            Column(
                entrance(
                    &format!("skill:{}", skill.name),
                    shown,
                    stagger.delay(i),
                    12.0,
                )
                .align_items(AlignItems::Center),
            )
            .child(chip)
        })
        .collect();

    Section(
        page,
        SectionId::Skills,
        vec![
            Box(entrance("skills.title", shown, Duration::ZERO, -20.0)).child(
                Column(Modifier::new().fill_max_width().align_items(AlignItems::Center))
                    .child(Text("Skills").text_size(30.0)),
            ),
            Box(Modifier::new().track_bounds(ctrl.bounds().clone()))
                .child(Grid(chips, 6, 12.0)),
        ],
    )
}
