use unfold_core::prelude::*;
use unfold_ui::*;

use crate::content::{self, EMAIL, GITHUB_URL, LINKEDIN_URL, OWNER_NAME, TAGLINE};
use crate::theme;

pub fn Footer() -> View {
    let t = theme();

    let links = Row(Modifier::new().gap(10.0)).child((
        Button("GitHub", || content::open_link(GITHUB_URL))
            .button_colors(theme::outline_button()),
        Button("LinkedIn", || content::open_link(LINKEDIN_URL))
            .button_colors(theme::outline_button()),
        Button("Mail", || content::open_link("mailto:vigneshmasani@gmail.com"))
            .button_colors(theme::outline_button()),
    ));

    Column(
        Modifier::new()
            .fill_max_width()
            .padding_xy(24.0, 40.0)
            .gap(12.0)
            .background(t.surface)
            .align_items(AlignItems::Center),
    )
    .child(vec![
        Text(OWNER_NAME).text_size(20.0).text_color(t.primary),
        Text(TAGLINE).text_size(14.0).text_color(t.muted),
        Text(EMAIL).text_size(13.0).text_color(t.muted),
        links,
        Box(Modifier::new()
            .fill_max_width()
            .height(1.0)
            .background(t.outline)),
        Text("(c) 2025 Vignesh Masani. All rights reserved.")
            .text_size(13.0)
            .text_color(t.muted),
    ])
}
