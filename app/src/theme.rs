use unfold_core::prelude::*;

/// The site's light palette (white page, blue accent).
pub fn light() -> Theme {
    Theme {
        background: Color::from_hex("#FFFFFF"),
        surface: Color::from_hex("#FAFAFC"),
        on_surface: Color::from_hex("#1A202C"),
        muted: Color::from_hex("#64748B"),
        primary: Color::from_hex("#2563EB"),
        on_primary: Color::WHITE,
        outline: Color::from_hex("#E2E8F0"),
        focus: Color::from_hex("#93C5FD"),
        button_bg: Color::from_hex("#2563EB"),
        button_bg_hover: Color::from_hex("#1D4ED8"),
        button_bg_pressed: Color::from_hex("#1E40AF"),
        scrollbar_track: Color(0, 0, 0, 16),
        scrollbar_thumb: Color(0, 0, 0, 80),
        error: Color::from_hex("#DC2626"),
        success: Color::from_hex("#16A34A"),
    }
}

/// Secondary (outline) button colors on the light theme.
pub fn outline_button() -> ButtonColors {
    ButtonColors {
        bg: Color::from_hex("#F1F5F9"),
        bg_hover: Color::from_hex("#E2E8F0"),
        bg_pressed: Color::from_hex("#CBD5E1"),
        fg: Color::from_hex("#1A202C"),
    }
}

/// Quiet text-like button for nav links.
pub fn ghost_button(fg: Color) -> ButtonColors {
    ButtonColors {
        bg: Color::TRANSPARENT,
        bg_hover: Color(0, 0, 0, 10),
        bg_pressed: Color(0, 0, 0, 20),
        fg,
    }
}

/// Accent colors for the skill chip categories.
pub fn chip_color(category: crate::content::ChipCategory) -> Color {
    use crate::content::ChipCategory::*;
    match category {
        Language => Color::from_hex("#3B82F6"),
        Web => Color::from_hex("#8B5CF6"),
        Tech => Color::from_hex("#6366F1"),
        Db => Color::from_hex("#22C55E"),
        Tool => Color::from_hex("#F97316"),
        Analytics => Color::from_hex("#14B8A6"),
    }
}
