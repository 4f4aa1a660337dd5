use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub const ACCENT: Color32 = Color32::from_rgb(56, 189, 148);

pub fn setup_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    // Phosphor icons as fallback glyphs in the proportional family
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
}

pub fn setup_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    // Dark slate visuals with a green accent
    let mut visuals = Visuals::dark();

    let bg = Color32::from_rgb(15, 23, 42);
    visuals.panel_fill = bg;
    visuals.window_fill = bg;
    visuals.faint_bg_color = Color32::from_rgb(22, 32, 54);
    visuals.extreme_bg_color = Color32::from_rgb(10, 16, 30);

    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(30, 41, 59);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(170, 180, 196));

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 54, 76);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(214, 220, 230));

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(62, 76, 102);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::BLACK);

    visuals.selection.bg_fill = ACCENT;
    visuals.selection.stroke = Stroke::new(1.0, Color32::BLACK);

    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);
    visuals.widgets.active.rounding = Rounding::same(6.0);
    visuals.window_rounding = Rounding::same(10.0);

    style.visuals = visuals;

    style.text_styles = [
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    ctx.set_style(style);
}

/// Returns (bg, border, border_when_scheduled) for day cards
pub fn card_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(22, 32, 54),
        Color32::from_rgb(51, 65, 85),
        ACCENT,
    )
}

/// Returns (track_bg, tick_color, tick_label_color) for detailed timelines
pub fn track_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(30, 41, 59),
        Color32::from_rgb(71, 85, 105),
        Color32::from_rgb(120, 134, 156),
    )
}

/// Returns (fill, text) for a block; `dragging` highlights the grabbed one
pub fn block_colors(dragging: bool) -> (Color32, Color32) {
    if dragging {
        (Color32::from_rgb(94, 234, 212), Color32::BLACK)
    } else {
        (ACCENT, Color32::BLACK)
    }
}

/// Returns (fill) for the part of a block continuing past midnight
pub fn overflow_color() -> Color32 {
    Color32::from_rgba_unmultiplied(56, 189, 148, 90)
}

/// Returns (error, success, warning) text colors for the status line
pub fn status_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(248, 113, 113),
        Color32::from_rgb(74, 222, 128),
        Color32::from_rgb(251, 191, 36),
    )
}

pub fn secondary_text() -> Color32 {
    Color32::from_rgb(148, 163, 184)
}
