use egui::{Color32, FontId, Rounding, Stroke, Visuals};
use turn_timeline::ColorCategory;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);
pub const BG_MILESTONE: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 26);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);

pub const CRITICAL_RING: Color32 = Color32::from_rgb(239, 68, 68);
pub const COMPLETION_FILL: Color32 = Color32::from_rgb(34, 197, 94);
pub const SLACK_TAIL: Color32 = Color32::from_rgba_premultiplied(155, 160, 178, 120);
pub const MILESTONE: Color32 = Color32::from_rgb(255, 165, 0);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const ROW_HEIGHT: f32 = 30.0;
pub const ROW_GAP: f32 = 2.0;
pub const HEADER_HEIGHT: f32 = 44.0;
pub const BAR_ROUNDING: f32 = 4.0;
pub const BAR_INSET: f32 = 4.0; // vertical inset so bars don't touch row edges
pub const MARKER_WIDTH: f32 = 3.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const SIDE_PANEL_WIDTH: f32 = 380.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

// ── Category colors ──────────────────────────────────────────────────────────

/// Bar fill for a task category.
pub fn category_color(category: ColorCategory) -> Color32 {
    match category {
        ColorCategory::Complete => Color32::from_rgb(34, 197, 94), // green
        ColorCategory::Active => Color32::from_rgb(59, 130, 246),  // blue
        ColorCategory::Blocked => Color32::from_rgb(239, 68, 68),  // red
        ColorCategory::Neutral => Color32::from_rgb(107, 114, 128), // gray
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

/// Dark visuals keyed to the status palette: blocked reads as the error
/// color, active as selection and links.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    let active = category_color(ColorCategory::Active);

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_DARK;
    visuals.faint_bg_color = BG_HEADER;
    visuals.striped = true;

    visuals.hyperlink_color = active;
    visuals.error_fg_color = category_color(ColorCategory::Blocked);
    visuals.warn_fg_color = MILESTONE;
    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, active);

    let widgets = &mut visuals.widgets;
    for state in [
        &mut widgets.noninteractive,
        &mut widgets.inactive,
        &mut widgets.hovered,
        &mut widgets.active,
        &mut widgets.open,
    ] {
        state.rounding = Rounding::same(BAR_ROUNDING);
        state.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    }
    widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 4.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
    });
}
