use egui::{RichText, Ui};
use egui_phosphor::regular as icons;
use turn_timeline::TimelineLayout;

use crate::ui::theme;

/// Project summary strip: window, duration and critical path size.
pub fn show_summary(layout: &TimelineLayout, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("{} Project Timeline", icons::CALENDAR))
                .strong()
                .size(15.0),
        );
        ui.label(
            RichText::new(layout.summary())
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    egui::Grid::new("timeline_summary")
        .num_columns(4)
        .spacing([24.0, 2.0])
        .show(ui, |ui| {
            for caption in ["Start Date", "End Date", "Duration", "Critical Path"] {
                ui.label(RichText::new(caption).size(10.0).color(theme::TEXT_DIM));
            }
            ui.end_row();

            ui.label(layout.range.start.format("%b %d, %Y").to_string());
            ui.label(layout.range.end.format("%b %d, %Y").to_string());
            ui.label(format!("{:.0} days", layout.duration_days()));
            ui.label(format!("{} tasks", layout.critical_count));
            ui.end_row();
        });
}

/// List of milestones with their dates and task counts.
pub fn show_milestones(layout: &TimelineLayout, ui: &mut Ui) {
    if layout.milestones.is_empty() {
        return;
    }
    ui.label(RichText::new("Milestones").strong().size(13.0));
    ui.add_space(2.0);

    for milestone in &layout.milestones {
        egui::Frame::default()
            .fill(theme::BG_MILESTONE)
            .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
            .rounding(egui::Rounding::same(6.0))
            .inner_margin(egui::Margin::same(6.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(icons::WARNING_CIRCLE).color(theme::ACCENT));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&milestone.name).size(12.0));
                        let date = milestone
                            .date
                            .map(|d| d.format("%b %d, %Y").to_string())
                            .unwrap_or_else(|| "N/A".to_string());
                        ui.label(RichText::new(date).size(10.0).color(theme::TEXT_DIM));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("{} tasks", milestone.task_count))
                                .size(10.0)
                                .color(theme::TEXT_SECONDARY),
                        );
                    });
                });
            });
        ui.add_space(2.0);
    }
}
