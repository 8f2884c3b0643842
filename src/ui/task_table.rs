use egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use turn_timeline::TimelineLayout;

use crate::ui::theme;

/// Render the left-side task table. Returns the id of a task clicked this
/// frame.
pub fn show_task_table(
    layout: &TimelineLayout,
    selected_task: Option<&str>,
    ui: &mut Ui,
) -> Option<String> {
    let mut clicked = None;

    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Task Schedule")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(
            RichText::new(format!("({})", layout.tasks.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(10.0))
        .column(Column::remainder().at_least(110.0).clip(true))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(44.0))
        .column(Column::auto().at_least(44.0))
        .header(18.0, |mut header| {
            for title in ["", "TASK", "AGENT", "DAYS", "DONE"] {
                header.col(|ui| {
                    ui.label(RichText::new(title).size(9.0).color(theme::TEXT_DIM).strong());
                });
            }
        })
        .body(|mut body| {
            for task in &layout.tasks {
                let is_selected = selected_task == Some(task.task_id.as_str());
                body.row(22.0, |mut row| {
                    row.col(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                        ui.painter().circle_filled(
                            rect.center(),
                            4.0,
                            theme::category_color(task.color_category),
                        );
                    });
                    row.col(|ui| {
                        let mut text = RichText::new(&task.task_name).size(12.0);
                        if task.is_critical {
                            text = text.color(theme::CRITICAL_RING);
                        }
                        if ui.selectable_label(is_selected, text).clicked() {
                            clicked = Some(task.task_id.clone());
                        }
                        if task.has_slack() {
                            ui.label(
                                RichText::new(format!("{:.1}d slack", task.slack_days))
                                    .size(9.5)
                                    .color(theme::TEXT_DIM),
                            );
                        }
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(task.assigned_agent.as_deref().unwrap_or("—"))
                                .size(11.0)
                                .color(theme::TEXT_SECONDARY),
                        );
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(format!("{:.1}", task.duration_days))
                                .size(11.0)
                                .color(theme::TEXT_SECONDARY),
                        );
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(format!("{:.0}%", task.completion_pct))
                                .size(11.0)
                                .color(theme::TEXT_SECONDARY),
                        );
                    });
                });
            }
        });

    clicked
}
