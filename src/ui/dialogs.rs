use crate::app::TimelineApp;
use crate::ui::theme;
use egui::RichText;

/// Show the "About" dialog.
pub fn show_about_dialog(app: &mut TimelineApp, ctx: &egui::Context) {
    let mut open = true;
    egui::Window::new("About")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Turn Timeline");
                ui.label(RichText::new(env!("CARGO_PKG_VERSION")).color(theme::TEXT_DIM));
                ui.add_space(6.0);
                ui.label("Gantt view of project timelines produced by simulation turns.");
                ui.add_space(6.0);
                ui.label(
                    RichText::new(
                        "Open a timeline JSON, a turn response, or a list of turns.\n\
                         Red rings mark the critical path; grey tails show slack.",
                    )
                    .size(11.0)
                    .color(theme::TEXT_SECONDARY),
                );
            });
        });
    if !open {
        app.show_about = false;
    }
}
