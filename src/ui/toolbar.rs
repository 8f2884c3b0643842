use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  Open Timeline...", icons::FOLDER_OPEN)).clicked() {
                app.open_timeline();
                ui.close_menu();
            }
            if ui
                .add_enabled(
                    app.file_path.is_some(),
                    egui::Button::new(format!("{}  Reload        F5", icons::ARROWS_CLOCKWISE)),
                )
                .clicked()
            {
                app.reload();
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add_enabled(
                    app.layout.is_some(),
                    egui::Button::new(format!("{}  Export Layout CSV...", icons::FILE_CSV)),
                )
                .clicked()
            {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.view.zoom_in();
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.view.zoom_out();
                ui.close_menu();
            }
            if ui.button("  Fit Width").clicked() {
                app.view.reset();
                ui.close_menu();
            }
            ui.separator();
            if ui
                .checkbox(&mut app.settings.show_milestones, "Show milestones")
                .changed()
            {
                app.persist_settings();
            }
            ui.label(RichText::new("Minimum bar width").small().weak());
            let slider = ui.add(
                egui::Slider::new(&mut app.settings.min_bar_width_pct, 0.0..=10.0).suffix("%"),
            );
            if slider.changed() {
                app.relayout();
            }
            if slider.drag_stopped() || (slider.changed() && !slider.dragged()) {
                app.persist_settings();
            }
            ui.separator();
            if ui.button(format!("{}  Open Settings Folder", icons::GEAR)).clicked() {
                app.open_settings_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned file name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let name = app
                .file_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "No timeline loaded".to_string());
            ui.label(RichText::new(name).size(11.0).weak());
        });
    });
}
