use std::path::PathBuf;

use tracing::{debug, warn};
use turn_timeline::{io, Clock, ProjectTimeline, SystemClock, TimelineLayout};

use crate::ui;
use crate::ui::gantt_chart::ChartView;
use turn_timeline::config::Settings;

/// Main application state.
pub struct TimelineApp {
    pub timeline: Option<ProjectTimeline>,
    pub layout: Option<TimelineLayout>,
    pub file_path: Option<PathBuf>,
    pub selected_task: Option<String>,
    pub view: ChartView,

    pub settings: Settings,
    settings_path: PathBuf,

    pub show_about: bool,
    pub status_message: String,
}

impl TimelineApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        settings_path: PathBuf,
        initial_file: Option<PathBuf>,
    ) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let mut app = Self {
            timeline: None,
            layout: None,
            file_path: None,
            selected_task: None,
            view: ChartView::default(),
            settings,
            settings_path,
            show_about: false,
            status_message: "Open a timeline to begin".to_string(),
        };

        if let Some(path) = initial_file.or_else(|| app.settings.last_file.clone()) {
            app.load_from(path);
        }
        app
    }

    // --- File operations ---

    pub fn open_timeline(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline / turn JSON", &["json"])
            .pick_file()
        {
            self.load_from(path);
        }
    }

    pub fn reload(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.load_from(path);
        }
    }

    fn load_from(&mut self, path: PathBuf) {
        match io::load_timeline(&path) {
            Ok(timeline) => {
                self.timeline = timeline;
                self.selected_task = None;
                self.relayout();
                self.status_message = match &self.layout {
                    Some(layout) => format!("Loaded {} ({})", display_name(&path), layout.summary()),
                    None => "No timeline data available yet. Execute a turn to generate one."
                        .to_string(),
                };
                self.file_path = Some(path.clone());
                self.settings.last_file = Some(path);
                self.persist_settings();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load timeline");
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    pub fn export_csv(&mut self) {
        let Some(layout) = &self.layout else {
            self.status_message = "Nothing to export, no timeline loaded".to_string();
            return;
        };

        let default_name = self
            .file_path
            .as_ref()
            .and_then(|p| p.file_stem())
            .map(|s| format!("{}.layout.csv", s.to_string_lossy()))
            .unwrap_or_else(|| "timeline.layout.csv".to_string());
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match io::export_layout_csv(layout, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} tasks to CSV", count);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "CSV export failed");
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    pub fn open_settings_folder(&mut self) {
        let dir = Settings::config_dir();
        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|_| open::that(&dir)) {
            warn!(dir = %dir.display(), error = %e, "could not open settings folder");
            self.status_message = format!("Could not open {}: {}", dir.display(), e);
        }
    }

    // --- Layout ---

    /// Recompute the layout from the current timeline and settings.
    pub fn relayout(&mut self) {
        self.settings = self.settings.clone().sanitized();
        let options = self.settings.layout_options();
        self.layout = self
            .timeline
            .as_ref()
            .and_then(|t| TimelineLayout::compute_with(t, &SystemClock, &options));
        debug!(has_layout = self.layout.is_some(), "relayout");
    }

    pub fn persist_settings(&mut self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            warn!(path = %self.settings_path.display(), error = %e, "failed to save settings");
        }
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.reload();
        }
        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::O)) {
            self.open_timeline();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(layout) = &self.layout {
                            ui.label(
                                egui::RichText::new(format!("Zoom: {:.0}%", self.view.zoom * 100.0))
                                    .size(10.5)
                                    .color(ui::theme::TEXT_DIM),
                            );
                            ui.label(
                                egui::RichText::new(" · ")
                                    .size(10.5)
                                    .color(ui::theme::TEXT_DIM),
                            );
                            ui.label(
                                egui::RichText::new(layout.summary())
                                    .size(10.5)
                                    .color(ui::theme::TEXT_DIM),
                            );
                        }
                    });
                });
            });

        let Some(layout) = &self.layout else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new(
                            "No timeline data available yet. Open a timeline or turn file.",
                        )
                        .color(ui::theme::TEXT_DIM),
                    );
                });
            });
            if self.show_about {
                ui::dialogs::show_about_dialog(self, ctx);
            }
            return;
        };

        // Left panel: summary, task table, milestones
        let mut clicked = None;
        egui::SidePanel::left("task_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                ui::summary::show_summary(layout, ui);
                ui.add_space(4.0);
                ui.separator();
                if self.settings.show_milestones {
                    ui::summary::show_milestones(layout, ui);
                    ui.separator();
                }
                clicked = ui::task_table::show_task_table(layout, self.selected_task.as_deref(), ui);
            });

        // Central panel: Gantt chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let chart_click = ui::gantt_chart::show_gantt_chart(
                layout,
                &mut self.view,
                self.selected_task.as_deref(),
                self.settings.show_milestones,
                SystemClock.now(),
                ui,
            );
            clicked = clicked.take().or(chart_click);
        });

        if let Some(id) = clicked {
            if let Some(task) = layout.task(&id) {
                self.status_message = format!(
                    "{}: {} · {:.0}% done{}",
                    task.task_name,
                    task.status.label(),
                    task.completion_pct,
                    if task.is_critical { " · critical" } else { "" }
                );
            }
            self.selected_task = Some(id);
        }

        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
