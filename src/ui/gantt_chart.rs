use chrono::{DateTime, Datelike, Duration, Utc};
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use turn_timeline::layout::MilestoneLayout;
use turn_timeline::{DateRange, TaskLayout, TimelineLayout};

use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;

/// Horizontal zoom of the chart relative to the available width.
#[derive(Debug, Clone, Copy)]
pub struct ChartView {
    pub zoom: f32,
}

impl Default for ChartView {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

impl ChartView {
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.2).min(12.0);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.2).max(1.0);
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
    }
}

/// Narrowest gap between two header ticks, in pixels.
const MIN_TICK_SPACING: f32 = 40.0;

/// Spacing of header ticks, picked from the pixel density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickScale {
    Days,
    Weeks,
    Months,
    Years,
}

impl TickScale {
    fn for_density(pixels_per_day: f32) -> Self {
        let min_days = MIN_TICK_SPACING / pixels_per_day;
        if min_days <= 1.0 {
            TickScale::Days
        } else if min_days <= 7.0 {
            TickScale::Weeks
        } else if min_days <= 30.0 {
            TickScale::Months
        } else {
            TickScale::Years
        }
    }

    fn unit_days(self) -> i64 {
        match self {
            TickScale::Days => 1,
            TickScale::Weeks => 7,
            TickScale::Months => 30,
            TickScale::Years => 365,
        }
    }

    /// Days between ticks: a whole number of units, at least
    /// `MIN_TICK_SPACING` pixels apart.
    fn step_days(self, pixels_per_day: f32) -> i64 {
        let unit = self.unit_days();
        let units = (MIN_TICK_SPACING / pixels_per_day / unit as f32).ceil();
        unit * (units as i64).max(1)
    }

    fn label(self, date: DateTime<Utc>) -> String {
        match self {
            TickScale::Days => date.format("%d").to_string(),
            TickScale::Weeks => date.format("W%V").to_string(),
            TickScale::Months => date.format("%b %Y").to_string(),
            TickScale::Years => date.format("%Y").to_string(),
        }
    }
}

/// Maps percent coordinates onto the painted canvas.
struct Axis {
    origin: Pos2,
    width: f32,
}

impl Axis {
    fn x(&self, pct: f64) -> f32 {
        self.origin.x + (pct as f32 / 100.0) * self.width
    }

    fn span(&self, pct: f64) -> f32 {
        (pct as f32 / 100.0) * self.width
    }
}

/// Render the Gantt chart area. Returns the id of a task clicked this frame.
pub fn show_gantt_chart(
    layout: &TimelineLayout,
    view: &mut ChartView,
    selected_task: Option<&str>,
    show_milestones: bool,
    now: DateTime<Utc>,
    ui: &mut Ui,
) -> Option<String> {
    let mut clicked = None;
    let available = ui.available_size();
    let chart_width = (available.x - 16.0).max(200.0) * view.zoom;
    let chart_height =
        HEADER_HEIGHT + (layout.tasks.len() as f32 * (ROW_HEIGHT + ROW_PADDING)) + 24.0;

    // Ctrl+scroll zooms
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            view.zoom_in();
        } else if scroll_delta.y < 0.0 {
            view.zoom_out();
        }
    }

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::hover(),
            );
            let origin = response.rect.min;
            let axis = Axis {
                origin,
                width: chart_width,
            };

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_timeline_header(&painter, &axis, &layout.range, response.rect.bottom());

            for (i, task) in layout.tasks.iter().enumerate() {
                let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING);
                let row_rect = Rect::from_min_size(
                    Pos2::new(origin.x, y),
                    Vec2::new(chart_width, ROW_HEIGHT + ROW_PADDING),
                );
                let is_selected = selected_task == Some(task.task_id.as_str());
                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };
                painter.rect_filled(row_rect, 0.0, row_bg);

                let bar_rect = draw_task_bar(&painter, &axis, layout, task, y + ROW_PADDING);

                let bar_response = ui.interact(
                    bar_rect.expand(2.0),
                    ui.make_persistent_id(("task-bar", i, &task.task_id)),
                    Sense::click(),
                );
                if bar_response.clicked() {
                    clicked = Some(task.task_id.clone());
                }
                bar_response.on_hover_ui(|ui| task_tooltip(ui, task));
            }

            if show_milestones {
                for milestone in &layout.milestones {
                    draw_milestone(&painter, &axis, milestone, response.rect.bottom());
                }
            }

            draw_today_line(&painter, &axis, &layout.range, now, response.rect.bottom());
        });

    clicked
}

fn task_tooltip(ui: &mut Ui, task: &TaskLayout) {
    ui.strong(&task.task_name);
    if let Some(agent) = &task.assigned_agent {
        ui.label(format!("{} {}", egui_phosphor::regular::USERS, agent));
    }
    ui.label(format!(
        "{} {:.1}d · {:.0}h effort",
        egui_phosphor::regular::CLOCK,
        task.duration_days,
        task.effort_hours
    ));
    ui.label(format!("{} · {:.0}% done", task.status.label(), task.completion_pct));
    if task.is_critical {
        ui.colored_label(theme::CRITICAL_RING, "On the critical path");
    }
    if task.has_slack() {
        ui.label(format!("{:.1}d slack", task.slack_days));
    }
}

fn draw_timeline_header(painter: &egui::Painter, axis: &Axis, range: &DateRange, bottom: f32) {
    let origin = axis.origin;
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(axis.width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + axis.width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let total_days = range.total_days.max(1);
    let pixels_per_day = axis.width / total_days as f32;
    let scale = TickScale::for_density(pixels_per_day);
    let step = scale.step_days(pixels_per_day);

    let mut day = 0;
    while day <= total_days {
        let Some(date) = range.start.checked_add_signed(Duration::days(day)) else {
            break;
        };
        let x = axis.x(day as f64 / total_days as f64 * 100.0);

        painter.line_segment(
            [Pos2::new(x, origin.y + HEADER_HEIGHT), Pos2::new(x, bottom)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        painter.text(
            Pos2::new(x + 3.0, origin.y + 28.0),
            egui::Align2::LEFT_CENTER,
            scale.label(date),
            theme::font_sub(),
            theme::TEXT_SECONDARY,
        );

        let fine = matches!(scale, TickScale::Days | TickScale::Weeks);
        if fine && (day == 0 || date.day() <= step as u32) {
            painter.text(
                Pos2::new(x + 3.0, origin.y + 12.0),
                egui::Align2::LEFT_CENTER,
                date.format("%b %Y").to_string(),
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }

        day += step;
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    axis: &Axis,
    range: &DateRange,
    now: DateTime<Utc>,
    bottom: f32,
) {
    let pct = range.offset_days(now) / range.total_days.max(1) as f64 * 100.0;
    if !(0.0..=100.0).contains(&pct) {
        return;
    }
    let x = axis.x(pct);
    let top = axis.origin.y + HEADER_HEIGHT;

    painter.line_segment(
        [Pos2::new(x, top), Pos2::new(x, bottom)],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, top - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_task_bar(
    painter: &egui::Painter,
    axis: &Axis,
    layout: &TimelineLayout,
    task: &TaskLayout,
    y: f32,
) -> Rect {
    let inset = theme::BAR_INSET;
    let height = ROW_HEIGHT - inset * 2.0;
    let x_start = axis.x(task.left_pct);
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let color = theme::category_color(task.color_category);

    // Unscheduled tasks stay visible as a thin marker at the left edge.
    if !task.has_start {
        let marker = Rect::from_min_size(
            Pos2::new(x_start, y + inset),
            Vec2::new(theme::MARKER_WIDTH, height),
        );
        painter.rect_filled(marker, Rounding::same(1.0), color);
        painter.text(
            Pos2::new(marker.right() + 6.0, marker.center().y),
            egui::Align2::LEFT_CENTER,
            format!("{} (unscheduled)", task.task_name),
            theme::font_small(),
            theme::TEXT_DIM,
        );
        return marker;
    }

    let bar_width = axis.span(task.width_pct).max(theme::MARKER_WIDTH);
    let bar_rect = Rect::from_min_size(Pos2::new(x_start, y + inset), Vec2::new(bar_width, height));

    // Slack tail after the bar
    if task.has_slack() {
        let slack_pct = task.slack_days / layout.range.total_days.max(1) as f64 * 100.0;
        let tail_end = (bar_rect.right() + axis.span(slack_pct)).min(axis.x(100.0));
        painter.line_segment(
            [
                Pos2::new(bar_rect.right(), bar_rect.center().y),
                Pos2::new(tail_end, bar_rect.center().y),
            ],
            Stroke::new(2.0, theme::SLACK_TAIL),
        );
    }

    let fill = if task.completion_pct > 0.0 {
        color.gamma_multiply(0.7)
    } else {
        color
    };
    painter.rect_filled(bar_rect, rounding, fill);

    if task.completion_pct > 0.0 {
        let done_rect = Rect::from_min_size(
            bar_rect.min,
            Vec2::new(bar_width * (task.completion_pct / 100.0) as f32, height),
        );
        painter.rect_filled(done_rect, rounding, theme::COMPLETION_FILL);
    }

    if task.is_critical {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::CRITICAL_RING),
        );
    }

    if task.scheduled && bar_width > 36.0 {
        let clipped = painter.with_clip_rect(bar_rect);
        clipped.text(
            bar_rect.center(),
            egui::Align2::CENTER_CENTER,
            format!("{:.1}d", task.duration_days),
            theme::font_bar(),
            theme::TEXT_ON_BAR,
        );
    }

    bar_rect
}

fn draw_milestone(painter: &egui::Painter, axis: &Axis, milestone: &MilestoneLayout, bottom: f32) {
    let Some(pct) = milestone.position_pct else {
        return;
    };
    let x = axis.x(pct);
    let top = axis.origin.y + HEADER_HEIGHT;

    painter.line_segment(
        [Pos2::new(x, top), Pos2::new(x, bottom)],
        Stroke::new(1.0, theme::MILESTONE.gamma_multiply(0.5)),
    );

    let size = 6.0;
    let center = Pos2::new(x, top + size + 2.0);
    let points = vec![
        Pos2::new(center.x, center.y - size),
        Pos2::new(center.x + size, center.y),
        Pos2::new(center.x, center.y + size),
        Pos2::new(center.x - size, center.y),
    ];
    painter.add(egui::Shape::convex_polygon(points, theme::MILESTONE, Stroke::NONE));
    painter.text(
        Pos2::new(x + size + 4.0, center.y),
        egui::Align2::LEFT_CENTER,
        &milestone.name,
        theme::font_small(),
        theme::MILESTONE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_bounded() {
        let mut view = ChartView::default();
        for _ in 0..50 {
            view.zoom_in();
        }
        assert_eq!(view.zoom, 12.0);
        for _ in 0..50 {
            view.zoom_out();
        }
        assert_eq!(view.zoom, 1.0);
    }

    #[test]
    fn tick_scale_follows_density() {
        assert_eq!(TickScale::for_density(40.0), TickScale::Days);
        assert_eq!(TickScale::for_density(10.0), TickScale::Weeks);
        assert_eq!(TickScale::for_density(2.0), TickScale::Months);
        assert_eq!(TickScale::for_density(0.05), TickScale::Years);
    }

    #[test]
    fn tick_count_is_bounded_by_width() {
        let width = 1200.0_f32;
        for total_days in [1_i64, 10, 365, 3650, 11_574_075] {
            let pixels_per_day = width / total_days as f32;
            let scale = TickScale::for_density(pixels_per_day);
            let step = scale.step_days(pixels_per_day);
            assert_eq!(step % scale.unit_days(), 0);
            let ticks = total_days / step + 1;
            assert!(
                ticks as f32 <= width / MIN_TICK_SPACING + 1.0,
                "{total_days} days gave {ticks} ticks"
            );
        }
    }

    #[test]
    fn axis_maps_percentages() {
        let axis = Axis {
            origin: Pos2::new(10.0, 0.0),
            width: 200.0,
        };
        assert_eq!(axis.x(0.0), 10.0);
        assert_eq!(axis.x(50.0), 110.0);
        assert_eq!(axis.span(25.0), 50.0);
    }
}
