use std::fmt::Write;

use crate::layout::{ColorCategory, TaskLayout, TimelineLayout};

const NAME_WIDTH: usize = 24;

/// Render a layout as a plain-text Gantt chart.
///
/// `bar_width` is the number of character cells that stand for 100%.
pub fn render_text(layout: &TimelineLayout, bar_width: usize) -> String {
    let bar_width = bar_width.max(1);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Project timeline  {} -> {}",
        layout.range.start.format("%Y-%m-%d"),
        layout.range.end.format("%Y-%m-%d"),
    );
    let _ = writeln!(
        out,
        "{}  |  critical path: {} tasks",
        layout.summary(),
        layout.critical_count
    );
    let _ = writeln!(out);

    for task in &layout.tasks {
        let _ = writeln!(out, "{}", task_line(task, bar_width));
    }

    if !layout.milestones.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Milestones");
        for milestone in &layout.milestones {
            let date = milestone
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "N/A".to_string());
            let _ = writeln!(
                out,
                "  * {} ({})  {} tasks",
                milestone.name, date, milestone.task_count
            );
        }
    }

    out
}

fn task_line(task: &TaskLayout, bar_width: usize) -> String {
    let mut line = format!(
        "{:<width$} [{}] {:<11} {:>3.0}%",
        truncate(&task.task_name, NAME_WIDTH),
        bar(task, bar_width),
        task.status.label(),
        task.completion_pct,
        width = NAME_WIDTH,
    );
    if task.is_critical {
        line.push_str("  critical");
    }
    if task.has_slack() {
        let _ = write!(line, "  {:.1}d slack", task.slack_days);
    }
    if let Some(agent) = &task.assigned_agent {
        let _ = write!(line, "  @{}", agent);
    }
    line
}

/// Character cells for one bar; the filled part is drawn with the
/// category glyph, the completed share of it with `#`.
fn bar(task: &TaskLayout, bar_width: usize) -> String {
    let cells = |pct: f64| ((pct / 100.0) * bar_width as f64).round() as usize;
    let start = cells(task.left_pct).min(bar_width - 1);
    let len = if task.width_pct > 0.0 {
        cells(task.width_pct).max(1).min(bar_width - start)
    } else {
        0
    };
    let done = ((task.completion_pct / 100.0) * len as f64).round() as usize;
    let glyph = category_glyph(task.color_category);

    let mut out = String::with_capacity(bar_width);
    for i in 0..bar_width {
        let ch = if i >= start && i < start + len {
            if i - start < done {
                '#'
            } else {
                glyph
            }
        } else {
            '.'
        };
        out.push(ch);
    }
    out
}

fn category_glyph(category: ColorCategory) -> char {
    match category {
        ColorCategory::Complete => '=',
        ColorCategory::Active => '>',
        ColorCategory::Blocked => '!',
        ColorCategory::Neutral => '-',
    }
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let mut s: String = name.chars().take(max.saturating_sub(1)).collect();
        s.push('~');
        s
    }
}
