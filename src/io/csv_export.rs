use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::layout::TimelineLayout;

const HEADER: [&str; 10] = [
    "Task ID",
    "Task",
    "Agent",
    "Status",
    "Left %",
    "Width %",
    "Category",
    "Critical",
    "Slack Days",
    "Completion %",
];

/// Export a computed layout to a semicolon-delimited CSV file.
///
/// Returns the number of task rows written.
pub fn export_layout_csv(layout: &TimelineLayout, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    write_layout_csv(layout, file)
}

/// Write layout rows to any writer, header first, tasks in display order.
pub fn write_layout_csv<W: Write>(layout: &TimelineLayout, writer: W) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADER)?;

    for task in &layout.tasks {
        let row: [&str; 10] = [
            &task.task_id,
            &task.task_name,
            task.assigned_agent.as_deref().unwrap_or(""),
            task.status.as_str(),
            &format!("{:.2}", task.left_pct),
            &format!("{:.2}", task.width_pct),
            task.color_category.as_str(),
            if task.is_critical { "yes" } else { "no" },
            &format!("{:.1}", task.slack_days),
            &format!("{:.0}", task.completion_pct),
        ];
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(layout.tasks.len())
}
