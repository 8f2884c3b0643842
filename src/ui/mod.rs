pub mod dialogs;
pub mod gantt_chart;
pub mod summary;
pub mod task_table;
pub mod theme;
pub mod toolbar;
