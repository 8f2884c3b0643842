pub mod csv_export;
pub mod file;

pub use csv_export::export_layout_csv;
pub use file::{load_timeline, parse_timeline};
