//! Headless renderers for a computed layout.

pub mod text;

pub use text::render_text;
