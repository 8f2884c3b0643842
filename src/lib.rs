//! Gantt layout engine for workforce-simulation project timelines.
//!
//! A [`ProjectTimeline`] snapshot arrives with each simulation turn. The
//! [`layout`] module turns it into render-ready bar coordinates and
//! classifications; [`render`], [`io`] and the viewer consume that layout.

pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod model;
pub mod render;

pub use error::{Error, Result};
pub use layout::{
    BarPosition, Clock, ColorCategory, DateRange, FixedClock, LayoutOptions, SystemClock,
    TaskLayout, TimelineLayout,
};
pub use model::{Milestone, ProjectTimeline, TaskSchedule, TaskStatus};
