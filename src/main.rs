#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

use std::path::PathBuf;
use std::process;

use chrono::{DateTime, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use turn_timeline::config::Settings;
use turn_timeline::{io, render, Clock, FixedClock, SystemClock, TimelineLayout};

/// Gantt view of simulation project timelines
#[derive(Parser, Debug)]
#[command(name = "turn-timeline", version, about, long_about = None)]
struct Args {
    /// Timeline JSON, turn response, or list of turns
    file: Option<PathBuf>,

    /// Print a text Gantt chart instead of opening the viewer
    #[arg(long)]
    print: bool,

    /// Character cells used for the full timeline width in --print output
    #[arg(long)]
    width: Option<usize>,

    /// Write the computed layout as CSV to this path
    #[arg(long, value_name = "PATH")]
    export_csv: Option<PathBuf>,

    /// Fixed "now" (RFC 3339) used when the timeline has no usable dates
    #[arg(long, value_parser = parse_now)]
    now: Option<DateTime<Utc>>,

    /// Minimum bar width in percent
    #[arg(long, value_name = "PCT")]
    min_bar_width: Option<f64>,

    /// Settings file (defaults to the OS config directory)
    #[arg(long, env = "TURN_TIMELINE_SETTINGS")]
    settings: Option<PathBuf>,
}

fn parse_now(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{}': {}", s, e))
}

/// Initialize logging from RUST_LOG, defaulting to warnings only.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let args = Args::parse();
    let settings_path = args.settings.clone().unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load(&settings_path);
    if let Some(pct) = args.min_bar_width {
        settings.min_bar_width_pct = pct;
    }
    if let Some(width) = args.width {
        settings.text_width = width;
    }
    let settings = settings.sanitized();

    if args.print || args.export_csv.is_some() {
        if let Err(e) = run_headless(&args, &settings) {
            eprintln!("error: {}", e);
            process::exit(1);
        }
        return;
    }

    if let Err(e) = run_viewer(args.file, settings, settings_path) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run_headless(args: &Args, settings: &Settings) -> turn_timeline::Result<()> {
    let Some(path) = &args.file else {
        return Err(turn_timeline::Error::InvalidInput(
            "a timeline file is required with --print or --export-csv".to_string(),
        ));
    };

    let clock: Box<dyn Clock> = match args.now {
        Some(now) => Box::new(FixedClock(now)),
        None => Box::new(SystemClock),
    };

    let layout = io::load_timeline(path)?
        .and_then(|t| TimelineLayout::compute_with(&t, clock.as_ref(), &settings.layout_options()));
    let Some(layout) = layout else {
        println!("No timeline data available.");
        return Ok(());
    };

    if args.print {
        print!("{}", render::render_text(&layout, settings.text_width));
    }
    if let Some(csv_path) = &args.export_csv {
        let count = io::export_layout_csv(&layout, csv_path)?;
        tracing::info!(path = %csv_path.display(), count, "exported layout");
    }
    Ok(())
}

fn run_viewer(
    file: Option<PathBuf>,
    settings: Settings,
    settings_path: PathBuf,
) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Turn Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Turn Timeline",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::TimelineApp::new(
                cc,
                settings,
                settings_path,
                file,
            )))
        }),
    )
}
