//! Persisted viewer settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::layout::LayoutOptions;

const APP_NAME: &str = "TurnTimeline";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Timeline file opened most recently.
    pub last_file: Option<PathBuf>,
    /// Display floor for bar widths, in percent.
    pub min_bar_width_pct: f64,
    pub show_milestones: bool,
    /// Character cells for 100% in the text renderer.
    pub text_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_file: None,
            min_bar_width_pct: LayoutOptions::default().min_bar_width_pct,
            show_milestones: true,
            text_width: 40,
        }
    }
}

impl Settings {
    /// Directory holding the settings file.
    pub fn config_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn default_path() -> PathBuf {
        Self::config_dir().join(SETTINGS_FILE)
    }

    /// Read settings, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no settings file, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str::<Settings>(&contents) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Clamp values into their usable ranges.
    pub fn sanitized(mut self) -> Self {
        self.min_bar_width_pct = if self.min_bar_width_pct.is_finite() {
            self.min_bar_width_pct.clamp(0.0, 100.0)
        } else {
            LayoutOptions::default().min_bar_width_pct
        };
        self.text_width = self.text_width.clamp(10, 200);
        self
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            min_bar_width_pct: self.min_bar_width_pct,
            ..LayoutOptions::default()
        }
    }
}
