use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Weekday;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::calendar::{DayRange, WeekView};
pub use crate::culture::ClockFormat;
use crate::culture::{hour_labels, Region};
use crate::layout::WeekSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// None: the region's customary first day
    #[serde(default)]
    pub first_day_of_week: Option<Weekday>,
    #[serde(default)]
    pub region: Region,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_true")]
    pub weekend_visible: bool,
    #[serde(default)]
    pub clock_format: ClockFormat,
    #[serde(default = "default_schedule_start_hour")]
    pub schedule_start_hour: u8,
    #[serde(default = "default_schedule_end_hour")]
    pub schedule_end_hour: u8,
    #[serde(default)]
    pub allow_delete: bool,
    #[serde(default)]
    pub auto_scroll_to_selected_item: bool,
}

fn default_schedule_start_hour() -> u8 {
    0
}

fn default_schedule_end_hour() -> u8 {
    24
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_day_of_week: None,
            region: Region::default(),
            language: default_language(),
            weekend_visible: true,
            clock_format: ClockFormat::Hour24,
            schedule_start_hour: default_schedule_start_hour(),
            schedule_end_hour: default_schedule_end_hour(),
            allow_delete: false,
            auto_scroll_to_selected_item: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .context("Failed to read config file")?;
            serde_json::from_str(&contents)
                .context("Failed to parse config file")
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(config_path, contents)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "weekview", "weekview")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
            .unwrap_or_else(|| self.region.first_day_of_week())
    }

    pub fn week_settings(&self) -> WeekSettings {
        WeekSettings {
            first_day_of_week: self.first_day_of_week(),
            weekend_visible: self.weekend_visible,
            region: self.region.clone(),
            language: self.language.clone(),
        }
    }

    pub fn day_range(&self) -> DayRange {
        DayRange::hours(self.schedule_start_hour, self.schedule_end_hour)
    }

    pub fn hour_labels(&self) -> Vec<String> {
        hour_labels(self.clock_format)
    }

    /// Push every setting into an existing view
    pub fn apply<T: Clone>(&self, view: &mut WeekView<T>) {
        view.set_region(self.region.clone());
        view.set_first_day_of_week(self.first_day_of_week());
        view.set_weekend_visible(self.weekend_visible);
        view.set_language(&self.language);
        view.set_day_range(self.day_range());
        view.allow_delete = self.allow_delete;
        view.auto_scroll_to_selected_item = self.auto_scroll_to_selected_item;
    }
}
