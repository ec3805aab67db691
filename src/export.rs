use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::culture::DayState;
use crate::error::ExportError;
use crate::layout::{DaySlot, WeekLayout};

#[derive(Debug, Serialize)]
pub struct ExportedWeek {
    pub week_start: String,
    pub week_end: String,
    pub iso_week: u32,
    pub item_count: usize,
    pub total_minutes: i64,
    /// Captions of the hour column, left out when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hour_labels: Vec<String>,
    pub days: Vec<ExportedDay>,
}

#[derive(Debug, Serialize)]
pub struct ExportedDay {
    pub date: String,
    pub header: String,
    pub column: usize,
    pub state: DayState,
    pub slots: Vec<DaySlot>,
}

impl ExportedDay {
    fn new(day: &crate::layout::DayLayout) -> Self {
        Self {
            date: day.date.format("%Y-%m-%d").to_string(),
            header: day.header.clone(),
            column: day.column,
            state: day.state,
            slots: day.slots.clone(),
        }
    }
}

/// Flatten a computed week into its export form
pub fn export_week(layout: &WeekLayout) -> ExportedWeek {
    let week_start = layout.begin_of_week.date();
    let week_end = week_start + Duration::days(6);

    let total_minutes = layout
        .days
        .iter()
        .flat_map(|day| day.items())
        .map(|item| item.length().num_minutes())
        .sum();

    ExportedWeek {
        week_start: week_start.format("%Y-%m-%d").to_string(),
        week_end: week_end.format("%Y-%m-%d").to_string(),
        iso_week: week_start.iso_week().week(),
        item_count: layout.item_count(),
        total_minutes,
        hour_labels: Vec::new(),
        days: layout.days.iter().map(ExportedDay::new).collect(),
    }
}

/// "2024-W01.json" style name for the week starting at `week_start`
pub fn default_file_name(week_start: NaiveDate) -> String {
    let iso_week = week_start.iso_week();
    format!("{}-W{:02}.json", iso_week.year(), iso_week.week())
}

pub fn to_json(week: &ExportedWeek) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(week)?)
}

/// Write the week as pretty JSON, creating parent directories as needed
pub fn write_week(week: &ExportedWeek, path: &Path) -> Result<(), ExportError> {
    let json = to_json(week)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ExportError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
