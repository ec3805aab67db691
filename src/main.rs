use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Timelike, Weekday};
use clap::Parser;
use log::LevelFilter;

use weekview::config::{ClockFormat, Config};
use weekview::model::time::{parse_date, parse_time_of_day};
use weekview::{export, logging, AppointmentRecord, ItemMapping, Region, WeekView};

#[derive(Debug, Parser)]
#[command(name = "weekview", about = "Lay out a week of appointments and export the grid as JSON")]
struct Cli {
    /// JSON array of appointments ({"begin", "end", "text", "color"}), null entries allowed
    appointments: PathBuf,
    /// Any date inside the week to show (YYYY-MM-DD)
    #[arg(long, value_parser = parse_week)]
    week: Option<NaiveDate>,
    #[arg(long, value_parser = parse_weekday)]
    first_day: Option<Weekday>,
    #[arg(long)]
    hide_weekend: bool,
    #[arg(long)]
    region: Option<String>,
    #[arg(long)]
    language: Option<String>,
    #[arg(long)]
    twelve_hour: bool,
    /// First hour scrolled to, e.g. "8am" or "08:00"
    #[arg(long, value_parser = parse_hour)]
    day_start: Option<u8>,
    /// Hour the visible part of the day ends, e.g. "6pm"
    #[arg(long, value_parser = parse_hour)]
    day_end: Option<u8>,
    /// Settings file to use instead of the one in the config dir
    #[arg(long)]
    config: Option<PathBuf>,
    /// Store the effective settings back to the settings file
    #[arg(long)]
    save_config: bool,
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    verbose: bool,
}

fn parse_week(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", value))
}

fn parse_weekday(value: &str) -> Result<Weekday, String> {
    value
        .parse::<Weekday>()
        .map_err(|_| format!("invalid weekday '{}'", value))
}

fn parse_hour(value: &str) -> Result<u8, String> {
    match value.trim() {
        "24" | "24:00" => Ok(24),
        other => parse_time_of_day(other)
            .map(|time| time.hour() as u8)
            .ok_or_else(|| format!("invalid time of day '{}'", value)),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(region) = &cli.region {
        config.region = Region::new(region);
    }
    if let Some(first_day) = cli.first_day {
        config.first_day_of_week = Some(first_day);
    }
    if cli.hide_weekend {
        config.weekend_visible = false;
    }
    if let Some(language) = &cli.language {
        config.language = language.clone();
    }
    if cli.twelve_hour {
        config.clock_format = ClockFormat::Hour12;
    }
    if let Some(hour) = cli.day_start {
        config.schedule_start_hour = hour;
    }
    if let Some(hour) = cli.day_end {
        config.schedule_end_hour = hour;
    }

    if cli.save_config {
        match &cli.config {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
    }
    Ok(config)
}

fn load_records(path: &Path) -> Result<Vec<Option<AppointmentRecord>>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse appointments in {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    if let Err(e) = logging::init(level) {
        eprintln!("Logging disabled: {}", e);
    }

    let config = load_config(&cli)?;
    let records = load_records(&cli.appointments)?;

    // Without --week, show the week of the first appointment
    let anchor = cli
        .week
        .or_else(|| records.iter().flatten().map(|r| r.begin.date()).next())
        .unwrap_or_else(|| Local::now().date_naive());

    let mut view = WeekView::new(ItemMapping::for_records(), anchor, config.week_settings());
    config.apply(&mut view);
    view.set_source(records);

    if view.items().is_empty() && view.records().next().is_some() {
        log::warn!("No appointments could be laid out from {}", cli.appointments.display());
    }

    let layout = view.layout();
    let mut week = export::export_week(layout);
    week.hour_labels = config.hour_labels();

    match &cli.output {
        Some(output) => {
            // a directory gets the ISO week file name
            let path = if output.is_dir() {
                output.join(export::default_file_name(layout.begin_of_week.date()))
            } else {
                output.clone()
            };
            export::write_week(&week, &path)
                .with_context(|| format!("Failed to export week to {}", path.display()))?;
            println!(
                "Exported {} appointments of week {} to {}",
                layout.item_count(),
                layout.begin_of_week.date(),
                path.display()
            );
        }
        None => println!("{}", export::to_json(&week)?),
    }

    Ok(())
}
