//! Week and time-of-day arithmetic shared by the layout and the control

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

pub const DAYS_PER_WEEK: usize = 7;
pub const HOURS_PER_DAY: usize = 24;

/// Convert an offset from midnight into a fraction of a 24 hour day
pub fn fraction_of_day(offset: Duration) -> f64 {
    offset.num_milliseconds() as f64 / Duration::days(1).num_milliseconds() as f64
}

/// Start of the week containing `date`, moved backward to `first_day`
pub fn begin_of_week(date: NaiveDate, first_day: Weekday) -> NaiveDateTime {
    let diff = (date.weekday().num_days_from_sunday() + 7 - first_day.num_days_from_sunday()) % 7;
    (date - Duration::days(diff as i64)).and_time(NaiveTime::MIN)
}

/// Exclusive end of the week containing `date`
pub fn end_of_week(date: NaiveDate, first_day: Weekday) -> NaiveDateTime {
    begin_of_week(date, first_day) + Duration::days(DAYS_PER_WEEK as i64)
}

/// Weekday `days` after `weekday`
pub fn add_day(weekday: Weekday, days: usize) -> Weekday {
    (0..days % DAYS_PER_WEEK).fold(weekday, |day, _| day.succ())
}

/// Parse a date like "2024-01-01"
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

/// Parse a user-entered time of day ("9:00am", "14:30", "2pm")
pub fn parse_time_of_day(input: &str) -> Option<NaiveTime> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let (time_part, meridiem) = if let Some(rest) = input.strip_suffix("pm") {
        (rest, Some(true))
    } else if let Some(rest) = input.strip_suffix("am") {
        (rest, Some(false))
    } else if let Some(rest) = input.strip_suffix('p') {
        (rest, Some(true))
    } else if let Some(rest) = input.strip_suffix('a') {
        (rest, Some(false))
    } else {
        (input.as_str(), None) // 24-hour format assumed
    };

    let time_part = time_part.trim();
    let (hour, minute) = match time_part.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => (time_part.parse::<u32>().ok()?, 0),
    };

    let hour_24 = match meridiem {
        Some(true) if hour < 12 => hour + 12,
        Some(false) if hour == 12 => 0,
        Some(_) if hour > 12 => return None,
        _ => hour,
    };

    NaiveTime::from_hms_opt(hour_24, minute, 0)
}
