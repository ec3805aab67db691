//! Region tables: which weekdays are worked, where the week starts, and
//! how days are named.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    WorkDay,
    /// Half day: worked in the morning only
    WorkdayMorning,
    Weekend,
}

/// Day states indexed by `Weekday::num_days_from_sunday`
type WeekPattern = [DayState; 7];

use DayState::{Weekend as W, WorkDay as D, WorkdayMorning as M};

const SAT_SUN: WeekPattern = [W, D, D, D, D, D, W];
const FRI_SAT: WeekPattern = [D, D, D, D, D, W, W];
const FRI_HALF_SAT: WeekPattern = [D, D, D, D, D, M, W];
const THU_FRI: WeekPattern = [D, D, D, D, W, W, D];
const FRI_ONLY: WeekPattern = [D, D, D, D, D, W, D];
const SUN_ONLY: WeekPattern = [W, D, D, D, D, D, D];
const SAT_HALF_SUN: WeekPattern = [W, D, D, D, D, D, M];

const WEEK_PATTERNS: &[(&str, WeekPattern)] = &[
    ("AF", THU_FRI),
    ("BD", FRI_SAT),
    ("BH", FRI_SAT),
    ("DZ", FRI_SAT),
    ("EG", FRI_SAT),
    ("IL", FRI_HALF_SAT),
    ("IN", SUN_ONLY),
    ("IQ", FRI_SAT),
    ("IR", FRI_ONLY),
    ("JO", FRI_SAT),
    ("KW", FRI_SAT),
    ("LY", FRI_SAT),
    ("MX", SAT_HALF_SUN),
    ("OM", FRI_SAT),
    ("QA", FRI_SAT),
    ("SA", FRI_SAT),
    ("SD", FRI_SAT),
    ("SY", FRI_SAT),
    ("YE", FRI_SAT),
];

const SUNDAY_FIRST: &[&str] = &[
    "AG", "BR", "BS", "BZ", "CA", "CN", "CO", "DO", "GT", "HK", "HN", "IL", "IN", "JM", "JP", "KE",
    "KR", "MX", "PA", "PE", "PH", "PR", "PT", "PY", "SA", "SG", "SV", "TH", "TW", "US", "VE", "ZA", "ZW",
];

const SATURDAY_FIRST: &[&str] = &[
    "AE", "AF", "BH", "DJ", "DZ", "EG", "IQ", "IR", "JO", "KW", "LY", "OM", "QA", "SD", "SY",
];

const DEFAULT_REGION: &str = "US";

/// A region identified by its ISO 3166 country code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_ascii_uppercase())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn day_state(&self, weekday: Weekday) -> DayState {
        let pattern = WEEK_PATTERNS
            .iter()
            .find(|(code, _)| *code == self.code())
            .map(|(_, pattern)| pattern)
            .unwrap_or(&SAT_SUN);
        pattern[weekday.num_days_from_sunday() as usize]
    }

    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        self.day_state(weekday) == DayState::Weekend
    }

    /// First day of the week customary in this region
    pub fn first_day_of_week(&self) -> Weekday {
        let listed = |codes: &[&str]| codes.iter().any(|code| *code == self.code());
        if listed(SUNDAY_FIRST) {
            Weekday::Sun
        } else if listed(SATURDAY_FIRST) {
            Weekday::Sat
        } else {
            Weekday::Mon
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

const DAY_NAMES: &[(&str, [&str; 7])] = &[
    ("en", ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]),
    ("nl", ["zondag", "maandag", "dinsdag", "woensdag", "donderdag", "vrijdag", "zaterdag"]),
    ("de", ["Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag"]),
    ("fr", ["dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi"]),
    ("es", ["domingo", "lunes", "martes", "miércoles", "jueves", "viernes", "sábado"]),
];

/// Full day name in `language` (ISO 639-1), English when unknown
pub fn day_name(weekday: Weekday, language: &str) -> &'static str {
    let language = language.trim().to_ascii_lowercase();
    let names = DAY_NAMES
        .iter()
        .find(|(code, _)| *code == language)
        .map(|(_, names)| names)
        .unwrap_or(&DAY_NAMES[0].1);
    names[weekday.num_days_from_sunday() as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClockFormat {
    #[default]
    Hour24,      // "14:00"
    Hour12,      // "2pm"
}

/// Caption of a whole hour
pub fn hour_label(hour: u32, clock_format: ClockFormat) -> String {
    match clock_format {
        ClockFormat::Hour24 => format!("{:02}:00", hour),
        ClockFormat::Hour12 => {
            let (h12, ampm) = if hour == 0 {
                (12, "am")
            } else if hour < 12 {
                (hour, "am")
            } else if hour == 12 {
                (12, "pm")
            } else {
                (hour - 12, "pm")
            };
            format!("{}{}", h12, ampm)
        }
    }
}

/// Captions for the hour column, one per hour from midnight
pub fn hour_labels(clock_format: ClockFormat) -> Vec<String> {
    (0..crate::model::time::HOURS_PER_DAY as u32)
        .map(|hour| hour_label(hour, clock_format))
        .collect()
}
