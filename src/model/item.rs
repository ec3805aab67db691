use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::time::{fraction_of_day, DAYS_PER_WEEK};

/// An RGBA color carried through the layout for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parse "#rrggbb" or "#rrggbbaa" (the leading '#' is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Rgba {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| format!("invalid color '{}'", s))
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An appointment as seen by the layout engine.
///
/// Items are rebuilt from the source collection on every layout pass. Only
/// `indent` is written after construction, by the indentation pass of the
/// day the item belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentItem {
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
    /// Position of the record in the source collection
    pub index: usize,
    pub indent: usize,
}

impl AppointmentItem {
    pub fn new(index: usize, begin: NaiveDateTime, end: NaiveDateTime, text: impl Into<String>) -> Self {
        Self {
            begin,
            end,
            text: text.into(),
            color: None,
            index,
            indent: 0,
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    pub fn length(&self) -> Duration {
        self.end - self.begin
    }

    pub fn is_valid(&self) -> bool {
        self.end > self.begin
    }

    /// Begin and length as a fraction of the day the item begins in.
    /// Items crossing midnight are truncated at 1.0, never split.
    pub fn fraction_of_day(&self) -> (f64, f64) {
        let midnight = self.begin.date().and_time(chrono::NaiveTime::MIN);
        let begin = fraction_of_day(self.begin - midnight);
        let end = fraction_of_day(self.end - midnight).min(1.0);
        (begin, end - begin)
    }

    /// End as a fraction of the day, clipped at 1.0
    pub fn end_fraction(&self) -> f64 {
        let (begin, length) = self.fraction_of_day();
        begin + length
    }

    pub fn has_overlap(&self, other: &AppointmentItem) -> bool {
        (other.begin >= self.begin && other.begin < self.end)
            || (self.begin >= other.begin && self.begin < other.end)
    }

    pub fn is_in_day(&self, day: NaiveDate) -> bool {
        let begin_day = day.and_time(chrono::NaiveTime::MIN);
        self.begin >= begin_day && self.begin < begin_day + Duration::days(1)
    }

    pub fn is_in_week(&self, begin_week: NaiveDateTime) -> bool {
        self.begin >= begin_week && self.begin < begin_week + Duration::days(DAYS_PER_WEEK as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn item(begin: NaiveDateTime, end: NaiveDateTime) -> AppointmentItem {
        AppointmentItem::new(0, begin, end, "item")
    }

    #[test]
    fn fraction_of_day_within_day() {
        let (begin, length) = item(at(1, 6, 0), at(1, 12, 0)).fraction_of_day();
        assert!((begin - 0.25).abs() < 1e-12);
        assert!((length - 0.25).abs() < 1e-12);
    }

    #[test]
    fn fraction_of_day_clips_at_midnight() {
        let (begin, length) = item(at(7, 23, 0), at(8, 1, 0)).fraction_of_day();
        assert!((begin - 23.0 / 24.0).abs() < 1e-12);
        assert!((length - 1.0 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn validity_requires_positive_length() {
        assert!(item(at(1, 9, 0), at(1, 10, 0)).is_valid());
        assert!(!item(at(1, 9, 0), at(1, 9, 0)).is_valid());
        assert!(!item(at(1, 10, 0), at(1, 9, 0)).is_valid());
    }

    #[test]
    fn overlap_is_half_open_and_symmetric() {
        let a = item(at(1, 9, 0), at(1, 10, 0));
        let b = item(at(1, 9, 30), at(1, 10, 30));
        let c = item(at(1, 10, 0), at(1, 11, 0));
        assert!(a.has_overlap(&b));
        assert!(b.has_overlap(&a));
        assert!(!a.has_overlap(&c));
        assert!(!c.has_overlap(&a));
        assert!(b.has_overlap(&c));
    }

    #[test]
    fn day_and_week_membership() {
        let a = item(at(7, 23, 0), at(8, 1, 0));
        assert!(a.is_in_day(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()));
        assert!(!a.is_in_day(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()));

        let week = at(1, 0, 0);
        assert!(a.is_in_week(week));
        assert!(!item(at(8, 0, 0), at(8, 1, 0)).is_in_week(week));
    }

    #[test]
    fn color_hex_parsing() {
        assert_eq!(Rgba::from_hex("#ff8000"), Some(Rgba::rgb(0xff, 0x80, 0x00)));
        assert_eq!(Rgba::from_hex("10203040").map(|c| c.a), Some(0x40));
        assert_eq!(Rgba::from_hex("#fff"), None);
        assert_eq!(Rgba::rgb(1, 2, 3).to_string(), "#010203");
    }
}
