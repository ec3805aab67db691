use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use log::debug;
use serde::Serialize;

use super::day::{build_day_slots, DaySlot};
use super::indent::apply_indentation;
use crate::culture::{day_name, DayState, Region};
use crate::model::time::{add_day, begin_of_week, DAYS_PER_WEEK};
use crate::model::AppointmentItem;

/// Everything besides the items that decides how a week is laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSettings {
    pub first_day_of_week: Weekday,
    pub weekend_visible: bool,
    pub region: Region,
    /// Language of the day captions
    pub language: String,
}

impl Default for WeekSettings {
    fn default() -> Self {
        let region = Region::default();
        Self {
            first_day_of_week: region.first_day_of_week(),
            weekend_visible: true,
            region,
            language: "en".to_string(),
        }
    }
}

impl WeekSettings {
    /// Offsets (0..7 from the first day of week) of the days shown
    pub fn visible_day_offsets(&self) -> Vec<usize> {
        (0..DAYS_PER_WEEK)
            .filter(|&offset| {
                self.weekend_visible || !self.region.is_weekend(add_day(self.first_day_of_week, offset))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekLayout {
    pub begin_of_week: NaiveDateTime,
    pub days: Vec<DayLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLayout {
    pub date: NaiveDate,
    /// Days since the begin of the week
    pub day_offset: usize,
    /// Column among the visible days
    pub column: usize,
    pub state: DayState,
    pub header: String,
    pub slots: Vec<DaySlot>,
}

impl DayLayout {
    /// Items of this day in display order: group by group, lane by lane
    pub fn items(&self) -> impl Iterator<Item = &AppointmentItem> {
        self.slots
            .iter()
            .filter_map(|slot| match slot {
                DaySlot::Group(group) => Some(group),
                DaySlot::Empty { .. } => None,
            })
            .flat_map(|group| group.lanes.iter())
            .flat_map(|lane| lane.slots.iter())
            .filter_map(|slot| slot.item())
    }
}

impl WeekLayout {
    pub fn day(&self, date: NaiveDate) -> Option<&DayLayout> {
        self.days.iter().find(|day| day.date == date)
    }

    /// Source indices of all laid out items in display order
    pub fn visible_order(&self) -> Vec<usize> {
        self.days
            .iter()
            .flat_map(|day| day.items())
            .map(|item| item.index)
            .collect()
    }

    pub fn find(&self, index: usize) -> Option<(&DayLayout, &AppointmentItem)> {
        self.days
            .iter()
            .find_map(|day| day.items().find(|item| item.index == index).map(|item| (day, item)))
    }

    pub fn item_count(&self) -> usize {
        self.days.iter().map(|day| day.items().count()).sum()
    }
}

/// Lay out the week containing `anchor`.
///
/// Items outside the week, and items on hidden weekend days, are left out.
pub fn schedule_week(items: Vec<AppointmentItem>, anchor: NaiveDate, settings: &WeekSettings) -> WeekLayout {
    let begin_week = begin_of_week(anchor, settings.first_day_of_week);

    let mut week_items: Vec<AppointmentItem> = items
        .into_iter()
        .filter(|item| item.is_in_week(begin_week))
        .collect();
    // stable: equal begins keep arrival order
    week_items.sort_by_key(|item| item.begin);

    let days: Vec<DayLayout> = settings
        .visible_day_offsets()
        .into_iter()
        .enumerate()
        .map(|(column, day_offset)| {
            let date = (begin_week + Duration::days(day_offset as i64)).date();
            let mut day_items: Vec<AppointmentItem> = week_items
                .iter()
                .filter(|item| item.is_in_day(date))
                .cloned()
                .collect();
            apply_indentation(&mut day_items);

            DayLayout {
                date,
                day_offset,
                column,
                state: settings.region.day_state(date.weekday()),
                header: format!("{} {}", day_name(date.weekday(), &settings.language), date.day()),
                slots: build_day_slots(&day_items),
            }
        })
        .collect();

    debug!(
        "Laid out week of {}: {} items in {} day columns",
        begin_week.date(),
        days.iter().map(|day| day.items().count()).sum::<usize>(),
        days.len()
    );

    WeekLayout {
        begin_of_week: begin_week,
        days,
    }
}
