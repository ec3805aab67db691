//! Partitioning of a day into clusters of overlapping appointments.
//!
//! Every function here expects the day's items sorted by begin and indented.

use serde::Serialize;

use crate::model::AppointmentItem;

/// A maximal cluster of overlapping items within one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayGroup {
    pub begin_index: usize,
    pub count: usize,
    /// Fraction of the day
    pub begin: f64,
    /// Fraction of the day
    pub end: f64,
    pub lane_count: usize,
}

impl DayGroup {
    pub fn length(&self) -> f64 {
        self.end - self.begin
    }

    pub fn members<'a>(&self, items: &'a [AppointmentItem]) -> &'a [AppointmentItem] {
        &items[self.begin_index..self.begin_index + self.count]
    }
}

/// Number of items in the group starting at `begin_index`.
///
/// The group grows while items overlap its running end. A lane 0 item
/// beginning strictly after that end starts the next group; items in
/// higher lanes always continue the current one.
pub fn group_count(items: &[AppointmentItem], begin_index: usize) -> usize {
    let mut end = items[begin_index].end_fraction();
    let mut count = 1;
    for item in &items[begin_index + 1..] {
        let (begin, length) = item.fraction_of_day();
        if item.indent == 0 && begin > end {
            break;
        }
        end = end.max(begin + length);
        count += 1;
    }
    count
}

/// Latest end (fraction of day) over the group's members
pub fn group_end(items: &[AppointmentItem], begin_index: usize, count: usize) -> f64 {
    items[begin_index..begin_index + count]
        .iter()
        .map(AppointmentItem::end_fraction)
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Lanes spanned by the group: highest indent + 1
pub fn indentation_count(items: &[AppointmentItem], begin_index: usize, count: usize) -> usize {
    items[begin_index..begin_index + count]
        .iter()
        .map(|item| item.indent)
        .max()
        .unwrap_or(0)
        + 1
}

/// Members of the group in lane `indent`, in begin order
pub fn indentation_items(
    items: &[AppointmentItem],
    begin_index: usize,
    count: usize,
    indent: usize,
) -> Vec<&AppointmentItem> {
    items[begin_index..begin_index + count]
        .iter()
        .filter(|item| item.indent == indent)
        .collect()
}

/// Split a whole day into consecutive groups
pub fn partition(items: &[AppointmentItem]) -> Vec<DayGroup> {
    let mut groups = Vec::new();
    let mut begin_index = 0;
    while begin_index < items.len() {
        let count = group_count(items, begin_index);
        let (begin, _) = items[begin_index].fraction_of_day();
        groups.push(DayGroup {
            begin_index,
            count,
            begin,
            end: group_end(items, begin_index, count),
            lane_count: indentation_count(items, begin_index, count),
        });
        begin_index += count;
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::indent::apply_indentation;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn day(spans: &[((u32, u32), (u32, u32))]) -> Vec<AppointmentItem> {
        let mut items: Vec<_> = spans
            .iter()
            .enumerate()
            .map(|(i, &((bh, bm), (eh, em)))| AppointmentItem::new(i, at(bh, bm), at(eh, em), format!("item {}", i)))
            .collect();
        apply_indentation(&mut items);
        items
    }

    fn hours(fraction: f64) -> f64 {
        fraction * 24.0
    }

    #[test]
    fn splits_into_two_groups() {
        let items = day(&[((9, 0), (10, 0)), ((9, 30), (10, 30)), ((14, 0), (15, 0))]);
        let groups = partition(&items);
        assert_eq!(groups.len(), 2);

        assert_eq!((groups[0].begin_index, groups[0].count), (0, 2));
        assert!((hours(groups[0].begin) - 9.0).abs() < 1e-9);
        assert!((hours(groups[0].end) - 10.5).abs() < 1e-9);
        assert_eq!(groups[0].lane_count, 2);

        assert_eq!((groups[1].begin_index, groups[1].count), (2, 1));
        assert!((hours(groups[1].begin) - 14.0).abs() < 1e-9);
        assert!((hours(groups[1].end) - 15.0).abs() < 1e-9);
        assert_eq!(groups[1].lane_count, 1);
    }

    #[test]
    fn touching_item_stays_in_group() {
        // begins exactly at the running end: not strictly after it
        let items = day(&[((9, 0), (10, 0)), ((10, 0), (11, 0))]);
        assert_eq!(group_count(&items, 0), 2);
        assert_eq!(indentation_count(&items, 0, 2), 1);
    }

    #[test]
    fn group_end_tracks_longest_member() {
        let items = day(&[((9, 0), (13, 0)), ((9, 30), (10, 0)), ((11, 0), (11, 30)), ((12, 0), (14, 0))]);
        let groups = partition(&items);
        assert_eq!(groups.len(), 1);
        assert!((hours(groups[0].end) - 14.0).abs() < 1e-9);
        assert_eq!(groups[0].lane_count, 2);
        let lane1 = indentation_items(&items, 0, groups[0].count, 1);
        assert_eq!(lane1.len(), 3);
    }

    #[test]
    fn unused_lane_yields_no_items() {
        let items = day(&[((9, 0), (10, 0)), ((9, 0), (10, 0)), ((9, 0), (10, 0)), ((11, 0), (12, 0))]);
        let groups = partition(&items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].lane_count, 3);
        assert_eq!(groups[1].lane_count, 1);
        assert!(indentation_items(&items, groups[1].begin_index, groups[1].count, 2).is_empty());
    }

    #[test]
    fn empty_day_has_no_groups() {
        assert!(partition(&[]).is_empty());
    }
}
