use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use weekview::layout::{DaySlot, GroupLayout, LaneSlot};
use weekview::{
    schedule_week, AppointmentItem, AppointmentRecord, ItemMapping, SelectionChanged, WeekLayout, WeekSettings,
    WeekView,
};

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn monday_first() -> WeekSettings {
    WeekSettings {
        first_day_of_week: Weekday::Mon,
        ..WeekSettings::default()
    }
}

fn groups(layout: &WeekLayout, day: NaiveDate) -> Vec<&GroupLayout> {
    layout
        .day(day)
        .expect("day should be laid out")
        .slots
        .iter()
        .filter_map(|slot| match slot {
            DaySlot::Group(group) => Some(group),
            DaySlot::Empty { .. } => None,
        })
        .collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
}

#[test]
fn overlapping_monday_items_form_two_groups() {
    let items = vec![
        AppointmentItem::new(0, at(1, 9, 0), at(1, 10, 0), "A"),
        AppointmentItem::new(1, at(1, 9, 30), at(1, 10, 30), "B"),
        AppointmentItem::new(2, at(1, 14, 0), at(1, 15, 0), "C"),
    ];
    let layout = schedule_week(items, date(1), &monday_first());

    let indents: Vec<usize> = (0..3).map(|i| layout.find(i).unwrap().1.indent).collect();
    assert_eq!(indents, vec![0, 1, 0]);

    let monday = groups(&layout, date(1));
    assert_eq!(monday.len(), 2);

    assert_close(monday[0].begin, 9.0 / 24.0);
    assert_close(monday[0].length, 1.5 / 24.0);
    assert_eq!(monday[0].lane_count, 2);
    assert_eq!(monday[0].lanes.len(), 2);

    assert_close(monday[1].begin, 14.0 / 24.0);
    assert_close(monday[1].length, 1.0 / 24.0);
    assert_eq!(monday[1].lane_count, 1);
}

#[test]
fn item_crossing_midnight_stays_on_its_begin_day() {
    let items = vec![AppointmentItem::new(0, at(7, 23, 0), at(8, 1, 0), "D")];
    let layout = schedule_week(items, date(1), &monday_first());

    let sunday = groups(&layout, date(7));
    assert_eq!(sunday.len(), 1);
    assert_close(sunday[0].begin, 23.0 / 24.0);
    assert_close(sunday[0].length, 1.0 / 24.0);
    assert_eq!(layout.item_count(), 1);
    assert!(groups(&layout, date(1)).is_empty());

    // the last slot of Sunday ends exactly at midnight
    let total: f64 = layout.day(date(7)).unwrap().slots.iter().map(DaySlot::length).sum();
    assert_close(total, 1.0);
}

#[test]
fn hidden_weekend_excludes_weekend_items() {
    let settings = WeekSettings {
        weekend_visible: false,
        ..monday_first()
    };
    let items = vec![
        AppointmentItem::new(0, at(5, 9, 0), at(5, 10, 0), "Friday"),
        AppointmentItem::new(1, at(6, 9, 0), at(6, 10, 0), "Saturday"),
        AppointmentItem::new(2, at(7, 9, 0), at(7, 10, 0), "Sunday"),
    ];
    let layout = schedule_week(items, date(3), &settings);

    assert_eq!(layout.days.len(), 5);
    let weekdays: Vec<Weekday> = layout.days.iter().map(|day| day.date.weekday()).collect();
    assert_eq!(
        weekdays,
        vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
    );
    assert_eq!(layout.visible_order(), vec![0]);
}

#[test]
fn reselecting_fires_identical_notifications() {
    let mut view = WeekView::new(ItemMapping::for_records(), date(1), monday_first());
    view.set_items(vec![
        AppointmentRecord::new(at(1, 9, 0), at(1, 10, 0), "A"),
        AppointmentRecord::new(at(1, 9, 30), at(1, 10, 30), "B"),
        AppointmentRecord::new(at(1, 14, 0), at(1, 15, 0), "C"),
    ]);

    let events: Rc<RefCell<Vec<SelectionChanged<AppointmentRecord>>>> = Rc::default();
    let sink = Rc::clone(&events);
    view.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    view.select_index(Some(2));
    view.select_index(Some(2));

    let events = events.borrow();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], events[1]);
    assert_eq!(events[0].index, Some(2));
}

#[test]
fn every_day_and_lane_sums_to_one() {
    // a busy week with chains, nesting and back-to-back items
    let items = vec![
        AppointmentItem::new(0, at(2, 8, 0), at(2, 12, 0), "long"),
        AppointmentItem::new(1, at(2, 8, 15), at(2, 9, 0), "nested"),
        AppointmentItem::new(2, at(2, 9, 0), at(2, 9, 40), "back to back"),
        AppointmentItem::new(3, at(2, 11, 50), at(2, 13, 10), "chain"),
        AppointmentItem::new(4, at(2, 13, 0), at(2, 13, 5), "short"),
        AppointmentItem::new(5, at(2, 16, 0), at(2, 17, 0), "alone"),
        AppointmentItem::new(6, at(4, 0, 0), at(4, 23, 59), "all day"),
        AppointmentItem::new(7, at(4, 10, 0), at(4, 11, 0), "inside"),
    ];
    let layout = schedule_week(items, date(1), &monday_first());
    assert_eq!(layout.item_count(), 8);

    for day in &layout.days {
        let total: f64 = day.slots.iter().map(DaySlot::length).sum();
        assert_close(total, 1.0);

        for group in groups(&layout, day.date) {
            for lane in &group.lanes {
                let lane_total: f64 = lane.slots.iter().map(LaneSlot::length).sum();
                assert_close(lane_total, 1.0);
            }
        }
    }
}

#[test]
fn json_source_with_null_entry_lays_out_nothing() {
    let json = r##"[
        {"begin": "2024-01-01T09:00:00", "end": "2024-01-01T10:00:00", "text": "A", "color": "#336699"},
        null
    ]"##;
    let records: Vec<Option<AppointmentRecord>> = serde_json::from_str(json).unwrap();
    let mut view = WeekView::new(ItemMapping::for_records(), date(1), monday_first());
    view.set_source(records);
    assert!(view.items().is_empty());
    assert_eq!(view.layout().item_count(), 0);
    assert_eq!(view.layout().days.len(), 7);
}
