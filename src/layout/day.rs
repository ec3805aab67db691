//! Proportional layout of one day column.
//!
//! The outer sequence splits the day (1.0) into gaps and groups. Each group
//! holds one sub-column per lane that has members in that group, splitting
//! the group's own span (again 1.0) into gaps and appointments.

use serde::Serialize;

use super::group::{indentation_items, partition, DayGroup};
use crate::model::AppointmentItem;

/// Gaps shorter than this (as a fraction) are rounding noise, not slots
const MIN_GAP: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DaySlot {
    Empty { length: f64 },
    Group(GroupLayout),
}

impl DaySlot {
    pub fn length(&self) -> f64 {
        match self {
            DaySlot::Empty { length } => *length,
            DaySlot::Group(group) => group.length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupLayout {
    /// Fraction of the day
    pub begin: f64,
    /// Fraction of the day
    pub length: f64,
    /// Lanes numbered in this group, including unused ones
    pub lane_count: usize,
    pub lanes: Vec<LaneLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneLayout {
    pub indent: usize,
    pub slots: Vec<LaneSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LaneSlot {
    Empty { length: f64 },
    Appointment { length: f64, item: AppointmentItem },
}

impl LaneSlot {
    pub fn length(&self) -> f64 {
        match self {
            LaneSlot::Empty { length } | LaneSlot::Appointment { length, .. } => *length,
        }
    }

    pub fn item(&self) -> Option<&AppointmentItem> {
        match self {
            LaneSlot::Empty { .. } => None,
            LaneSlot::Appointment { item, .. } => Some(item),
        }
    }
}

/// Build the slots of one day from items sorted by begin and indented
pub fn build_day_slots(items: &[AppointmentItem]) -> Vec<DaySlot> {
    let mut slots = Vec::new();
    let mut previous_end = 0.0;

    for group in partition(items) {
        let gap = group.begin - previous_end;
        if gap > MIN_GAP {
            slots.push(DaySlot::Empty { length: gap });
        }
        previous_end = group.end;
        slots.push(DaySlot::Group(build_group(items, &group)));
    }

    if 1.0 - previous_end > MIN_GAP {
        slots.push(DaySlot::Empty { length: 1.0 - previous_end });
    }
    slots
}

fn build_group(items: &[AppointmentItem], group: &DayGroup) -> GroupLayout {
    let length = group.length();
    let degenerate = !(length.is_finite() && length > 0.0);

    let lanes = (0..group.lane_count)
        .filter_map(|indent| {
            let lane_items = indentation_items(items, group.begin_index, group.count, indent);
            if lane_items.is_empty() {
                return None;
            }
            let slots = if degenerate {
                share_equally(&lane_items)
            } else {
                normalize_lane(&lane_items, group.begin, length)
            };
            Some(LaneLayout { indent, slots })
        })
        .collect();

    GroupLayout {
        begin: group.begin,
        length,
        lane_count: group.lane_count,
        lanes,
    }
}

/// Lane slots within the group's local [0, 1] range
fn normalize_lane(lane_items: &[&AppointmentItem], group_begin: f64, group_length: f64) -> Vec<LaneSlot> {
    let mut slots = Vec::new();
    let mut previous = 0.0;

    for item in lane_items {
        let (begin, length) = item.fraction_of_day();
        let begin = (begin - group_begin) / group_length;
        let length = length / group_length;

        let gap = begin - previous;
        if gap > MIN_GAP {
            slots.push(LaneSlot::Empty { length: gap });
        }
        slots.push(LaneSlot::Appointment {
            length,
            item: (*item).clone(),
        });
        previous = begin + length;
    }

    if 1.0 - previous > MIN_GAP {
        slots.push(LaneSlot::Empty { length: 1.0 - previous });
    }
    slots
}

// Zero or undefined group span: nothing to normalize against.
fn share_equally(lane_items: &[&AppointmentItem]) -> Vec<LaneSlot> {
    let length = 1.0 / lane_items.len() as f64;
    lane_items
        .iter()
        .map(|item| LaneSlot::Appointment {
            length,
            item: (*item).clone(),
        })
        .collect()
}
