//! Lane assignment for overlapping appointments.
//!
//! Greedy first-fit: every item goes into the lowest lane whose current
//! members it does not overlap. Lanes depend on iteration order, so callers
//! wanting time-stable lanes sort by begin first.

use crate::model::AppointmentItem;

/// Lane of every item in `items`, in input order
pub fn assign_indentation(items: &[AppointmentItem]) -> Vec<usize> {
    let mut lanes: Vec<Vec<&AppointmentItem>> = Vec::new();
    let mut indents = Vec::with_capacity(items.len());

    for item in items {
        let lane = match lanes.iter().position(|lane| fits_in(lane, item)) {
            Some(lane) => lane,
            None => {
                lanes.push(Vec::new());
                lanes.len() - 1
            }
        };
        lanes[lane].push(item);
        indents.push(lane);
    }

    indents
}

/// Reassign `indent` on every item of one day
pub fn apply_indentation(items: &mut [AppointmentItem]) {
    let indents = assign_indentation(items);
    for (item, indent) in items.iter_mut().zip(indents) {
        item.indent = indent;
    }
}

fn fits_in(lane: &[&AppointmentItem], item: &AppointmentItem) -> bool {
    lane.iter().all(|other| !other.has_overlap(item))
}
