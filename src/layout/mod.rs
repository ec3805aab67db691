//! The appointment layout engine: lanes, groups and proportional geometry

pub mod day;
pub mod group;
pub mod indent;
mod week;

pub use day::{build_day_slots, DaySlot, GroupLayout, LaneLayout, LaneSlot};
pub use group::{partition, DayGroup};
pub use indent::{apply_indentation, assign_indentation};
pub use week::{schedule_week, DayLayout, WeekLayout, WeekSettings};
