mod item;
mod source;
pub mod time;

pub use item::{AppointmentItem, Rgba};
pub use source::{AppointmentRecord, ItemMapping};
