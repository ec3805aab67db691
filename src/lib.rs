//! Week-view calendar engine: lays appointments out on a days x hours grid
//! with overlap-aware lanes, and models selection and scrolling of the view.

pub mod calendar;
pub mod config;
pub mod culture;
pub mod error;
pub mod export;
pub mod layout;
pub mod logging;
pub mod model;

pub use calendar::{Key, SelectionChanged, WeekView};
pub use config::Config;
pub use culture::{DayState, Region};
pub use error::{ConvertError, ExportError};
pub use layout::{schedule_week, WeekLayout, WeekSettings};
pub use model::{AppointmentItem, AppointmentRecord, ItemMapping, Rgba};
