mod control;
mod selection;
pub mod viewport;

pub use control::{Key, WeekView};
pub use selection::{ListenerId, SelectionChanged, SelectionListeners};
pub use viewport::{DayRange, Offset, Size, Viewport};
