//! Scroll geometry of the week grid, in host units.
//!
//! The scrollable grid is larger than the viewport when only part of the
//! day is meant to be visible at once, or when weekend columns are hidden
//! and the grid is shifted so the first visible day sits at the left edge.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::model::time::{fraction_of_day, DAYS_PER_WEEK};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Visible part of the day, as offsets from midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub begin: Duration,
    pub end: Duration,
}

impl Default for DayRange {
    fn default() -> Self {
        Self {
            begin: Duration::zero(),
            end: Duration::days(1),
        }
    }
}

impl DayRange {
    pub fn hours(begin: u8, end: u8) -> Self {
        Self {
            begin: Duration::hours(begin as i64),
            end: Duration::hours(end as i64),
        }
    }

    /// Whether the range is a non-empty part of a single day
    pub fn is_valid(&self) -> bool {
        self.begin >= Duration::zero() && self.end <= Duration::days(1) && self.end > self.begin
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub size: Size,
    /// Size of the scrollable week grid
    pub extent: Size,
    pub offset: Offset,
    /// Width of one day column in the scrollable grid
    pub day_width: f64,
}

impl Viewport {
    /// Recompute the scrollable extent for a new viewport size, day range or
    /// visible-day set. Returns the offset to scroll to, if any.
    ///
    /// Without `force`, an offset the user already scrolled away from zero
    /// is kept.
    pub fn update(
        &mut self,
        size: Size,
        range: DayRange,
        visible_day_offsets: &[usize],
        force: bool,
    ) -> Option<Offset> {
        if size.width < 0.0 || size.height < 0.0 {
            return None;
        }
        self.size = size;

        let mut y = None;
        if range.is_valid() {
            let height = size.height / fraction_of_day(range.end - range.begin);
            self.extent.height = height;
            y = Some(if force || self.offset.y == 0.0 {
                fraction_of_day(range.begin) * height
            } else {
                self.offset.y
            });
        } else {
            self.extent.height = size.height;
        }

        let mut x = None;
        let visible = visible_day_offsets.len();
        if visible > 0 && visible != DAYS_PER_WEEK {
            let width = DAYS_PER_WEEK as f64 / visible as f64 * size.width;
            self.extent.width = width;
            let first_visible = visible_day_offsets[0] as f64 / DAYS_PER_WEEK as f64;
            x = Some(if force || self.offset.x == 0.0 {
                first_visible * width
            } else {
                self.offset.x
            });
        } else {
            self.extent.width = size.width;
        }
        self.day_width = self.extent.width / DAYS_PER_WEEK as f64;

        if x.is_none() && y.is_none() {
            return None;
        }
        Some(Offset::new(x.unwrap_or(0.0), y.unwrap_or(0.0)))
    }

    /// Whether `point` (in grid coordinates) is currently on screen
    pub fn shows(&self, point: Offset) -> bool {
        let in_x = point.x >= self.offset.x && point.x < self.offset.x + self.size.width;
        let in_y = point.y >= self.offset.y && point.y < self.offset.y + self.size.height;
        in_x && in_y
    }

    /// Grid position of a moment given as day offset and fraction of that day
    pub fn position_of(&self, day_offset: usize, fraction: f64) -> Offset {
        Offset::new(
            day_offset as f64 / DAYS_PER_WEEK as f64 * self.extent.width,
            fraction * self.extent.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_DAYS: [usize; 7] = [0, 1, 2, 3, 4, 5, 6];

    #[test]
    fn full_day_scrolls_to_midnight() {
        let mut viewport = Viewport::default();
        let scroll = viewport.update(Size::new(700.0, 480.0), DayRange::hours(0, 24), &ALL_DAYS, false);
        assert_eq!(scroll, Some(Offset::new(0.0, 0.0)));
        assert_eq!(viewport.extent, Size::new(700.0, 480.0));
        assert_eq!(viewport.day_width, 100.0);
    }

    #[test]
    fn partial_day_stretches_height() {
        let mut viewport = Viewport::default();
        let scroll = viewport.update(Size::new(700.0, 480.0), DayRange::hours(8, 16), &ALL_DAYS, false);
        assert!((viewport.extent.height - 1440.0).abs() < 1e-9);
        let scroll = scroll.unwrap();
        assert!((scroll.y - 480.0).abs() < 1e-9);
        assert_eq!(scroll.x, 0.0);
    }

    #[test]
    fn user_offset_is_kept_unless_forced() {
        let mut viewport = Viewport::default();
        viewport.offset = Offset::new(0.0, 100.0);
        let range = DayRange::hours(8, 16);
        let kept = viewport.update(Size::new(700.0, 480.0), range, &ALL_DAYS, false);
        assert_eq!(kept.map(|o| o.y), Some(100.0));
        let forced = viewport.update(Size::new(700.0, 480.0), range, &ALL_DAYS, true);
        assert!((forced.unwrap().y - 480.0).abs() < 1e-9);
    }

    #[test]
    fn hidden_weekend_widens_and_shifts_grid() {
        let mut viewport = Viewport::default();
        // Sunday-first week without weekend: offsets 1..=5
        let scroll = viewport.update(Size::new(500.0, 480.0), DayRange::default(), &[1, 2, 3, 4, 5], false);
        assert!((viewport.extent.width - 700.0).abs() < 1e-9);
        assert!((viewport.day_width - 100.0).abs() < 1e-9);
        assert!((scroll.unwrap().x - 100.0).abs() < 1e-9);
    }

    #[test]
    fn negative_size_is_ignored() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.update(Size::new(-1.0, 10.0), DayRange::default(), &ALL_DAYS, true), None);
    }

    #[test]
    fn shows_is_half_open() {
        let viewport = Viewport {
            size: Size::new(100.0, 100.0),
            extent: Size::new(700.0, 400.0),
            offset: Offset::new(100.0, 0.0),
            day_width: 100.0,
        };
        assert!(viewport.shows(Offset::new(100.0, 0.0)));
        assert!(!viewport.shows(Offset::new(200.0, 50.0)));
        assert_eq!(viewport.position_of(2, 0.5), Offset::new(200.0, 200.0));
    }
}
