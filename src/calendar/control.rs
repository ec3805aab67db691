use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use log::debug;

use super::selection::{ListenerId, SelectionChanged, SelectionListeners};
use super::viewport::{DayRange, Offset, Size, Viewport};
use crate::culture::Region;
use crate::layout::{schedule_week, WeekLayout, WeekSettings};
use crate::model::time::{begin_of_week, fraction_of_day};
use crate::model::{AppointmentItem, ItemMapping};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Delete,
}

/// The week view widget model.
///
/// Holds the host's records and every property the layout depends on.
/// Each setter that affects the layout recomputes the whole week before
/// returning. Scrolling is reported through `take_pending_scroll`, which
/// the host applies on its next idle tick.
pub struct WeekView<T> {
    records: Vec<Option<T>>,
    mapping: ItemMapping<T>,
    items: Vec<AppointmentItem>,
    layout: WeekLayout,
    current_week: NaiveDate,
    settings: WeekSettings,
    day_range: DayRange,
    viewport: Viewport,
    pending_scroll: Option<Offset>,
    selected_index: Option<usize>,
    listeners: SelectionListeners<T>,
    pub allow_delete: bool,
    /// The host collection rejects removal
    pub items_read_only: bool,
    pub auto_scroll_to_selected_item: bool,
}

impl<T: Clone> WeekView<T> {
    pub fn new(mapping: ItemMapping<T>, current_week: NaiveDate, settings: WeekSettings) -> Self {
        let layout = schedule_week(Vec::new(), current_week, &settings);
        Self {
            records: Vec::new(),
            mapping,
            items: Vec::new(),
            layout,
            current_week,
            settings,
            day_range: DayRange::default(),
            viewport: Viewport::default(),
            pending_scroll: None,
            selected_index: None,
            listeners: SelectionListeners::default(),
            allow_delete: false,
            items_read_only: false,
            auto_scroll_to_selected_item: false,
        }
    }

    pub fn layout(&self) -> &WeekLayout {
        &self.layout
    }

    /// Valid items of the whole collection, not only the visible week
    pub fn items(&self) -> &[AppointmentItem] {
        &self.items
    }

    pub fn records(&self) -> impl Iterator<Item = Option<&T>> {
        self.records.iter().map(Option::as_ref)
    }

    pub fn record(&self, index: usize) -> Option<&T> {
        self.records.get(index).and_then(Option::as_ref)
    }

    pub fn settings(&self) -> &WeekSettings {
        &self.settings
    }

    pub fn current_week(&self) -> NaiveDate {
        self.current_week
    }

    pub fn day_range(&self) -> DayRange {
        self.day_range
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_mapping(&mut self, mapping: ItemMapping<T>) {
        self.mapping = mapping;
        self.relayout();
    }

    // --- Items -----------------------------------------------------------

    /// Replace the whole collection
    pub fn set_items(&mut self, records: impl IntoIterator<Item = T>) {
        self.set_source(records.into_iter().map(Some).collect());
    }

    /// Replace the whole collection with one that may contain null elements
    pub fn set_source(&mut self, records: Vec<Option<T>>) {
        self.records = records;
        self.relayout();
    }

    pub fn push_item(&mut self, record: T) {
        self.records.push(Some(record));
        self.relayout();
    }

    pub fn remove_item(&mut self, index: usize) -> Option<T> {
        if index >= self.records.len() {
            return None;
        }
        let removed = self.records.remove(index);
        match self.selected_index {
            Some(selected) if selected == index => self.clear_selection(),
            Some(selected) if selected > index => self.selected_index = Some(selected - 1),
            _ => {}
        }
        self.relayout();
        removed
    }

    // --- Week properties -------------------------------------------------

    /// Show the week containing `date`. Dates within the current week are
    /// ignored.
    pub fn set_current_week(&mut self, date: NaiveDate) {
        let first_day = self.settings.first_day_of_week;
        if begin_of_week(self.current_week, first_day) == begin_of_week(date, first_day) {
            return;
        }
        self.current_week = date;
        self.relayout();
    }

    pub fn next_week(&mut self) {
        self.set_current_week(self.current_week + Duration::days(7));
    }

    pub fn previous_week(&mut self) {
        self.set_current_week(self.current_week - Duration::days(7));
    }

    pub fn set_first_day_of_week(&mut self, first_day: Weekday) {
        if self.settings.first_day_of_week == first_day {
            return;
        }
        self.settings.first_day_of_week = first_day;
        self.relayout();
        self.update_viewport(self.viewport.size, true);
    }

    pub fn set_weekend_visible(&mut self, visible: bool) {
        if self.settings.weekend_visible == visible {
            return;
        }
        self.settings.weekend_visible = visible;
        self.relayout();
        self.update_viewport(self.viewport.size, true);
    }

    pub fn set_region(&mut self, region: Region) {
        if self.settings.region == region {
            return;
        }
        self.settings.region = region;
        self.relayout();
        self.update_viewport(self.viewport.size, true);
    }

    pub fn set_language(&mut self, language: &str) {
        self.settings.language = language.to_string();
        self.relayout();
    }

    // --- Scrolling -------------------------------------------------------

    pub fn set_day_range(&mut self, range: DayRange) {
        self.day_range = range;
        self.update_viewport(self.viewport.size, true);
    }

    /// The host's viewport was resized
    pub fn set_viewport_size(&mut self, size: Size) {
        self.update_viewport(size, false);
    }

    /// The host scrolled, e.g. by user input
    pub fn set_scroll_offset(&mut self, offset: Offset) {
        self.viewport.offset = offset;
    }

    /// Scroll request waiting for the host's next idle tick
    pub fn take_pending_scroll(&mut self) -> Option<Offset> {
        let offset = self.pending_scroll.take()?;
        self.viewport.offset = offset;
        Some(offset)
    }

    pub fn previous_day(&mut self) {
        let offset = self.viewport.offset;
        self.pending_scroll = Some(Offset::new(offset.x - self.viewport.day_width, offset.y));
    }

    pub fn next_day(&mut self) {
        let offset = self.viewport.offset;
        self.pending_scroll = Some(Offset::new(offset.x + self.viewport.day_width, offset.y));
    }

    /// Show the week of the item at `index` and scroll to it when it is
    /// not on screen
    pub fn scroll_into_view(&mut self, index: usize) {
        let Some(begin) = self.items.iter().find(|item| item.index == index).map(|item| item.begin) else {
            return;
        };
        self.set_current_week(begin.date());

        let begin_week = begin_of_week(self.current_week, self.settings.first_day_of_week);
        let day_offset = (begin.date() - begin_week.date()).num_days() as usize;
        let fraction = fraction_of_day(begin.time() - NaiveTime::MIN);
        let target = self.viewport.position_of(day_offset, fraction);
        if !self.viewport.shows(target) {
            self.pending_scroll = Some(target);
        }
    }

    /// `scroll_into_view` for the first record equal to `record`
    pub fn scroll_item_into_view(&mut self, record: &T)
    where
        T: PartialEq,
    {
        if let Some(index) = self.records.iter().position(|r| r.as_ref() == Some(record)) {
            self.scroll_into_view(index);
        }
    }

    fn update_viewport(&mut self, size: Size, force: bool) {
        let visible = self.settings.visible_day_offsets();
        if let Some(offset) = self.viewport.update(size, self.day_range, &visible, force) {
            self.pending_scroll = Some(offset);
        }
    }

    // --- Selection -------------------------------------------------------

    pub fn subscribe(&mut self, listener: impl FnMut(&SelectionChanged<T>) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.selected_index.and_then(|index| self.record(index))
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected_index == Some(index)
    }

    /// Select by source index. Always notifies, also when the index is
    /// already selected.
    pub fn select_index(&mut self, index: Option<usize>) {
        self.selected_index = index;
        if let (Some(index), true) = (index, self.auto_scroll_to_selected_item) {
            self.scroll_into_view(index);
        }
        let event = SelectionChanged {
            index,
            item: index.and_then(|index| self.record(index)).cloned(),
        };
        self.listeners.emit(&event);
    }

    /// Select the first record equal to `record`; unknown records clear
    /// the selection
    pub fn select_item(&mut self, record: &T)
    where
        T: PartialEq,
    {
        let index = self.records.iter().position(|r| r.as_ref() == Some(record));
        self.select_index(index);
    }

    pub fn clear_selection(&mut self) {
        self.select_index(None);
    }

    /// Move the selection `step` items through the visible layout, wrapping
    /// around at both ends
    pub fn select_next(&mut self, step: isize) {
        let order = self.layout.visible_order();
        if order.is_empty() {
            return;
        }
        let current = self
            .selected_index
            .and_then(|selected| order.iter().position(|&index| index == selected))
            .map_or(-1, |position| position as isize);
        let mut next = current + step;
        if next < 0 {
            next = order.len() as isize - 1;
        } else if next >= order.len() as isize {
            next = 0;
        }
        let index = order[next as usize];
        self.select_index(Some(index));
        self.scroll_into_view(index);
    }

    /// Remove the selected record from the collection. Refused silently when
    /// deleting is not allowed or the collection is read-only.
    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.selected_index else {
            return false;
        };
        if !self.allow_delete || self.items_read_only || index >= self.records.len() {
            debug!("Delete of appointment {} refused", index);
            return false;
        }
        self.remove_item(index);
        true
    }

    /// Keyboard navigation; returns whether the key was handled
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Up | Key::Left => self.select_next(-1),
            Key::Down | Key::Right => self.select_next(1),
            Key::Delete => {
                self.delete_selected();
            }
        }
        true
    }

    fn relayout(&mut self) {
        self.items = self.mapping.convert(self.records.iter().map(Option::as_ref));
        self.layout = schedule_week(self.items.clone(), self.current_week, &self.settings);
    }
}
