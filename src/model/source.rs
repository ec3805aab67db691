//! Conversion of host records into appointment items

use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::item::{AppointmentItem, Rgba};
use crate::error::ConvertError;

type Accessor<T, V> = Box<dyn Fn(&T) -> V>;

/// Accessors that read an appointment out of an opaque host record.
///
/// Begin, end and text are required; color is optional.
pub struct ItemMapping<T> {
    begin: Option<Accessor<T, NaiveDateTime>>,
    end: Option<Accessor<T, NaiveDateTime>>,
    text: Option<Accessor<T, String>>,
    color: Option<Accessor<T, Option<Rgba>>>,
}

impl<T> Default for ItemMapping<T> {
    fn default() -> Self {
        Self {
            begin: None,
            end: None,
            text: None,
            color: None,
        }
    }
}

impl<T> ItemMapping<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(mut self, f: impl Fn(&T) -> NaiveDateTime + 'static) -> Self {
        self.begin = Some(Box::new(f));
        self
    }

    pub fn end(mut self, f: impl Fn(&T) -> NaiveDateTime + 'static) -> Self {
        self.end = Some(Box::new(f));
        self
    }

    pub fn text(mut self, f: impl Fn(&T) -> String + 'static) -> Self {
        self.text = Some(Box::new(f));
        self
    }

    pub fn color(mut self, f: impl Fn(&T) -> Option<Rgba> + 'static) -> Self {
        self.color = Some(Box::new(f));
        self
    }

    pub fn is_complete(&self) -> bool {
        self.begin.is_some() && self.end.is_some() && self.text.is_some()
    }

    /// Convert a source collection, where `None` stands for a null element.
    ///
    /// A missing required accessor or a null element fails the whole
    /// collection. Records with `end <= begin` are skipped. Each item keeps
    /// the position of its record in the source as its index.
    pub fn try_convert<'a, I>(&self, records: I) -> Result<Vec<AppointmentItem>, ConvertError>
    where
        I: IntoIterator<Item = Option<&'a T>>,
        T: 'a,
    {
        let begin = self.begin.as_ref().ok_or(ConvertError::MissingAccessor("begin"))?;
        let end = self.end.as_ref().ok_or(ConvertError::MissingAccessor("end"))?;
        let text = self.text.as_ref().ok_or(ConvertError::MissingAccessor("text"))?;

        let mut items = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            let record = record.ok_or(ConvertError::NullElement { index })?;
            let item = AppointmentItem {
                begin: begin(record),
                end: end(record),
                text: text(record),
                color: self.color.as_ref().and_then(|color| color(record)),
                index,
                indent: 0,
            };
            if !item.is_valid() {
                debug!("Skipping appointment {} ({}): end {} is not after begin {}", index, item.text, item.end, item.begin);
                continue;
            }
            items.push(item);
        }
        Ok(items)
    }

    /// Like `try_convert`, but a failed collection yields no items
    pub fn convert<'a, I>(&self, records: I) -> Vec<AppointmentItem>
    where
        I: IntoIterator<Item = Option<&'a T>>,
        T: 'a,
    {
        self.try_convert(records).unwrap_or_else(|e| {
            warn!("Appointment collection not shown: {}", e);
            Vec::new()
        })
    }
}

/// A plain appointment record, as read from JSON by the host binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
}

impl AppointmentRecord {
    pub fn new(begin: NaiveDateTime, end: NaiveDateTime, text: impl Into<String>) -> Self {
        Self {
            begin,
            end,
            text: text.into(),
            color: None,
        }
    }
}

impl ItemMapping<AppointmentRecord> {
    pub fn for_records() -> Self {
        Self::new()
            .begin(|r: &AppointmentRecord| r.begin)
            .end(|r: &AppointmentRecord| r.end)
            .text(|r: &AppointmentRecord| r.text.clone())
            .color(|r: &AppointmentRecord| r.color)
    }
}
