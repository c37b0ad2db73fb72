use super::event_kind::EventKind;
use chrono::NaiveDate;
use serde::Serialize;
use std::num::NonZeroU32;

/// A tally event as the caller creates it.
///
/// Buffered events carry no id: their identity is their position in the
/// write buffer. The day is chosen by the caller and is independent from
/// the moment the event is created.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub day: NaiveDate,
    pub count: NonZeroU32,
}

impl Event {
    pub fn new(kind: EventKind, day: NaiveDate, count: NonZeroU32) -> Self {
        Self { kind, day, count }
    }

    pub fn day_str(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }
}

/// An event that reached the store.
#[derive(Debug, Clone, Serialize)]
pub struct StoredEvent {
    pub id: i64,             // ⇔ footfall.id (AUTOINCREMENT, ordering key)
    pub created_at: String,  // ⇔ footfall.created_at ("YYYY-MM-DD HH:MM:SS", local)
    #[serde(flatten)]
    pub event: Event,        // ⇔ footfall.kind / footfall.day / footfall.count
}
