//! In-memory queue of events not yet committed to the store.

use crate::models::event::Event;
use crate::models::event_kind::EventKind;
use chrono::NaiveDate;

/// Ordered, per-session write buffer.
///
/// Append-only except for [`WriteBuffer::remove_last_for_day`]. Its length is
/// bounded in practice by the flush size threshold, so the linear scans
/// below stay cheap.
#[derive(Debug, Default, Clone)]
pub struct WriteBuffer {
    events: Vec<Event>,
}

impl WriteBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Remove the most recently appended event for `day`.
    pub fn remove_last_for_day(&mut self, day: NaiveDate) -> bool {
        match self.events.iter().rposition(|ev| ev.day == day) {
            Some(idx) => {
                self.events.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Everything currently buffered, oldest first.
    ///
    /// Nothing is removed here: the flush controller calls [`WriteBuffer::clear`]
    /// only once the store confirmed the commit.
    pub fn drain(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn sum_for_day(&self, day: NaiveDate, kind: EventKind) -> u64 {
        self.events
            .iter()
            .filter(|ev| ev.day == day && ev.kind == kind)
            .map(|ev| u64::from(ev.count.get()))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
