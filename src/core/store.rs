//! Boundary between the tally core and the durable event table.

use crate::errors::AppResult;
use crate::models::event::Event;
use chrono::NaiveDate;

/// Persisted sums for one day, `(total, operational)`.
pub type DayTotals = (u64, u64);

/// The four operations the core needs from a durable store.
///
/// Implementations must make `delete_most_recent` and `append_batch`
/// individually atomic so that several sessions can share one store.
pub trait EventStore {
    /// Create or upgrade the schema. Safe to call any number of times, on an
    /// empty store or on one created by an older version.
    fn ensure_schema(&mut self) -> AppResult<()>;

    /// Persisted `(total, operational)` for `day`; `(0, 0)` when nothing matches.
    fn sum_for_day(&self, day: NaiveDate) -> AppResult<DayTotals>;

    /// Delete the row with the greatest id for `day`. Returns whether a row went away.
    fn delete_most_recent(&mut self, day: NaiveDate) -> AppResult<bool>;

    /// Insert every event in one transaction: all rows become visible or none do.
    fn append_batch(&mut self, events: &[Event]) -> AppResult<()>;
}

impl<S: EventStore + ?Sized> EventStore for &mut S {
    fn ensure_schema(&mut self) -> AppResult<()> {
        (**self).ensure_schema()
    }

    fn sum_for_day(&self, day: NaiveDate) -> AppResult<DayTotals> {
        (**self).sum_for_day(day)
    }

    fn delete_most_recent(&mut self, day: NaiveDate) -> AppResult<bool> {
        (**self).delete_most_recent(day)
    }

    fn append_batch(&mut self, events: &[Event]) -> AppResult<()> {
        (**self).append_batch(events)
    }
}
