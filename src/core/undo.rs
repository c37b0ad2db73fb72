use crate::core::buffer::WriteBuffer;
use crate::core::store::EventStore;
use crate::errors::AppResult;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoResult {
    RemovedBuffered,
    RemovedPersisted,
    NothingToRemove,
}

/// Remove the latest event for `day`, buffered entries first.
///
/// The buffered-first order is kept even when the persisted row is newer by
/// wall clock (an event buffered earlier under an older day selection).
pub fn undo<S: EventStore>(store: &mut S, buffer: &mut WriteBuffer, day: NaiveDate) -> AppResult<UndoResult> {
    if buffer.remove_last_for_day(day) {
        return Ok(UndoResult::RemovedBuffered);
    }

    if store.delete_most_recent(day)? {
        return Ok(UndoResult::RemovedPersisted);
    }

    Ok(UndoResult::NothingToRemove)
}
