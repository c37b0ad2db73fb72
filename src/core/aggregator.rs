use crate::core::buffer::WriteBuffer;
use crate::core::store::EventStore;
use crate::errors::AppResult;
use crate::models::event_kind::EventKind;
use crate::models::summary::Summary;
use chrono::NaiveDate;

/// Persisted sums plus buffered sums for `day`. Read-only: never flushes.
pub fn summary<S: EventStore>(store: &S, buffer: &WriteBuffer, day: NaiveDate) -> AppResult<Summary> {
    let (stored_total, stored_operational) = store.sum_for_day(day)?;

    let total = stored_total + buffer.sum_for_day(day, EventKind::Total);
    let operational = stored_operational + buffer.sum_for_day(day, EventKind::Operational);

    Ok(Summary::from_counts(total, operational))
}
