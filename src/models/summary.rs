use chrono::NaiveDate;
use serde::Serialize;

/// Live totals for one day: persisted sums plus whatever is still buffered.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub total: u64,
    pub operational: u64,
    pub opportunities: u64,
}

impl Summary {
    /// `opportunities` is floored at zero: operational may transiently exceed
    /// total while one side is still buffered and the other is persisted.
    pub fn from_counts(total: u64, operational: u64) -> Self {
        Self {
            total,
            operational,
            opportunities: total.saturating_sub(operational),
        }
    }
}

/// Summary tagged with the day it was computed for, used for JSON output.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DaySummary {
    pub day: NaiveDate,
    #[serde(flatten)]
    pub summary: Summary,
    pub pending: usize,
}
