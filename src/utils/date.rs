use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Resolve the day an event is attributed to.
///
/// `None` means today. Days after `today` are refused: nobody walks in tomorrow.
pub fn resolve_day(input: Option<&str>, today: NaiveDate) -> AppResult<NaiveDate> {
    let day = match input {
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?,
        None => today,
    };

    if day > today {
        return Err(AppError::FutureDate(day.format("%Y-%m-%d").to_string()));
    }
    Ok(day)
}

/// "18 Oct 2026", the heading format of the summary block.
pub fn pretty(day: NaiveDate) -> String {
    day.format("%d %b %Y").to_string()
}
