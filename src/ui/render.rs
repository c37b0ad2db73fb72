//! Shared rendering of summaries and action feedback.

use crate::core::flush::FlushOutcome;
use crate::core::undo::UndoResult;
use crate::errors::AppError;
use crate::models::event_kind::EventKind;
use crate::models::summary::Summary;
use crate::ui::messages::{error, info, success, toast, warning};
use crate::utils::colors::{BOLD, CYAN, RESET, color_for_opportunities, color_for_pending};
use crate::utils::date::pretty;
use chrono::NaiveDate;

pub fn print_summary(day: NaiveDate, summary: &Summary, pending: usize) {
    println!();
    println!("{BOLD}📊 Summary for {}{RESET}", pretty(day));
    println!("{CYAN}  Total        :{RESET} {}", summary.total);
    println!("{CYAN}  Operational  :{RESET} {}", summary.operational);
    println!(
        "{CYAN}  Opportunities:{RESET} {}{}{RESET}",
        color_for_opportunities(summary.opportunities),
        summary.opportunities
    );
    println!(
        "{CYAN}  Pending sync :{RESET} {}{}{RESET}",
        color_for_pending(pending),
        pending
    );
    println!();
}

pub fn logged(kind: EventKind, count: u32) {
    let icon = match kind {
        EventKind::Total => "👣",
        EventKind::Operational => "🛠️",
    };
    if count == 1 {
        toast(icon, format!("Logged: {}", kind.label()));
    } else {
        toast(icon, format!("Logged: {} ×{}", kind.label(), count));
    }
}

pub fn undo_feedback(result: UndoResult) {
    match result {
        UndoResult::RemovedBuffered => toast("↩️", "Last click removed (not yet synced)"),
        UndoResult::RemovedPersisted => toast("↩️", "Last click removed"),
        UndoResult::NothingToRemove => warning("No entries to remove"),
    }
}

/// Feedback for a sync the user asked for.
pub fn sync_feedback(outcome: &Result<FlushOutcome, AppError>) {
    match outcome {
        Ok(FlushOutcome::Flushed(n)) => success(format!("Synced {} event(s)", n)),
        Ok(FlushOutcome::Empty) => info("Nothing to sync"),
        Ok(FlushOutcome::NotDue) => {}
        Err(e) => error(format!("{} (will retry on the next sync)", e)),
    }
}

/// Feedback for a flush the session triggered on its own.
/// Silent unless something was written or the write failed; returns whether it printed.
pub fn auto_sync_feedback(outcome: &Result<FlushOutcome, AppError>) -> bool {
    match outcome {
        Ok(FlushOutcome::Flushed(_)) | Err(_) => {
            sync_feedback(outcome);
            true
        }
        Ok(FlushOutcome::Empty | FlushOutcome::NotDue) => false,
    }
}

/// Feedback for the last flush before exit. Nothing retries after it.
pub fn final_sync_feedback(outcome: &Result<FlushOutcome, AppError>) {
    match outcome {
        Err(e) => error(final_sync_failure(e)),
        Ok(_) => sync_feedback(outcome),
    }
}

pub fn final_sync_failure(err: &AppError) -> String {
    match err {
        AppError::FlushFailed { pending, source } => {
            format!("{} event(s) not synced: {}", pending, source)
        }
        other => format!("Final sync failed: {}", other),
    }
}
