use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::TallySession;
use crate::db::store::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::models::event_kind::EventKind;
use crate::ui::render;
use crate::utils::date;
use std::num::NonZeroU32;

/// Log `count` events and commit them before the process exits.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { kind, date, count } = cmd {
        let day = date::resolve_day(date.as_deref(), date::today())?;
        let count = NonZeroU32::new(*count).ok_or_else(|| AppError::InvalidCount(count.to_string()))?;
        let kind: EventKind = (*kind).into();

        let store = SqliteStore::open_ready(cfg.store_address()?)?;
        let mut session = TallySession::new(store, cfg.flush_settings());

        session.enqueue(kind, day, count);
        render::logged(kind, count.get());

        // A one-shot process gets no later flush: commit now or report failure.
        let outcome = session.sync(true);
        render::final_sync_feedback(&outcome);
        outcome?;

        let summary = session.summary(day)?;
        render::print_summary(day, &summary, session.pending());
    }

    Ok(())
}
