use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::TallySession;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::render;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Undo { date } = cmd {
        let day = date::resolve_day(date.as_deref(), date::today())?;

        let store = SqliteStore::open_ready(cfg.store_address()?)?;
        let mut session = TallySession::new(store, cfg.flush_settings());

        let result = session.undo(day)?;
        render::undo_feedback(result);

        let summary = session.summary(day)?;
        render::print_summary(day, &summary, session.pending());
    }

    Ok(())
}
