use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::TallySession;
use crate::db::store::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::models::summary::DaySummary;
use crate::ui::render;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { date, json } = cmd {
        let day = date::resolve_day(date.as_deref(), date::today())?;

        let store = SqliteStore::open_ready(cfg.store_address()?)?;
        let session = TallySession::new(store, cfg.flush_settings());
        let summary = session.summary(day)?;

        if *json {
            let out = DaySummary {
                day,
                summary,
                pending: session.pending(),
            };
            let text = serde_json::to_string_pretty(&out).map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", text);
        } else {
            render::print_summary(day, &summary, session.pending());
        }
    }

    Ok(())
}
