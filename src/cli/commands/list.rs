use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::models::event_kind::EventKind;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { date } = cmd {
        let day = date::resolve_day(date.as_deref(), date::today())?;

        let store = SqliteStore::open_ready(cfg.store_address()?)?;
        let events = store.events_for_day(day)?;

        println!("📅 Stored events for {}:\n", date::pretty(day));

        if events.is_empty() {
            println!("{GREY}(none){RESET}");
            return Ok(());
        }

        let id_w = events
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        println!("{CYAN}{:>id_w$}  {:<19}  {:<11}  count{RESET}", "id", "created at", "kind");
        for ev in &events {
            let color = match ev.event.kind {
                EventKind::Total => GREEN,
                EventKind::Operational => YELLOW,
            };
            println!(
                "{:>id_w$}  {:<19}  {}{:<11}{}  {}",
                ev.id,
                ev.created_at,
                color,
                ev.event.kind.to_db_str(),
                RESET,
                ev.event.count
            );
        }
    }

    Ok(())
}
