use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let mut store = SqliteStore::open_ready(cfg.store_address()?)?;
        LogLogic::print_log(store.pool_mut())?;
    }

    Ok(())
}
