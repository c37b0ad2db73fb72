use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::store::EventStore;
use crate::db::log::ttlog_quiet;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the store schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let address = cfg.store_address()?;

    println!("⚙️  Initializing rFootfall…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", address);

    let mut store = SqliteStore::open(address)?;
    store.ensure_schema()?;

    ttlog_quiet(
        &store.pool().conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", address),
    );

    success(format!("Database initialized at {}", address));
    Ok(())
}
