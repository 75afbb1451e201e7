use crate::config::Config;
use crate::db::log;
use crate::errors::AppResult;

use crate::cli::parser::Cli;
use crate::db::initialize::init_db;
use crate::ui::messages::{info, success, warning};
use rusqlite::Connection;
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database (prod or test mode)
///  - all pending DB migrations
pub fn handle(cli: &Cli, config_path: &Path) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), config_path, cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    info("Initializing rTriplog…");
    println!("📄 Config file : {}", config_path.display());
    println!("🗄️  Database   : {}", &db_path);

    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    success(format!("Database initialized at {}", &db_path));

    if let Err(e) = log::ttlog(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success("rTriplog initialization completed!");
    Ok(())
}
