use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use crate::ui::messages::success;
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine and
/// reports every migration applied.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    for (version, description) in run_pending_migrations(conn)? {
        success(format!("Migration applied: {} → {}", version, description));
    }
    Ok(())
}
