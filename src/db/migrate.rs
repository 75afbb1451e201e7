use rusqlite::{Connection, OptionalExtension, Result};

/// Ordered schema migrations: (version, description, SQL batch).
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250201_0001_create_ledger_tables",
        "Created ledgers and trips tables",
        r#"
        CREATE TABLE IF NOT EXISTS ledgers (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            month_key           TEXT NOT NULL UNIQUE,
            name                TEXT NOT NULL,
            year                INTEGER NOT NULL,
            month               INTEGER NOT NULL CHECK(month BETWEEN 1 AND 12),
            opening_odometer    INTEGER NOT NULL,
            total_reimbursement REAL NOT NULL DEFAULT 0,
            created_at          TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS trips (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            ledger_id      INTEGER NOT NULL REFERENCES ledgers(id) ON DELETE CASCADE,
            seq            INTEGER NOT NULL,
            date           TEXT NOT NULL,
            time           TEXT NOT NULL,
            distance_km    INTEGER NOT NULL CHECK(distance_km > 0),
            category       TEXT NOT NULL,
            route          TEXT NOT NULL DEFAULT '',
            odometer_start INTEGER NOT NULL,
            odometer_end   INTEGER NOT NULL,
            reimbursement  REAL NOT NULL,
            created_at     TEXT NOT NULL
        );
        "#,
    ),
    (
        "20250214_0002_index_trips",
        "Added trip ordering indexes",
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_trips_ledger_seq ON trips(ledger_id, seq);
        CREATE INDEX IF NOT EXISTS idx_trips_date_time ON trips(date, time);
        "#,
    ),
];

/// Ensure that the `log` table exists. It also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, version: &str, description: &str, sql: &str) -> Result<bool> {
    if is_applied(conn, version)? {
        return Ok(false);
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, description],
    )?;
    tx.commit()?;

    tracing::info!(version, description, "migration applied");
    Ok(true)
}

/// Versions of the migrations already applied to this database.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and whenever a store is opened.
/// Returns `(version, description)` of each migration applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<(&'static str, &'static str)>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for (version, description, sql) in MIGRATIONS {
        if apply(conn, version, description, sql)? {
            applied.push((*version, *description));
        }
    }

    Ok(applied)
}
