use crate::errors::AppError;
use crate::models::{MonthId, TripCategory, TripRecord};
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Row of the `ledgers` table.
#[derive(Debug, Clone)]
pub struct LedgerRow {
    pub id: i64,
    pub month: MonthId,
    pub opening_odometer: i64,
    pub total_reimbursement: f64,
}

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn map_ledger_row(row: &Row) -> Result<LedgerRow> {
    let year: i32 = row.get("year")?;
    let month: u32 = row.get("month")?;
    let month = MonthId::new(year, month).map_err(|e| conversion_error(0, e))?;

    Ok(LedgerRow {
        id: row.get("id")?,
        month,
        opening_odometer: row.get("opening_odometer")?,
        total_reimbursement: row.get("total_reimbursement")?,
    })
}

pub fn map_trip_row(row: &Row) -> Result<TripRecord> {
    let date_str: String = row.get("date")?;
    let time_str: String = row.get("time")?;
    let cat_str: String = row.get("category")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(date_str.clone())))?;
    let time = NaiveTime::parse_from_str(&time_str, "%H:%M")
        .map_err(|_| conversion_error(0, AppError::InvalidTime(time_str.clone())))?;
    let category = TripCategory::from_db_str(&cat_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidCategory(cat_str.clone())))?;

    Ok(TripRecord::restore(
        date,
        time,
        row.get("distance_km")?,
        category,
        row.get("route")?,
        row.get("odometer_start")?,
        row.get("odometer_end")?,
        row.get("reimbursement")?,
    ))
}

pub fn find_ledger(conn: &Connection, month: MonthId) -> Result<Option<LedgerRow>> {
    conn.query_row(
        "SELECT id, year, month, opening_odometer, total_reimbursement
         FROM ledgers
         WHERE month_key = ?1",
        [month.key()],
        map_ledger_row,
    )
    .optional()
}

pub fn list_ledgers(conn: &Connection) -> Result<Vec<LedgerRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, year, month, opening_odometer, total_reimbursement
         FROM ledgers
         ORDER BY month_key ASC",
    )?;
    let rows = stmt.query_map([], map_ledger_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_trips(conn: &Connection, ledger_id: i64) -> Result<Vec<TripRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT date, time, distance_km, category, route,
                odometer_start, odometer_end, reimbursement
         FROM trips
         WHERE ledger_id = ?1
         ORDER BY seq ASC",
    )?;
    let rows = stmt.query_map([ledger_id], map_trip_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Last trip of a ledger (highest `seq`).
pub fn last_trip(conn: &Connection, ledger_id: i64) -> Result<Option<TripRecord>> {
    conn.query_row(
        "SELECT date, time, distance_km, category, route,
                odometer_start, odometer_end, reimbursement
         FROM trips
         WHERE ledger_id = ?1
         ORDER BY seq DESC
         LIMIT 1",
        [ledger_id],
        map_trip_row,
    )
    .optional()
}

pub fn insert_ledger(conn: &Connection, month: MonthId, opening_odometer: i64) -> Result<i64> {
    conn.execute(
        "INSERT INTO ledgers (month_key, name, year, month, opening_odometer, total_reimbursement, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
        params![
            month.key(),
            month.ledger_name(),
            month.year,
            month.month,
            opening_odometer,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Append a trip after the current highest `seq` of the ledger.
pub fn insert_trip(conn: &Connection, ledger_id: i64, record: &TripRecord) -> Result<()> {
    let next_seq: i64 = conn.query_row(
        "SELECT COALESCE(MAX(seq), 0) + 1 FROM trips WHERE ledger_id = ?1",
        [ledger_id],
        |row| row.get(0),
    )?;

    conn.execute(
        "INSERT INTO trips (ledger_id, seq, date, time, distance_km, category, route,
                            odometer_start, odometer_end, reimbursement, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            ledger_id,
            next_seq,
            record.date_str(),
            record.time_str(),
            record.distance_km(),
            record.category().to_db_str(),
            record.route(),
            record.odometer_start(),
            record.odometer_end(),
            record.reimbursement(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn update_total(conn: &Connection, ledger_id: i64, total: f64) -> Result<usize> {
    conn.execute(
        "UPDATE ledgers SET total_reimbursement = ?1 WHERE id = ?2",
        params![total, ledger_id],
    )
}

/// Delete a ledger and (through the foreign key cascade and an explicit
/// delete) all of its trips.
pub fn delete_ledger(conn: &Connection, month: MonthId) -> Result<usize> {
    conn.execute(
        "DELETE FROM trips WHERE ledger_id IN (SELECT id FROM ledgers WHERE month_key = ?1)",
        [month.key()],
    )?;
    conn.execute("DELETE FROM ledgers WHERE month_key = ?1", [month.key()])
}

pub fn count_trips(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM trips", [], |row| row.get(0))
}
