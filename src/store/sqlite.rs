use super::LedgerStore;
use crate::db::log::ttlog_quiet;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_ledger, find_ledger, insert_ledger, insert_trip, last_trip, list_ledgers, load_trips,
    update_total,
};
use crate::errors::{AppError, AppResult};
use crate::models::{MonthId, MonthLedger, TripRecord};

/// Production store: `ledgers` and `trips` tables in one SQLite file.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open the database at `path` and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        Self::from_pool(pool)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        run_pending_migrations(&pool.conn)
            .map_err(|e| AppError::Migration(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn pool(&mut self) -> &mut DbPool {
        &mut self.pool
    }

    fn ledger_id(&self, month: MonthId) -> AppResult<i64> {
        find_ledger(&self.pool.conn, month)?
            .map(|row| row.id)
            .ok_or_else(|| AppError::Storage(format!("Ledger {} does not exist", month)))
    }
}

impl LedgerStore for SqliteStore {
    fn get_ledger(&mut self, month: MonthId) -> AppResult<Option<MonthLedger>> {
        let Some(row) = find_ledger(&self.pool.conn, month)? else {
            return Ok(None);
        };
        let records = load_trips(&self.pool.conn, row.id)?;
        Ok(Some(MonthLedger::restore(
            row.month,
            row.opening_odometer,
            records,
        )))
    }

    fn create_ledger(&mut self, month: MonthId, opening_odometer: i64) -> AppResult<()> {
        if find_ledger(&self.pool.conn, month)?.is_some() {
            return Err(AppError::Storage(format!("Ledger {} already exists", month)));
        }
        insert_ledger(&self.pool.conn, month, opening_odometer)?;
        tracing::debug!(month = %month.key(), opening_odometer, "ledger created");
        Ok(())
    }

    fn append_record(&mut self, month: MonthId, record: &TripRecord) -> AppResult<()> {
        let id = self.ledger_id(month)?;
        insert_trip(&self.pool.conn, id, record)?;
        Ok(())
    }

    fn closing_odometer(&mut self, month: MonthId) -> AppResult<Option<i64>> {
        let Some(row) = find_ledger(&self.pool.conn, month)? else {
            return Ok(None);
        };
        let closing = last_trip(&self.pool.conn, row.id)?
            .map(|r| r.odometer_end())
            .unwrap_or(row.opening_odometer);
        Ok(Some(closing))
    }

    fn set_total(&mut self, month: MonthId, amount: f64) -> AppResult<()> {
        let id = self.ledger_id(month)?;
        update_total(&self.pool.conn, id, amount)?;
        Ok(())
    }

    fn cached_total(&mut self, month: MonthId) -> AppResult<Option<f64>> {
        Ok(find_ledger(&self.pool.conn, month)?.map(|row| row.total_reimbursement))
    }

    fn replace_ledger(&mut self, ledger: &MonthLedger) -> AppResult<()> {
        let month = ledger.month();
        let tx = self.pool.conn.transaction()?;

        delete_ledger(&tx, month)?;
        let id = insert_ledger(&tx, month, ledger.opening_odometer())?;
        for record in ledger.records() {
            insert_trip(&tx, id, record)?;
        }
        update_total(&tx, id, ledger.total_reimbursement())?;

        tx.commit()?;
        tracing::debug!(month = %month.key(), trips = ledger.len(), "ledger replaced");
        Ok(())
    }

    fn list_months(&mut self) -> AppResult<Vec<MonthId>> {
        Ok(list_ledgers(&self.pool.conn)?
            .into_iter()
            .map(|row| row.month)
            .collect())
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) {
        ttlog_quiet(&self.pool.conn, operation, target, message);
    }
}
