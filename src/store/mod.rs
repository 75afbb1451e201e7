//! Ledger persistence behind a small trait, so the generator and the
//! appender run unchanged against SQLite or an in-memory map.

use crate::errors::AppResult;
use crate::models::{MonthId, MonthLedger, TripRecord};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub trait LedgerStore {
    /// Full ledger for `month`, or `None` when it was never created.
    fn get_ledger(&mut self, month: MonthId) -> AppResult<Option<MonthLedger>>;

    /// Create an empty ledger. Fails if the month already has one.
    fn create_ledger(&mut self, month: MonthId, opening_odometer: i64) -> AppResult<()>;

    /// Append one record after the current last record of `month`.
    fn append_record(&mut self, month: MonthId, record: &TripRecord) -> AppResult<()>;

    /// Closing odometer of `month`, or `None` when there is no ledger.
    fn closing_odometer(&mut self, month: MonthId) -> AppResult<Option<i64>>;

    /// Overwrite the cached total of `month`.
    fn set_total(&mut self, month: MonthId, amount: f64) -> AppResult<()>;

    /// Cached total of `month` as last written by `set_total`.
    fn cached_total(&mut self, month: MonthId) -> AppResult<Option<f64>>;

    /// Replace the ledger of `ledger.month()` wholesale, total included.
    /// Either the whole ledger is written or nothing changes.
    fn replace_ledger(&mut self, ledger: &MonthLedger) -> AppResult<()>;

    /// Months that have a ledger, oldest first.
    fn list_months(&mut self) -> AppResult<Vec<MonthId>>;

    /// Record an audit line. Stores without an audit trail ignore it.
    fn audit(&mut self, _operation: &str, _target: &str, _message: &str) {}
}
