use super::LedgerStore;
use crate::errors::{AppError, AppResult};
use crate::models::{MonthId, MonthLedger, TripRecord};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct StoredLedger {
    opening_odometer: i64,
    records: Vec<TripRecord>,
    total: f64,
}

/// Store kept in memory. Records are stored as given, exactly like the
/// SQLite store, so invariant checks see what was written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ledgers: BTreeMap<MonthId, StoredLedger>,
    audit_log: Vec<(String, String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Audit lines as `(operation, target, message)`.
    pub fn audit_log(&self) -> &[(String, String, String)] {
        &self.audit_log
    }

    fn stored(&mut self, month: MonthId) -> AppResult<&mut StoredLedger> {
        self.ledgers
            .get_mut(&month)
            .ok_or_else(|| AppError::Storage(format!("Ledger {} does not exist", month)))
    }
}

impl LedgerStore for MemoryStore {
    fn get_ledger(&mut self, month: MonthId) -> AppResult<Option<MonthLedger>> {
        Ok(self.ledgers.get(&month).map(|s| {
            MonthLedger::restore(month, s.opening_odometer, s.records.clone())
        }))
    }

    fn create_ledger(&mut self, month: MonthId, opening_odometer: i64) -> AppResult<()> {
        if self.ledgers.contains_key(&month) {
            return Err(AppError::Storage(format!("Ledger {} already exists", month)));
        }
        self.ledgers.insert(
            month,
            StoredLedger {
                opening_odometer,
                records: Vec::new(),
                total: 0.0,
            },
        );
        Ok(())
    }

    fn append_record(&mut self, month: MonthId, record: &TripRecord) -> AppResult<()> {
        self.stored(month)?.records.push(record.clone());
        Ok(())
    }

    fn closing_odometer(&mut self, month: MonthId) -> AppResult<Option<i64>> {
        Ok(self.ledgers.get(&month).map(|s| {
            s.records
                .last()
                .map(|r| r.odometer_end())
                .unwrap_or(s.opening_odometer)
        }))
    }

    fn set_total(&mut self, month: MonthId, amount: f64) -> AppResult<()> {
        self.stored(month)?.total = amount;
        Ok(())
    }

    fn cached_total(&mut self, month: MonthId) -> AppResult<Option<f64>> {
        Ok(self.ledgers.get(&month).map(|s| s.total))
    }

    fn replace_ledger(&mut self, ledger: &MonthLedger) -> AppResult<()> {
        self.ledgers.insert(
            ledger.month(),
            StoredLedger {
                opening_odometer: ledger.opening_odometer(),
                records: ledger.records().to_vec(),
                total: ledger.total_reimbursement(),
            },
        );
        Ok(())
    }

    fn list_months(&mut self) -> AppResult<Vec<MonthId>> {
        Ok(self.ledgers.keys().copied().collect())
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) {
        self.audit_log
            .push((operation.into(), target.into(), message.into()));
    }
}
