use super::month::MonthId;
use super::trip::{PlannedTrip, TripRecord, reimbursement_for, round2};
use crate::errors::{AppError, AppResult};
use std::collections::BTreeMap;

use super::category::TripCategory;

/// Append-only trip log for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthLedger {
    month: MonthId,
    opening_odometer: i64,
    records: Vec<TripRecord>,
}

impl MonthLedger {
    pub fn new(month: MonthId, opening_odometer: i64) -> Self {
        Self {
            month,
            opening_odometer,
            records: Vec::new(),
        }
    }

    /// Build a ledger from trips already sorted by (date, time), chaining the
    /// odometer from `opening_odometer`.
    pub fn from_planned(
        month: MonthId,
        opening_odometer: i64,
        planned: Vec<PlannedTrip>,
        rate_per_km: f64,
    ) -> AppResult<Self> {
        let mut ledger = Self::new(month, opening_odometer);
        for trip in planned {
            ledger.append(trip, rate_per_km)?;
        }
        Ok(ledger)
    }

    /// Ledger read back from storage.
    pub(crate) fn restore(month: MonthId, opening_odometer: i64, records: Vec<TripRecord>) -> Self {
        Self {
            month,
            opening_odometer,
            records,
        }
    }

    pub fn month(&self) -> MonthId {
        self.month
    }

    pub fn opening_odometer(&self) -> i64 {
        self.opening_odometer
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&TripRecord> {
        self.records.last()
    }

    /// Last record's end value, or the opening value for an empty ledger.
    pub fn closing_odometer(&self) -> i64 {
        self.records
            .last()
            .map(|r| r.odometer_end())
            .unwrap_or(self.opening_odometer)
    }

    pub fn total_km(&self) -> u64 {
        self.records.iter().map(|r| r.distance_km() as u64).sum()
    }

    /// Sum of all reimbursements, recomputed on every call.
    pub fn total_reimbursement(&self) -> f64 {
        round2(self.records.iter().map(|r| r.reimbursement()).sum())
    }

    pub fn count_by_category(&self) -> BTreeMap<TripCategory, usize> {
        let mut out = BTreeMap::new();
        for r in &self.records {
            *out.entry(r.category()).or_insert(0) += 1;
        }
        out
    }

    /// Append one trip as the newest record.
    ///
    /// The trip must belong to this month, have a positive distance and not
    /// precede the current last record.
    pub fn append(&mut self, planned: PlannedTrip, rate_per_km: f64) -> AppResult<&TripRecord> {
        if planned.distance_km == 0 {
            return Err(AppError::Validation(
                "Distance must be greater than 0 km".into(),
            ));
        }

        if !self.month.contains(planned.date) {
            return Err(AppError::Validation(format!(
                "Trip date {} does not belong to ledger {}",
                planned.date, self.month
            )));
        }

        if let Some(last) = self.records.last()
            && planned.sort_key() < last.sort_key()
        {
            return Err(AppError::Validation(format!(
                "Trip on {} {} precedes the last ledger entry ({} {})",
                planned.date,
                planned.time_str(),
                last.date_str(),
                last.time_str()
            )));
        }

        let start = self.closing_odometer();
        self.records.push(TripRecord::chain(planned, start, rate_per_km));

        // just pushed
        Ok(&self.records[self.records.len() - 1])
    }

    /// Check every ledger invariant, returning the list of violations.
    pub fn violations(&self, rate_per_km: f64) -> Vec<String> {
        let mut out = Vec::new();
        let mut expected_start = self.opening_odometer;

        for (i, r) in self.records.iter().enumerate() {
            let n = i + 1;

            if r.distance_km() == 0 {
                out.push(format!("#{n}: distance is 0 km"));
            }
            if r.odometer_start() != expected_start {
                out.push(format!(
                    "#{n}: odometer start {} does not continue previous end {}",
                    r.odometer_start(),
                    expected_start
                ));
            }
            if r.odometer_end() != r.odometer_start() + r.distance_km() as i64 {
                out.push(format!(
                    "#{n}: odometer end {} != start {} + {} km",
                    r.odometer_end(),
                    r.odometer_start(),
                    r.distance_km()
                ));
            }
            let expected = reimbursement_for(r.distance_km(), rate_per_km);
            if (r.reimbursement() - expected).abs() > 0.005 {
                out.push(format!(
                    "#{n}: reimbursement {:.2} != expected {:.2}",
                    r.reimbursement(),
                    expected
                ));
            }
            if !self.month.contains(r.date()) {
                out.push(format!("#{n}: date {} outside {}", r.date(), self.month));
            }
            if i > 0 && r.sort_key() < self.records[i - 1].sort_key() {
                out.push(format!("#{n}: out of chronological order"));
            }

            expected_start = r.odometer_end();
        }

        out
    }

    pub fn validate(&self, rate_per_km: f64) -> AppResult<()> {
        let problems = self.violations(rate_per_km);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Storage(format!(
                "Ledger {} is inconsistent: {}",
                self.month,
                problems.join("; ")
            )))
        }
    }
}
