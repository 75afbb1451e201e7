use super::category::TripCategory;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Round a monetary amount to 2 decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reimbursement for a distance at the given rate, rounded to cents.
pub fn reimbursement_for(distance_km: u32, rate_per_km: f64) -> f64 {
    round2(distance_km as f64 * rate_per_km)
}

/// A sampled trip that has not been placed on a day yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripCandidate {
    pub distance_km: u32,
    pub category: TripCategory,
}

/// A trip placed on a date and time, before odometer values are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTrip {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub distance_km: u32,
    pub category: TripCategory,
    pub route: String,
}

impl PlannedTrip {
    pub fn time_str(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// Sort key: date first, then zero-padded "HH:MM".
    pub fn sort_key(&self) -> (NaiveDate, String) {
        (self.date, self.time_str())
    }
}

/// One logged trip.
///
/// Odometer values and the reimbursement are derived when the record is
/// built and cannot be set independently afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    date: NaiveDate,
    time: NaiveTime,
    distance_km: u32,
    category: TripCategory,
    route: String,
    odometer_start: i64,
    odometer_end: i64,
    reimbursement: f64,
}

impl TripRecord {
    /// Build a record continuing an odometer chain at `odometer_start`.
    pub fn chain(planned: PlannedTrip, odometer_start: i64, rate_per_km: f64) -> Self {
        let odometer_end = odometer_start + planned.distance_km as i64;
        let reimbursement = reimbursement_for(planned.distance_km, rate_per_km);

        Self {
            date: planned.date,
            time: planned.time,
            distance_km: planned.distance_km,
            category: planned.category,
            route: planned.route,
            odometer_start,
            odometer_end,
            reimbursement,
        }
    }

    /// Rebuild a record read back from storage. Derived values are taken as
    /// stored so that `MonthLedger::validate` can detect drift.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        date: NaiveDate,
        time: NaiveTime,
        distance_km: u32,
        category: TripCategory,
        route: String,
        odometer_start: i64,
        odometer_end: i64,
        reimbursement: f64,
    ) -> Self {
        Self {
            date,
            time,
            distance_km,
            category,
            route,
            odometer_start,
            odometer_end,
            reimbursement,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
    pub fn time(&self) -> NaiveTime {
        self.time
    }
    pub fn distance_km(&self) -> u32 {
        self.distance_km
    }
    pub fn category(&self) -> TripCategory {
        self.category
    }
    pub fn route(&self) -> &str {
        &self.route
    }
    pub fn odometer_start(&self) -> i64 {
        self.odometer_start
    }
    pub fn odometer_end(&self) -> i64 {
        self.odometer_end
    }
    pub fn reimbursement(&self) -> f64 {
        self.reimbursement
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
    pub fn time_str(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    pub fn sort_key(&self) -> (NaiveDate, String) {
        (self.date, self.time_str())
    }
}
