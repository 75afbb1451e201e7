// src/export/model.rs

use crate::config::Config;
use crate::models::{MonthLedger, TripRecord};
use serde::Serialize;

/// Flat trip row used by every export format.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TripExport {
    pub month: String,
    pub date: String,
    pub time: String,
    pub vehicle: String,
    pub registration: String,
    pub odometer_start: i64,
    pub odometer_end: i64,
    pub route: String,
    pub distance_km: u32,
    pub reimbursement: f64,
    pub category: String,
}

impl TripExport {
    pub fn from_record(ledger: &MonthLedger, r: &TripRecord, cfg: &Config) -> Self {
        Self {
            month: ledger.month().ledger_name(),
            date: r.date_str(),
            time: r.time_str(),
            vehicle: cfg.vehicle.make.clone(),
            registration: cfg.vehicle.registration.clone(),
            odometer_start: r.odometer_start(),
            odometer_end: r.odometer_end(),
            route: r.route().to_string(),
            distance_km: r.distance_km(),
            reimbursement: r.reimbursement(),
            category: r.category().label().to_string(),
        }
    }
}

/// Header for CSV / XLSX, in field order.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "month",
        "date",
        "time",
        "vehicle",
        "registration",
        "odometer_start",
        "odometer_end",
        "route",
        "distance_km",
        "reimbursement",
        "category",
    ]
}

/// Row as strings, in header order.
pub(crate) fn trip_to_row(t: &TripExport) -> Vec<String> {
    vec![
        t.month.clone(),
        t.date.clone(),
        t.time.clone(),
        t.vehicle.clone(),
        t.registration.clone(),
        t.odometer_start.to_string(),
        t.odometer_end.to_string(),
        t.route.clone(),
        t.distance_km.to_string(),
        format!("{:.2}", t.reimbursement),
        t.category.clone(),
    ]
}
