use crate::config::Config;
use crate::core::opening::resolve_opening_odometer;
use crate::errors::{AppError, AppResult};
use crate::models::{MonthId, MonthLedger, PlannedTrip, TripCategory};
use crate::store::LedgerStore;
use crate::utils::date::{ledger_date, parse_submission_date};
use crate::utils::time::{parse_optional_time, round_down_10};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// `distanceKm` as sent by callers: a JSON number, or a numeric string when
/// it comes from a query string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Distance {
    Number(f64),
    Text(String),
}

impl Distance {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Distance::Number(n) => Some(*n),
            Distance::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One externally supplied trip.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSubmission {
    pub distance_km: Option<Distance>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub route: Option<String>,
    pub time: Option<String>,
}

impl TripSubmission {
    pub fn new(distance_km: f64, category: &str) -> Self {
        Self {
            distance_km: Some(Distance::Number(distance_km)),
            category: Some(category.to_string()),
            ..Self::default()
        }
    }
}

/// What the appender reports back for a recorded trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendConfirmation {
    pub month: String,
    pub date: String,
    pub opening_odometer: i64,
    pub closing_odometer: i64,
    pub distance_km: u32,
}

fn validate_distance(raw: Option<&Distance>) -> AppResult<u32> {
    let raw = raw.ok_or_else(|| AppError::Validation("Missing required field: distanceKm".into()))?;
    let value = raw.as_f64().ok_or_else(|| {
        AppError::Validation("Invalid distanceKm: expected a number".into())
    })?;

    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::Validation(format!(
            "Invalid distanceKm: {value} (must be greater than 0)"
        )));
    }
    if value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(AppError::Validation(format!(
            "Invalid distanceKm: {value} (must be a whole number of km)"
        )));
    }
    Ok(value as u32)
}

fn validate_category(raw: Option<&str>) -> AppResult<TripCategory> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Missing required field: category".into()))?;

    TripCategory::from_label(raw).ok_or_else(|| {
        AppError::InvalidCategory(format!(
            "'{}' (expected one of: {})",
            raw,
            TripCategory::labels().join(", ")
        ))
    })
}

/// High-level business logic for appending a single trip.
pub struct AppendLogic;

impl AppendLogic {
    /// Validate `submission` and turn it into a planned trip. `now` supplies
    /// the default date and time.
    pub fn plan(cfg: &Config, submission: &TripSubmission, now: NaiveDateTime) -> AppResult<PlannedTrip> {
        let distance_km = validate_distance(submission.distance_km.as_ref())?;
        let category = validate_category(submission.category.as_deref())?;

        let date = match submission.date.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => parse_submission_date(s)?,
            _ => now.date(),
        };
        let time = parse_optional_time(submission.time.as_deref())?
            .map(round_down_10)
            .unwrap_or_else(|| round_down_10(now.time()));

        let route = submission
            .route
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(&cfg.default_route)
            .to_string();

        Ok(PlannedTrip {
            date,
            time,
            distance_km,
            category,
            route,
        })
    }

    /// Append one trip to the ledger of its month, creating the ledger when
    /// needed. All validation happens before the store is touched.
    pub fn append<S: LedgerStore + ?Sized>(
        store: &mut S,
        cfg: &Config,
        submission: &TripSubmission,
        now: NaiveDateTime,
    ) -> AppResult<AppendConfirmation> {
        let mut planned = Self::plan(cfg, submission, now)?;
        let month = MonthId::from_date(planned.date);

        let (mut ledger, created) = match store.get_ledger(month)? {
            Some(ledger) => (ledger, false),
            None => {
                let (opening, _) = resolve_opening_odometer(
                    store,
                    month,
                    cfg.lookback_months,
                    cfg.default_opening_odometer,
                )?;
                (MonthLedger::new(month, opening), true)
            }
        };

        if let Some(last) = ledger.last() {
            if planned.date < last.date() {
                return Err(AppError::Validation(format!(
                    "Trip date {} is earlier than the last entry of {} ({})",
                    ledger_date(planned.date),
                    month,
                    ledger_date(last.date())
                )));
            }
            // same day: never before the newest record
            if planned.date == last.date() && planned.time < last.time() {
                planned.time = last.time();
            }
        }

        let record = ledger.append(planned, cfg.rate_per_km)?.clone();

        if created {
            store.create_ledger(month, ledger.opening_odometer())?;
        }
        store.append_record(month, &record)?;
        store.set_total(month, ledger.total_reimbursement())?;

        store.audit(
            "append",
            &month.key(),
            &format!(
                "{} {} {} km {} ({} → {})",
                record.date_str(),
                record.time_str(),
                record.distance_km(),
                record.category(),
                record.odometer_start(),
                record.odometer_end()
            ),
        );
        tracing::info!(
            month = %month.key(),
            km = record.distance_km(),
            end = record.odometer_end(),
            "trip appended"
        );

        Ok(AppendConfirmation {
            month: month.ledger_name(),
            date: ledger_date(record.date()),
            opening_odometer: record.odometer_start(),
            closing_odometer: record.odometer_end(),
            distance_km: record.distance_km(),
        })
    }
}
