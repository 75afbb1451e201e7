//! JSON adapter around the appender, shared by `submit` and `serve`.

use crate::config::Config;
use crate::core::append::{AppendConfirmation, AppendLogic, TripSubmission};
use crate::errors::AppError;
use crate::models::TripCategory;
use crate::store::LedgerStore;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Value, json};

pub const SUCCESS_MESSAGE: &str = "Trip recorded successfully";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn new(status: u16, message: impl Into<String>, data: Option<Value>, at: DateTime<Utc>) -> Self {
        Self {
            status,
            message: message.into(),
            data,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn ok(confirmation: &AppendConfirmation, at: DateTime<Utc>) -> Self {
        let data = serde_json::to_value(confirmation).ok();
        Self::new(200, SUCCESS_MESSAGE, data, at)
    }

    pub fn from_error(err: &AppError, at: DateTime<Utc>) -> Self {
        Self::new(err.status_code(), err.to_string(), None, at)
    }

    pub fn to_json(&self) -> String {
        // only plain strings, numbers and maps inside
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"status":500,"message":"response encoding failed","timestamp":"{}"}}"#,
                self.timestamp
            )
        })
    }
}

/// Decode a JSON body into a submission. Malformed JSON is a caller error.
pub fn decode_submission(payload: &[u8]) -> Result<TripSubmission, AppError> {
    if payload.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(AppError::Validation("Empty request body".into()));
    }
    serde_json::from_slice(payload)
        .map_err(|e| AppError::Validation(format!("Invalid JSON payload: {e}")))
}

/// Run one submission and map the outcome to a response. Never fails:
/// validation problems become 400 and everything else 500.
pub fn handle_submission<S: LedgerStore + ?Sized>(
    store: &mut S,
    cfg: &Config,
    submission: &TripSubmission,
    now: NaiveDateTime,
    at: DateTime<Utc>,
) -> ApiResponse {
    match AppendLogic::append(store, cfg, submission, now) {
        Ok(confirmation) => ApiResponse::ok(&confirmation, at),
        Err(err) => {
            if err.is_validation() {
                tracing::info!(error = %err, "submission rejected");
            } else {
                tracing::error!(error = %err, "submission failed");
            }
            ApiResponse::from_error(&err, at)
        }
    }
}

/// Same as `handle_submission`, starting from a raw JSON body.
pub fn handle_payload<S: LedgerStore + ?Sized>(
    store: &mut S,
    cfg: &Config,
    payload: &[u8],
    now: NaiveDateTime,
    at: DateTime<Utc>,
) -> ApiResponse {
    match decode_submission(payload) {
        Ok(submission) => handle_submission(store, cfg, &submission, now, at),
        Err(err) => ApiResponse::from_error(&err, at),
    }
}

/// Service description returned by the status route.
pub fn status_info(cfg: &Config, at: DateTime<Utc>) -> ApiResponse {
    let data = json!({
        "service": "rtriplog",
        "version": env!("CARGO_PKG_VERSION"),
        "vehicle": format!("{} {}", cfg.vehicle.make, cfg.vehicle.registration),
        "endpoints": {
            "POST /trips": "record a trip from a JSON body",
            "GET /trips": "record a trip from query parameters",
            "GET /status": "this description",
        },
        "requiredFields": ["distanceKm", "category"],
        "optionalFields": ["date", "route", "time"],
        "categories": TripCategory::labels(),
    });
    ApiResponse::new(200, "Trip ledger service is running", Some(data), at)
}
