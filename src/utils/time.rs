//! Time utilities: parsing HH:MM and the 10-minute grid used by the ledger.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Truncate to the enclosing 10-minute boundary (seconds dropped).
pub fn round_down_10(t: NaiveTime) -> NaiveTime {
    let minute = t.minute() - t.minute() % 10;
    NaiveTime::from_hms_opt(t.hour(), minute, 0).unwrap_or(t)
}

pub fn parse_optional_time(input: Option<&str>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}
