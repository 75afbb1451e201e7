use crate::errors::{AppError, AppResult};
use crate::models::MonthId;
use chrono::{DateTime, Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn current_month() -> MonthId {
    MonthId::from_date(today())
}

/// Date as written in the ledger: `d.m.yyyy`, no zero padding.
pub fn ledger_date(d: NaiveDate) -> String {
    format!("{}.{}.{}", d.day(), d.month(), d.year())
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a submitted date: `YYYY-MM-DD`, or an RFC 3339 datetime whose
/// date part is used.
pub fn parse_submission_date(s: &str) -> AppResult<NaiveDate> {
    let s = s.trim();
    if let Some(d) = parse_date(s) {
        return Ok(d);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Parse a period into an inclusive month range.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
pub fn parse_month_range(p: &str) -> AppResult<(MonthId, MonthId)> {
    fn bounds(s: &str) -> AppResult<(MonthId, MonthId)> {
        let s = s.trim();
        match s.len() {
            4 => {
                let y: i32 = s
                    .parse()
                    .map_err(|_| AppError::InvalidDate(format!("invalid year '{s}'")))?;
                Ok((MonthId::new(y, 1)?, MonthId::new(y, 12)?))
            }
            7 => {
                let m = MonthId::parse(s)?;
                Ok((m, m))
            }
            _ => Err(AppError::InvalidDate(format!(
                "unsupported period '{s}' (use YYYY or YYYY-MM)"
            ))),
        }
    }

    let (from, to) = match p.split_once(':') {
        Some((start, end)) => {
            if start.trim().len() != end.trim().len() {
                return Err(AppError::InvalidDate(
                    "start and end must have same format".into(),
                ));
            }
            (bounds(start)?.0, bounds(end)?.1)
        }
        None => bounds(p)?,
    };

    if from > to {
        return Err(AppError::InvalidDate(format!(
            "period start {} is after its end {}",
            from.key(),
            to.key()
        )));
    }
    Ok((from, to))
}
