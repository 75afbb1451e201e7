use crate::errors::AppResult;
use crate::models::MonthId;
use crate::store::LedgerStore;

/// Where an opening odometer value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningSource {
    /// Closing value of an earlier month's ledger.
    CarriedFrom(MonthId),
    /// No earlier ledger within the lookback window.
    Default,
}

/// Opening odometer for `month`: the closing value of the nearest earlier
/// ledger, looking back at most `lookback_months` months, else `default`.
pub fn resolve_opening_odometer<S: LedgerStore + ?Sized>(
    store: &mut S,
    month: MonthId,
    lookback_months: u32,
    default: i64,
) -> AppResult<(i64, OpeningSource)> {
    let mut probe = month;
    for _ in 0..lookback_months {
        probe = probe.previous();
        if let Some(closing) = store.closing_odometer(probe)? {
            return Ok((closing, OpeningSource::CarriedFrom(probe)));
        }
    }
    Ok((default, OpeningSource::Default))
}
