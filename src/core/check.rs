use crate::errors::AppResult;
use crate::models::MonthId;
use crate::store::LedgerStore;

/// Invariant violations found in one ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerIssues {
    pub month: MonthId,
    pub problems: Vec<String>,
}

pub struct CheckLogic;

impl CheckLogic {
    /// Re-validate every stored ledger: odometer chain, ordering, derived
    /// reimbursements and the cached total. Only ledgers with problems are
    /// returned.
    pub fn validate_all<S: LedgerStore + ?Sized>(
        store: &mut S,
        rate_per_km: f64,
    ) -> AppResult<Vec<LedgerIssues>> {
        let mut out = Vec::new();

        for month in store.list_months()? {
            let Some(ledger) = store.get_ledger(month)? else {
                continue;
            };

            let mut problems = ledger.violations(rate_per_km);

            let derived = ledger.total_reimbursement();
            if let Some(cached) = store.cached_total(month)?
                && (cached - derived).abs() > 0.005
            {
                problems.push(format!(
                    "cached total {:.2} != derived total {:.2}",
                    cached, derived
                ));
            }

            if !problems.is_empty() {
                out.push(LedgerIssues { month, problems });
            }
        }

        Ok(out)
    }
}
