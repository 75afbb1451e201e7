use crate::config::Config;
use crate::core::opening::{OpeningSource, resolve_opening_odometer};
use crate::core::random::random_between;
use crate::core::sampler::{GenerationTarget, TripSampler};
use crate::core::scheduler::{DayScheduler, eligible_days};
use crate::errors::{AppError, AppResult};
use crate::models::{MonthId, MonthLedger, TripCategory};
use crate::store::LedgerStore;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary of one generation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub month: String,
    pub trips: usize,
    pub total_km: u64,
    pub total_reimbursement: f64,
    pub by_category: BTreeMap<String, usize>,
    pub dominant_km: u64,
    pub dominant_share_pct: f64,
    pub opening_odometer: i64,
    pub closing_odometer: i64,
    pub target_km: u32,
    pub dominant_pct: u32,
    pub committed: bool,
    #[serde(skip)]
    pub opening_source: Option<MonthId>,
}

/// High-level business logic for the `generate` command.
pub struct GenerateLogic;

impl GenerateLogic {
    /// Build a complete synthetic month in memory. Nothing is written.
    pub fn build<S, R>(
        store: &mut S,
        cfg: &Config,
        month: MonthId,
        rng: &mut R,
    ) -> AppResult<(MonthLedger, GenerationTarget, OpeningSource)>
    where
        S: LedgerStore + ?Sized,
        R: Rng + ?Sized,
    {
        let g = &cfg.generation;
        g.validate()?;
        let rest_day = cfg.rest_weekday()?;

        let days = eligible_days(month, rest_day);
        if days.is_empty() {
            return Err(AppError::Config(format!(
                "{} has no day left after excluding {}",
                month, cfg.rest_day
            )));
        }

        let (opening, source) = resolve_opening_odometer(
            store,
            month,
            cfg.lookback_months,
            cfg.default_opening_odometer,
        )?;

        let target = GenerationTarget {
            target_km: random_between(rng, g.min_km, g.max_km),
            dominant_pct: random_between(rng, g.min_dominant_pct, g.max_dominant_pct),
        };

        let sampler = TripSampler {
            dominant: &g.dominant,
            secondary: &g.secondary,
            overshoot_km: g.overshoot_km,
        };
        let candidates = sampler.sample(rng, target)?;

        let scheduler = DayScheduler {
            min_trips_per_day: g.min_trips_per_day,
            max_trips_per_day: g.max_trips_per_day,
            hour_min: g.hour_min,
            hour_max: g.hour_max,
        };
        let planned = scheduler.schedule(rng, candidates, &days, &cfg.default_route)?;

        let ledger = MonthLedger::from_planned(month, opening, planned, cfg.rate_per_km)?;
        ledger.validate(cfg.rate_per_km)?;

        Ok((ledger, target, source))
    }

    /// Generate `month` and, unless `dry_run`, replace its stored ledger.
    pub fn run<S, R>(
        store: &mut S,
        cfg: &Config,
        month: MonthId,
        rng: &mut R,
        dry_run: bool,
    ) -> AppResult<(MonthLedger, GenerationReport)>
    where
        S: LedgerStore + ?Sized,
        R: Rng + ?Sized,
    {
        let (ledger, target, source) = Self::build(store, cfg, month, rng)?;
        let report = Self::report(&ledger, &cfg.generation.dominant.category, target, source, !dry_run);

        if dry_run {
            tracing::info!(month = %month.key(), trips = ledger.len(), "dry run, nothing committed");
            return Ok((ledger, report));
        }

        store.replace_ledger(&ledger)?;
        store.audit(
            "generate",
            &month.key(),
            &format!(
                "{} trips, {} km, {:.2} reimbursement (target {} km, {}% {})",
                report.trips,
                report.total_km,
                report.total_reimbursement,
                target.target_km,
                target.dominant_pct,
                cfg.generation.dominant.category
            ),
        );

        Ok((ledger, report))
    }

    pub fn report(
        ledger: &MonthLedger,
        dominant: &TripCategory,
        target: GenerationTarget,
        source: OpeningSource,
        committed: bool,
    ) -> GenerationReport {
        let by_category = ledger
            .count_by_category()
            .into_iter()
            .map(|(c, n)| (c.label().to_string(), n))
            .collect();

        let total_km = ledger.total_km();
        let dominant_km: u64 = ledger
            .records()
            .iter()
            .filter(|r| r.category() == *dominant)
            .map(|r| r.distance_km() as u64)
            .sum();
        let dominant_share_pct = if total_km == 0 {
            0.0
        } else {
            dominant_km as f64 * 100.0 / total_km as f64
        };

        GenerationReport {
            month: ledger.month().ledger_name(),
            trips: ledger.len(),
            total_km,
            total_reimbursement: ledger.total_reimbursement(),
            by_category,
            dominant_km,
            dominant_share_pct,
            opening_odometer: ledger.opening_odometer(),
            closing_odometer: ledger.closing_odometer(),
            target_km: target.target_km,
            dominant_pct: target.dominant_pct,
            committed,
            opening_source: match source {
                OpeningSource::CarriedFrom(m) => Some(m),
                OpeningSource::Default => None,
            },
        }
    }
}
