// src/export/logic.rs

use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::TripExport;
use crate::export::xlsx::export_xlsx;
use crate::models::MonthId;
use crate::store::LedgerStore;
use crate::ui::messages::warning;
use crate::utils::date::parse_month_range;
use crate::utils::path::ensure_writable;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export trips of the selected months.
    ///
    /// - `range`: `None`, `"all"` or
    ///   - `YYYY`
    ///   - `YYYY-MM`
    ///   - `YYYY:YYYY`
    ///   - `YYYY-MM:YYYY-MM`
    ///
    /// Returns the number of exported trips.
    pub fn export<S: LedgerStore + ?Sized>(
        store: &mut S,
        cfg: &Config,
        format: ExportFormat,
        path: &Path,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<usize> {
        let bounds = match range.as_deref() {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_month_range(r)?),
        };

        let trips = Self::collect(store, cfg, bounds)?;

        if trips.is_empty() {
            warning("No trips found for selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&trips, path)?,
            ExportFormat::Json => export_json(&trips, path)?,
            ExportFormat::Xlsx => export_xlsx(&trips, path, &build_title(cfg, range))?,
        }

        store.audit(
            "export",
            format.as_str(),
            &format!("{} trips exported to {}", trips.len(), path.display()),
        );
        Ok(trips.len())
    }

    /// Flatten the stored ledgers within `bounds` (all when `None`).
    pub fn collect<S: LedgerStore + ?Sized>(
        store: &mut S,
        cfg: &Config,
        bounds: Option<(MonthId, MonthId)>,
    ) -> AppResult<Vec<TripExport>> {
        let mut out = Vec::new();

        for month in store.list_months()? {
            if let Some((from, to)) = bounds
                && (month < from || month > to)
            {
                continue;
            }
            if let Some(ledger) = store.get_ledger(month)? {
                out.extend(
                    ledger
                        .records()
                        .iter()
                        .map(|r| TripExport::from_record(&ledger, r, cfg)),
                );
            }
        }

        Ok(out)
    }
}

/// Sheet title for the selected period.
fn build_title(cfg: &Config, period: &Option<String>) -> String {
    let vehicle = format!("{} {}", cfg.vehicle.make, cfg.vehicle.registration);

    match period.as_deref() {
        None => format!("Trip log {vehicle}"),
        Some(p) if p.eq_ignore_ascii_case("all") => format!("Trip log {vehicle}"),
        Some(p) => match MonthId::parse(p) {
            Ok(m) => format!("Trip log {vehicle}, {}", m.ledger_name()),
            Err(_) => format!("Trip log {vehicle}, {p}"),
        },
    }
}
