use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{MonthId, MonthLedger};
use crate::store::{LedgerStore, SqliteStore};
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREEN, RESET, color_for_category};
use crate::utils::date::{current_month, ledger_date, parse_month_range};
use crate::utils::formatting::{bold, money, odometer};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, summary } = cmd {
        let mut store = SqliteStore::open(&cfg.database)?;

        let bounds = resolve_period(period)?;
        let months: Vec<MonthId> = store
            .list_months()?
            .into_iter()
            .filter(|m| bounds.is_none_or(|(from, to)| *m >= from && *m <= to))
            .collect();

        if months.is_empty() {
            info("No ledgers for the selected period.");
            return Ok(());
        }

        for month in months {
            let Some(ledger) = store.get_ledger(month)? else {
                continue;
            };
            if *summary {
                print_summary_line(&ledger, cfg);
            } else {
                print_ledger(&ledger, cfg);
            }
        }
    }
    Ok(())
}

/// `None` means every month.
fn resolve_period(period: &Option<String>) -> AppResult<Option<(MonthId, MonthId)>> {
    match period.as_deref() {
        Some(p) if p.eq_ignore_ascii_case("all") => Ok(None),
        Some(p) => Ok(Some(parse_month_range(p)?)),
        None => {
            let m = current_month();
            Ok(Some((m, m)))
        }
    }
}

fn print_summary_line(ledger: &MonthLedger, cfg: &Config) {
    println!(
        "{:<16} {:>4} trips {:>6} km {:>12}  {} → {}",
        ledger.month().ledger_name(),
        ledger.len(),
        ledger.total_km(),
        money(ledger.total_reimbursement(), &cfg.currency),
        odometer(ledger.opening_odometer()),
        odometer(ledger.closing_odometer())
    );
}

fn print_ledger(ledger: &MonthLedger, cfg: &Config) {
    header(format!(
        "{} | {} {}",
        ledger.month().ledger_name(),
        cfg.vehicle.make,
        cfg.vehicle.registration
    ));
    println!("Opening odometer: {}\n", odometer(ledger.opening_odometer()));

    let mut table = Table::new(vec![
        Column::right("#", 3),
        Column::left("DATE", 10),
        Column::left("TIME", 5),
        Column::right("START", 9),
        Column::right("END", 9),
        Column::right("KM", 4),
        Column::right(&cfg.currency, 8),
        Column::left("CATEGORY", 18),
        Column::left("ROUTE", 12),
    ]);

    for (i, r) in ledger.records().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            ledger_date(r.date()),
            r.time_str(),
            odometer(r.odometer_start()),
            odometer(r.odometer_end()),
            r.distance_km().to_string(),
            format!("{:.2}", r.reimbursement()),
            r.category().label().to_string(),
            r.route().to_string(),
        ]);
    }

    // category colouring is applied per line, after padding
    let rendered = table.render();
    for (i, line) in rendered.lines().enumerate() {
        match i.checked_sub(2).and_then(|n| ledger.records().get(n)) {
            Some(r) => println!("{}{}{}", color_for_category(r.category()), line, RESET),
            None => println!("{}", line),
        }
    }

    println!(
        "\n{} {} trips | {} km | {}{}{}\n",
        bold("TOTAL"),
        ledger.len(),
        ledger.total_km(),
        GREEN,
        money(ledger.total_reimbursement(), &cfg.currency),
        RESET
    );
}
