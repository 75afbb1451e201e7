use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::generate::{GenerateLogic, GenerationReport};
use crate::errors::{AppError, AppResult};
use crate::models::MonthId;
use crate::store::SqliteStore;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::date::current_month;
use crate::utils::formatting::{money, odometer};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Generate {
        month,
        seed,
        dry_run,
        json,
    } = cmd
    {
        let month = match month {
            Some(m) => MonthId::parse(m)?,
            None => current_month(),
        };

        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(*s),
            None => StdRng::from_entropy(),
        };

        let mut store = SqliteStore::open(&cfg.database)?;
        let (_, report) = GenerateLogic::run(&mut store, cfg, month, &mut rng, *dry_run)?;

        if *json {
            let out = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            print_report(&report, cfg);
        }
    }

    Ok(())
}

fn print_report(r: &GenerationReport, cfg: &Config) {
    header(format!("Ledger {}", r.month));

    match r.opening_source {
        Some(m) => info(format!(
            "Opening odometer {} carried from {}",
            odometer(r.opening_odometer),
            m
        )),
        None => info(format!(
            "Opening odometer {} (configured default)",
            odometer(r.opening_odometer)
        )),
    }

    println!(
        "• Target      : {} km, {}% {}",
        r.target_km, r.dominant_pct, cfg.generation.dominant.category
    );
    println!("• Trips       : {}", r.trips);
    for (category, n) in &r.by_category {
        println!("    {:<20} {}", category, n);
    }
    println!(
        "• Distance    : {} km ({:.1}% dominant)",
        r.total_km, r.dominant_share_pct
    );
    println!(
        "• Odometer    : {} → {}",
        odometer(r.opening_odometer),
        odometer(r.closing_odometer)
    );
    println!(
        "• Reimbursed  : {}",
        money(r.total_reimbursement, &cfg.currency)
    );
    println!();

    if r.committed {
        success(format!("Ledger {} written ({} trips).", r.month, r.trips));
    } else {
        warning("Dry run: nothing was written.");
    }
}
