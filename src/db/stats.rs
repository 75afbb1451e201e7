use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::db::queries::{count_trips, list_ledgers};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::money;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str, currency: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) LEDGERS AND TRIPS
    //
    let ledgers = list_ledgers(&pool.conn)?;
    let trips = count_trips(&pool.conn)?;

    println!(
        "{}• Ledgers:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        ledgers.len(),
        RESET
    );
    println!("{}• Total trips:{} {}{}{}", CYAN, RESET, GREEN, trips, RESET);
    println!(
        "{}• Schema migrations:{} {}",
        CYAN,
        RESET,
        applied_versions(&pool.conn)?.len()
    );

    //
    // 3) MONTH RANGE
    //
    let fmt_first = ledgers
        .first()
        .map(|l| l.month.ledger_name())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = ledgers
        .last()
        .map(|l| l.month.ledger_name())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Months:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) CACHED TOTALS
    //
    if !ledgers.is_empty() {
        let total: f64 = ledgers.iter().map(|l| l.total_reimbursement).sum();
        println!(
            "{}• Total reimbursement:{} {}",
            CYAN,
            RESET,
            money(total, currency)
        );
        let avg = trips as f64 / ledgers.len() as f64;
        println!("{}• Average trips/month:{} {:.1}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
