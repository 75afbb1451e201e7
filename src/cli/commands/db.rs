use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::check::CheckLogic;
use crate::db::migrate::run_pending_migrations;
use crate::db::stats;
use crate::errors::{AppError, AppResult};
use crate::store::SqliteStore;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        // opening the store already applies pending migrations
        let mut store = SqliteStore::open(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            run_pending_migrations(&store.pool().conn)?;
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(store.pool(), &cfg.database, &cfg.currency)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String =
                store
                    .pool()
                    .conn
                    .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }

            println!("{}▶ Validating ledgers…{}", CYAN, RESET);
            let issues = CheckLogic::validate_all(&mut store, cfg.rate_per_km)?;

            if issues.is_empty() {
                println!("{}✔ All ledgers are consistent.{}\n", GREEN, RESET);
            } else {
                for i in &issues {
                    println!("{}✘ {}{}", RED, i.month, RESET);
                    for p in &i.problems {
                        println!("    - {}", p);
                    }
                }
                println!();
            }

            if integrity != "ok" || !issues.is_empty() {
                return Err(AppError::Storage(format!(
                    "database check failed ({} inconsistent ledger(s))",
                    issues.len()
                )));
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            store.pool().conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
