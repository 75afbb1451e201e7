use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::api::{ApiResponse, handle_payload};
use crate::errors::{AppError, AppResult};
use crate::store::SqliteStore;
use chrono::{Local, Utc};
use std::io::Read;

/// Run one submission and print the JSON response on stdout. A non-200
/// status makes the command fail after printing.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit { payload } = cmd {
        let body = match payload {
            Some(p) => p.clone().into_bytes(),
            None => {
                let mut buf = Vec::new();
                std::io::stdin().read_to_end(&mut buf)?;
                buf
            }
        };

        let response = match SqliteStore::open(&cfg.database) {
            Ok(mut store) => handle_payload(
                &mut store,
                cfg,
                &body,
                Local::now().naive_local(),
                Utc::now(),
            ),
            Err(e) => ApiResponse::from_error(&e, Utc::now()),
        };

        println!("{}", response.to_json());

        if response.status != 200 {
            return Err(AppError::Other(format!(
                "submission failed with status {}",
                response.status
            )));
        }
    }

    Ok(())
}
