use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::append::{AppendLogic, Distance, TripSubmission};
use crate::errors::AppResult;
use crate::store::SqliteStore;
use crate::ui::messages::success;
use crate::utils::formatting::odometer;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        distance_km,
        category,
        date,
        time,
        route,
    } = cmd
    {
        let submission = TripSubmission {
            distance_km: Some(Distance::Number(*distance_km as f64)),
            category: Some(category.clone()),
            date: date.clone(),
            route: route.clone(),
            time: time.clone(),
        };

        let mut store = SqliteStore::open(&cfg.database)?;
        let now = chrono::Local::now().naive_local();
        let done = AppendLogic::append(&mut store, cfg, &submission, now)?;

        success(format!(
            "Trip recorded in {}: {} | {} km | {} → {}",
            done.month,
            done.date,
            done.distance_km,
            odometer(done.opening_odometer),
            odometer(done.closing_odometer)
        ));
    }

    Ok(())
}
