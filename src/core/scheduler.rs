use crate::core::random::{random_between, random_time, shuffle};
use crate::errors::{AppError, AppResult};
use crate::models::{MonthId, PlannedTrip, TripCandidate};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;

/// Every day of `month` except the weekly rest day.
pub fn eligible_days(month: MonthId, rest_day: Weekday) -> Vec<NaiveDate> {
    month
        .days()
        .into_iter()
        .filter(|d| d.weekday() != rest_day)
        .collect()
}

/// Scheduling knobs, all inclusive ranges.
#[derive(Debug, Clone, Copy)]
pub struct DayScheduler {
    pub min_trips_per_day: u32,
    pub max_trips_per_day: u32,
    pub hour_min: u32,
    pub hour_max: u32,
}

impl DayScheduler {
    /// Spread `candidates` over `days` and return them sorted by
    /// `(date, "HH:MM")`.
    pub fn schedule<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mut candidates: Vec<TripCandidate>,
        days: &[NaiveDate],
        route: &str,
    ) -> AppResult<Vec<PlannedTrip>> {
        if days.is_empty() {
            return Err(AppError::Config(
                "no eligible day in the month to schedule trips on".into(),
            ));
        }

        shuffle(rng, &mut candidates);

        let total = candidates.len();
        let mut pending = candidates.into_iter();
        let mut planned = Vec::with_capacity(total);
        let mut used_days: Vec<NaiveDate> = Vec::new();

        'days: for day in days {
            let count = random_between(rng, self.min_trips_per_day, self.max_trips_per_day);
            for _ in 0..count {
                let Some(candidate) = pending.next() else {
                    break 'days;
                };
                if used_days.last() != Some(day) {
                    used_days.push(*day);
                }
                planned.push(self.place(rng, *day, candidate, route));
            }
            if planned.len() == total {
                break;
            }
        }

        // out of days: overflow onto days already in use
        let overflow_pool: &[NaiveDate] = if used_days.is_empty() {
            days
        } else {
            &used_days
        };
        for candidate in pending {
            let day = overflow_pool[rng.gen_range(0..overflow_pool.len())];
            planned.push(self.place(rng, day, candidate, route));
        }

        planned.sort_by_key(|p| p.sort_key());
        Ok(planned)
    }

    fn place<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        date: NaiveDate,
        candidate: TripCandidate,
        route: &str,
    ) -> PlannedTrip {
        PlannedTrip {
            date,
            time: random_time(rng, self.hour_min, self.hour_max),
            distance_km: candidate.distance_km,
            category: candidate.category,
            route: route.to_string(),
        }
    }
}
