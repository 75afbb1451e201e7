use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rtriplog::config::{FixedTemplate, GenerationConfig, RangeTemplate};
use rtriplog::core::random::{random_between, random_time, shuffle};
use rtriplog::core::sampler::{GenerationTarget, TripSampler};
use rtriplog::core::scheduler::{DayScheduler, eligible_days};
use rtriplog::models::{MonthId, TripCandidate, TripCategory};

fn default_sampler(g: &GenerationConfig) -> TripSampler<'_> {
    TripSampler {
        dominant: &g.dominant,
        secondary: &g.secondary,
        overshoot_km: g.overshoot_km,
    }
}

#[test]
fn test_random_between_is_inclusive() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut seen_min = false;
    let mut seen_max = false;

    for _ in 0..2000 {
        let v = random_between(&mut rng, 2, 3);
        assert!((2..=3).contains(&v));
        seen_min |= v == 2;
        seen_max |= v == 3;
    }
    assert!(seen_min && seen_max);
    assert_eq!(random_between(&mut rng, 5, 5), 5);
}

#[test]
fn test_random_time_on_ten_minute_grid() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let t = random_time(&mut rng, 7, 17);
        assert!((7..=17).contains(&t.hour()));
        assert_eq!(t.minute() % 10, 0);
        assert_eq!(t.second(), 0);
    }
}

#[test]
fn test_shuffle_keeps_every_item() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut items: Vec<u32> = (0..50).collect();
    shuffle(&mut rng, &mut items);

    let mut sorted = items.clone();
    sorted.sort();
    assert_eq!(sorted, (0..50).collect::<Vec<_>>());
}

#[test]
fn test_sampler_target_450_at_70_percent() {
    let g = GenerationConfig::default();
    let sampler = default_sampler(&g);

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let trips = sampler
            .sample(
                &mut rng,
                GenerationTarget {
                    target_km: 450,
                    dominant_pct: 70,
                },
            )
            .expect("sample");

        let dominant: Vec<_> = trips
            .iter()
            .filter(|t| t.category == TripCategory::Commute)
            .collect();
        let dominant_km: u32 = dominant.iter().map(|t| t.distance_km).sum();
        assert!(dominant.iter().all(|t| t.distance_km == 5));
        assert_eq!(dominant_km, 315);

        let rest: Vec<_> = trips
            .iter()
            .filter(|t| t.category != TripCategory::Commute)
            .collect();
        let rest_km: u32 = rest.iter().map(|t| t.distance_km).sum();
        assert!(rest_km >= 135, "remainder {rest_km} < 135");
        assert!(rest_km <= 145, "remainder {rest_km} overshoots");
        assert!(rest.iter().all(|t| (5..=30).contains(&t.distance_km)));
        assert!(rest.iter().all(|t| {
            t.category == TripCategory::ClientVisit || t.category == TripCategory::MeetingTransport
        }));

        assert!(dominant_km + rest_km >= 450);
    }
}

#[test]
fn test_sampler_fractional_dominant_share() {
    let g = GenerationConfig::default();
    let sampler = default_sampler(&g);
    let target = GenerationTarget {
        target_km: 401,
        dominant_pct: 70,
    };
    assert_eq!(target.dominant_km(), 280.7);

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let trips = sampler.sample(&mut rng, target).expect("sample");

        let dominant_km: u32 = trips
            .iter()
            .filter(|t| t.category == TripCategory::Commute)
            .map(|t| t.distance_km)
            .sum();
        // 280.7 km needs 57 commutes of 5 km
        assert!(dominant_km * 100 >= 401 * 70);
        assert!((dominant_km as f64) < target.dominant_km() + 5.0);
        assert_eq!(dominant_km, 285);

        let rest_km: u32 = trips
            .iter()
            .filter(|t| t.category != TripCategory::Commute)
            .map(|t| t.distance_km)
            .sum();
        assert!(rest_km as f64 >= target.remainder_km());
        assert!(dominant_km + rest_km >= 401);
    }
}

#[test]
fn test_sampler_rejects_share_over_100() {
    let g = GenerationConfig::default();
    let sampler = default_sampler(&g);
    let mut rng = StdRng::seed_from_u64(1);

    let res = sampler.sample(
        &mut rng,
        GenerationTarget {
            target_km: 400,
            dominant_pct: 101,
        },
    );
    assert!(matches!(res, Err(rtriplog::errors::AppError::Config(_))));
}

#[test]
fn test_sampler_uses_every_secondary_category() {
    let g = GenerationConfig::default();
    let sampler = default_sampler(&g);
    let mut rng = StdRng::seed_from_u64(99);

    let mut client = 0;
    let mut meeting = 0;
    for _ in 0..30 {
        let trips = sampler
            .sample(
                &mut rng,
                GenerationTarget {
                    target_km: 500,
                    dominant_pct: 60,
                },
            )
            .expect("sample");
        client += trips
            .iter()
            .filter(|t| t.category == TripCategory::ClientVisit)
            .count();
        meeting += trips
            .iter()
            .filter(|t| t.category == TripCategory::MeetingTransport)
            .count();
    }

    assert!(client > 0 && meeting > 0);
}

#[test]
fn test_sampler_full_dominant_needs_no_secondary() {
    let dominant = FixedTemplate {
        category: TripCategory::Commute,
        fixed_km: 7,
    };
    let secondary: Vec<RangeTemplate> = Vec::new();
    let sampler = TripSampler {
        dominant: &dominant,
        secondary: &secondary,
        overshoot_km: 10,
    };
    let mut rng = StdRng::seed_from_u64(1);

    let trips = sampler
        .sample(
            &mut rng,
            GenerationTarget {
                target_km: 100,
                dominant_pct: 100,
            },
        )
        .expect("sample");

    // ceil(100 / 7)
    assert_eq!(trips.len(), 15);
    assert!(trips.iter().all(|t| t.category == TripCategory::Commute));
}

#[test]
fn test_sampler_rejects_remainder_without_secondary() {
    let dominant = FixedTemplate {
        category: TripCategory::Commute,
        fixed_km: 5,
    };
    let sampler = TripSampler {
        dominant: &dominant,
        secondary: &[],
        overshoot_km: 10,
    };
    let mut rng = StdRng::seed_from_u64(1);

    let res = sampler.sample(
        &mut rng,
        GenerationTarget {
            target_km: 100,
            dominant_pct: 50,
        },
    );
    assert!(res.is_err());
}

#[test]
fn test_eligible_days_skip_sundays() {
    let feb = MonthId::new(2025, 2).unwrap();
    let days = eligible_days(feb, Weekday::Sun);

    // February 2025 has four Sundays
    assert_eq!(days.len(), 24);
    assert!(days.iter().all(|d| d.weekday() != Weekday::Sun));
    assert!(days.iter().all(|d| d.month() == 2));
}

#[test]
fn test_schedule_is_sorted_and_on_eligible_days() {
    let g = GenerationConfig::default();
    let sampler = default_sampler(&g);
    let scheduler = DayScheduler {
        min_trips_per_day: g.min_trips_per_day,
        max_trips_per_day: g.max_trips_per_day,
        hour_min: g.hour_min,
        hour_max: g.hour_max,
    };
    let march = MonthId::new(2025, 3).unwrap();
    let days = eligible_days(march, Weekday::Sun);

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let candidates = sampler
            .sample(
                &mut rng,
                GenerationTarget {
                    target_km: 480,
                    dominant_pct: 75,
                },
            )
            .unwrap();
        let expected = candidates.len();

        let planned = scheduler
            .schedule(&mut rng, candidates, &days, "RIJEKA")
            .unwrap();

        assert_eq!(planned.len(), expected);
        assert!(planned.iter().all(|p| days.contains(&p.date)));
        assert!(planned.iter().all(|p| p.time.minute() % 10 == 0));
        assert!(planned.iter().all(|p| p.route == "RIJEKA"));
        assert!(planned.windows(2).all(|w| w[0].sort_key() <= w[1].sort_key()));
    }
}

#[test]
fn test_schedule_overflow_goes_to_used_days() {
    let scheduler = DayScheduler {
        min_trips_per_day: 1,
        max_trips_per_day: 1,
        hour_min: 8,
        hour_max: 9,
    };
    let days: Vec<NaiveDate> = (3..=5)
        .map(|d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap())
        .collect();
    let candidates = vec![
        TripCandidate {
            distance_km: 5,
            category: TripCategory::Commute,
        };
        8
    ];
    let mut rng = StdRng::seed_from_u64(5);

    let planned = scheduler
        .schedule(&mut rng, candidates, &days, "RIJEKA")
        .unwrap();

    assert_eq!(planned.len(), 8);
    assert!(planned.iter().all(|p| days.contains(&p.date)));
    // every day got its first trip before any overflow
    for d in &days {
        assert!(planned.iter().any(|p| p.date == *d));
    }
}

#[test]
fn test_schedule_without_days_fails() {
    let scheduler = DayScheduler {
        min_trips_per_day: 2,
        max_trips_per_day: 3,
        hour_min: 7,
        hour_max: 17,
    };
    let mut rng = StdRng::seed_from_u64(5);
    let res = scheduler.schedule(
        &mut rng,
        vec![TripCandidate {
            distance_km: 5,
            category: TripCategory::Commute,
        }],
        &[],
        "RIJEKA",
    );
    assert!(res.is_err());
}
