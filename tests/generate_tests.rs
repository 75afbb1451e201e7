mod common;

use common::test_cfg;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rtriplog::core::generate::GenerateLogic;
use rtriplog::errors::AppError;
use rtriplog::models::{MonthId, TripCategory, round2};
use rtriplog::store::{LedgerStore, MemoryStore, SqliteStore};

fn feb() -> MonthId {
    MonthId::new(2025, 2).unwrap()
}

#[test]
fn test_generated_month_meets_targets() {
    let cfg = test_cfg();

    for seed in 0..25 {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let (ledger, report) =
            GenerateLogic::run(&mut store, &cfg, feb(), &mut rng, false).expect("generate");

        assert!((400..=500).contains(&report.target_km));
        assert!((60..=80).contains(&report.dominant_pct));
        assert!(report.total_km >= report.target_km as u64);
        // dominant overshoot < 5 km, secondary overshoot <= 10 km
        assert!(report.total_km < report.target_km as u64 + 15);
        assert!(report.dominant_km * 100 >= (report.target_km * report.dominant_pct) as u64);

        ledger.validate(cfg.rate_per_km).expect("valid ledger");
        assert_eq!(ledger.opening_odometer(), 213519);
        assert_eq!(
            ledger.closing_odometer(),
            213519 + ledger.total_km() as i64
        );
        assert_eq!(
            ledger.total_reimbursement(),
            round2(ledger.total_km() as f64 * 0.5)
        );
        assert!(
            ledger
                .records()
                .iter()
                .all(|r| r.date().format("%a").to_string() != "Sun")
        );
    }
}

#[test]
fn test_generation_is_reproducible_with_seed() {
    let cfg = test_cfg();

    let mut a = MemoryStore::new();
    let mut b = MemoryStore::new();
    let (la, _) =
        GenerateLogic::run(&mut a, &cfg, feb(), &mut StdRng::seed_from_u64(42), false).unwrap();
    let (lb, _) =
        GenerateLogic::run(&mut b, &cfg, feb(), &mut StdRng::seed_from_u64(42), false).unwrap();

    assert_eq!(la, lb);
}

#[test]
fn test_regeneration_replaces_the_month() {
    let cfg = test_cfg();
    let mut store = MemoryStore::new();

    GenerateLogic::run(&mut store, &cfg, feb(), &mut StdRng::seed_from_u64(1), false).unwrap();
    let (second, _) =
        GenerateLogic::run(&mut store, &cfg, feb(), &mut StdRng::seed_from_u64(2), false).unwrap();

    assert_eq!(store.list_months().unwrap(), vec![feb()]);
    assert_eq!(store.get_ledger(feb()).unwrap(), Some(second.clone()));
    assert_eq!(
        store.cached_total(feb()).unwrap(),
        Some(second.total_reimbursement())
    );
}

#[test]
fn test_opening_odometer_carries_from_previous_month() {
    let cfg = test_cfg();
    let mut store = MemoryStore::new();
    let jan = MonthId::new(2025, 1).unwrap();

    let (january, _) =
        GenerateLogic::run(&mut store, &cfg, jan, &mut StdRng::seed_from_u64(8), false).unwrap();
    let (february, report) =
        GenerateLogic::run(&mut store, &cfg, feb(), &mut StdRng::seed_from_u64(9), false).unwrap();

    assert_eq!(february.opening_odometer(), january.closing_odometer());
    assert_eq!(report.opening_source, Some(jan));
}

#[test]
fn test_dry_run_writes_nothing() {
    let cfg = test_cfg();
    let mut store = MemoryStore::new();

    let (ledger, report) =
        GenerateLogic::run(&mut store, &cfg, feb(), &mut StdRng::seed_from_u64(4), true).unwrap();

    assert!(!ledger.is_empty());
    assert!(!report.committed);
    assert!(store.list_months().unwrap().is_empty());
    assert!(store.audit_log().is_empty());
}

#[test]
fn test_generation_is_audited() {
    let cfg = test_cfg();
    let mut store = MemoryStore::new();

    GenerateLogic::run(&mut store, &cfg, feb(), &mut StdRng::seed_from_u64(4), false).unwrap();

    let log = store.audit_log();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].0, "generate");
    assert_eq!(log[0].1, "2025-02");
}

#[test]
fn test_degenerate_config_is_rejected_before_any_write() {
    let mut store = MemoryStore::new();

    let mut cfg = test_cfg();
    cfg.generation.min_km = 600;
    cfg.generation.max_km = 500;
    let res = GenerateLogic::run(&mut store, &cfg, feb(), &mut StdRng::seed_from_u64(1), false);
    assert!(matches!(res, Err(AppError::Config(_))));

    let mut cfg = test_cfg();
    cfg.generation.max_dominant_pct = 120;
    let res = GenerateLogic::run(&mut store, &cfg, feb(), &mut StdRng::seed_from_u64(1), false);
    assert!(matches!(res, Err(AppError::Config(_))));

    let mut cfg = test_cfg();
    cfg.generation.secondary.clear();
    let res = GenerateLogic::run(&mut store, &cfg, feb(), &mut StdRng::seed_from_u64(1), false);
    assert!(matches!(res, Err(AppError::Config(_))));

    let mut cfg = test_cfg();
    cfg.rest_day = "Someday".into();
    let res = GenerateLogic::run(&mut store, &cfg, feb(), &mut StdRng::seed_from_u64(1), false);
    assert!(matches!(res, Err(AppError::Config(_))));

    assert!(store.list_months().unwrap().is_empty());
}

#[test]
fn test_custom_rest_day_and_dominant() {
    let mut cfg = test_cfg();
    cfg.rest_day = "Sat".into();
    cfg.generation.dominant.category = TripCategory::Inspection;
    cfg.generation.dominant.fixed_km = 10;

    let mut store = MemoryStore::new();
    let (ledger, _) =
        GenerateLogic::run(&mut store, &cfg, feb(), &mut StdRng::seed_from_u64(6), false).unwrap();

    assert!(
        ledger
            .records()
            .iter()
            .all(|r| r.date().format("%a").to_string() != "Sat")
    );
    assert!(
        ledger
            .records()
            .iter()
            .filter(|r| r.category() == TripCategory::Inspection)
            .all(|r| r.distance_km() == 10)
    );
}

#[test]
fn test_generation_commits_to_sqlite() {
    let cfg = test_cfg();
    let mut store = SqliteStore::in_memory().unwrap();

    let (ledger, _) =
        GenerateLogic::run(&mut store, &cfg, feb(), &mut StdRng::seed_from_u64(12), false)
            .unwrap();

    let stored = store.get_ledger(feb()).unwrap().expect("stored ledger");
    assert_eq!(stored, ledger);
    assert_eq!(
        store.closing_odometer(feb()).unwrap(),
        Some(ledger.closing_odometer())
    );

    // a second run replaces every row
    GenerateLogic::run(&mut store, &cfg, feb(), &mut StdRng::seed_from_u64(13), false).unwrap();
    let count: i64 = store
        .pool()
        .conn
        .query_row("SELECT COUNT(*) FROM ledgers", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
