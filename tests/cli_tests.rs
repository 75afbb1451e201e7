mod common;
use common::{init_db_with_trips, rtl_with, setup_test_db, temp_out, test_config};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("cli_init");
    let cfg = test_config("cli_init");

    rtl_with(&db_path, &cfg, &["--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database initialized"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('ledgers','trips','log')",
            [],
            |row| row.get(0),
        )
        .expect("count tables");
    assert_eq!(tables, 3);
}

#[test]
fn test_add_prints_odometer_range() {
    let db_path = setup_test_db("cli_add");
    let cfg = test_config("cli_add");

    rtl_with(
        &db_path,
        &cfg,
        &[
            "add",
            "15",
            "business travel",
            "--date",
            "2025-02-10",
            "--route",
            "RIJEKA",
        ],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("february-2025"))
    .stdout(predicate::str::contains("213.519"))
    .stdout(predicate::str::contains("213.534"));
}

#[test]
fn test_add_rejects_unknown_category() {
    let db_path = setup_test_db("cli_add_bad");
    let cfg = test_config("cli_add_bad");

    rtl_with(&db_path, &cfg, &["add", "10", "teleport", "--date", "2025-02-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown trip category"));
}

#[test]
fn test_submit_success_and_validation_error() {
    let db_path = setup_test_db("cli_submit");
    let cfg = test_config("cli_submit");

    rtl_with(
        &db_path,
        &cfg,
        &[
            "submit",
            "--payload",
            r#"{"distanceKm":15,"category":"commute","date":"2025-02-10"}"#,
        ],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""status":200"#))
    .stdout(predicate::str::contains("Trip recorded successfully"))
    .stdout(predicate::str::contains(r#""closingOdometer":213534"#));

    rtl_with(
        &db_path,
        &cfg,
        &["submit", "--payload", r#"{"distanceKm":0,"category":"commute"}"#],
    )
    .assert()
    .failure()
    .stdout(predicate::str::contains(r#""status":400"#));
}

#[test]
fn test_submit_reads_stdin() {
    let db_path = setup_test_db("cli_submit_stdin");
    let cfg = test_config("cli_submit_stdin");

    rtl_with(&db_path, &cfg, &["submit"])
        .write_stdin(r#"{"distanceKm":"8","category":"inspection","date":"2025-04-02"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("april-2025"));
}

#[test]
fn test_generate_list_and_check() {
    let db_path = setup_test_db("cli_generate");
    let cfg = test_config("cli_generate");

    rtl_with(
        &db_path,
        &cfg,
        &["generate", "--month", "2025-02", "--seed", "42"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("february-2025"))
    .stdout(predicate::str::contains("written"));

    rtl_with(&db_path, &cfg, &["list", "--period", "2025-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("february-2025"))
        .stdout(predicate::str::contains("TOTAL"))
        .stdout(predicate::str::contains("commute"));

    rtl_with(&db_path, &cfg, &["db", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All ledgers are consistent"));

    rtl_with(&db_path, &cfg, &["log", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn test_generate_dry_run_json() {
    let db_path = setup_test_db("cli_generate_dry");
    let cfg = test_config("cli_generate_dry");

    rtl_with(
        &db_path,
        &cfg,
        &[
            "generate", "--month", "2025-03", "--seed", "1", "--dry-run", "--json",
        ],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""committed": false"#))
    .stdout(predicate::str::contains(r#""month": "march-2025""#));

    rtl_with(&db_path, &cfg, &["list", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No ledgers"));
}

#[test]
fn test_generate_rejects_bad_month() {
    let db_path = setup_test_db("cli_generate_bad");
    let cfg = test_config("cli_generate_bad");

    rtl_with(&db_path, &cfg, &["generate", "--month", "2025-13"])
        .assert()
        .failure();
}

#[test]
fn test_db_check_detects_broken_chain() {
    let db_path = setup_test_db("cli_db_broken");
    let cfg = test_config("cli_db_broken");
    init_db_with_trips(&db_path, &cfg);

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    conn.execute(
        "UPDATE trips SET odometer_start = odometer_start + 3 WHERE seq = 2",
        [],
    )
    .expect("tamper");

    rtl_with(&db_path, &cfg, &["db", "--check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("does not continue"));
}

#[test]
fn test_db_info() {
    let db_path = setup_test_db("cli_db_info");
    let cfg = test_config("cli_db_info");
    init_db_with_trips(&db_path, &cfg);

    rtl_with(&db_path, &cfg, &["db", "--info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ledgers:"))
        .stdout(predicate::str::contains("february-2025"));
}

#[test]
fn test_export_csv_and_json() {
    let db_path = setup_test_db("cli_export");
    let cfg = test_config("cli_export");
    init_db_with_trips(&db_path, &cfg);

    let csv_out = temp_out("cli_export", "csv");
    rtl_with(
        &db_path,
        &cfg,
        &["export", "--format", "csv", "--file", &csv_out],
    )
    .assert()
    .success();

    let content = fs::read_to_string(&csv_out).expect("read exported csv");
    assert!(content.starts_with("month,date,time,vehicle,registration,odometer_start"));
    assert!(content.contains("2025-02-10"));
    assert!(content.contains("business travel"));
    assert!(content.contains("RI1479P"));

    let json_out = temp_out("cli_export", "json");
    rtl_with(
        &db_path,
        &cfg,
        &[
            "export", "--format", "json", "--file", &json_out, "--range", "2025-02",
        ],
    )
    .assert()
    .success();

    let content = fs::read_to_string(&json_out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(rows.as_array().map(|a| a.len()), Some(2));
    assert_eq!(rows[0]["odometer_end"], 213534);
    assert_eq!(rows[1]["odometer_start"], 213534);
}

#[test]
fn test_export_xlsx() {
    let db_path = setup_test_db("cli_export_xlsx");
    let cfg = test_config("cli_export_xlsx");
    init_db_with_trips(&db_path, &cfg);

    let out = temp_out("cli_export_xlsx", "xlsx");
    rtl_with(
        &db_path,
        &cfg,
        &["export", "--format", "xlsx", "--file", &out, "--force"],
    )
    .assert()
    .success();

    assert!(fs::metadata(&out).map(|m| m.len() > 0).unwrap_or(false));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("cli_export_rel");
    let cfg = test_config("cli_export_rel");
    init_db_with_trips(&db_path, &cfg);

    rtl_with(
        &db_path,
        &cfg,
        &["export", "--format", "csv", "--file", "relative.csv"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("must be absolute"));
}

#[test]
fn test_backup_and_compress() {
    let db_path = setup_test_db("cli_backup");
    let cfg = test_config("cli_backup");
    init_db_with_trips(&db_path, &cfg);

    let out = temp_out("cli_backup", "sqlite");
    let zip = temp_out("cli_backup", "zip");

    rtl_with(&db_path, &cfg, &["backup", "--file", &out, "--compress"])
        .assert()
        .success();

    assert!(fs::metadata(&zip).is_ok());
    assert!(fs::metadata(&out).is_err());
}

#[test]
fn test_config_check_and_migrate() {
    let db_path = setup_test_db("cli_config");
    let cfg = test_config("cli_config");
    fs::write(&cfg, "rate_per_km: 0.4\ncurrency: EUR\n").expect("write config");

    rtl_with(&db_path, &cfg, &["config", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- generation"));

    rtl_with(&db_path, &cfg, &["config", "--migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("missing key(s) added"));

    let content = fs::read_to_string(&cfg).expect("read config");
    assert!(content.contains("rate_per_km: 0.4"));
    assert!(content.contains("generation:"));
    assert!(content.contains("default_opening_odometer: 213519"));

    rtl_with(&db_path, &cfg, &["config", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no missing keys"));
}
