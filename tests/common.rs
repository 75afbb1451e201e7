#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use rtriplog::config::Config;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rtl() -> Command {
    cargo_bin_cmd!("rtriplog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtriplog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Config path that does not exist, so every run uses the defaults
pub fn test_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtriplog.conf", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `rtriplog --db <db> --config <cfg> <args...>`
pub fn rtl_with(db: &str, cfg: &str, args: &[&str]) -> Command {
    let mut cmd = rtl();
    cmd.args(["--db", db, "--config", cfg]).args(args);
    cmd
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_trips(db_path: &str, cfg_path: &str) {
    rtl_with(db_path, cfg_path, &["--test", "init"])
        .assert()
        .success();

    rtl_with(
        db_path,
        cfg_path,
        &[
            "add",
            "15",
            "business travel",
            "--date",
            "2025-02-10",
            "--time",
            "09:00",
            "--route",
            "RIJEKA",
        ],
    )
    .assert()
    .success();

    rtl_with(
        db_path,
        cfg_path,
        &["add", "5", "commute", "--date", "2025-02-11", "--time", "07:30"],
    )
    .assert()
    .success();
}

/// Default configuration, independent of the user's config file
pub fn test_cfg() -> Config {
    Config {
        database: ":memory:".to_string(),
        ..Config::default()
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, min, 0)
        .expect("valid time")
}
