use crate::errors::{AppError, AppResult};
use crate::models::TripCategory;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate;

/// Vehicle written on every ledger row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub make: String,
    pub registration: String,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            make: "BMW".to_string(),
            registration: "RI1479P".to_string(),
        }
    }
}

/// Template for the dominant category: every trip has the same distance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedTemplate {
    pub category: TripCategory,
    pub fixed_km: u32,
}

/// Template for the other categories: distance drawn from [min_km, max_km].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeTemplate {
    pub category: TripCategory,
    pub min_km: u32,
    pub max_km: u32,
}

/// Parameters of a month generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationConfig {
    #[serde(default = "default_min_km")]
    pub min_km: u32,
    #[serde(default = "default_max_km")]
    pub max_km: u32,
    #[serde(default = "default_min_trips")]
    pub min_trips_per_day: u32,
    #[serde(default = "default_max_trips")]
    pub max_trips_per_day: u32,
    #[serde(default = "default_min_pct")]
    pub min_dominant_pct: u32,
    #[serde(default = "default_max_pct")]
    pub max_dominant_pct: u32,
    #[serde(default = "default_hour_min")]
    pub hour_min: u32,
    #[serde(default = "default_hour_max")]
    pub hour_max: u32,
    #[serde(default = "default_overshoot")]
    pub overshoot_km: u32,
    #[serde(default = "default_dominant")]
    pub dominant: FixedTemplate,
    #[serde(default = "default_secondary")]
    pub secondary: Vec<RangeTemplate>,
}

fn default_min_km() -> u32 {
    400
}
fn default_max_km() -> u32 {
    500
}
fn default_min_trips() -> u32 {
    2
}
fn default_max_trips() -> u32 {
    3
}
fn default_min_pct() -> u32 {
    60
}
fn default_max_pct() -> u32 {
    80
}
fn default_hour_min() -> u32 {
    7
}
fn default_hour_max() -> u32 {
    17
}
fn default_overshoot() -> u32 {
    10
}
fn default_dominant() -> FixedTemplate {
    FixedTemplate {
        category: TripCategory::Commute,
        fixed_km: 5,
    }
}
fn default_secondary() -> Vec<RangeTemplate> {
    vec![
        RangeTemplate {
            category: TripCategory::ClientVisit,
            min_km: 5,
            max_km: 30,
        },
        RangeTemplate {
            category: TripCategory::MeetingTransport,
            min_km: 5,
            max_km: 30,
        },
    ]
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_km: default_min_km(),
            max_km: default_max_km(),
            min_trips_per_day: default_min_trips(),
            max_trips_per_day: default_max_trips(),
            min_dominant_pct: default_min_pct(),
            max_dominant_pct: default_max_pct(),
            hour_min: default_hour_min(),
            hour_max: default_hour_max(),
            overshoot_km: default_overshoot(),
            dominant: default_dominant(),
            secondary: default_secondary(),
        }
    }
}

impl GenerationConfig {
    /// Reject degenerate parameters before a run touches any ledger.
    pub fn validate(&self) -> AppResult<()> {
        fn range(name: &str, min: u32, max: u32) -> AppResult<()> {
            if min > max {
                return Err(AppError::Config(format!(
                    "generation.{name}: min ({min}) is greater than max ({max})"
                )));
            }
            Ok(())
        }

        range("km", self.min_km, self.max_km)?;
        range("trips_per_day", self.min_trips_per_day, self.max_trips_per_day)?;
        range("dominant_pct", self.min_dominant_pct, self.max_dominant_pct)?;
        range("hour", self.hour_min, self.hour_max)?;

        if self.max_km == 0 {
            return Err(AppError::Config("generation.max_km must be > 0".into()));
        }
        if self.max_dominant_pct > 100 {
            return Err(AppError::Config(format!(
                "generation.max_dominant_pct ({}) exceeds 100",
                self.max_dominant_pct
            )));
        }
        if self.max_trips_per_day == 0 {
            return Err(AppError::Config(
                "generation.max_trips_per_day must be > 0".into(),
            ));
        }
        if self.hour_max > 23 {
            return Err(AppError::Config(format!(
                "generation.hour_max ({}) is not a valid hour",
                self.hour_max
            )));
        }
        if self.dominant.fixed_km == 0 {
            return Err(AppError::Config(
                "generation.dominant.fixed_km must be > 0".into(),
            ));
        }
        // a remainder exists unless every run is 100% dominant
        if self.min_dominant_pct < 100 && self.secondary.is_empty() {
            return Err(AppError::Config(
                "generation.secondary must list at least one category".into(),
            ));
        }
        for t in &self.secondary {
            if t.min_km == 0 {
                return Err(AppError::Config(format!(
                    "generation.secondary '{}': min_km must be > 0",
                    t.category
                )));
            }
            range(&format!("secondary '{}' km", t.category), t.min_km, t.max_km)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_rate")]
    pub rate_per_km: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub vehicle: Vehicle,
    #[serde(default = "default_route")]
    pub default_route: String,
    #[serde(default = "default_opening")]
    pub default_opening_odometer: i64,
    #[serde(default = "default_lookback")]
    pub lookback_months: u32,
    #[serde(default = "default_rest_day")]
    pub rest_day: String,
    #[serde(default)]
    pub generation: GenerationConfig,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_rate() -> f64 {
    0.5
}
fn default_currency() -> String {
    "EUR".to_string()
}
fn default_route() -> String {
    "RIJEKA".to_string()
}
fn default_opening() -> i64 {
    213519
}
fn default_lookback() -> u32 {
    12
}
fn default_rest_day() -> String {
    "Sun".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            rate_per_km: default_rate(),
            currency: default_currency(),
            vehicle: Vehicle::default(),
            default_route: default_route(),
            default_opening_odometer: default_opening(),
            lookback_months: default_lookback(),
            rest_day: default_rest_day(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtriplog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtriplog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtriplog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtriplog.sqlite")
    }

    /// Load configuration from `path`, or return defaults if the file is missing
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        cfg.rest_weekday()?;
        Ok(cfg)
    }

    /// The weekly day excluded from generated schedules.
    pub fn rest_weekday(&self) -> AppResult<Weekday> {
        self.rest_day.parse::<Weekday>().map_err(|_| {
            AppError::Config(format!(
                "rest_day '{}' is not a weekday (use Mon, Tue, ..., Sun)",
                self.rest_day
            ))
        })
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Config file to use: `--config FILE` when given, else the default one.
    pub fn resolve_file(custom: Option<&str>) -> PathBuf {
        match custom {
            Some(p) => crate::utils::path::expand_tilde(p),
            None => Self::config_file(),
        }
    }

    /// Initialize configuration and database files.
    ///
    /// An existing configuration keeps its settings; only `database` is
    /// rewritten. Returns the database path.
    pub fn init_all(
        custom_db: Option<String>,
        config_path: &Path,
        is_test: bool,
    ) -> AppResult<PathBuf> {
        let dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_dir);
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("rtriplog.sqlite")
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::load_from(config_path)?
        };

        // Write config file
        if !is_test {
            config.save_to(config_path)?;
            println!("✅ Config file: {:?}", config_path);
        }

        // Create empty DB file if not exists
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
