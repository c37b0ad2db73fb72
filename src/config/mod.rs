use crate::core::flush::{DEFAULT_FLUSH_INTERVAL_SECONDS, DEFAULT_FLUSH_MAX_SIZE, FlushSettings};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_DB_URL: &str = "FOOTFALL_DB_URL";
pub const ENV_FLUSH_INTERVAL: &str = "FLUSH_INTERVAL_SECONDS";
pub const ENV_FLUSH_MAX_SIZE: &str = "FLUSH_MAX_SIZE";
pub const ENV_REFRESH: &str = "REFRESH_SECONDS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Store address. Empty means "not configured".
    #[serde(default)]
    pub database: String,
    #[serde(default = "default_flush_interval")]
    pub flush_interval_seconds: u64,
    #[serde(default = "default_flush_max_size")]
    pub flush_max_size: usize,
    #[serde(default = "default_refresh")]
    pub refresh_seconds: u64,
}

fn default_flush_interval() -> u64 {
    DEFAULT_FLUSH_INTERVAL_SECONDS
}
fn default_flush_max_size() -> usize {
    DEFAULT_FLUSH_MAX_SIZE
}
fn default_refresh() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: String::new(),
            flush_interval_seconds: default_flush_interval(),
            flush_max_size: default_flush_max_size(),
            refresh_seconds: default_refresh(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rfootfall")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rfootfall")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rfootfall.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rfootfall.sqlite")
    }

    /// Defaults, then the config file (if any), then the environment.
    pub fn load() -> AppResult<Self> {
        let mut cfg = Self::load_file(&Self::config_file())?;
        cfg.apply_env(|key| env::var(key).ok())?;
        Ok(cfg)
    }

    /// Read a YAML config file; a missing file yields the defaults.
    pub fn load_file(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))
    }

    /// Apply environment overrides. `lookup` is `env::var` outside of tests.
    pub fn apply_env<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DB_URL).filter(|v| !v.trim().is_empty()) {
            self.database = url;
        }
        if let Some(v) = lookup(ENV_FLUSH_INTERVAL) {
            self.flush_interval_seconds = parse_env_number(ENV_FLUSH_INTERVAL, &v)?;
        }
        if let Some(v) = lookup(ENV_FLUSH_MAX_SIZE) {
            self.flush_max_size = parse_env_number(ENV_FLUSH_MAX_SIZE, &v)?;
        }
        if let Some(v) = lookup(ENV_REFRESH) {
            self.refresh_seconds = parse_env_number(ENV_REFRESH, &v)?;
        }
        Ok(())
    }

    /// The configured store address, or the fatal startup error.
    pub fn store_address(&self) -> AppResult<&str> {
        let addr = self.database.trim();
        if addr.is_empty() {
            return Err(AppError::MissingStoreAddress);
        }
        Ok(addr)
    }

    pub fn flush_settings(&self) -> FlushSettings {
        FlushSettings {
            interval: Duration::from_secs(self.flush_interval_seconds),
            max_size: self.flush_max_size,
        }
    }

    pub fn refresh_every(&self) -> Duration {
        Duration::from_secs(self.refresh_seconds.max(1))
    }

    /// Initialize configuration file and database location
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB: user provided or default
        let database = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() || name.contains("://") || name.starts_with(':') {
                    name
                } else {
                    dir.join(p).to_string_lossy().to_string()
                }
            }
            None => Self::database_file().to_string_lossy().to_string(),
        };

        let config = Config {
            database,
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::ConfigSave(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}

fn parse_env_number<T: std::str::FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::Config(format!("{} must be a non-negative integer, got '{}'", key, raw)))
}
