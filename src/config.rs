//! Configuration for Sprout.
//!
//! Settings come from an optional TOML file, then environment variables (a
//! `.env` file is loaded first if present). Environment values win.
//!
//! ```toml
//! [store]
//! profiles_path = "./profiles.json"
//!
//! [matching]
//! default_limit = 6
//! active_window_days = 30
//! strategy = "greedy"
//! exact_max_pool = 16
//! cache_capacity = 8
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::matching::{EXACT_POOL_LIMIT, PairingStrategy};

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub matching: MatchingConfig,
}

/// Where profiles live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file backing the profile store.
    pub profiles_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            profiles_path: PathBuf::from("./profiles.json"),
        }
    }
}

/// Matching and pairing knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Candidates returned when no explicit limit is given.
    pub default_limit: usize,
    /// Trailing window, in days, for counting recently active profiles.
    pub active_window_days: u32,
    pub strategy: PairingStrategy,
    /// Largest pool the exact pairing solver accepts.
    pub exact_max_pool: usize,
    /// Pool snapshots whose pairings are cached. 0 disables the cache.
    pub cache_capacity: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_limit: 6,
            active_window_days: 30,
            strategy: PairingStrategy::Greedy,
            exact_max_pool: 16,
            cache_capacity: 8,
        }
    }
}

impl Config {
    /// Load from `SPROUT_CONFIG` (if set) and the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from an explicit TOML file, falling back to `SPROUT_CONFIG`, then
    /// apply environment overrides.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let file = match config_file {
            Some(path) => Some(path.to_path_buf()),
            None => optional_env("SPROUT_CONFIG")?.map(PathBuf::from),
        };
        let base = match file {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        base.with_env_overrides()
    }

    /// Parse a TOML config file. Missing sections take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(self) -> Result<Self, ConfigError> {
        let Self { store, matching } = self;
        let config = Self {
            store: StoreConfig {
                profiles_path: optional_env("SPROUT_PROFILES_PATH")?
                    .map(PathBuf::from)
                    .unwrap_or(store.profiles_path),
            },
            matching: MatchingConfig {
                default_limit: parse_optional_env("SPROUT_MATCH_LIMIT", matching.default_limit)?,
                active_window_days: parse_optional_env(
                    "SPROUT_ACTIVE_WINDOW_DAYS",
                    matching.active_window_days,
                )?,
                strategy: parse_optional_env("SPROUT_PAIRING_STRATEGY", matching.strategy)?,
                exact_max_pool: parse_optional_env(
                    "SPROUT_EXACT_MAX_POOL",
                    matching.exact_max_pool,
                )?,
                cache_capacity: parse_optional_env(
                    "SPROUT_PAIRING_CACHE",
                    matching.cache_capacity,
                )?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.matching.active_window_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "active_window_days".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !(2..=EXACT_POOL_LIMIT).contains(&self.matching.exact_max_pool) {
            return Err(ConfigError::InvalidValue {
                key: "exact_max_pool".to_string(),
                message: format!("must be between 2 and {EXACT_POOL_LIMIT}"),
            });
        }
        Ok(())
    }
}

pub(crate) fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(val) if val.is_empty() => Ok(None),
        Ok(val) => Ok(Some(val)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::ParseError(format!(
            "failed to read {key}: {e}"
        ))),
    }
}

pub(crate) fn parse_optional_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)?
        .map(|s| {
            s.parse().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{e}"),
            })
        })
        .transpose()
        .map(|opt| opt.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const KEYS: [&str; 7] = [
        "SPROUT_CONFIG",
        "SPROUT_PROFILES_PATH",
        "SPROUT_MATCH_LIMIT",
        "SPROUT_ACTIVE_WINDOW_DAYS",
        "SPROUT_PAIRING_STRATEGY",
        "SPROUT_EXACT_MAX_POOL",
        "SPROUT_PAIRING_CACHE",
    ];

    fn clear_env() {
        for key in KEYS {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    fn optional_env_returns_none_for_empty_string() {
        let _lock = ENV_LOCK.lock();
        unsafe { std::env::set_var("_TEST_SPROUT_EMPTY", "") };
        assert!(optional_env("_TEST_SPROUT_EMPTY").unwrap().is_none());
        unsafe { std::env::remove_var("_TEST_SPROUT_EMPTY") };
    }

    #[test]
    fn parse_optional_env_returns_error_for_invalid_value() {
        let _lock = ENV_LOCK.lock();
        unsafe { std::env::set_var("_TEST_SPROUT_BAD", "lots") };
        let result: Result<usize, _> = parse_optional_env("_TEST_SPROUT_BAD", 0);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        unsafe { std::env::remove_var("_TEST_SPROUT_BAD") };
    }

    #[test]
    fn defaults_when_nothing_set() {
        let _lock = ENV_LOCK.lock();
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.matching.default_limit, 6);
        assert_eq!(config.matching.strategy, PairingStrategy::Greedy);
    }

    #[test]
    fn env_overrides_defaults() {
        let _lock = ENV_LOCK.lock();
        clear_env();
        unsafe { std::env::set_var("SPROUT_MATCH_LIMIT", "3") };
        unsafe { std::env::set_var("SPROUT_PAIRING_STRATEGY", "exact") };
        unsafe { std::env::set_var("SPROUT_PROFILES_PATH", "/tmp/cohort.json") };

        let config = Config::from_env().unwrap();
        assert_eq!(config.matching.default_limit, 3);
        assert_eq!(config.matching.strategy, PairingStrategy::Exact);
        assert_eq!(config.store.profiles_path, PathBuf::from("/tmp/cohort.json"));

        clear_env();
    }

    #[test]
    fn zero_window_is_rejected() {
        let _lock = ENV_LOCK.lock();
        clear_env();
        unsafe { std::env::set_var("SPROUT_ACTIVE_WINDOW_DAYS", "0") };
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue { .. })
        ));
        clear_env();
    }

    #[test]
    fn oversized_exact_pool_is_rejected() {
        let _lock = ENV_LOCK.lock();
        clear_env();
        unsafe { std::env::set_var("SPROUT_EXACT_MAX_POOL", "40") };
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    fn file_values_then_env_override() {
        let _lock = ENV_LOCK.lock();
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprout.toml");
        std::fs::write(
            &path,
            "[matching]\ndefault_limit = 10\ncache_capacity = 0\nstrategy = \"exact\"\n",
        )
        .unwrap();

        let from_file = Config::load(Some(&path)).unwrap();
        assert_eq!(from_file.matching.default_limit, 10);
        assert_eq!(from_file.matching.cache_capacity, 0);
        assert_eq!(from_file.matching.strategy, PairingStrategy::Exact);
        assert_eq!(from_file.matching.active_window_days, 30);
        assert_eq!(from_file.store, StoreConfig::default());

        unsafe { std::env::set_var("SPROUT_MATCH_LIMIT", "2") };
        let overridden = Config::load(Some(&path)).unwrap();
        assert_eq!(overridden.matching.default_limit, 2);
        clear_env();
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[matching\ndefault_limit = ").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
