//! Configuration management
//!
//! Optional `settings.json` in the SimpleFIN directory:
//! ```json
//! {
//!   "timeoutSecs": 30,
//!   "transactionsLookbackDays": 7,
//!   "fetchLookbackDays": 30
//! }
//! ```
//!
//! The access URL is deliberately not a settings key. It is only ever read
//! from `SIMPLEFIN_ACCESS_URL` and is never written to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// Environment variable holding the access URL
pub const ACCESS_URL_ENV: &str = "SIMPLEFIN_ACCESS_URL";

/// Environment variable overriding the settings directory
pub const DIR_ENV: &str = "SIMPLEFIN_DIR";

/// Environment variable overriding the request timeout
pub const TIMEOUT_ENV: &str = "SIMPLEFIN_TIMEOUT_SECS";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    transactions_lookback_days: Option<u32>,
    #[serde(default)]
    fetch_lookback_days: Option<u32>,
}

/// SimpleFIN client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub access_url: Option<String>,
    pub timeout: Duration,
    /// Default window for the `transactions` command
    pub transactions_lookback_days: u32,
    /// Default window for the `fetch` command
    pub fetch_lookback_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_url: None,
            timeout: Duration::from_secs(30),
            transactions_lookback_days: 7,
            fetch_lookback_days: 30,
        }
    }
}

impl Config {
    /// Load config from the SimpleFIN directory, then apply env overrides
    pub fn load(simplefin_dir: &Path) -> Result<Self> {
        let mut config = Self::from_settings_file(&simplefin_dir.join("settings.json"))?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read settings.json; a missing file yields the defaults
    fn from_settings_file(settings_path: &Path) -> Result<Self> {
        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(settings_path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", settings_path.display(), e))
            })?;
            serde_json::from_str(&content).map_err(|e| {
                Error::Config(format!("Invalid settings in {}: {}", settings_path.display(), e))
            })?
        } else {
            SettingsFile::default()
        };

        let defaults = Self::default();
        Ok(Self {
            access_url: None,
            timeout: raw.timeout_secs.map(Duration::from_secs).unwrap_or(defaults.timeout),
            transactions_lookback_days: raw
                .transactions_lookback_days
                .unwrap_or(defaults.transactions_lookback_days),
            fetch_lookback_days: raw.fetch_lookback_days.unwrap_or(defaults.fetch_lookback_days),
        })
    }

    /// Apply environment overrides using the given lookup
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(ACCESS_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.access_url = Some(url.trim().to_string());
        }

        if let Some(secs) = lookup(TIMEOUT_ENV) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{} must be a whole number of seconds", TIMEOUT_ENV)))?;
            self.timeout = Duration::from_secs(secs);
        }

        Ok(())
    }

    /// The configured access URL, or a configuration error naming the variable
    pub fn require_access_url(&self) -> Result<&str> {
        self.access_url.as_deref().ok_or_else(|| {
            Error::Config(format!(
                "{} is not set. Run 'simplefin setup' to obtain an access URL.",
                ACCESS_URL_ENV
            ))
        })
    }
}

/// Get the SimpleFIN directory from environment or default
pub fn default_dir() -> Option<PathBuf> {
    match std::env::var(DIR_ENV) {
        Ok(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::home_dir().map(|home| home.join(".simplefin")),
    }
}
