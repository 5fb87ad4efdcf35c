use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::services::DashboardOptions;
use crate::currency::{CurrencyCode, LocaleConfig};

/// Environment variable that points at an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "BUDGET_TRACKER_CONFIG";
const APP_DIR: &str = "budget_tracker";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Keys accepted by [`Config::set`], in display order.
pub const CONFIG_KEYS: [&str; 5] = [
    "locale",
    "currency",
    "trend_months",
    "recent_limit",
    "dashboard_goals",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Display preferences. Missing keys fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Months shown by the income/expense trend.
    pub trend_months: usize,
    /// Entries shown in the recent-transactions widget.
    pub recent_limit: usize,
    /// Goals shown on the dashboard.
    pub dashboard_goals: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            trend_months: 6,
            recent_limit: 5,
            dashboard_goals: 3,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trend_months == 0 {
            return Err(ConfigError::Invalid(
                "trend_months must be at least 1".into(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(ConfigError::Invalid("currency must not be empty".into()));
        }
        Ok(())
    }

    /// Updates one preference from its textual form, then revalidates.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key.to_ascii_lowercase().as_str() {
            "locale" => self.locale = value.to_string(),
            "currency" => self.currency = value.to_ascii_uppercase(),
            "trend_months" => self.trend_months = parse_count(key, value)?,
            "recent_limit" => self.recent_limit = parse_count(key, value)?,
            "dashboard_goals" => self.dashboard_goals = parse_count(key, value)?,
            other => {
                return Err(ConfigError::Invalid(format!(
                    "unknown key `{other}` (expected one of {})",
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        self.validate()
    }

    /// `(key, value)` pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("locale", self.locale.clone()),
            ("currency", self.currency.clone()),
            ("trend_months", self.trend_months.to_string()),
            ("recent_limit", self.recent_limit.to_string()),
            ("dashboard_goals", self.dashboard_goals.to_string()),
        ]
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(self.currency.as_str())
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale)
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            months: self.trend_months,
            recent_limit: self.recent_limit,
            goal_limit: self.dashboard_goals,
        }
    }
}

/// Loads and saves [`Config`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Resolves the config path from `BUDGET_TRACKER_CONFIG`, then from the
    /// platform configuration directory.
    pub fn new() -> Result<Self, ConfigError> {
        if let Some(explicit) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(Self::with_path(PathBuf::from(explicit)));
        }
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::Invalid("no platform configuration directory available".into())
        })?;
        Ok(Self::with_path(base.join(APP_DIR).join(CONFIG_FILE)))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{key} must be a whole number, got `{value}`")))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/tmp/budget/config.json"));
        assert_eq!(tmp, PathBuf::from("/tmp/budget/config.json.tmp"));
    }

    #[test]
    fn dashboard_options_follow_config() {
        let config = Config {
            trend_months: 12,
            recent_limit: 10,
            dashboard_goals: 1,
            ..Config::default()
        };
        let options = config.dashboard_options();
        assert_eq!(options.months, 12);
        assert_eq!(options.recent_limit, 10);
        assert_eq!(options.goal_limit, 1);
    }

    #[test]
    fn set_parses_and_validates_values() {
        let mut config = Config::default();
        config.set("currency", " eur ").unwrap();
        config.set("TREND_MONTHS", "12").unwrap();
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.trend_months, 12);

        assert!(matches!(config.set("recent_limit", "many"), Err(ConfigError::Invalid(_))));
        assert!(matches!(config.set("theme", "dark"), Err(ConfigError::Invalid(_))));
        assert!(config.set("trend_months", "0").is_err());
    }

    #[test]
    fn zero_month_window_is_invalid() {
        let config = Config {
            trend_months: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
