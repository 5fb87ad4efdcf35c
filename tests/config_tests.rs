use budget_tracker::config::{Config, ConfigError, ConfigManager};
use tempfile::TempDir;

fn manager_in(dir: &TempDir) -> ConfigManager {
    ConfigManager::with_path(dir.path().join("nested").join("config.json"))
}

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = manager_in(&dir).load().unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.trend_months, 6);
}

#[test]
fn save_then_load_preserves_preferences() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);
    let config = Config {
        locale: "de-DE".into(),
        currency: "EUR".into(),
        trend_months: 12,
        ..Config::default()
    };

    manager.save(&config).unwrap();

    assert!(manager.path().exists());
    assert!(!manager.path().with_extension("json.tmp").exists());
    assert_eq!(manager.load().unwrap(), config);
}

#[test]
fn partial_files_fill_in_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "currency": "GBP" }"#).unwrap();

    let config = ConfigManager::with_path(path).load().unwrap();

    assert_eq!(config.currency, "GBP");
    assert_eq!(config.locale, "en-US");
    assert_eq!(config.recent_limit, 5);
}

#[test]
fn invalid_files_are_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    std::fs::write(&path, "not json").unwrap();
    let manager = ConfigManager::with_path(path.clone());
    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));

    std::fs::write(&path, r#"{ "trend_months": 0 }"#).unwrap();
    assert!(matches!(manager.load(), Err(ConfigError::Invalid(_))));
}

#[test]
fn refuses_to_save_invalid_config() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);
    let config = Config {
        currency: "  ".into(),
        ..Config::default()
    };

    assert!(manager.save(&config).is_err());
    assert!(!manager.path().exists());
}
