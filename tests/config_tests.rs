mod common;

use budget_engine::config::Config;
use budget_engine::domain::CategoryInfo;
use common::setup_config_env;

#[test]
fn missing_file_loads_defaults() {
    let (manager, _base) = setup_config_env();
    let config = manager.load().expect("load defaults");
    assert_eq!(config, Config::default());
    assert_eq!(config.default_alert_threshold, 80);
    assert!(!config.allow_future_navigation);
    assert_eq!(config.fallback_category, CategoryInfo::other());
}

#[test]
fn save_and_load_round_trip() {
    let (manager, base) = setup_config_env();
    let config = Config {
        default_alert_threshold: 65,
        allow_future_navigation: true,
        fallback_category: CategoryInfo::new("Misc", "help", "#000000"),
    };
    manager.save(&config).expect("save config");
    assert!(manager.config_path().starts_with(&base));
    assert_eq!(manager.load().expect("reload config"), config);
}

#[test]
fn partial_files_fill_in_defaults() {
    let (manager, _base) = setup_config_env();
    std::fs::write(manager.config_path(), r#"{ "allow_future_navigation": true }"#)
        .expect("write partial config");
    let config = manager.load().expect("load partial config");
    assert!(config.allow_future_navigation);
    assert_eq!(config.default_alert_threshold, 80);
    assert_eq!(config.fallback_category.name, "Other");
}

#[test]
fn save_replaces_file_without_leaving_staging_copies() {
    let (manager, base) = setup_config_env();
    manager.save(&Config::default()).expect("first save");
    let updated = Config {
        default_alert_threshold: 90,
        ..Config::default()
    };
    manager.save(&updated).expect("second save");

    let mut entries: Vec<String> = std::fs::read_dir(&base)
        .expect("read config dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, vec!["config.json".to_string()]);
    assert_eq!(manager.load().expect("reload config"), updated);
}

#[test]
fn corrupt_file_reports_error() {
    let (manager, _base) = setup_config_env();
    std::fs::write(manager.config_path(), "{ not json").expect("write corrupt config");
    assert!(manager.load().is_err());
}
