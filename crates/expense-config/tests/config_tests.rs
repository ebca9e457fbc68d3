use expense_config::{Config, ConfigError, ConfigManager, DateStyle};
use tempfile::tempdir;

#[test]
fn default_config_uses_rupees() {
    let cfg = Config::default();

    assert_eq!(cfg.currency, "INR");
    assert_eq!(cfg.currency_symbol, "₹");
    assert_eq!(cfg.currency_precision, 2);
    assert_eq!(cfg.store_key, "expenses");
    assert_eq!(cfg.backup_retention, 5);
    assert!(!cfg.plain());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.set("currency", "usd").expect("set currency");
    cfg.set("currency_symbol", "$").expect("set symbol");
    cfg.set("date_style", "iso").expect("set date style");

    manager.save(&cfg).expect("save config");
    assert!(manager.config_path().ends_with("config/config.json"));
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "USD");
    assert_eq!(loaded.currency_symbol, "$");
    assert_eq!(loaded.date_style, DateStyle::Iso);
}

#[test]
fn missing_config_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn partial_config_fills_defaults_and_tolerates_unknown_date_style() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    std::fs::write(
        manager.config_path(),
        r#"{"locale": "en-GB", "currency": "GBP", "date_style": "fancy"}"#,
    )
    .expect("write partial config");

    let loaded = manager.load().expect("load");
    assert_eq!(loaded.locale, "en-GB");
    assert_eq!(loaded.date_style, DateStyle::Short);
    assert_eq!(loaded.backup_retention, 5);
    assert!(loaded.ui_color_enabled);
}

#[test]
fn config_backups_round_trip() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.set("backup_retention", "9").expect("set retention");
    let name = manager.backup(&cfg, Some("Before trip")).expect("backup");
    assert!(name.starts_with("config_"));
    assert!(name.ends_with("_before-trip.json"));

    assert_eq!(manager.list_backups().expect("list"), vec![name.clone()]);
    let restored = manager.restore(&name).expect("restore");
    assert_eq!(restored.backup_retention, 9);
}

#[test]
fn restoring_unknown_backup_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    let err = manager.restore("config_missing.json").expect_err("missing");
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn set_rejects_bad_values() {
    let mut cfg = Config::default();
    assert!(matches!(
        cfg.set("currency_precision", "many"),
        Err(ConfigError::InvalidValue(_))
    ));
    assert!(cfg.set("backup_retention", "0").is_err());
    assert!(cfg.set("plain_output", "maybe").is_err());
    assert!(cfg.set("colour", "true").is_err());

    cfg.set("plain_output", "on").expect("set plain");
    assert!(cfg.plain());
    cfg.set("data_root", "/tmp/ledger").expect("set root");
    assert!(cfg.data_root.is_some());
    cfg.set("data_root", "default").expect("reset root");
    assert!(cfg.data_root.is_none());
}

#[test]
fn entries_list_every_key() {
    let cfg = Config::default();
    let keys: Vec<_> = cfg.entries().into_iter().map(|(key, _)| key).collect();
    assert!(keys.contains(&"currency"));
    assert!(keys.contains(&"store_key"));
    let mut probe = Config::default();
    for key in keys {
        if key.ends_with("_root") {
            continue;
        }
        let value = cfg
            .entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .expect("value present");
        probe.set(key, &value).expect("entries round trip through set");
    }
    assert_eq!(probe, cfg);
}
