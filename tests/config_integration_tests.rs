//! Integration tests for configuration management
//!
//! These tests verify:
//! - Loading and saving Migrator Settings.yaml
//! - Layout overrides flowing into scanning and migration
//! - Game and profile discovery under the configured root

use archive_migrator::services::{list_games, list_profiles};
use archive_migrator::{ArchiveCatalog, ArchiveScanner, ConfigManager, ScanContext, UserConfig};
use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;

fn create_test_config_manager() -> (ConfigManager, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let manager = ConfigManager::new(&config_path).unwrap();
    (manager, temp_dir)
}

#[test]
fn test_yaml_field_names() {
    let (manager, _temp_dir) = create_test_config_manager();
    let mut config = UserConfig::default();
    config.migrator_settings.root_dir = "/saves".to_string();
    manager.save_user_config(&config).unwrap();

    let yaml = fs::read_to_string(manager.user_config_path()).unwrap();
    assert!(yaml.contains("Migrator_Settings:"));
    assert!(yaml.contains("Save Root: /saves"));
    assert!(yaml.contains("Auto Save Dir: SAVEDATAAUTO"));
    assert!(yaml.contains("Backup Suffix:"));
}

#[test]
fn test_hand_written_config() {
    let (manager, _temp_dir) = create_test_config_manager();
    fs::write(
        manager.user_config_path(),
        "Migrator_Settings:\n  Save Root: D:/KoeiTecmo\n  Backup Suffix: .orig\n  Debug Mode: true\n",
    )
    .unwrap();

    let config = manager.load_user_config().unwrap();

    assert_eq!(config.root_dir(), Utf8PathBuf::from("D:/KoeiTecmo"));
    assert_eq!(config.layout().backup_suffix, ".orig");
    assert_eq!(config.layout().auto_save_dir, "SAVEDATAAUTO");
    assert!(config.migrator_settings.debug_mode);
}

#[test]
fn test_configured_layout_drives_scan() {
    let (manager, temp_dir) = create_test_config_manager();
    let root = Utf8PathBuf::try_from(temp_dir.path().join("saves")).unwrap();
    let mut config = UserConfig::default();
    config.migrator_settings.root_dir = root.to_string();
    config.migrator_settings.auto_save_dir = "AUTOSAVEAUTO".to_string();
    manager.save_user_config(&config).unwrap();

    let ctx = ScanContext::new(root, "GameX", "765");
    let auto_dir = ctx.base_dir().join("AUTOSAVEAUTO");
    fs::create_dir_all(&auto_dir).unwrap();
    fs::write(auto_dir.join("SAVEDATA.BIN"), [0u8; 32]).unwrap();

    let loaded = manager.load_user_config().unwrap();
    let catalog = ArchiveCatalog::load(&ArchiveScanner::new(loaded.layout()), &ctx).unwrap();
    assert!(catalog.has_reference());
}

#[test]
fn test_discovery_under_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    fs::create_dir_all(root.join("GameX/Savedata/76500000000000002")).unwrap();
    fs::create_dir_all(root.join("GameX/Savedata/76500000000000001")).unwrap();
    fs::create_dir_all(root.join("GameY")).unwrap();

    assert_eq!(list_games(&root).unwrap(), vec!["GameX", "GameY"]);
    assert_eq!(
        list_profiles(&root, "GameX").unwrap(),
        vec!["76500000000000001", "76500000000000002"]
    );
    assert!(list_profiles(&root, "GameY").unwrap().is_empty());
    assert!(list_profiles(&root, "GameZ").unwrap().is_empty());
}

#[test]
fn test_remember_selection_round_trip() {
    let (manager, _temp_dir) = create_test_config_manager();
    let mut config = UserConfig::default();
    config.migrator_settings.backup_suffix = ".orig".to_string();
    manager.save_user_config(&config).unwrap();

    manager.remember_selection("GameX", "765").unwrap();

    let loaded = manager.load_user_config().unwrap();
    assert_eq!(loaded.last_game(), Some("GameX"));
    assert_eq!(loaded.last_profile(), Some("765"));
    // Other settings survive.
    assert_eq!(loaded.migrator_settings.backup_suffix, ".orig");
}
