use crate::models::layout::{AUTO_SAVE_DIR, BACKUP_SUFFIX, SaveLayout};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// User configuration from Migrator Settings.yaml
///
/// Contains the save root, the last game/profile used and layout overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "Migrator_Settings")]
    pub migrator_settings: MigratorSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigratorSettings {
    #[serde(rename = "Save Root", default = "default_root_dir")]
    pub root_dir: String,

    #[serde(rename = "Last Game", default)]
    pub last_game: String,

    #[serde(rename = "Last Profile", default)]
    pub last_profile: String,

    #[serde(rename = "Auto Save Dir", default = "default_auto_save_dir")]
    pub auto_save_dir: String,

    #[serde(rename = "Backup Suffix", default = "default_backup_suffix")]
    pub backup_suffix: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

impl Default for MigratorSettings {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            last_game: String::new(),
            last_profile: String::new(),
            auto_save_dir: default_auto_save_dir(),
            backup_suffix: default_backup_suffix(),
            debug_mode: false,
        }
    }
}

impl UserConfig {
    /// Save layout with this configuration's overrides applied.
    ///
    /// Blank overrides fall back to the built-in names.
    pub fn layout(&self) -> SaveLayout {
        let settings = &self.migrator_settings;
        let auto_save_dir = non_blank(&settings.auto_save_dir).unwrap_or(AUTO_SAVE_DIR);
        let backup_suffix = non_blank(&settings.backup_suffix).unwrap_or(BACKUP_SUFFIX);
        SaveLayout::new(auto_save_dir, backup_suffix)
    }

    pub fn root_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(&self.migrator_settings.root_dir)
    }

    pub fn last_game(&self) -> Option<&str> {
        non_blank(&self.migrator_settings.last_game)
    }

    pub fn last_profile(&self) -> Option<&str> {
        non_blank(&self.migrator_settings.last_profile)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// `<home>/Documents/KoeiTecmo`, where the PC ports keep their saves.
fn default_root_dir() -> String {
    let home = std::env::var("USERPROFILE")
        .or_else(|_| std::env::var("HOME"))
        .unwrap_or_default();
    Utf8PathBuf::from(home)
        .join("Documents")
        .join("KoeiTecmo")
        .into_string()
}

fn default_auto_save_dir() -> String {
    AUTO_SAVE_DIR.to_string()
}

fn default_backup_suffix() -> String {
    BACKUP_SUFFIX.to_string()
}
