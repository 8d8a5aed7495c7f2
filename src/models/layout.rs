use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;

/// Byte offset of the device flag inside a save blob.
pub const DEVICE_FLAG_OFFSET: u64 = 0x10;

/// Length of the device flag in bytes.
pub const DEVICE_FLAG_LENGTH: usize = 8;

/// Directory under each game that holds the per-profile save folders.
pub const SAVEDATA_DIR: &str = "Savedata";

/// Directory holding the auto-save used as the migration reference.
pub const AUTO_SAVE_DIR: &str = "SAVEDATAAUTO";

/// Fixed name of the save blob inside every slot directory.
pub const SAVE_FILE_NAME: &str = "SAVEDATA.BIN";

/// Suffix appended to a save blob's file name to form its backup.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Literal prefix of a numbered slot directory (`SAVEDATA1`, `SAVEDATA2`, ...).
pub const SLOT_PREFIX: &str = "SAVEDATA";

/// Filesystem naming rules for one profile's save tree.
///
/// ```text
/// <root>/<game>/Savedata/<profile>/
///     SAVEDATAAUTO/SAVEDATA.BIN      reference marker
///     SAVEDATA<N>/SAVEDATA.BIN       one per slot
///     SAVEDATA<N>/SAVEDATA.BIN.bak   written by migration
/// ```
///
/// The defaults are the literals above. The auto-save directory and backup
/// suffix can be overridden from the user configuration.
#[derive(Debug, Clone)]
pub struct SaveLayout {
    pub auto_save_dir: String,
    pub save_file_name: String,
    pub backup_suffix: String,
    slot_pattern: Regex,
}

impl SaveLayout {
    pub fn new(auto_save_dir: impl Into<String>, backup_suffix: impl Into<String>) -> Self {
        Self {
            auto_save_dir: auto_save_dir.into(),
            save_file_name: SAVE_FILE_NAME.to_string(),
            backup_suffix: backup_suffix.into(),
            slot_pattern: Regex::new(&format!(r"^{}(\d+)$", regex::escape(SLOT_PREFIX)))
                .expect("Invalid slot directory regex"),
        }
    }

    /// Returns the slot number if `dir_name` is a numbered slot directory.
    ///
    /// Numbers too large for a `u64` still match and sort last.
    pub fn slot_number(&self, dir_name: &str) -> Option<u64> {
        let captures = self.slot_pattern.captures(dir_name)?;
        Some(captures[1].parse().unwrap_or(u64::MAX))
    }

    pub fn is_slot_dir(&self, dir_name: &str) -> bool {
        self.slot_pattern.is_match(dir_name)
    }

    pub fn auto_save_file(&self, base_dir: &Utf8Path) -> Utf8PathBuf {
        base_dir.join(&self.auto_save_dir).join(&self.save_file_name)
    }

    pub fn save_file(&self, slot_dir: &Utf8Path) -> Utf8PathBuf {
        slot_dir.join(&self.save_file_name)
    }

    /// Backup path for a save blob: the original path with the suffix appended.
    pub fn backup_path(&self, save_file: &Utf8Path) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}{}", save_file, self.backup_suffix))
    }
}

impl Default for SaveLayout {
    fn default() -> Self {
        Self::new(AUTO_SAVE_DIR, BACKUP_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_pattern_matches_numbered_dirs() {
        let layout = SaveLayout::default();
        assert_eq!(layout.slot_number("SAVEDATA1"), Some(1));
        assert_eq!(layout.slot_number("SAVEDATA010"), Some(10));
        assert!(layout.is_slot_dir("SAVEDATA99"));
    }

    #[test]
    fn test_slot_pattern_rejects_other_dirs() {
        let layout = SaveLayout::default();
        assert!(!layout.is_slot_dir("SAVEDATAAUTO"));
        assert!(!layout.is_slot_dir("SAVEDATA"));
        assert!(!layout.is_slot_dir("savedata1"));
        assert!(!layout.is_slot_dir("SAVEDATA1a"));
        assert!(!layout.is_slot_dir("XSAVEDATA1"));
    }

    #[test]
    fn test_oversized_slot_number_sorts_last() {
        let layout = SaveLayout::default();
        assert_eq!(
            layout.slot_number("SAVEDATA99999999999999999999999"),
            Some(u64::MAX)
        );
    }

    #[test]
    fn test_paths() {
        let layout = SaveLayout::default();
        let base = Utf8Path::new("/saves/GameX/Savedata/765");

        assert_eq!(
            layout.auto_save_file(base),
            Utf8PathBuf::from("/saves/GameX/Savedata/765/SAVEDATAAUTO/SAVEDATA.BIN")
        );

        let file = layout.save_file(&base.join("SAVEDATA2"));
        assert_eq!(
            layout.backup_path(&file),
            Utf8PathBuf::from("/saves/GameX/Savedata/765/SAVEDATA2/SAVEDATA.BIN.bak")
        );
    }

    #[test]
    fn test_custom_suffix() {
        let layout = SaveLayout::new("AUTO", ".orig");
        assert_eq!(
            layout.backup_path(Utf8Path::new("a/SAVEDATA.BIN")),
            Utf8PathBuf::from("a/SAVEDATA.BIN.orig")
        );
        assert_eq!(
            layout.auto_save_file(Utf8Path::new("base")),
            Utf8PathBuf::from("base/AUTO/SAVEDATA.BIN")
        );
    }
}
