use crate::models::layout::SaveLayout;
use crate::models::{ArchiveSlot, DeviceFlag};
use crate::services::error::ArchiveError;
use crate::services::marker::write_marker;
use camino::Utf8PathBuf;
use std::fs;

/// What happened to one slot during a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Backup written and flag patched.
    Migrated { backup_path: Utf8PathBuf },
    /// The backup copy failed; the save blob was not touched.
    BackupFailed(String),
    /// The backup was written but patching the flag failed.
    PatchFailed {
        backup_path: Utf8PathBuf,
        reason: String,
    },
}

impl MigrationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MigrationOutcome::Migrated { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMigration {
    pub name: String,
    pub file_path: Utf8PathBuf,
    pub outcome: MigrationOutcome,
}

/// Per-slot results of one migration run, in slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub reference: Option<DeviceFlag>,
    pub entries: Vec<SlotMigration>,
}

impl MigrationReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &SlotMigration> {
        self.entries.iter().filter(|e| e.outcome.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &SlotMigration> {
        self.entries.iter().filter(|e| !e.outcome.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.entries.iter().all(|e| e.outcome.is_success())
    }

    pub fn entry(&self, name: &str) -> Option<&SlotMigration> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Get a summary string of the run
    pub fn summary(&self) -> String {
        if self.entries.is_empty() {
            return "Nothing to migrate".to_string();
        }

        let migrated = self.succeeded().count();
        let failed = self.entries.len() - migrated;
        if failed == 0 {
            format!("{} slot(s) migrated", migrated)
        } else {
            format!("{} slot(s) migrated, {} failed", migrated, failed)
        }
    }
}

/// Backs up and patches the device flag of selected slots.
///
/// For each slot the backup copy always completes before the blob is
/// opened for writing, so a failed patch can be restored from the backup.
/// The executor never modifies the slots it is given; re-scan to see the
/// new statuses.
#[derive(Debug, Clone, Default)]
pub struct MigrationExecutor {
    layout: SaveLayout,
}

impl MigrationExecutor {
    pub fn new(layout: SaveLayout) -> Self {
        Self { layout }
    }

    /// Migrates every slot that is both selected and `NeedsMigration`.
    ///
    /// Other slots are ignored. A failure on one slot is recorded in the
    /// report and processing continues with the next.
    pub fn migrate(&self, slots: &[ArchiveSlot], reference: &DeviceFlag) -> MigrationReport {
        let entries: Vec<SlotMigration> = slots
            .iter()
            .filter(|slot| slot.is_selected_migratable())
            .map(|slot| SlotMigration {
                name: slot.name().to_string(),
                file_path: slot.file_path().to_path_buf(),
                outcome: self.migrate_slot(slot, reference),
            })
            .collect();

        let report = MigrationReport {
            reference: Some(*reference),
            entries,
        };
        tracing::info!("Migration to {} finished: {}", reference, report.summary());
        report
    }

    fn migrate_slot(&self, slot: &ArchiveSlot, reference: &DeviceFlag) -> MigrationOutcome {
        let file_path = slot.file_path();
        let backup_path = self.layout.backup_path(file_path);

        if let Err(e) = fs::copy(file_path, &backup_path) {
            let error = ArchiveError::io(backup_path.clone(), e);
            tracing::warn!("{}: backup failed, skipping patch: {}", slot.name(), error);
            return MigrationOutcome::BackupFailed(error.to_string());
        }
        tracing::debug!("{}: backed up to {}", slot.name(), backup_path);

        match write_marker(file_path, reference) {
            Ok(()) => {
                tracing::info!("{}: migrated to {}", slot.name(), reference);
                MigrationOutcome::Migrated { backup_path }
            }
            Err(e) => {
                tracing::warn!(
                    "{}: patch failed, original kept at {}: {}",
                    slot.name(),
                    backup_path,
                    e
                );
                MigrationOutcome::PatchFailed {
                    backup_path,
                    reason: e.to_string(),
                }
            }
        }
    }
}
