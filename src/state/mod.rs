// Catalog state module
//
// This module provides the ArchiveCatalog: the result of the latest scan plus
// the caller's slot selection. It is a plain value owned by the caller.

use crate::models::{ArchiveSlot, DeviceFlag, ReferenceMarker, ScanContext, SlotStatus};
use crate::services::{
    ArchiveResult, ArchiveScanner, MigrationExecutor, MigrationReport, SlotScan, classify_all,
};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;

/// Slots and reference marker of one profile, as of the last scan.
///
/// Slot statuses come only from classification, so the catalog never
/// reflects a migration until it is refreshed. Every refresh rebuilds all
/// slots and resets the selection.
///
/// # Usage
///
/// - [`load()`](Self::load) / [`refresh()`](Self::refresh) to scan and classify
/// - [`set_selected()`](Self::set_selected) and friends to drive selection
/// - [`has_migratable()`](Self::has_migratable) to decide whether to offer migration
/// - [`has_selected_migratable()`](Self::has_selected_migratable) to enable it
/// - [`migrate_selected()`](Self::migrate_selected) to run the executor
#[derive(Debug, Clone)]
pub struct ArchiveCatalog {
    base_dir: Option<Utf8PathBuf>,
    reference: ReferenceMarker,
    slots: Vec<ArchiveSlot>,
}

impl Default for ArchiveCatalog {
    fn default() -> Self {
        Self {
            base_dir: None,
            reference: ReferenceMarker::Missing,
            slots: Vec::new(),
        }
    }
}

impl ArchiveCatalog {
    /// Classify the slots of a finished scan.
    ///
    /// # Errors
    /// Fails if an existing slot blob cannot be read.
    pub fn from_scan(scan: SlotScan) -> ArchiveResult<Self> {
        let slots = classify_all(scan.candidates, scan.reference.flag())?;
        Ok(Self {
            base_dir: Some(scan.base_dir),
            reference: scan.reference,
            slots,
        })
    }

    /// Scan and classify the profile selected by `ctx`.
    pub fn load(scanner: &ArchiveScanner, ctx: &ScanContext) -> ArchiveResult<Self> {
        Self::from_scan(scanner.scan_context(ctx)?)
    }

    /// Re-scan in place.
    ///
    /// On error the catalog keeps its previous contents.
    pub fn refresh(&mut self, scanner: &ArchiveScanner, ctx: &ScanContext) -> ArchiveResult<()> {
        *self = Self::load(scanner, ctx)?;
        Ok(())
    }

    pub fn base_dir(&self) -> Option<&Utf8Path> {
        self.base_dir.as_deref()
    }

    pub fn reference(&self) -> &ReferenceMarker {
        &self.reference
    }

    pub fn reference_flag(&self) -> Option<&DeviceFlag> {
        self.reference.flag()
    }

    pub fn has_reference(&self) -> bool {
        self.reference.is_available()
    }

    pub fn slots(&self) -> &[ArchiveSlot] {
        &self.slots
    }

    pub fn slot(&self, name: &str) -> Option<&ArchiveSlot> {
        self.slots.iter().find(|s| s.name() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Set the selection of one slot. Returns false if no slot has that name.
    pub fn set_selected(&mut self, name: &str, selected: bool) -> bool {
        match self.slots.iter_mut().find(|s| s.name() == name) {
            Some(slot) => {
                slot.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Select exactly the named slots.
    ///
    /// Returns the names that matched no slot.
    pub fn select_only<I, S>(&mut self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.clear_selection();
        names
            .into_iter()
            .filter(|name| !self.set_selected(name.as_ref(), true))
            .map(|name| name.as_ref().to_string())
            .collect()
    }

    pub fn select_all_migratable(&mut self) {
        for slot in &mut self.slots {
            slot.selected = slot.is_migratable();
        }
    }

    pub fn clear_selection(&mut self) {
        for slot in &mut self.slots {
            slot.selected = false;
        }
    }

    pub fn selected_names(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.name())
            .collect()
    }

    /// Whether any slot needs migration.
    pub fn has_migratable(&self) -> bool {
        self.slots.iter().any(|s| s.is_migratable())
    }

    /// Whether any selected slot needs migration.
    pub fn has_selected_migratable(&self) -> bool {
        self.slots.iter().any(|s| s.is_selected_migratable())
    }

    /// Number of slots per status, in [`SlotStatus::ALL`] order.
    pub fn status_counts(&self) -> IndexMap<SlotStatus, usize> {
        let mut counts: IndexMap<SlotStatus, usize> =
            SlotStatus::ALL.iter().map(|status| (*status, 0)).collect();
        for slot in &self.slots {
            *counts.entry(slot.status()).or_insert(0) += 1;
        }
        counts
    }

    /// Migrate the selected slots to this catalog's reference marker.
    ///
    /// Without a reference nothing can need migration and the report is empty.
    /// The catalog itself is unchanged; call [`refresh()`](Self::refresh)
    /// afterwards.
    pub fn migrate_selected(&self, executor: &MigrationExecutor) -> MigrationReport {
        match self.reference.flag() {
            Some(reference) => executor.migrate(&self.slots, reference),
            None => {
                tracing::info!("No reference marker, nothing to migrate");
                MigrationReport::default()
            }
        }
    }
}
