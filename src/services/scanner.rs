//! Save slot discovery for one profile directory.
//!
//! The scanner reads the auto-save's device flag (the reference) and lists the
//! numbered slot directories beside it. It does not read the slot blobs;
//! that is left to [`classify`](crate::services::classifier::classify).

use crate::models::layout::SaveLayout;
use crate::models::{ReferenceMarker, ScanContext, SlotCandidate};
use crate::services::error::{ArchiveError, ArchiveResult};
use crate::services::marker::read_marker;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Result of scanning one profile directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotScan {
    pub base_dir: Utf8PathBuf,
    pub reference: ReferenceMarker,
    /// Slot directories ordered by slot number, then name.
    pub candidates: Vec<SlotCandidate>,
}

/// Enumerates save slots according to a [`SaveLayout`].
#[derive(Debug, Clone, Default)]
pub struct ArchiveScanner {
    layout: SaveLayout,
}

impl ArchiveScanner {
    pub fn new(layout: SaveLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &SaveLayout {
        &self.layout
    }

    /// Scans the profile directory selected by `ctx`.
    pub fn scan_context(&self, ctx: &ScanContext) -> ArchiveResult<SlotScan> {
        self.scan(&ctx.base_dir())
    }

    /// Scans `base_dir` for the reference marker and slot directories.
    ///
    /// A missing or unreadable auto-save does not fail the scan; it is
    /// reported through [`SlotScan::reference`].
    ///
    /// # Errors
    ///
    /// - [`ArchiveError::DirectoryUnavailable`] if `base_dir` is not a directory
    /// - [`ArchiveError::Io`] if listing the directory fails part-way
    pub fn scan(&self, base_dir: &Utf8Path) -> ArchiveResult<SlotScan> {
        if !base_dir.is_dir() {
            tracing::warn!("Save directory unavailable: {}", base_dir);
            return Err(ArchiveError::DirectoryUnavailable {
                path: base_dir.to_path_buf(),
            });
        }

        let reference = self.read_reference(base_dir);
        let candidates = self.enumerate_slots(base_dir)?;

        tracing::info!(
            "Scanned {}: {} slot(s), reference {}",
            base_dir,
            candidates.len(),
            match &reference {
                ReferenceMarker::Present(flag) => flag.to_hex(),
                ReferenceMarker::Missing => "missing".to_string(),
                ReferenceMarker::Unreadable(_) => "unreadable".to_string(),
            }
        );

        Ok(SlotScan {
            base_dir: base_dir.to_path_buf(),
            reference,
            candidates,
        })
    }

    fn read_reference(&self, base_dir: &Utf8Path) -> ReferenceMarker {
        let auto_file = self.layout.auto_save_file(base_dir);
        if !auto_file.is_file() {
            tracing::debug!("No auto-save at {}", auto_file);
            return ReferenceMarker::Missing;
        }

        match read_marker(&auto_file) {
            Ok(flag) => ReferenceMarker::Present(flag),
            Err(e) => {
                tracing::warn!("Reference marker unavailable: {}", e);
                ReferenceMarker::Unreadable(e.to_string())
            }
        }
    }

    fn enumerate_slots(&self, base_dir: &Utf8Path) -> ArchiveResult<Vec<SlotCandidate>> {
        let entries = fs::read_dir(base_dir).map_err(|e| ArchiveError::io(base_dir, e))?;

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ArchiveError::io(base_dir, e))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                tracing::debug!("Skipping non UTF-8 directory name in {}", base_dir);
                continue;
            };
            if name == self.layout.auto_save_dir {
                continue;
            }
            let Some(number) = self.layout.slot_number(&name) else {
                continue;
            };

            let slot_dir = base_dir.join(&name);
            candidates.push(SlotCandidate {
                file_path: self.layout.save_file(&slot_dir),
                name,
                number,
            });
        }

        candidates.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.name.cmp(&b.name)));
        Ok(candidates)
    }
}
