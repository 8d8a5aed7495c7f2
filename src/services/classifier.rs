//! Slot status classification against the reference marker.
//!
//! The first matching rule wins:
//!
//! | condition                          | status             |
//! |------------------------------------|--------------------|
//! | no save blob at the slot path      | `FileMissing`      |
//! | no reference marker                | `UnknownReference` |
//! | blob flag differs from reference   | `NeedsMigration`   |
//! | blob flag equals reference         | `UpToDate`         |

use crate::models::{ArchiveSlot, DeviceFlag, SlotCandidate, SlotStatus};
use crate::services::error::ArchiveResult;
use crate::services::marker::read_marker;
use camino::Utf8Path;

/// Status of one blob plus the flag read to decide it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: SlotStatus,
    pub flag: Option<DeviceFlag>,
}

/// Classifies the save blob at `file_path`.
///
/// The blob is only read when a reference is available.
///
/// # Errors
///
/// Returns the read error if the blob exists but its flag cannot be read.
pub fn classify(file_path: &Utf8Path, reference: Option<&DeviceFlag>) -> ArchiveResult<Classification> {
    if !file_path.is_file() {
        return Ok(Classification {
            status: SlotStatus::FileMissing,
            flag: None,
        });
    }

    let Some(reference) = reference else {
        return Ok(Classification {
            status: SlotStatus::UnknownReference,
            flag: None,
        });
    };

    let flag = read_marker(file_path)?;
    let status = if flag == *reference {
        SlotStatus::UpToDate
    } else {
        SlotStatus::NeedsMigration
    };

    Ok(Classification {
        status,
        flag: Some(flag),
    })
}

pub fn classify_slot(
    candidate: SlotCandidate,
    reference: Option<&DeviceFlag>,
) -> ArchiveResult<ArchiveSlot> {
    let Classification { status, flag } = classify(&candidate.file_path, reference)?;
    tracing::debug!("{} -> {:?}", candidate.name, status);
    Ok(ArchiveSlot::classified(candidate, status, flag))
}

/// Classifies every candidate, preserving input order.
///
/// Stops at the first read error.
#[cfg(not(feature = "parallel"))]
pub fn classify_all(
    candidates: Vec<SlotCandidate>,
    reference: Option<&DeviceFlag>,
) -> ArchiveResult<Vec<ArchiveSlot>> {
    candidates
        .into_iter()
        .map(|candidate| classify_slot(candidate, reference))
        .collect()
}

/// Classifies every candidate on the rayon pool, preserving input order.
///
/// Slots are path-disjoint, so reads need no coordination.
#[cfg(feature = "parallel")]
pub fn classify_all(
    candidates: Vec<SlotCandidate>,
    reference: Option<&DeviceFlag>,
) -> ArchiveResult<Vec<ArchiveSlot>> {
    use rayon::prelude::*;

    candidates
        .into_par_iter()
        .map(|candidate| classify_slot(candidate, reference))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::error::ArchiveError;
    use camino::Utf8PathBuf;
    use std::fs;
    use tempfile::TempDir;

    fn write_blob(path: &Utf8Path, flag: [u8; 8]) {
        let mut bytes = vec![0xAA; 16];
        bytes.extend_from_slice(&flag);
        bytes.extend_from_slice(&[0x55; 16]);
        fs::write(path, bytes).unwrap();
    }

    fn temp_path(temp_dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::try_from(temp_dir.path().join(name)).unwrap()
    }

    #[test]
    fn test_missing_file_wins_over_reference() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_path(&temp_dir, "SAVEDATA.BIN");
        let reference = DeviceFlag::new([1; 8]);

        assert_eq!(classify(&path, Some(&reference)).unwrap().status, SlotStatus::FileMissing);
        assert_eq!(classify(&path, None).unwrap().status, SlotStatus::FileMissing);
    }

    #[test]
    fn test_unknown_reference_skips_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_path(&temp_dir, "SAVEDATA.BIN");
        // Too short to read; must not matter without a reference.
        fs::write(&path, [0u8; 4]).unwrap();

        let result = classify(&path, None).unwrap();
        assert_eq!(result.status, SlotStatus::UnknownReference);
        assert!(result.flag.is_none());
    }

    #[test]
    fn test_up_to_date_and_needs_migration() {
        let temp_dir = TempDir::new().unwrap();
        let same = temp_path(&temp_dir, "same.bin");
        let other = temp_path(&temp_dir, "other.bin");
        write_blob(&same, [1, 2, 3, 4, 5, 6, 7, 8]);
        write_blob(&other, [1, 2, 3, 4, 5, 6, 7, 9]);
        let reference = DeviceFlag::new([1, 2, 3, 4, 5, 6, 7, 8]);

        assert_eq!(classify(&same, Some(&reference)).unwrap().status, SlotStatus::UpToDate);

        let migrate = classify(&other, Some(&reference)).unwrap();
        assert_eq!(migrate.status, SlotStatus::NeedsMigration);
        assert_eq!(migrate.flag, Some(DeviceFlag::new([1, 2, 3, 4, 5, 6, 7, 9])));
    }

    #[test]
    fn test_truncated_slot_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_path(&temp_dir, "SAVEDATA.BIN");
        fs::write(&path, [0u8; 18]).unwrap();

        let result = classify(&path, Some(&DeviceFlag::new([0; 8])));
        assert!(matches!(result, Err(ArchiveError::TruncatedFile { .. })));
    }

    #[test]
    fn test_classify_all_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let reference = DeviceFlag::new([4; 8]);
        let mut candidates = Vec::new();
        for (number, flag) in [(1u64, [4u8; 8]), (2, [5; 8]), (3, [4; 8])] {
            let path = temp_path(&temp_dir, &format!("slot{}.bin", number));
            write_blob(&path, flag);
            candidates.push(SlotCandidate {
                name: format!("SAVEDATA{}", number),
                number,
                file_path: path,
            });
        }

        let slots = classify_all(candidates, Some(&reference)).unwrap();
        let statuses: Vec<SlotStatus> = slots.iter().map(|s| s.status()).collect();
        assert_eq!(
            statuses,
            vec![SlotStatus::UpToDate, SlotStatus::NeedsMigration, SlotStatus::UpToDate]
        );
        assert_eq!(slots[1].name(), "SAVEDATA2");
    }
}
