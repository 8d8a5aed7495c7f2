use crate::models::layout::DEVICE_FLAG_LENGTH;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// The 8-byte device identity embedded in a save blob.
///
/// Opaque: compared byte-for-byte, never interpreted as a number.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceFlag([u8; DEVICE_FLAG_LENGTH]);

impl DeviceFlag {
    pub const fn new(bytes: [u8; DEVICE_FLAG_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DEVICE_FLAG_LENGTH] {
        &self.0
    }

    /// Lowercase hex rendering, e.g. `0102030405060708`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; DEVICE_FLAG_LENGTH]> for DeviceFlag {
    fn from(bytes: [u8; DEVICE_FLAG_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for DeviceFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceFlag({})", self.to_hex())
    }
}

impl fmt::Display for DeviceFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Migration status of a single slot.
///
/// Presentation layers map these to display text; the library never
/// produces user-facing labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotStatus {
    /// The slot directory exists but has no save blob.
    FileMissing,
    /// No reference marker is available to compare against.
    UnknownReference,
    /// The slot's flag already equals the reference.
    UpToDate,
    /// The slot's flag differs from the reference.
    NeedsMigration,
}

impl SlotStatus {
    pub const ALL: [SlotStatus; 4] = [
        SlotStatus::FileMissing,
        SlotStatus::UnknownReference,
        SlotStatus::UpToDate,
        SlotStatus::NeedsMigration,
    ];

    pub fn is_migratable(self) -> bool {
        self == SlotStatus::NeedsMigration
    }
}

/// The auto-save marker a scan compares slots against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceMarker {
    Present(DeviceFlag),
    /// The auto-save file does not exist.
    Missing,
    /// The auto-save file exists but its marker could not be read.
    Unreadable(String),
}

impl ReferenceMarker {
    pub fn flag(&self) -> Option<&DeviceFlag> {
        match self {
            ReferenceMarker::Present(flag) => Some(flag),
            ReferenceMarker::Missing | ReferenceMarker::Unreadable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.flag().is_some()
    }
}

/// A slot directory found by the scanner, before its blob has been read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCandidate {
    pub name: String,
    pub number: u64,
    pub file_path: Utf8PathBuf,
}

/// One classified save slot.
///
/// Status and flag are fixed at classification time. Only `selected` is
/// meant to be changed by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSlot {
    name: String,
    number: u64,
    file_path: Utf8PathBuf,
    status: SlotStatus,
    flag: Option<DeviceFlag>,
    pub selected: bool,
}

impl ArchiveSlot {
    pub(crate) fn classified(
        candidate: SlotCandidate,
        status: SlotStatus,
        flag: Option<DeviceFlag>,
    ) -> Self {
        // A missing file never yields a flag.
        let flag = if status == SlotStatus::FileMissing {
            None
        } else {
            flag
        };

        Self {
            name: candidate.name,
            number: candidate.number,
            file_path: candidate.file_path,
            status,
            flag,
            selected: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn file_path(&self) -> &Utf8Path {
        &self.file_path
    }

    pub fn status(&self) -> SlotStatus {
        self.status
    }

    /// The flag read from disk, if classification read one.
    pub fn flag(&self) -> Option<&DeviceFlag> {
        self.flag.as_ref()
    }

    pub fn is_migratable(&self) -> bool {
        self.status.is_migratable()
    }

    pub fn is_selected_migratable(&self) -> bool {
        self.selected && self.is_migratable()
    }
}
