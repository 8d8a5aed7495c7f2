//! Device flag access for save blobs.
//!
//! A save blob carries its 8-byte device flag at bytes `[16, 24)`. Everything
//! else in the file is opaque payload and is never touched here.

use crate::models::DeviceFlag;
use crate::models::layout::{DEVICE_FLAG_LENGTH, DEVICE_FLAG_OFFSET};
use crate::services::error::{ArchiveError, ArchiveResult};
use camino::Utf8Path;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};

/// Reads the device flag of the save blob at `path`.
///
/// # Errors
///
/// - [`ArchiveError::Io`] if the file cannot be opened or read
/// - [`ArchiveError::TruncatedFile`] if fewer than 8 bytes exist at the offset
pub fn read_marker(path: &Utf8Path) -> ArchiveResult<DeviceFlag> {
    let mut file = File::open(path).map_err(|e| ArchiveError::io(path, e))?;
    file.seek(SeekFrom::Start(DEVICE_FLAG_OFFSET))
        .map_err(|e| ArchiveError::io(path, e))?;

    let mut buffer = Vec::with_capacity(DEVICE_FLAG_LENGTH);
    file.take(DEVICE_FLAG_LENGTH as u64)
        .read_to_end(&mut buffer)
        .map_err(|e| ArchiveError::io(path, e))?;

    let bytes: [u8; DEVICE_FLAG_LENGTH] =
        buffer
            .as_slice()
            .try_into()
            .map_err(|_| ArchiveError::TruncatedFile {
                path: path.to_path_buf(),
                available: buffer.len() as u64,
            })?;

    tracing::debug!("Read device flag {} from {}", hex::encode(bytes), path);
    Ok(DeviceFlag::new(bytes))
}

/// Overwrites the device flag of an existing save blob in place.
///
/// The file is neither created nor truncated, and a file too short to hold
/// a flag is rejected rather than extended.
///
/// # Errors
///
/// - [`ArchiveError::Io`] if the file cannot be opened, written or synced
/// - [`ArchiveError::TruncatedFile`] if the file ends before byte 24
pub fn write_marker(path: &Utf8Path, flag: &DeviceFlag) -> ArchiveResult<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|e| ArchiveError::io(path, e))?;

    let len = file
        .metadata()
        .map_err(|e| ArchiveError::io(path, e))?
        .len();
    if len < DEVICE_FLAG_OFFSET + DEVICE_FLAG_LENGTH as u64 {
        return Err(ArchiveError::TruncatedFile {
            path: path.to_path_buf(),
            available: len.saturating_sub(DEVICE_FLAG_OFFSET),
        });
    }

    file.seek(SeekFrom::Start(DEVICE_FLAG_OFFSET))
        .map_err(|e| ArchiveError::io(path, e))?;
    file.write_all(flag.as_bytes())
        .map_err(|e| ArchiveError::io(path, e))?;
    file.sync_all().map_err(|e| ArchiveError::io(path, e))?;

    tracing::debug!("Wrote device flag {} to {}", flag, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use tempfile::TempDir;

    fn blob(flag: [u8; 8], tail: usize) -> Vec<u8> {
        let mut bytes: Vec<u8> = (0u8..16).collect();
        bytes.extend_from_slice(&flag);
        bytes.extend(std::iter::repeat_n(0xEE, tail));
        bytes
    }

    fn temp_file(contents: &[u8]) -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("SAVEDATA.BIN")).unwrap();
        fs::write(&path, contents).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_read_marker() {
        let (_dir, path) = temp_file(&blob([1, 2, 3, 4, 5, 6, 7, 8], 32));
        let flag = read_marker(&path).unwrap();
        assert_eq!(flag.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_read_marker_exact_length_file() {
        let (_dir, path) = temp_file(&blob([0xFF; 8], 0));
        assert_eq!(read_marker(&path).unwrap(), DeviceFlag::new([0xFF; 8]));
    }

    #[test]
    fn test_read_marker_truncated() {
        let (_dir, path) = temp_file(&blob([1, 2, 3, 4, 5, 6, 7, 8], 0)[..20]);
        match read_marker(&path) {
            Err(ArchiveError::TruncatedFile { available, .. }) => assert_eq!(available, 4),
            other => panic!("expected TruncatedFile, got {:?}", other),
        }
    }

    #[test]
    fn test_read_marker_shorter_than_offset() {
        let (_dir, path) = temp_file(&[0u8; 10]);
        match read_marker(&path) {
            Err(ArchiveError::TruncatedFile { available, .. }) => assert_eq!(available, 0),
            other => panic!("expected TruncatedFile, got {:?}", other),
        }
    }

    #[test]
    fn test_read_marker_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("nope.bin")).unwrap();
        assert!(matches!(read_marker(&path), Err(ArchiveError::Io { .. })));
    }

    #[test]
    fn test_write_marker_touches_only_flag_bytes() {
        let original = blob([0xFF; 8], 64);
        let (_dir, path) = temp_file(&original);

        write_marker(&path, &DeviceFlag::new([1, 2, 3, 4, 5, 6, 7, 8])).unwrap();

        let patched = fs::read(&path).unwrap();
        assert_eq!(patched.len(), original.len());
        assert_eq!(&patched[..16], &original[..16]);
        assert_eq!(&patched[16..24], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&patched[24..], &original[24..]);
    }

    #[test]
    fn test_write_marker_rejects_short_file() {
        let (_dir, path) = temp_file(&[0u8; 20]);
        let result = write_marker(&path, &DeviceFlag::new([1; 8]));
        assert!(matches!(
            result,
            Err(ArchiveError::TruncatedFile { available: 4, .. })
        ));
        assert_eq!(fs::read(&path).unwrap(), vec![0u8; 20]);
    }

    #[test]
    fn test_write_marker_does_not_create() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("missing.bin")).unwrap();
        assert!(write_marker(&path, &DeviceFlag::new([1; 8])).is_err());
        assert!(!path.exists());
    }
}
