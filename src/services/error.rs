use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while reading, scanning, or patching save archives.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is truncated: {available} byte(s) available at the device flag offset, 8 required")]
    TruncatedFile { path: Utf8PathBuf, available: u64 },

    #[error("Directory unavailable: {path}")]
    DirectoryUnavailable { path: Utf8PathBuf },
}

impl ArchiveError {
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        ArchiveError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ArchiveResult<T> = std::result::Result<T, ArchiveError>;
