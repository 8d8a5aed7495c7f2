use crate::models::layout::SAVEDATA_DIR;
use camino::{Utf8Path, Utf8PathBuf};

/// Selects which profile's save tree a scan looks at.
///
/// The base directory is `<root_dir>/<game>/Savedata/<profile>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanContext {
    pub root_dir: Utf8PathBuf,
    pub game: String,
    pub profile: String,
}

impl ScanContext {
    pub fn new(
        root_dir: impl Into<Utf8PathBuf>,
        game: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            root_dir: root_dir.into(),
            game: game.into(),
            profile: profile.into(),
        }
    }

    /// `<root_dir>/<game>/Savedata`
    pub fn game_savedata_dir(&self) -> Utf8PathBuf {
        game_savedata_dir(&self.root_dir, &self.game)
    }

    pub fn base_dir(&self) -> Utf8PathBuf {
        self.game_savedata_dir().join(&self.profile)
    }
}

pub(crate) fn game_savedata_dir(root_dir: &Utf8Path, game: &str) -> Utf8PathBuf {
    root_dir.join(game).join(SAVEDATA_DIR)
}
