//! Game and profile discovery under a save root.
//!
//! ```text
//! <root>/<game>/Savedata/<profile>/
//! ```
//!
//! Both listings return directory names sorted alphabetically. A directory
//! that does not exist simply has nothing in it.

use crate::models::context::game_savedata_dir;
use crate::services::error::{ArchiveError, ArchiveResult};
use camino::Utf8Path;
use std::fs;

/// Lists the game directories directly under `root_dir`.
pub fn list_games(root_dir: &Utf8Path) -> ArchiveResult<Vec<String>> {
    list_subdirectories(root_dir)
}

/// Lists the profile directories of `game` (its `Savedata` children).
pub fn list_profiles(root_dir: &Utf8Path, game: &str) -> ArchiveResult<Vec<String>> {
    list_subdirectories(&game_savedata_dir(root_dir, game))
}

fn list_subdirectories(dir: &Utf8Path) -> ArchiveResult<Vec<String>> {
    if !dir.is_dir() {
        tracing::debug!("{} does not exist, nothing to list", dir);
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ArchiveError::io(dir, e))? {
        let entry = entry.map_err(|e| ArchiveError::io(dir, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::debug!("Skipping non UTF-8 directory {:?} in {}", raw, dir),
        }
    }

    names.sort();
    Ok(names)
}
