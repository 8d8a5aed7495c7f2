//! Data models for the archive migrator.
//!
//! - [`DeviceFlag`]: The opaque 8-byte identity marker stored in every save blob
//! - [`ArchiveSlot`] / [`SlotStatus`]: One classified save slot and its migration status
//! - [`ReferenceMarker`]: The auto-save's flag, or why it is unavailable
//! - [`ScanContext`]: Root directory, game and profile selecting the tree to scan
//! - [`SaveLayout`]: Directory and file naming rules of a save tree
//! - [`UserConfig`]: User settings loaded from `Migrator Settings.yaml`
//!
//! The [`ArchiveCatalog`](crate::state::ArchiveCatalog) holding a whole scan
//! result lives in [`crate::state`].

pub mod archive;
pub mod config;
pub mod context;
pub mod layout;

pub use archive::{ArchiveSlot, DeviceFlag, ReferenceMarker, SlotCandidate, SlotStatus};
pub use config::{MigratorSettings, UserConfig};
pub use context::ScanContext;
pub use layout::SaveLayout;
